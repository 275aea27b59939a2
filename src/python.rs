use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::{Action, LineSet, Selection};

#[pyfunction]
fn parse_hl_lines(line: &str) -> Vec<u32> {
    crate::parse_line_set(line).sorted()
}

#[pyfunction]
fn format_hl_lines(lines: Vec<u32>) -> String {
    crate::format_attr(&lines.into_iter().collect::<LineSet>())
}

#[pyfunction]
fn splice_attribute(attr: &str, line: &str) -> String {
    crate::splice_attribute(attr, line)
}

#[pyfunction]
fn highlighted_lines(text: &str) -> Vec<usize> {
    crate::highlighted_lines(text)
}

#[pyfunction]
#[pyo3(signature = (text, anchor, head, action = "toggle"))]
fn highlight(text: &str, anchor: usize, head: usize, action: &str) -> PyResult<Vec<String>> {
    let action = match action {
        "highlight" => Action::Highlight,
        "unhighlight" => Action::Unhighlight,
        "toggle" => Action::Toggle,
        other => return Err(PyValueError::new_err(format!("unknown action: {other}"))),
    };
    let res = crate::edit_text(text, &[Selection::new(anchor, head)], action)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(res.lines)
}

#[pymodule]
fn hllines(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(parse_hl_lines, m)?)?;
    m.add_function(wrap_pyfunction!(format_hl_lines, m)?)?;
    m.add_function(wrap_pyfunction!(splice_attribute, m)?)?;
    m.add_function(wrap_pyfunction!(highlighted_lines, m)?)?;
    m.add_function(wrap_pyfunction!(highlight, m)?)?;
    Ok(())
}
