use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use hllines::{highlighted_lines, read_document, Config};

/// Print a markdown file with highlighted code lines marked in the gutter.
///
/// start_line/end_line are 1-based inclusive.
#[derive(Debug, Parser)]
#[command(name = "hlview", version)]
struct Cli {
    /// Config file (defaults to ./.hllines.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,

    file: PathBuf,

    start_line: Option<usize>,

    end_line: Option<usize>,
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let config = match Config::resolve(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(2);
        }
    };

    let text = match read_document(Path::new(&cli.file)) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {}: {e}", cli.file.display());
            process::exit(1);
        }
    };

    let lines: Vec<&str> = text.lines().collect();

    if lines.is_empty() {
        return;
    }

    let (start_line, end_line) = match (cli.start_line, cli.end_line) {
        (Some(s), Some(e)) => (s, e),
        (Some(s), None) => (s, s),
        (None, _) => (1, lines.len()),
    };

    if start_line == 0 {
        eprintln!("error: start_line is 1-based (must be >= 1)");
        process::exit(2);
    }

    if end_line < start_line {
        eprintln!("error: end_line must be >= start_line");
        process::exit(2);
    }

    if end_line > lines.len() {
        eprintln!(
            "error: end_line {end_line} is beyond EOF (file has {} line(s))",
            lines.len()
        );
        process::exit(2);
    }

    let marked: HashSet<usize> = highlighted_lines(&text).into_iter().collect();

    for (idx, line) in lines
        .iter()
        .enumerate()
        .skip(start_line - 1)
        .take(end_line - start_line + 1)
    {
        let lineno = idx + 1;
        let gutter = config.gutter(marked.contains(&lineno));
        if config.line_numbers {
            println!("{gutter} {lineno}  {line}");
        } else {
            println!("{gutter} {line}");
        }
    }
}
