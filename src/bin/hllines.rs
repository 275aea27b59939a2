use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use hllines::{document_from_bytes, edit_text, read_document, Action, Selection};

/// Highlight or unhighlight lines of a fenced code block by rewriting its
/// `hl_lines` attribute.
///
/// LINES are 1-based document line numbers: `N`, `A-B` or `A:B`. All of them
/// must fall inside the content of one code block.
///
/// Default mode edits <FILE> in-place and prints the rewritten fence line.
/// With --dry-run, no file is written. With --stdin, <FILE> must be '-' and the
/// whole edited document is printed.
#[derive(Debug, Parser)]
#[command(name = "hllines", version)]
struct Cli {
    /// Print the result without writing the file.
    #[arg(long)]
    dry_run: bool,

    /// Read the document from stdin and print the edited document.
    #[arg(long)]
    stdin: bool,

    /// Log debug output to stderr.
    #[arg(short, long)]
    verbose: bool,

    /// Markdown file to edit, or '-' with --stdin.
    file: String,

    action: ActionArg,

    #[arg(required = true, value_parser = parse_selection)]
    lines: Vec<Selection>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ActionArg {
    Highlight,
    Unhighlight,
    Toggle,
}

impl From<ActionArg> for Action {
    fn from(a: ActionArg) -> Self {
        match a {
            ActionArg::Highlight => Action::Highlight,
            ActionArg::Unhighlight => Action::Unhighlight,
            ActionArg::Toggle => Action::Toggle,
        }
    }
}

fn parse_selection(s: &str) -> Result<Selection, String> {
    s.parse().map_err(|e: hllines::Error| e.to_string())
}

/// Write `content` to a temp file beside `path`, then rename it into place.
/// The temp file is removed if anything after its creation fails.
fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let dir = path
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .map_or_else(|| "document".to_string(), |n| n.to_string_lossy().into_owned());

    let (tmp_path, file) = create_temp_file(dir, &name)?;
    let result = fill_temp_file(file, &tmp_path, path, content)
        .and_then(|()| fs::rename(&tmp_path, path));
    if result.is_err() {
        if let Err(e) = fs::remove_file(&tmp_path) {
            log::warn!("could not remove temp file {}: {e}", tmp_path.display());
        }
    }
    result
}

fn create_temp_file(dir: &Path, name: &str) -> io::Result<(PathBuf, fs::File)> {
    let pid = process::id();
    let mut attempt: u64 = 0;
    loop {
        let candidate = dir.join(format!(".{name}.hllines.tmp.{pid}.{attempt}"));
        match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
        {
            Ok(file) => return Ok((candidate, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => return Err(e),
        }
    }
}

fn fill_temp_file(mut file: fs::File, tmp_path: &Path, target: &Path, content: &str) -> io::Result<()> {
    file.write_all(content.as_bytes())?;
    file.sync_all()?;
    if let Ok(meta) = fs::metadata(target) {
        if let Err(e) = fs::set_permissions(tmp_path, meta.permissions()) {
            log::warn!("could not keep permissions of {}: {e}", target.display());
        }
    }
    Ok(())
}

fn join_lines(lines: &[String]) -> String {
    if lines.is_empty() {
        String::new()
    } else {
        let mut s = lines.join("\n");
        s.push('\n');
        s
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    let text = if cli.stdin {
        if cli.file != "-" {
            eprintln!("error: with --stdin, file must be '-' (got '{}')", cli.file);
            process::exit(2);
        }
        let mut bytes = Vec::new();
        if let Err(e) = io::stdin().read_to_end(&mut bytes) {
            eprintln!("error: failed to read stdin: {e}");
            process::exit(1);
        }
        document_from_bytes(bytes)
    } else {
        read_document(Path::new(&cli.file))
    };

    let text = match text {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    let result = match edit_text(&text, &cli.lines, cli.action.into()) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(2);
        }
    };
    log::info!("{:?} applied at fence line {}", result.applied, result.fence_line);

    if cli.stdin {
        print!("{}", join_lines(&result.lines));
        return;
    }

    if !cli.dry_run {
        if let Err(e) = write_atomic(Path::new(&cli.file), &join_lines(&result.lines)) {
            eprintln!("error: failed to write {}: {e}", cli.file);
            process::exit(1);
        }
    }

    println!("{}  {}", result.fence_line, result.lines[result.fence_line - 1]);
}
