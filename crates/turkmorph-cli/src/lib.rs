// turkmorph-cli: shared utilities for CLI tools.

use std::path::PathBuf;
use std::process;

use tracing_subscriber::EnvFilter;
use turkmorph_tr::handle::TurkmorphHandle;

/// Lexicon file name looked up in each search directory.
const LEXICON_FILE: &str = "lexicon.txt";

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Search for a lexicon file and create a TurkmorphHandle.
///
/// Search order:
/// 1. `lexicon_path` argument (if provided)
/// 2. `TURKMORPH_LEXICON_PATH` environment variable
/// 3. `~/.turkmorph/lexicon.txt`
/// 4. `lexicon.txt` in the current working directory
pub fn load_handle(lexicon_path: Option<&str>) -> Result<TurkmorphHandle, String> {
    let search_paths = build_search_paths(lexicon_path);

    for path in &search_paths {
        if path.is_file() {
            return TurkmorphHandle::from_lexicon_file(path)
                .map_err(|e| format!("failed to load {}: {e}", path.display()));
        }
    }

    Err(format!(
        "could not find a lexicon in any of the search paths:\n{}",
        search_paths
            .iter()
            .map(|p| format!("  - {}", p.display()))
            .collect::<Vec<_>>()
            .join("\n")
    ))
}

/// Build the list of candidate lexicon files.
fn build_search_paths(lexicon_path: Option<&str>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // 1. Explicit path from argument; a directory means its lexicon.txt
    if let Some(p) = lexicon_path {
        paths.push(file_or_dir(PathBuf::from(p)));
    }

    // 2. TURKMORPH_LEXICON_PATH environment variable
    if let Ok(env_path) = std::env::var("TURKMORPH_LEXICON_PATH") {
        paths.push(file_or_dir(PathBuf::from(env_path)));
    }

    // 3. Home directory
    if let Some(home) = home_dir() {
        paths.push(home.join(".turkmorph").join(LEXICON_FILE));
    }

    // 4. Current directory
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(LEXICON_FILE));
    }

    paths
}

fn file_or_dir(path: PathBuf) -> PathBuf {
    if path.is_dir() {
        path.join(LEXICON_FILE)
    } else {
        path
    }
}

/// Get the user's home directory.
fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

/// Parse a `--lexicon=PATH` or `-l PATH` argument from command line args.
///
/// Returns `(lexicon_path, remaining_args)`.
pub fn parse_lexicon_path(args: &[String]) -> (Option<String>, Vec<String>) {
    let mut lexicon_path = None;
    let mut remaining = Vec::new();
    let mut skip_next = false;

    for (i, arg) in args.iter().enumerate() {
        if skip_next {
            skip_next = false;
            continue;
        }
        if let Some(val) = arg.strip_prefix("--lexicon=") {
            lexicon_path = Some(val.to_string());
        } else if arg == "--lexicon" || arg == "-l" {
            match args.get(i + 1) {
                Some(val) => {
                    lexicon_path = Some(val.clone());
                    skip_next = true;
                }
                None => fatal(&format!("{arg} requires a value")),
            }
        } else {
            remaining.push(arg.clone());
        }
    }

    (lexicon_path, remaining)
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn lexicon_flag_forms() {
        let (path, rest) = parse_lexicon_path(&args(&["-l", "lex.txt", "kitap"]));
        assert_eq!(path.as_deref(), Some("lex.txt"));
        assert_eq!(rest, ["kitap"]);

        let (path, rest) = parse_lexicon_path(&args(&["ev", "--lexicon=/tmp/x.txt"]));
        assert_eq!(path.as_deref(), Some("/tmp/x.txt"));
        assert_eq!(rest, ["ev"]);

        let (path, rest) = parse_lexicon_path(&args(&["ev", "kitap"]));
        assert!(path.is_none());
        assert_eq!(rest.len(), 2);
    }

    #[test]
    fn explicit_path_is_searched_first() {
        let paths = build_search_paths(Some("/nonexistent/lexicon.txt"));
        assert_eq!(paths[0], PathBuf::from("/nonexistent/lexicon.txt"));
        assert!(paths.last().is_some_and(|p| p.ends_with(LEXICON_FILE)));
    }

    #[test]
    fn help_flag() {
        assert!(wants_help(&args(&["kitap", "-h"])));
        assert!(!wants_help(&args(&["kitap"])));
    }

    #[test]
    fn loads_sample_lexicon() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../turkmorph-tr/tests/data/lexicon.txt");
        let handle = load_handle(Some(path)).unwrap();
        assert!(!handle.parse("kitabıma").unwrap().is_empty());
    }
}
