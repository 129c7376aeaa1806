// turkmorph-parse: Morphological parsing of Turkish words.
//
// Reads words from stdin (one per line) and prints every parse for each
// word, one per line.
//
// Usage:
//   turkmorph-parse [-l LEXICON] [-n MAX] [WORD...]
//
// Options:
//   -l, --lexicon PATH   Lexicon file (or directory containing lexicon.txt)
//   -n, --max N          Print at most N parses per word (0 = all)
//   -h, --help           Print help

use std::io::{self, BufRead, Write};

use turkmorph_tr::handle::TurkmorphHandle;

fn main() {
    turkmorph_cli::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (lexicon_path, args) = turkmorph_cli::parse_lexicon_path(&args);

    if turkmorph_cli::wants_help(&args) {
        println!("turkmorph-parse: Morphological parsing of Turkish words.");
        println!();
        println!("Usage: turkmorph-parse [-l LEXICON] [-n MAX] [WORD...]");
        println!();
        println!("If WORD arguments are given, parses each word.");
        println!("Otherwise reads words from stdin (one per line).");
        println!();
        println!("Options:");
        println!("  -l, --lexicon PATH   Lexicon file (or directory containing lexicon.txt)");
        println!("  -n, --max N          Print at most N parses per word (0 = all)");
        println!("  -h, --help           Print this help");
        return;
    }

    let mut max_results = None;
    let mut words = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "-n" || arg == "--max" {
            let value = iter
                .next()
                .unwrap_or_else(|| turkmorph_cli::fatal(&format!("{arg} requires a value")));
            let n = value
                .parse::<usize>()
                .unwrap_or_else(|_| turkmorph_cli::fatal(&format!("invalid count: {value}")));
            max_results = Some(n);
        } else if !arg.starts_with('-') {
            words.push(arg.clone());
        }
    }

    let mut handle = turkmorph_cli::load_handle(lexicon_path.as_deref())
        .unwrap_or_else(|e| turkmorph_cli::fatal(&e));
    if let Some(n) = max_results {
        handle.set_max_results(n);
    }

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let parse_word = |word: &str, handle: &TurkmorphHandle, out: &mut io::BufWriter<io::StdoutLock<'_>>| {
        match handle.parse(word) {
            Ok(parses) if parses.is_empty() => {
                let _ = writeln!(out, "{word}: (no parse)");
            }
            Ok(parses) => {
                let _ = writeln!(out, "{word}:");
                for parse in &parses {
                    let _ = writeln!(out, "  {parse}");
                }
            }
            Err(e) => {
                let _ = writeln!(out, "{word}: (error: {e})");
            }
        }
    };

    if words.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("error reading stdin: {e}");
                    break;
                }
            };
            let word = line.trim();
            if word.is_empty() {
                continue;
            }
            parse_word(word, &handle, &mut out);
        }
    } else {
        for word in &words {
            parse_word(word, &handle, &mut out);
        }
    }
}
