// turkmorph-roots: Show the roots generated from a lexicon.
//
// With SEQUENCE arguments, prints the roots spelled exactly that way.
// Without arguments, prints every generated root.
//
// Usage:
//   turkmorph-roots [-l LEXICON] [SEQUENCE...]
//
// Options:
//   -l, --lexicon PATH   Lexicon file (or directory containing lexicon.txt)
//   -h, --help           Print help

use std::io::{self, Write};

use turkmorph_core::root::Root;

fn write_root(out: &mut impl Write, root: &Root) -> io::Result<()> {
    let attrs: Vec<&str> = root.phonetic_attributes().iter().map(|a| a.name()).collect();
    let expectations: Vec<&str> = root.phonetic_expectations().iter().map(|e| e.name()).collect();
    write!(out, "{}\t{}\t{}", root.sequence(), root.lexeme(), attrs.join(","))?;
    if !expectations.is_empty() {
        write!(out, "\texpects {}", expectations.join(","))?;
    }
    writeln!(out)
}

fn main() {
    turkmorph_cli::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (lexicon_path, args) = turkmorph_cli::parse_lexicon_path(&args);

    if turkmorph_cli::wants_help(&args) {
        println!("turkmorph-roots: Show the roots generated from a lexicon.");
        println!();
        println!("Usage: turkmorph-roots [-l LEXICON] [SEQUENCE...]");
        println!();
        println!("If SEQUENCE arguments are given, prints the roots spelled that way.");
        println!("Otherwise prints every root, sorted by sequence.");
        println!();
        println!("Options:");
        println!("  -l, --lexicon PATH   Lexicon file (or directory containing lexicon.txt)");
        println!("  -h, --help           Print this help");
        return;
    }

    let sequences: Vec<&String> = args.iter().filter(|a| !a.starts_with('-')).collect();

    let handle = turkmorph_cli::load_handle(lexicon_path.as_deref())
        .unwrap_or_else(|e| turkmorph_cli::fatal(&e));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let result = if sequences.is_empty() {
        let mut roots: Vec<&Root> = handle.root_set().iter().collect();
        roots.sort_by(|a, b| a.sequence().cmp(b.sequence()).then_with(|| a.lexeme().lemma().cmp(b.lexeme().lemma())));
        roots.into_iter().try_for_each(|root| write_root(&mut out, root))
    } else {
        sequences.iter().try_for_each(|seq| {
            let roots = handle.roots(seq);
            if roots.is_empty() {
                writeln!(out, "{seq}: (no root)")
            } else {
                roots.iter().try_for_each(|root| write_root(&mut out, root))
            }
        })
    };

    if let Err(e) = result.and_then(|()| out.flush()) {
        turkmorph_cli::fatal(&format!("failed to write output: {e}"));
    }
}
