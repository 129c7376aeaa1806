//! Turkish language module: lexicon, roots, morphotactics and parsing.
//!
//! - [`lexicon`] -- Lexicon text format and the root generator
//! - [`morphotactics`] -- The Turkish suffix graph
//! - [`parser`] -- Breadth-first contextless parser
//! - [`handle`] -- [`TurkmorphHandle`](handle::TurkmorphHandle), the
//!   top-level entry point (feature `handle`)
//!
//! ```no_run
//! use turkmorph_tr::handle::TurkmorphHandle;
//!
//! let handle = TurkmorphHandle::from_lexicon_text("kitap [A:Voicing]").unwrap();
//! for parse in handle.parse("kitabıma").unwrap() {
//!     println!("{parse}"); // kitap+Noun+A3sg+P1sg[ım]+Dat[a]
//! }
//! ```

pub mod lexicon;
pub mod morphotactics;
pub mod parser;

#[cfg(feature = "handle")]
pub mod handle;
