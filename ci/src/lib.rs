//! CorpusIndex - whitespace-insensitive sentence lookup over line-split text
//!
//! Locates a short query sentence inside a large ordered collection of lines
//! (a texthooker transcript, a plain text dump, ...) even when the corpus
//! breaks the sentence across arbitrary lines, then cuts a window of the
//! surrounding original lines for display.
//!
//! # Architecture
//!
//! ```text
//! lines ──► CorpusIndex::build ──► locate(sentence) ──► MatchRange
//!                                                          │
//!                   ContextResult ◄── extract(window) ◄────┘
//! ```
//!
//! Matching compares whitespace-stripped forms only; no case folding or
//! fuzzy matching is applied, and only the first occurrence is reported.
//!
//! # Example
//!
//! ```
//! use corpusindex::{ContextWindow, CorpusIndex, MatchDriver, QueryRecord};
//!
//! let index = CorpusIndex::build(["Hello", "World", "Foo Bar"]);
//! let range = index.locate("Hello World").unwrap();
//! assert_eq!((range.first_line, range.last_line_exclusive), (0, 2));
//!
//! let queries = vec![QueryRecord::new(7, "FooBar").with_emphasis("Bar")];
//! let results = MatchDriver::new(&index, ContextWindow::new(1, 1)).run(&queries);
//! assert_eq!(results[0].context_text, "World<br>Foo <b>Bar</b>");
//! ```

mod driver;
mod extract;
mod index;
mod normalize;

pub use driver::{ContextResult, MatchDriver, QueryRecord};
pub use extract::{ContextWindow, EMPHASIS_CLOSE, EMPHASIS_OPEN, LINE_BREAK, emphasize, extract};
pub use index::{CorpusIndex, LineRecord, MatchRange};
pub use normalize::normalize;

/// Default number of lines kept before the matched line
pub const DEFAULT_CONTEXT_BEFORE: usize = 15;

/// Default number of lines kept from the matched line onwards
pub const DEFAULT_CONTEXT_AFTER: usize = 5;
