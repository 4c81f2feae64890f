//! photobooth-tags: Free-text tag parsing, draft input, and suggestions.
//!
//! Tags are plain labels with no stored `#` prefix (`nature`, `portrait`).
//! Users type them into a single free-text draft field, `#`-prefixed or
//! not, separated by whitespace. This crate owns every pure string
//! transformation around that field; it performs no I/O.

pub mod draft;
pub mod parse;
pub mod suggest;

pub use draft::*;
pub use parse::*;
pub use suggest::*;
