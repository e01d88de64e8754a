//! PDF processing layer
//!
//! Text extraction goes through [`TextExtractor`]; [`PdfiumExtractor`] is the
//! production implementation.

mod reader;

pub use reader::{join_pages, PdfiumExtractor, TextExtractor};
