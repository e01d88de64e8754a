//! Source resolution

pub mod resolver;

pub use resolver::{resolve_path, DocumentRef, ResolvedPdf, Resolver};
