//! Page text extraction backed by PDFium

use crate::error::{Error, Result};
use pdfium_render::prelude::*;

/// Something that can turn PDF bytes into per-page text
pub trait TextExtractor: Send + Sync {
    /// Text of every page, in page order
    fn extract_pages(&self, data: &[u8]) -> Result<Vec<String>>;

    /// Whole-document text, see [`join_pages`]
    fn extract_text(&self, data: &[u8]) -> Result<String> {
        Ok(join_pages(self.extract_pages(data)?))
    }
}

/// Concatenate page texts in order, each followed by a single newline
pub fn join_pages<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut text = String::new();
    for page in pages {
        text.push_str(page.as_ref());
        text.push('\n');
    }
    text
}

/// Get PDFium instance (creates new instance each time - PDFium is not thread-safe)
fn create_pdfium() -> Result<Pdfium> {
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
                "/opt/pdfium/lib",
            ))
        })
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| Error::Pdfium {
            reason: format!("Failed to initialize PDFium: {}", e),
        })?;

    Ok(Pdfium::new(bindings))
}

/// Map PDFium errors to our error type
fn map_pdfium_error(err: PdfiumError) -> Error {
    match err {
        PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::PasswordError) => {
            Error::PasswordRequired
        }
        _ => Error::Pdfium {
            reason: format!("{}", err),
        },
    }
}

/// Default extractor. Binds PDFium on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfiumExtractor;

impl TextExtractor for PdfiumExtractor {
    fn extract_pages(&self, data: &[u8]) -> Result<Vec<String>> {
        if data.len() < 4 || &data[0..4] != b"%PDF" {
            return Err(Error::InvalidPdf {
                reason: "Not a valid PDF file".to_string(),
            });
        }

        let pdfium = create_pdfium()?;
        let document = pdfium
            .load_pdf_from_byte_slice(data, None)
            .map_err(map_pdfium_error)?;

        let pages = document.pages();
        let mut texts = Vec::with_capacity(pages.len() as usize);
        for (index, page) in pages.iter().enumerate() {
            let text = page.text().map_err(|e| Error::Pdfium {
                reason: format!("Failed to read text of page {}: {}", index + 1, e),
            })?;
            texts.push(text.all());
        }

        Ok(texts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPages(Vec<&'static str>);

    impl TextExtractor for FixedPages {
        fn extract_pages(&self, _data: &[u8]) -> Result<Vec<String>> {
            Ok(self.0.iter().map(|p| p.to_string()).collect())
        }
    }

    #[test]
    fn test_invalid_pdf_detection() {
        let result = PdfiumExtractor.extract_pages(b"not a pdf");
        assert!(matches!(result, Err(Error::InvalidPdf { .. })));
    }

    #[test]
    fn test_empty_input_is_invalid() {
        let result = PdfiumExtractor.extract_text(b"");
        assert!(matches!(result, Err(Error::InvalidPdf { .. })));
    }

    #[test]
    fn test_join_pages() {
        assert_eq!(join_pages(["Setup", "Turn order"]), "Setup\nTurn order\n");
        assert_eq!(join_pages(Vec::<String>::new()), "");
        assert_eq!(join_pages([""]), "\n");
    }

    #[test]
    fn test_extract_text_default_joins_in_page_order() {
        let extractor = FixedPages(vec!["page one", "page two", "page three"]);
        assert_eq!(
            extractor.extract_text(b"ignored").unwrap(),
            "page one\npage two\npage three\n"
        );
    }
}
