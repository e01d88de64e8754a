//! Error types for the mcp-kvn server

use thiserror::Error;

/// Result type alias for mcp-kvn
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse error category, used to decide how a failure reaches the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed tool arguments
    Argument,
    /// Unknown tool name
    UnknownTool,
    /// Remote fetch or local read failed
    Fetch,
    /// PDF could not be opened or its text extracted
    Decode,
    /// Server-side failure unrelated to the request
    Internal,
}

/// Error types for mcp-kvn
#[derive(Error, Debug)]
pub enum Error {
    /// Tool was called without an arguments object
    #[error("Missing arguments")]
    MissingArguments,

    /// Required argument absent or empty
    #[error("Missing {name}")]
    MissingArgument { name: &'static str },

    /// Arguments object did not match the tool's schema
    #[error("Invalid arguments: {reason}")]
    InvalidArguments { reason: String },

    /// Tool name outside the advertised set
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    /// PDF file not found
    #[error("PDF not found: {path}")]
    PdfNotFound { path: String },

    /// Remote host answered with a non-success status
    #[error("HTTP request to {url} failed with status: {status}")]
    HttpStatus { url: String, status: u16 },

    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Source resolution error
    #[error("Failed to resolve source: {reason}")]
    SourceResolution { reason: String },

    /// Download too large
    #[error("Download too large: {size} bytes (max: {max_size} bytes)")]
    DownloadTooLarge { size: u64, max_size: u64 },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid PDF file
    #[error("Invalid PDF file: {reason}")]
    InvalidPdf { reason: String },

    /// PDF is password protected
    #[error("PDF is password protected")]
    PasswordRequired,

    /// PDFium error
    #[error("PDFium error: {reason}")]
    Pdfium { reason: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingArguments
            | Error::MissingArgument { .. }
            | Error::InvalidArguments { .. } => ErrorKind::Argument,
            Error::UnknownTool { .. } => ErrorKind::UnknownTool,
            Error::PdfNotFound { .. }
            | Error::HttpStatus { .. }
            | Error::HttpRequest(_)
            | Error::SourceResolution { .. }
            | Error::DownloadTooLarge { .. }
            | Error::Io(_) => ErrorKind::Fetch,
            Error::InvalidPdf { .. } | Error::PasswordRequired | Error::Pdfium { .. } => {
                ErrorKind::Decode
            }
            Error::Serialization(_) => ErrorKind::Internal,
        }
    }

    /// Return an error message safe to send to clients.
    /// Argument errors are returned verbatim. Fetch and decode errors keep
    /// their cause but never name a local path.
    pub fn client_message(&self) -> String {
        match self {
            Error::MissingArguments
            | Error::MissingArgument { .. }
            | Error::InvalidArguments { .. }
            | Error::UnknownTool { .. } => self.to_string(),
            Error::PdfNotFound { .. } => "PDF not found".to_string(),
            Error::HttpStatus { status, .. } => {
                format!("HTTP request failed with status: {}", status)
            }
            Error::HttpRequest(e) => match e.url() {
                Some(url) => format!("HTTP request to {} failed: {}", url, http_failure_kind(e)),
                None => format!("HTTP request failed: {}", http_failure_kind(e)),
            },
            Error::SourceResolution { reason } => {
                format!("Failed to resolve PDF source: {}", reason)
            }
            Error::DownloadTooLarge { max_size, .. } => {
                format!("Download exceeds maximum size of {} bytes", max_size)
            }
            Error::Io(e) => format!("I/O error: {}", e.kind()),
            Error::InvalidPdf { reason } => format!("Invalid PDF file: {}", reason),
            Error::PasswordRequired => "PDF is password protected".to_string(),
            Error::Pdfium { reason } => format!("PDF processing error: {}", reason),
            Error::Serialization(_) => "Serialization error".to_string(),
        }
    }
}

/// Short description of what went wrong with a request
fn http_failure_kind(err: &reqwest::Error) -> &'static str {
    if err.is_timeout() {
        "timed out"
    } else if err.is_connect() {
        "connection error"
    } else if err.is_body() {
        "error reading response body"
    } else if err.is_decode() {
        "error decoding response body"
    } else if err.is_redirect() {
        "too many redirects"
    } else if err.is_builder() {
        "invalid request"
    } else {
        "request error"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_taxonomy() {
        assert_eq!(Error::MissingArguments.kind(), ErrorKind::Argument);
        assert_eq!(
            Error::MissingArgument { name: "file" }.kind(),
            ErrorKind::Argument
        );
        assert_eq!(
            Error::UnknownTool {
                name: "nope".to_string()
            }
            .kind(),
            ErrorKind::UnknownTool
        );
        assert_eq!(
            Error::HttpStatus {
                url: "https://example.com/rules.pdf".to_string(),
                status: 404
            }
            .kind(),
            ErrorKind::Fetch
        );
        assert_eq!(Error::PasswordRequired.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_argument_messages_are_verbatim() {
        assert_eq!(Error::MissingArguments.client_message(), "Missing arguments");
        assert_eq!(
            Error::MissingArgument { name: "file" }.client_message(),
            "Missing file"
        );
        assert_eq!(
            Error::UnknownTool {
                name: "roll-dice".to_string()
            }
            .client_message(),
            "Unknown tool: roll-dice"
        );
    }

    #[test]
    fn test_client_message_hides_local_paths() {
        let err = Error::PdfNotFound {
            path: "/home/someone/secret/rules.pdf".to_string(),
        };
        assert!(!err.client_message().contains("/home"));
        assert!(err.to_string().contains("/home/someone/secret/rules.pdf"));
    }

    #[test]
    fn test_io_message_carries_kind() {
        let err = Error::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "/home/someone/rules.pdf",
        ));
        let message = err.client_message();
        assert_eq!(message, "I/O error: permission denied");
        assert!(!message.contains("/home"));
    }

    #[test]
    fn test_decode_messages_carry_reason() {
        let err = Error::Pdfium {
            reason: "FormatError".to_string(),
        };
        assert_eq!(err.client_message(), "PDF processing error: FormatError");

        let err = Error::InvalidPdf {
            reason: "Not a valid PDF file".to_string(),
        };
        assert_eq!(err.client_message(), "Invalid PDF file: Not a valid PDF file");
    }

    #[test]
    fn test_http_status_message_carries_status() {
        let err = Error::HttpStatus {
            url: "https://example.com/rules.pdf".to_string(),
            status: 404,
        };
        assert!(err.client_message().contains("404"));
    }
}
