//! Error types for brushy I/O and parsing boundaries.
//!
//! Rasterizer, coordinate and shape operations never fail; they clip or
//! fall back instead. Errors only surface when reading files or talking
//! to the window system.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur at brushy's I/O boundaries.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (scene or settings files).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Settings file is not valid JSON for [`crate::config::Settings`].
    #[error("settings error: {0}")]
    Json(#[from] serde_json::Error),

    /// Zero-sized surface requested.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// A scene file line that cannot be understood at all.
    #[error("scene line {line}: {message}")]
    SceneParse { line: usize, message: String },

    /// Shape record without a required attribute.
    #[error("{shape}: missing attribute {attribute}")]
    MissingAttribute { shape: String, attribute: String },

    /// Shape record with an attribute that does not parse.
    #[error("{shape}: invalid value {value:?} for {attribute}")]
    InvalidAttribute {
        shape: String,
        attribute: String,
        value: String,
    },

    /// Window system failure (SDL reports errors as strings).
    #[error("display error: {0}")]
    Display(String),
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Self::Display(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidDimensions {
            width: 0,
            height: 100,
        };
        assert!(err.to_string().contains("Invalid dimensions"));
        assert!(err.to_string().contains("0x100"));
    }

    #[test]
    fn test_attribute_errors_name_the_shape() {
        let err = Error::MissingAttribute {
            shape: "Casa".into(),
            attribute: "Altura".into(),
        };
        assert_eq!(err.to_string(), "Casa: missing attribute Altura");

        let err = Error::InvalidAttribute {
            shape: "Sol".into(),
            attribute: "Largura".into(),
            value: "abc".into(),
        };
        assert!(err.to_string().contains("\"abc\""));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_sdl_string_becomes_display_error() {
        let err: Error = String::from("no video device").into();
        assert!(matches!(err, Error::Display(ref s) if s == "no video device"));
    }
}
