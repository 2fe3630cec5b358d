//! Error types for the conversion engine.
//!
//! Conversion is all-or-nothing: any of these errors aborts the whole run and
//! no partial document is produced.

use thiserror::Error;

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Errors that can occur while converting a feed to iCalendar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The input document is not well-formed XML.
    #[error("malformed XML: {message}")]
    XmlStructure { message: String },

    /// A date/time field matched neither supported format.
    #[error("unrecognized datetime format: {value}")]
    DatetimeFormat { value: String },
}

impl ConvertError {
    /// Creates an XML structure error.
    pub fn xml(message: impl Into<String>) -> Self {
        Self::XmlStructure {
            message: message.into(),
        }
    }

    /// Creates a datetime format error for the offending input.
    pub fn datetime(value: impl Into<String>) -> Self {
        Self::DatetimeFormat {
            value: value.into(),
        }
    }

    /// Returns true if the input document itself could not be parsed.
    pub fn is_xml_structure(&self) -> bool {
        matches!(self, Self::XmlStructure { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datetime_error_names_the_value() {
        let err = ConvertError::datetime("not-a-date");
        assert_eq!(err.to_string(), "unrecognized datetime format: not-a-date");
        assert!(!err.is_xml_structure());
    }

    #[test]
    fn xml_error_display() {
        let err = ConvertError::xml("unexpected end of document");
        assert!(err.is_xml_structure());
        assert_eq!(err.to_string(), "malformed XML: unexpected end of document");
    }
}
