//! Error taxonomy for lookups and resource loading.
//!
//! Lookup failures (`UnknownLocale`, `MissingKey`) are returned to the caller,
//! which decides whether to degrade to a visible placeholder or abort the
//! response. Every other variant is a load-time data error and rejects the
//! bundle set before any lookup can observe it.

use std::fmt;

/// Errors from localization lookups and bundle loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum L10nError {
    /// The requested locale has no loaded bundle.
    UnknownLocale(String),
    /// The key is absent from both the requested and the reference bundle.
    MissingKey { locale: String, key: String },
    /// A locale code was empty or malformed.
    InvalidLocale(String),
    /// A resource document could not be parsed.
    Parse { source_name: String, message: String },
    /// A calendar label list has the wrong number of entries.
    InvalidCalendar {
        locale: String,
        field: &'static str,
        expected: usize,
        found: usize,
    },
    /// Weekday entry 0 and entry 7 differ.
    SundayAliasMismatch { locale: String, field: &'static str },
    /// Two bundles share a locale code.
    DuplicateLocale(String),
    /// A guide section id occurs more than once in one document.
    DuplicateSection { locale: String, id: String },
    /// The configured reference locale is not among the loaded bundles.
    MissingReference(String),
    /// A resource directory or file could not be read.
    Io { path: String, message: String },
}

impl fmt::Display for L10nError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownLocale(l) => write!(f, "unknown locale: {l}"),
            Self::MissingKey { locale, key } => {
                write!(f, "missing key '{key}' (locale '{locale}' and reference)")
            }
            Self::InvalidLocale(l) => write!(f, "invalid locale code: '{l}'"),
            Self::Parse {
                source_name,
                message,
            } => write!(f, "parse error in {source_name}: {message}"),
            Self::InvalidCalendar {
                locale,
                field,
                expected,
                found,
            } => write!(
                f,
                "locale '{locale}': {field} needs {expected} entries, found {found}"
            ),
            Self::SundayAliasMismatch { locale, field } => {
                write!(f, "locale '{locale}': {field}[0] and {field}[7] must match")
            }
            Self::DuplicateLocale(l) => write!(f, "duplicate locale bundle '{l}'"),
            Self::DuplicateSection { locale, id } => {
                write!(f, "duplicate guide section '{id}' in locale '{locale}'")
            }
            Self::MissingReference(l) => write!(f, "reference locale '{l}' not loaded"),
            Self::Io { path, message } => write!(f, "cannot read {path}: {message}"),
        }
    }
}

impl std::error::Error for L10nError {}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, L10nError>;
