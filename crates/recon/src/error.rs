use std::fmt;

#[derive(Debug)]
pub enum CompareError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (threshold out of range, etc.).
    ConfigValidation(String),
    /// Document record JSON could not be parsed.
    DocumentParse(String),
}

impl fmt::Display for CompareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::DocumentParse(msg) => write!(f, "document parse error: {msg}"),
        }
    }
}

impl std::error::Error for CompareError {}
