//! Error handling for recipe configuration and translation

use thiserror::Error;

/// Result type alias for recipe operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or translating the recipe
#[derive(Error, Debug)]
pub enum Error {
    /// Every feature library is disabled but a compiled build was requested
    #[error("all libraries are disabled: consider using `-o header_only=True`")]
    AllLibrariesDisabled,

    /// An option name outside the fixed toggle schema
    #[error("unknown option `{name}`")]
    UnknownOption { name: String },

    /// A toggle value outside the option's declared domain
    #[error("invalid value `{value}` for option `{name}`")]
    InvalidOptionValue { name: String, value: String },

    /// A settings field outside its declared domain
    #[error("invalid value `{value}` for setting `{name}`")]
    InvalidSetting { name: String, value: String },
}

impl Error {
    pub(crate) fn unknown_option(name: impl Into<String>) -> Self {
        Self::UnknownOption { name: name.into() }
    }

    pub(crate) fn invalid_option_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidOptionValue {
            name: name.into(),
            value: value.into(),
        }
    }

    pub(crate) fn invalid_setting(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidSetting {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = Error::unknown_option("without_frobnicator");
        assert_eq!(err.to_string(), "unknown option `without_frobnicator`");

        let err = Error::invalid_option_value("shared", "Maybe");
        assert_eq!(err.to_string(), "invalid value `Maybe` for option `shared`");

        assert_eq!(
            Error::AllLibrariesDisabled.to_string(),
            "all libraries are disabled: consider using `-o header_only=True`"
        );
    }
}
