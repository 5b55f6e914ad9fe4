use crate::{
    DEFAULT_MAX_DEPTH, DEFAULT_WILDCARD,
    error::{ErrorClass, ErrorOrigin, InternalError},
};
use serde::{Deserialize, Serialize};

///
/// CriteriaConfig
///
/// Translator settings, loadable from a TOML table:
///
/// ```toml
/// wildcard = "%"
/// max_depth = 64
/// ```
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CriteriaConfig {
    /// Pattern wildcard used by `contains` / `starts_with` / `ends_with`
    /// wrapping and by wildcard detection on assigned text.
    pub wildcard: char,

    /// Bound on translator recursion depth.
    pub max_depth: usize,
}

impl Default for CriteriaConfig {
    fn default() -> Self {
        Self {
            wildcard: DEFAULT_WILDCARD,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CriteriaConfig {
    /// Parse and validate a TOML config table.
    pub fn from_toml_str(source: &str) -> Result<Self, InternalError> {
        let config: Self = toml::from_str(source).map_err(|err| {
            InternalError::new(ErrorClass::Config, ErrorOrigin::Config, err.to_string())
        })?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), InternalError> {
        if self.max_depth == 0 {
            return Err(InternalError::new(
                ErrorClass::Config,
                ErrorOrigin::Config,
                "max_depth must be at least 1",
            ));
        }
        if self.wildcard.is_whitespace() {
            return Err(InternalError::new(
                ErrorClass::Config,
                ErrorOrigin::Config,
                "wildcard must not be whitespace",
            ));
        }

        Ok(())
    }
}

///
/// TESTS
///
