//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// `field` names the configuration key for error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|err| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", err.var_name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_unchanged() {
        assert_eq!(
            expand_env("https://cdn.test", "assets.base_url").unwrap(),
            "https://cdn.test"
        );
    }

    #[test]
    fn test_default_used_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("INJECT_EXPAND_UNSET");
        }

        assert_eq!(
            expand_env("${INJECT_EXPAND_UNSET:-https://fallback.test}", "assets.base_url").unwrap(),
            "https://fallback.test"
        );
    }

    #[test]
    fn test_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("INJECT_EXPAND_MISSING");
        }

        let err = expand_env("${INJECT_EXPAND_MISSING}", "assets.base_url").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Environment variable error in assets.base_url: ${INJECT_EXPAND_MISSING} not set"
        );
    }
}
