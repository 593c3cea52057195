//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references, then a leading `~`.
///
/// Bare `$VAR` is left as is. An unset variable without a default is an error
/// naming both the variable and the config field.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let expanded = if value.contains("${") {
        shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
            match std::env::var(var) {
                Ok(val) => Ok(Some(val)),
                Err(_) => Err(LookupError {
                    var_name: var.to_owned(),
                }),
            }
        })
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{0}}} not set", e.cause.var_name),
        })?
        .into_owned()
    } else {
        value.to_owned()
    };

    if expanded.starts_with('~') {
        return Ok(shellexpand::tilde(&expanded).into_owned());
    }
    Ok(expanded)
}

struct LookupError {
    var_name: String,
}
