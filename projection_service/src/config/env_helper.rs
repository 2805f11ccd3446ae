use std::str::FromStr;

use anyhow::{Context, Result};

/// Load an environment variable and parse it to the given type
///
/// # Errors
///
/// Returns an error if the environment variable is not set or is not a valid value for the given type
pub fn load_env_var<T: FromStr>(var_name: &str) -> Result<T> {
    let var = std::env::var(var_name).context(format!("{} is not set", var_name))?;
    parse_env_value(var_name, &var)
}

/// Like `load_env_var`, but falls back to `default` when the variable is unset
pub fn load_env_var_or<T: FromStr>(var_name: &str, default: T) -> Result<T> {
    match std::env::var(var_name) {
        Ok(var) => parse_env_value(var_name, &var),
        Err(_) => Ok(default),
    }
}

fn parse_env_value<T: FromStr>(var_name: &str, value: &str) -> Result<T> {
    value
        .parse::<T>()
        .map_err(|_| anyhow::anyhow!("{} is not a valid {}", value, var_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_value() {
        let port: u16 = parse_env_value("PORT", "8080").unwrap();
        assert_eq!(port, 8080);

        let err = parse_env_value::<u16>("PORT", "eighty").unwrap_err();
        assert_eq!(err.to_string(), "eighty is not a valid PORT");
    }

    #[test]
    fn test_missing_variable_falls_back_to_default() {
        let value: u32 = load_env_var_or("PROJECTION_SERVICE_TEST_UNSET_VAR", 7).unwrap();
        assert_eq!(value, 7);
        assert!(load_env_var::<u32>("PROJECTION_SERVICE_TEST_UNSET_VAR").is_err());
    }
}
