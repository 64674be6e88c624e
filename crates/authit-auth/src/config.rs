use std::str::FromStr;

use crate::token::TokenLength;
use crate::types::{AuthitError, Rssi, RSSI_THRESHOLD};

pub const ENV_RSSI_THRESHOLD: &str = "AUTHIT_RSSI_THRESHOLD";
pub const ENV_TOKEN_LENGTH: &str = "AUTHIT_TOKEN_LENGTH";

/// Per-deployment knobs of the verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolConfig {
    pub rssi_threshold: Rssi,
    pub token_len: TokenLength,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            rssi_threshold: RSSI_THRESHOLD,
            token_len: TokenLength::default(),
        }
    }
}

impl ProtocolConfig {
    /// Defaults, overridden by `AUTHIT_RSSI_THRESHOLD` / `AUTHIT_TOKEN_LENGTH`
    /// when set in the environment or a `.env` file.
    pub fn from_env() -> Result<Self, AuthitError> {
        let mut config = Self::default();

        if let Some(threshold) = env_parse::<Rssi>(ENV_RSSI_THRESHOLD)? {
            config.rssi_threshold = threshold;
        }
        if let Some(len) = env_parse::<usize>(ENV_TOKEN_LENGTH)? {
            config.token_len = TokenLength::new(len)?;
        }

        Ok(config)
    }
}

/// Read and parse an optional variable through `dotenv`.
pub fn env_parse<T: FromStr>(name: &'static str) -> Result<Option<T>, AuthitError> {
    match dotenv::var(name) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| AuthitError::InvalidEnvVar { name, value }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = ProtocolConfig::default();
        assert_eq!(config.rssi_threshold, -87);
        assert_eq!(config.token_len.get(), 20);
    }

    #[test]
    fn env_parse_reports_bad_values() {
        std::env::set_var("AUTHIT_TEST_BAD_NUMBER", "close");
        assert_eq!(
            env_parse::<i16>("AUTHIT_TEST_BAD_NUMBER"),
            Err(AuthitError::InvalidEnvVar {
                name: "AUTHIT_TEST_BAD_NUMBER",
                value: "close".to_string()
            })
        );

        std::env::set_var("AUTHIT_TEST_GOOD_NUMBER", " -70 ");
        assert_eq!(env_parse::<i16>("AUTHIT_TEST_GOOD_NUMBER"), Ok(Some(-70)));
        assert_eq!(env_parse::<i16>("AUTHIT_TEST_UNSET_NUMBER"), Ok(None));
    }
}
