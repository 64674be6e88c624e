use std::time::Duration;

use authit_auth::config::env_parse;
use authit_auth::{AuthitError, ProtocolConfig};

use crate::types::{AUTH_SERVICE_UUID, PROGRESS_INTERVAL, SCAN_TIMEOUT};

pub const ENV_SCAN_TIMEOUT_SECS: &str = "AUTHIT_SCAN_TIMEOUT_SECS";
pub const ENV_SERVICE_UUID: &str = "AUTHIT_SERVICE_UUID";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    service_uuid: String,
    pub timeout: Duration,
    pub progress_interval: Duration,
    pub protocol: ProtocolConfig,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            service_uuid: AUTH_SERVICE_UUID.to_string(),
            timeout: SCAN_TIMEOUT,
            progress_interval: PROGRESS_INTERVAL,
            protocol: ProtocolConfig::default(),
        }
    }
}

impl ScanConfig {
    pub fn from_env() -> Result<Self, AuthitError> {
        let mut config = Self {
            protocol: ProtocolConfig::from_env()?,
            ..Default::default()
        };

        if let Some(secs) = env_parse::<u64>(ENV_SCAN_TIMEOUT_SECS)? {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(uuid) = env_parse::<String>(ENV_SERVICE_UUID)? {
            config = config.with_service_uuid(uuid);
        }

        Ok(config)
    }

    pub fn with_service_uuid(mut self, service_uuid: impl AsRef<str>) -> Self {
        self.service_uuid = service_uuid.as_ref().to_ascii_lowercase();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Lowercase uuid fragment advertisements are matched against.
    pub fn service_uuid(&self) -> &str {
        &self.service_uuid
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn service_uuid_is_lowercased() {
        let config = ScanConfig::default().with_service_uuid("FFF0");
        assert_eq!(config.service_uuid(), "fff0");
    }

    #[test]
    fn defaults() {
        let config = ScanConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.progress_interval, Duration::from_millis(500));
        assert_eq!(config.protocol, ProtocolConfig::default());
    }
}
