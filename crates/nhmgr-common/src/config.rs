//! Runtime configuration.
//!
//! ```yaml
//! ip_cmd: /sbin/ip
//! check_binary: true
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{NhMgrError, NhMgrResult};
use crate::shell::IP_CMD;

/// Default values for configuration fields.
pub mod defaults {
    /// Verify the `ip` program is available before running operations.
    pub const CHECK_BINARY: bool = true;
}

/// Configuration for [`crate::NextHopMgr`] and the `nhctl` front end.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NhMgrConfig {
    /// Program used for every `ip` invocation; bare names resolve on PATH.
    pub ip_cmd: String,
    /// Whether front ends check `ip_cmd` availability up front.
    pub check_binary: bool,
}

impl Default for NhMgrConfig {
    fn default() -> Self {
        Self {
            ip_cmd: IP_CMD.to_string(),
            check_binary: defaults::CHECK_BINARY,
        }
    }
}

impl NhMgrConfig {
    /// Parses a YAML document. Missing fields take their defaults.
    pub fn from_yaml(text: &str) -> NhMgrResult<Self> {
        let config: Self = serde_yaml::from_str(text)
            .map_err(|e| NhMgrError::invalid_config("yaml", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a YAML configuration file.
    pub fn load(path: impl AsRef<Path>) -> NhMgrResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            NhMgrError::invalid_config(path.display().to_string(), e.to_string())
        })?;
        Self::from_yaml(&text)
    }

    /// Overrides the `ip` program.
    pub fn with_ip_cmd(mut self, ip_cmd: impl Into<String>) -> Self {
        self.ip_cmd = ip_cmd.into();
        self
    }

    pub fn validate(&self) -> NhMgrResult<()> {
        if self.ip_cmd.trim().is_empty() {
            return Err(NhMgrError::invalid_config("ip_cmd", "must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default() {
        let config = NhMgrConfig::default();
        assert_eq!(config.ip_cmd, "ip");
        assert!(config.check_binary);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = NhMgrConfig::from_yaml("ip_cmd: /sbin/ip\n").unwrap();
        assert_eq!(config.ip_cmd, "/sbin/ip");
        assert!(config.check_binary);
    }

    #[test]
    fn test_from_yaml_full() {
        let config = NhMgrConfig::from_yaml("ip_cmd: /usr/sbin/ip\ncheck_binary: false\n").unwrap();
        assert_eq!(
            config,
            NhMgrConfig {
                ip_cmd: "/usr/sbin/ip".to_string(),
                check_binary: false,
            }
        );
    }

    #[test]
    fn test_from_yaml_unknown_field() {
        let result = NhMgrConfig::from_yaml("ip_command: ip\n");
        assert!(matches!(result, Err(NhMgrError::InvalidConfig { .. })));
    }

    #[test]
    fn test_from_yaml_empty_ip_cmd() {
        match NhMgrConfig::from_yaml("ip_cmd: \"  \"\n") {
            Err(NhMgrError::InvalidConfig { field, .. }) => assert_eq!(field, "ip_cmd"),
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ip_cmd: /sbin/ip").unwrap();
        let config = NhMgrConfig::load(file.path()).unwrap();
        assert_eq!(config.ip_cmd, "/sbin/ip");
    }

    #[test]
    fn test_load_missing_file() {
        let result = NhMgrConfig::load("/nonexistent/nhmgr.yaml");
        assert!(matches!(result, Err(NhMgrError::InvalidConfig { .. })));
    }

    #[test]
    fn test_with_ip_cmd() {
        let config = NhMgrConfig::default().with_ip_cmd("/bin/ip");
        assert_eq!(config.ip_cmd, "/bin/ip");
    }
}
