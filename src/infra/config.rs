//! Configuration management infrastructure.
//!
//! The worker reads at most one TOML file, before bootstrap. After the
//! filesystem root is confined nothing is read from disk.

use crate::domain::constants::{DEFAULT_MAX_MESSAGE_BYTES, MAX_MESSAGE_BYTES_LIMIT};
use crate::infra::error::{CertprocError, CertprocResult};
use crate::services::IssuerPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Whether the syscall filter is installed during bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyscallFilterMode {
    #[default]
    Enforce,
    Off,
}

/// Worker configuration with all tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct WorkerConfiguration {
    /// Empty, non-writable directory that becomes the filesystem root
    pub empty_root: PathBuf,

    /// Syscall filter mode
    pub syscall_filter: SyscallFilterMode,

    /// Largest accepted inbound payload
    pub max_message_bytes: u32,

    /// Trust policy for the fetched chain
    pub issuer_policy: IssuerPolicy,
}

impl Default for WorkerConfiguration {
    fn default() -> Self {
        Self {
            empty_root: PathBuf::from("/var/empty"),
            syscall_filter: SyscallFilterMode::Enforce,
            max_message_bytes: DEFAULT_MAX_MESSAGE_BYTES,
            issuer_policy: IssuerPolicy::Delegated,
        }
    }
}

/// Configuration manager for handling config files
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a configuration manager with custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    /// Load configuration from file, falling back to defaults if it doesn't exist
    pub fn load_or_default(&self) -> CertprocResult<WorkerConfiguration> {
        if self.config_path.exists() {
            self.load()
        } else {
            log::info!(
                "Configuration file not found, using defaults: {}",
                self.config_path.display()
            );
            Ok(WorkerConfiguration::default())
        }
    }

    /// Load configuration from file
    pub fn load(&self) -> CertprocResult<WorkerConfiguration> {
        log::info!("Loading configuration from: {}", self.config_path.display());

        let content = fs::read_to_string(&self.config_path).map_err(|e| {
            CertprocError::Configuration(format!(
                "Failed to read config file {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        let config: WorkerConfiguration = toml::from_str(&content).map_err(|e| {
            CertprocError::Configuration(format!("Failed to parse config file: {e}"))
        })?;

        validate_config(&config)?;
        Ok(config)
    }
}

/// Validate configuration values
pub fn validate_config(config: &WorkerConfiguration) -> CertprocResult<()> {
    if !config.empty_root.is_absolute() {
        return Err(CertprocError::Configuration(format!(
            "empty-root must be an absolute path, got: {}",
            config.empty_root.display()
        )));
    }

    if config.max_message_bytes == 0 || config.max_message_bytes > MAX_MESSAGE_BYTES_LIMIT {
        return Err(CertprocError::Configuration(format!(
            "max-message-bytes must be between 1 and {MAX_MESSAGE_BYTES_LIMIT}, got: {}",
            config.max_message_bytes
        )));
    }

    Ok(())
}
