//! Process configuration (environment variables + registry file).

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use tablegate_core::{RegistryEntry, RegistryError, ResourceRegistry, TypeCatalog, TypeDescriptor};
use tablegate_observability::{LogFormat, ParseLogFormatError};

pub const ENV_BIND_ADDR: &str = "TABLEGATE_BIND_ADDR";
pub const ENV_REGISTRY: &str = "TABLEGATE_REGISTRY";
pub const ENV_LOG_FORMAT: &str = "TABLEGATE_LOG_FORMAT";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid TABLEGATE_BIND_ADDR `{value}`: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },

    #[error(transparent)]
    LogFormat(#[from] ParseLogFormatError),

    #[error("failed to read registry file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse registry file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Static registry configuration as stored on disk.
///
/// ```json
/// {
///   "resources": [{"table_name": "widgets", "class_name": "Widget"}],
///   "types": [{"name": "Widget", "required_fields": ["name"]}]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegistryFile {
    #[serde(default)]
    pub resources: Vec<RegistryEntry>,
    #[serde(default)]
    pub types: Vec<TypeDescriptor>,
}

impl RegistryFile {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn into_registry(self) -> Result<ResourceRegistry, RegistryError> {
        let mut types = TypeCatalog::new();
        for descriptor in self.types {
            types.register(descriptor)?;
        }
        ResourceRegistry::new(self.resources, types)
    }
}

/// Runtime configuration of the API process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub registry_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source (used by tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind = lookup(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::BindAddr { value: bind, source })?;

        let log_format = match lookup(ENV_LOG_FORMAT) {
            Some(v) => v.parse::<LogFormat>()?,
            None => LogFormat::default(),
        };

        let registry_path = lookup(ENV_REGISTRY)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            bind_addr,
            registry_path,
            log_format,
        })
    }

    /// Registry and type catalog to serve.
    ///
    /// Without a registry file every named resource is unmapped.
    pub fn load_registry(&self) -> Result<RegistryFile, ConfigError> {
        match &self.registry_path {
            Some(path) => RegistryFile::load(path),
            None => {
                tracing::warn!("{ENV_REGISTRY} not set; serving an empty resource registry");
                Ok(RegistryFile::default())
            }
        }
    }
}
