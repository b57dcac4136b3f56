//! Module manifest definitions
//!
//! Every module shipped in the commands tree or the events folder is a YAML
//! manifest next to its shared library. The manifest declares what the
//! library must provide; the loader refuses to start on any disagreement.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::application::errors::LoadError;

/// Manifest for one command module: `commands/<category>/<name>.yaml`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CommandManifest {
    /// Command name (required, unique lookup key)
    pub name: String,

    /// Whether the command is also exposed as a slash command
    #[serde(default)]
    pub slash: bool,

    pub version: Option<String>,

    pub description: Option<String>,

    /// Path to the shared library, relative to the manifest
    pub library: Option<PathBuf>,
}

/// Manifest for one event module: `events/<name>.yaml`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct EventManifest {
    /// Gateway event to bind to (required)
    pub event: String,

    /// Fire at most once for the process lifetime
    #[serde(default)]
    pub once: bool,

    /// Path to the shared library, relative to the manifest
    pub library: Option<PathBuf>,
}

pub(crate) fn read_manifest<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| LoadError::Manifest {
        path: path.display().to_string(),
        reason: format!("Failed to read manifest: {}", e),
    })?;

    serde_yaml::from_str(&content).map_err(|e| LoadError::Manifest {
        path: path.display().to_string(),
        reason: format!("Failed to parse manifest: {}", e),
    })
}

impl CommandManifest {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        read_manifest(path.as_ref())
    }
}

impl EventManifest {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        read_manifest(path.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(content: &str) -> PathBuf {
        let path =
            std::env::temp_dir().join(format!("gatewarden-manifest-{}.yaml", uuid::Uuid::new_v4()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn command_manifest_parses_with_defaults() {
        let path = write_temp("name: ping\ndescription: Check liveness\n");
        let manifest = CommandManifest::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(manifest.name, "ping");
        assert!(!manifest.slash);
        assert!(manifest.library.is_none());
    }

    #[test]
    fn missing_name_is_a_manifest_error() {
        let path = write_temp("slash: true\n");
        let result = CommandManifest::from_file(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(LoadError::Manifest { .. })));
    }

    #[test]
    fn event_manifest_parses_kebab_case() {
        let path = write_temp("event: guild_create\nonce: true\nlibrary: libcustom.so\n");
        let manifest = EventManifest::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(manifest.event, "guild_create");
        assert!(manifest.once);
        assert_eq!(manifest.library, Some(PathBuf::from("libcustom.so")));
    }
}
