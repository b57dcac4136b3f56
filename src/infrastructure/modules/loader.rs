//! Directory module sources - discover handler modules from disk
//!
//! Layout contract: a two-level commands tree (category folders holding
//! command manifests) and a flat events folder. Each manifest sits next to a
//! shared library exporting a registration symbol. Traversal is sorted
//! lexicographically at both levels so duplicate-name resolution in the
//! registry is reproducible. Any malformed module aborts startup; only a
//! missing root directory is tolerated.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use libloading::{Library, Symbol};

use crate::application::errors::{CommandError, LoadError};
use crate::domain::entities::{EventPayload, Invocation};
use crate::domain::traits::{CommandModule, CommandSource, EventModule, EventSource, Gateway};

use super::manifest::{CommandManifest, EventManifest};

/// Registration symbol a command library must export.
pub const COMMAND_INIT_SYMBOL: &[u8] = b"gatewarden_command_init";
/// Registration symbol an event library must export.
pub const EVENT_INIT_SYMBOL: &[u8] = b"gatewarden_event_init";

pub type CommandInitFn = extern "C" fn() -> *mut dyn CommandModule;
pub type EventInitFn = extern "C" fn() -> *mut dyn EventModule;

/// A command module backed by a shared library. Keeps the library mapped for
/// as long as the module is registered.
struct DylibCommand {
    _library: Arc<Library>,
    inner: Box<dyn CommandModule>,
}

#[async_trait]
impl CommandModule for DylibCommand {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn description(&self) -> Option<&str> {
        self.inner.description()
    }

    fn slash_enabled(&self) -> bool {
        self.inner.slash_enabled()
    }

    async fn execute(
        &self,
        invocation: &Invocation,
        gateway: &dyn Gateway,
    ) -> Result<(), CommandError> {
        self.inner.execute(invocation, gateway).await
    }
}

/// An event module backed by a shared library.
struct DylibEvent {
    _library: Arc<Library>,
    inner: Box<dyn EventModule>,
}

#[async_trait]
impl EventModule for DylibEvent {
    fn event(&self) -> &str {
        self.inner.event()
    }

    fn once(&self) -> bool {
        self.inner.once()
    }

    async fn handle(
        &self,
        payload: &EventPayload,
        gateway: &dyn Gateway,
    ) -> Result<(), CommandError> {
        self.inner.handle(payload, gateway).await
    }
}

/// Command source over the `commands/<category>/<name>.yaml` tree.
pub struct DirectoryCommands {
    root: PathBuf,
}

impl DirectoryCommands {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl CommandSource for DirectoryCommands {
    fn discover(&self) -> Result<Vec<Arc<dyn CommandModule>>, LoadError> {
        let mut modules: Vec<Arc<dyn CommandModule>> = Vec::new();

        for manifest_path in command_manifests(&self.root)? {
            let manifest = CommandManifest::from_file(&manifest_path)?;
            if manifest.name.trim().is_empty() {
                return Err(LoadError::MissingName(manifest_path.display().to_string()));
            }

            let library_path = resolve_library(
                &manifest_path,
                manifest.library.as_deref(),
                &manifest.name,
            );
            let (library, raw) =
                load_init::<CommandInitFn>(&library_path, COMMAND_INIT_SYMBOL)?;
            let ptr = raw();
            if ptr.is_null() {
                return Err(LoadError::Library {
                    path: library_path.display().to_string(),
                    reason: "registration returned null".to_string(),
                });
            }
            let inner = unsafe { Box::from_raw(ptr) };

            let module = DylibCommand {
                _library: library,
                inner,
            };
            if !module.name().eq_ignore_ascii_case(&manifest.name) {
                return Err(LoadError::NameMismatch {
                    path: manifest_path.display().to_string(),
                    manifest: manifest.name,
                    module: module.name().to_string(),
                });
            }
            if module.slash_enabled() != manifest.slash {
                return Err(LoadError::Manifest {
                    path: manifest_path.display().to_string(),
                    reason: format!(
                        "manifest declares slash={} but the module reports {}",
                        manifest.slash,
                        module.slash_enabled()
                    ),
                });
            }

            tracing::info!(
                "Loaded command module '{}' from {}",
                manifest.name,
                library_path.display()
            );
            modules.push(Arc::new(module));
        }

        Ok(modules)
    }
}

/// Event source over the flat `events/<name>.yaml` folder.
pub struct DirectoryEvents {
    root: PathBuf,
}

impl DirectoryEvents {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl EventSource for DirectoryEvents {
    fn discover(&self) -> Result<Vec<Arc<dyn EventModule>>, LoadError> {
        let mut modules: Vec<Arc<dyn EventModule>> = Vec::new();

        if !self.root.exists() {
            tracing::warn!("Events directory {} does not exist", self.root.display());
            return Ok(modules);
        }

        for manifest_path in sorted_manifests(&self.root)? {
            let manifest = EventManifest::from_file(&manifest_path)?;
            if manifest.event.trim().is_empty() {
                return Err(LoadError::MissingName(manifest_path.display().to_string()));
            }

            let stem = manifest_path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
            let library_path =
                resolve_library(&manifest_path, manifest.library.as_deref(), &stem);
            let (library, raw) = load_init::<EventInitFn>(&library_path, EVENT_INIT_SYMBOL)?;
            let ptr = raw();
            if ptr.is_null() {
                return Err(LoadError::Library {
                    path: library_path.display().to_string(),
                    reason: "registration returned null".to_string(),
                });
            }
            let inner = unsafe { Box::from_raw(ptr) };

            let module = DylibEvent {
                _library: library,
                inner,
            };
            if module.event() != manifest.event || module.once() != manifest.once {
                return Err(LoadError::Manifest {
                    path: manifest_path.display().to_string(),
                    reason: format!(
                        "manifest declares {}/once={} but the module reports {}/once={}",
                        manifest.event,
                        manifest.once,
                        module.event(),
                        module.once()
                    ),
                });
            }

            tracing::info!(
                "Loaded event module for '{}' from {}",
                manifest.event,
                library_path.display()
            );
            modules.push(Arc::new(module));
        }

        Ok(modules)
    }
}

/// Manifest path for the default library naming, `libgatewarden_<name>.so`
/// beside the manifest.
fn resolve_library(manifest_path: &Path, declared: Option<&Path>, name: &str) -> PathBuf {
    let dir = manifest_path.parent().unwrap_or_else(|| Path::new("."));
    match declared {
        Some(lib) => dir.join(lib),
        None => dir.join(format!("libgatewarden_{}.so", name)),
    }
}

fn load_init<F>(library_path: &Path, symbol: &[u8]) -> Result<(Arc<Library>, F), LoadError>
where
    F: Copy,
{
    if !library_path.exists() {
        return Err(LoadError::Library {
            path: library_path.display().to_string(),
            reason: "library not found".to_string(),
        });
    }

    let library = unsafe {
        Library::new(library_path).map_err(|e| LoadError::Library {
            path: library_path.display().to_string(),
            reason: e.to_string(),
        })?
    };
    let init = unsafe {
        let symbol: Symbol<F> = library.get(symbol).map_err(|e| LoadError::Library {
            path: library_path.display().to_string(),
            reason: format!("missing registration symbol: {}", e),
        })?;
        *symbol
    };

    Ok((Arc::new(library), init))
}

/// The command manifests under `root`, category directories and manifests
/// both in lexicographic order. A missing root yields an empty list.
pub(crate) fn command_manifests(root: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let mut manifests = Vec::new();

    if !root.exists() {
        tracing::warn!("Commands directory {} does not exist", root.display());
        return Ok(manifests);
    }

    for category in sorted_entries(root)? {
        if !category.is_dir() {
            continue;
        }
        if category
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('.'))
        {
            continue;
        }
        manifests.extend(sorted_manifests(&category)?);
    }

    Ok(manifests)
}

fn sorted_manifests(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    Ok(sorted_entries(dir)?
        .into_iter()
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("yaml"))
        .collect())
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        entries.push(entry?.path());
    }
    entries.sort();
    Ok(entries)
}
