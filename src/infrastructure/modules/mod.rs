//! Disk module discovery - manifests plus shared libraries

pub mod loader;
pub mod manifest;

pub use loader::{DirectoryCommands, DirectoryEvents};
pub use manifest::{CommandManifest, EventManifest};
