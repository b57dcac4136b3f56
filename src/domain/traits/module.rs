use std::sync::Arc;

use async_trait::async_trait;

use crate::application::errors::{CommandError, LoadError};
use crate::domain::entities::{EventPayload, Invocation};

use super::gateway::Gateway;

/// Registration interface every command satisfies, whether built in or
/// discovered on disk.
#[async_trait]
pub trait CommandModule: Send + Sync {
    /// Unique lookup key. Must be non-empty and is matched case-folded.
    fn name(&self) -> &str;

    fn description(&self) -> Option<&str> {
        None
    }

    /// Slash-enabled commands are additionally indexed into the interaction
    /// command table.
    fn slash_enabled(&self) -> bool {
        false
    }

    async fn execute(
        &self,
        invocation: &Invocation,
        gateway: &dyn Gateway,
    ) -> Result<(), CommandError>;
}

/// Registration interface for gateway event handlers.
#[async_trait]
pub trait EventModule: Send + Sync {
    /// Name of the gateway event to bind to, see `entities::event::names`.
    fn event(&self) -> &str;

    /// A once-binding fires at most one time for the process lifetime.
    fn once(&self) -> bool {
        false
    }

    async fn handle(
        &self,
        payload: &EventPayload,
        gateway: &dyn Gateway,
    ) -> Result<(), CommandError>;
}

/// A source of command records: an embedded table of built-ins or a scan of
/// the commands tree. The registry consumes sources in order; it does not
/// care where records come from.
pub trait CommandSource {
    fn discover(&self) -> Result<Vec<Arc<dyn CommandModule>>, LoadError>;
}

/// A source of event records.
pub trait EventSource {
    fn discover(&self) -> Result<Vec<Arc<dyn EventModule>>, LoadError>;
}
