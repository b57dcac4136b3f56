use async_trait::async_trait;

use crate::application::errors::CommandError;
use crate::domain::entities::{event::names, EventPayload};
use crate::domain::traits::{EventModule, Gateway};

/// Fire-once connection announcer.
#[derive(Default)]
pub struct ReadyAnnouncer;

#[async_trait]
impl EventModule for ReadyAnnouncer {
    fn event(&self) -> &str {
        names::READY
    }

    fn once(&self) -> bool {
        true
    }

    async fn handle(
        &self,
        payload: &EventPayload,
        _gateway: &dyn Gateway,
    ) -> Result<(), CommandError> {
        if let EventPayload::Ready { username, guilds } = payload {
            tracing::info!("Connected as {} to {} guild(s)", username, guilds.len());
        }
        Ok(())
    }
}
