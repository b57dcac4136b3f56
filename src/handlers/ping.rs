use async_trait::async_trait;

use crate::application::errors::CommandError;
use crate::domain::entities::{Invocation, Outgoing};
use crate::domain::traits::{CommandModule, Gateway};

/// Liveness check, reachable as `<prefix>ping` and `/ping`.
pub struct Ping;

#[async_trait]
impl CommandModule for Ping {
    fn name(&self) -> &str {
        "ping"
    }

    fn description(&self) -> Option<&str> {
        Some("Check that the bot is alive")
    }

    fn slash_enabled(&self) -> bool {
        true
    }

    async fn execute(
        &self,
        invocation: &Invocation,
        gateway: &dyn Gateway,
    ) -> Result<(), CommandError> {
        gateway
            .reply(&invocation.surface(), &Outgoing::text("Pong!"), false)
            .await?;
        Ok(())
    }
}
