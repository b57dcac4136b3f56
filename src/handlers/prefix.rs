use std::sync::Arc;

use async_trait::async_trait;

use crate::application::errors::CommandError;
use crate::domain::entities::{Invocation, Outgoing, PrefixMap};
use crate::domain::traits::{CommandModule, Gateway};

/// Text-only command reporting the effective prefix for the current guild.
pub struct Prefix {
    prefixes: Arc<PrefixMap>,
}

impl Prefix {
    pub fn new(prefixes: Arc<PrefixMap>) -> Self {
        Self { prefixes }
    }
}

#[async_trait]
impl CommandModule for Prefix {
    fn name(&self) -> &str {
        "prefix"
    }

    fn description(&self) -> Option<&str> {
        Some("Show the command prefix for this server")
    }

    async fn execute(
        &self,
        invocation: &Invocation,
        gateway: &dyn Gateway,
    ) -> Result<(), CommandError> {
        let prefix = self.prefixes.prefix_for(invocation.guild_id());
        gateway
            .reply(
                &invocation.surface(),
                &Outgoing::text(format!("The prefix here is `{}`", prefix)),
                false,
            )
            .await?;
        Ok(())
    }
}
