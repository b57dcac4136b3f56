use async_trait::async_trait;

use crate::application::errors::GatewayError;
use crate::domain::entities::{ChannelId, GuildId, Outgoing, Surface, UserId};

/// Gateway trait - abstraction over the real-time client's outbound actions.
///
/// The serenity adapter is the production implementation; tests substitute a
/// recording mock to observe departures and replies.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// The bot's own account id, used for mention addressing.
    fn bot_user(&self) -> UserId;

    /// Leave a guild the bot is currently a member of.
    async fn leave_guild(&self, guild: GuildId) -> Result<(), GatewayError>;

    /// Send a standalone payload to a channel.
    async fn send(&self, channel: ChannelId, payload: &Outgoing) -> Result<(), GatewayError>;

    /// Reply on the surface an invocation came from. `private` requests a
    /// caller-only response where the surface supports one (interactions).
    async fn reply(
        &self,
        surface: &Surface,
        payload: &Outgoing,
        private: bool,
    ) -> Result<(), GatewayError>;
}
