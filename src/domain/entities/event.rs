use super::guild::GuildProfile;
use super::ids::GuildId;
use super::interaction::IncomingInteraction;
use super::message::IncomingMessage;

/// Gateway event names that modules can bind to.
pub mod names {
    pub const READY: &str = "ready";
    pub const GUILD_CREATE: &str = "guild_create";
    pub const MESSAGE: &str = "message";
    pub const INTERACTION_CREATE: &str = "interaction_create";
}

/// A consumed gateway event in platform-free form, handed to event bindings.
#[derive(Debug, Clone)]
pub enum EventPayload {
    Ready {
        username: String,
        guilds: Vec<GuildId>,
    },
    GuildJoined(GuildProfile),
    Message(IncomingMessage),
    Interaction(IncomingInteraction),
}

impl EventPayload {
    pub fn name(&self) -> &'static str {
        match self {
            EventPayload::Ready { .. } => names::READY,
            EventPayload::GuildJoined(_) => names::GUILD_CREATE,
            EventPayload::Message(_) => names::MESSAGE,
            EventPayload::Interaction(_) => names::INTERACTION_CREATE,
        }
    }
}
