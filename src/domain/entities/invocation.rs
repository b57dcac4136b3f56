use uuid::Uuid;

use super::ids::{ChannelId, GuildId, MessageId};
use super::interaction::{IncomingInteraction, InteractionRef};
use super::message::IncomingMessage;

/// Where a reply to an invocation should land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Surface {
    /// Reply in the channel, referencing the triggering message.
    Channel {
        channel: ChannelId,
        message: MessageId,
    },
    /// Respond to the interaction itself.
    Interaction(InteractionRef),
}

/// What triggered a command invocation.
#[derive(Debug, Clone)]
pub enum Origin {
    Message(IncomingMessage),
    Interaction(IncomingInteraction),
}

/// Transient per-invocation context. Created by a router when a command
/// matches, handed to the handler and the error boundary, then dropped.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Correlation id tying handler logs to boundary logs.
    pub id: Uuid,
    pub origin: Origin,
    /// Positional arguments; always empty for interaction-sourced invocations.
    pub args: Vec<String>,
}

impl Invocation {
    pub fn from_message(message: IncomingMessage, args: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin: Origin::Message(message),
            args,
        }
    }

    pub fn from_interaction(interaction: IncomingInteraction) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin: Origin::Interaction(interaction),
            args: Vec::new(),
        }
    }

    pub fn guild_id(&self) -> Option<GuildId> {
        match &self.origin {
            Origin::Message(m) => m.guild_id,
            Origin::Interaction(i) => i.guild_id,
        }
    }

    pub fn surface(&self) -> Surface {
        match &self.origin {
            Origin::Message(m) => Surface::Channel {
                channel: m.channel_id,
                message: m.id,
            },
            Origin::Interaction(i) => Surface::Interaction(i.reference.clone()),
        }
    }

    pub fn is_interaction(&self) -> bool {
        matches!(self.origin, Origin::Interaction(_))
    }
}
