use super::ids::GuildId;

/// Everything needed to answer an interaction later: its id and one-shot token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionRef {
    pub id: u64,
    pub token: String,
}

impl InteractionRef {
    pub fn new(id: u64, token: impl Into<String>) -> Self {
        Self {
            id,
            token: token.into(),
        }
    }
}

/// What kind of interaction arrived. Only command invocations are routed;
/// everything else is dropped by the interaction router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionKind {
    Command { name: String },
    Other,
}

/// An inbound structured interaction, translated out of the gateway client's
/// types.
#[derive(Debug, Clone)]
pub struct IncomingInteraction {
    pub reference: InteractionRef,
    pub guild_id: Option<GuildId>,
    pub kind: InteractionKind,
}

impl IncomingInteraction {
    pub fn command(reference: InteractionRef, name: impl Into<String>) -> Self {
        Self {
            reference,
            guild_id: None,
            kind: InteractionKind::Command { name: name.into() },
        }
    }

    pub fn other(reference: InteractionRef) -> Self {
        Self {
            reference,
            guild_id: None,
            kind: InteractionKind::Other,
        }
    }

    pub fn in_guild(mut self, guild: impl Into<GuildId>) -> Self {
        self.guild_id = Some(guild.into());
        self
    }

    pub fn command_name(&self) -> Option<&str> {
        match &self.kind {
            InteractionKind::Command { name } => Some(name),
            InteractionKind::Other => None,
        }
    }
}
