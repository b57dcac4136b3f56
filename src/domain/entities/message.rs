use super::ids::{ChannelId, GuildId, MessageId, UserId};

/// The account that produced a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: UserId,
    pub name: String,
    pub is_bot: bool,
}

impl Author {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_bot: false,
        }
    }

    pub fn bot(mut self) -> Self {
        self.is_bot = true;
        self
    }
}

/// An inbound text message, translated out of the gateway client's types.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub id: MessageId,
    pub guild_id: Option<GuildId>,
    pub channel_id: ChannelId,
    pub author: Author,
    pub content: String,
}

impl IncomingMessage {
    pub fn new(
        id: impl Into<MessageId>,
        channel_id: impl Into<ChannelId>,
        author: Author,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            guild_id: None,
            channel_id: channel_id.into(),
            author,
            content: content.into(),
        }
    }

    pub fn in_guild(mut self, guild: impl Into<GuildId>) -> Self {
        self.guild_id = Some(guild.into());
        self
    }
}
