//! Recording gateway mock shared by the unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::errors::GatewayError;
use crate::domain::entities::{ChannelId, GuildId, Outgoing, Surface, UserId};
use crate::domain::traits::Gateway;

/// One observed outbound action.
#[derive(Debug, Clone)]
pub enum Action {
    Leave(GuildId),
    Send {
        channel: ChannelId,
        payload: Outgoing,
    },
    Reply {
        surface: Surface,
        payload: Outgoing,
        private: bool,
    },
}

/// Gateway double that records every outbound action and can be told to fail
/// specific action kinds.
pub struct RecordingGateway {
    bot: UserId,
    actions: Mutex<Vec<Action>>,
    fail_leaves: bool,
    fail_sends: bool,
    fail_replies: bool,
}

impl RecordingGateway {
    pub fn new(bot: impl Into<UserId>) -> Self {
        Self {
            bot: bot.into(),
            actions: Mutex::new(Vec::new()),
            fail_leaves: false,
            fail_sends: false,
            fail_replies: false,
        }
    }

    pub fn failing_leaves(mut self) -> Self {
        self.fail_leaves = true;
        self
    }

    pub fn failing_sends(mut self) -> Self {
        self.fail_sends = true;
        self
    }

    pub fn failing_replies(mut self) -> Self {
        self.fail_replies = true;
        self
    }

    pub fn actions(&self) -> Vec<Action> {
        self.actions.lock().unwrap().clone()
    }

    pub fn leaves(&self) -> Vec<GuildId> {
        self.actions()
            .into_iter()
            .filter_map(|a| match a {
                Action::Leave(g) => Some(g),
                _ => None,
            })
            .collect()
    }

    pub fn sends(&self) -> Vec<(ChannelId, Outgoing)> {
        self.actions()
            .into_iter()
            .filter_map(|a| match a {
                Action::Send { channel, payload } => Some((channel, payload)),
                _ => None,
            })
            .collect()
    }

    pub fn replies(&self) -> Vec<(Surface, Outgoing, bool)> {
        self.actions()
            .into_iter()
            .filter_map(|a| match a {
                Action::Reply {
                    surface,
                    payload,
                    private,
                } => Some((surface, payload, private)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, action: Action) {
        self.actions.lock().unwrap().push(action);
    }
}

#[async_trait]
impl Gateway for RecordingGateway {
    fn bot_user(&self) -> UserId {
        self.bot
    }

    async fn leave_guild(&self, guild: GuildId) -> Result<(), GatewayError> {
        if self.fail_leaves {
            return Err(GatewayError::Request("leave refused".to_string()));
        }
        self.record(Action::Leave(guild));
        Ok(())
    }

    async fn send(&self, channel: ChannelId, payload: &Outgoing) -> Result<(), GatewayError> {
        if self.fail_sends {
            return Err(GatewayError::Unavailable(format!("channel {}", channel)));
        }
        self.record(Action::Send {
            channel,
            payload: payload.clone(),
        });
        Ok(())
    }

    async fn reply(
        &self,
        surface: &Surface,
        payload: &Outgoing,
        private: bool,
    ) -> Result<(), GatewayError> {
        if self.fail_replies {
            return Err(GatewayError::Request("reply refused".to_string()));
        }
        self.record(Action::Reply {
            surface: surface.clone(),
            payload: payload.clone(),
            private,
        });
        Ok(())
    }
}
