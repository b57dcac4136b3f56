//! Message router - prefix and mention addressing for text commands

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::application::registry::HandlerRegistry;
use crate::application::routing::boundary::ErrorBoundary;
use crate::domain::entities::{IncomingMessage, Invocation, PrefixMap, UserId};
use crate::domain::traits::Gateway;

/// Leading bot mention, in either plain or nickname form.
static MENTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<@!?(\d+)>").unwrap());

/// Terminal state of one routed message, mostly for tests and debug logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Not addressed to the bot, from a bot, or outside a guild.
    Ignored,
    /// Addressed, but no command with that name is registered.
    NoMatch,
    Completed,
    Failed,
}

pub struct MessageRouter {
    registry: Arc<HandlerRegistry>,
    prefixes: Arc<PrefixMap>,
    boundary: Arc<ErrorBoundary>,
}

impl MessageRouter {
    pub fn new(
        registry: Arc<HandlerRegistry>,
        prefixes: Arc<PrefixMap>,
        boundary: Arc<ErrorBoundary>,
    ) -> Self {
        Self {
            registry,
            prefixes,
            boundary,
        }
    }

    pub async fn route(&self, message: IncomingMessage, gateway: &dyn Gateway) -> RouteOutcome {
        if message.author.is_bot || message.guild_id.is_none() {
            return RouteOutcome::Ignored;
        }

        let Some(rest) = self.address(&message, gateway.bot_user()) else {
            return RouteOutcome::Ignored;
        };
        let Some((name, args)) = tokenize(rest) else {
            return RouteOutcome::Ignored;
        };

        let Some(module) = self.registry.text_command(&name).cloned() else {
            tracing::debug!("No command named '{}', dropping", name);
            return RouteOutcome::NoMatch;
        };

        let invocation = Invocation::from_message(message, args);
        tracing::debug!(invocation = %invocation.id, command = %name, "Dispatching text command");
        match module.execute(&invocation, gateway).await {
            Ok(()) => RouteOutcome::Completed,
            Err(e) => {
                self.boundary.report(&invocation, &name, &e, gateway).await;
                RouteOutcome::Failed
            }
        }
    }

    /// Strip the addressing marker: the guild's configured prefix (default
    /// fallback) first, then a direct leading mention of the bot. Returns the
    /// command text, or None when the message is not addressed to the bot.
    fn address<'m>(&self, message: &'m IncomingMessage, bot: UserId) -> Option<&'m str> {
        let prefix = self.prefixes.prefix_for(message.guild_id);
        if let Some(rest) = message.content.strip_prefix(prefix) {
            return Some(rest);
        }

        let captures = MENTION.captures(&message.content)?;
        if captures[1].parse::<u64>().ok()? != bot.get() {
            return None;
        }
        Some(&message.content[captures.get(0).unwrap().end()..])
    }
}

/// Split on whitespace runs: case-folded command name first, positional args
/// after. None when nothing follows the addressing marker.
fn tokenize(rest: &str) -> Option<(String, Vec<String>)> {
    let mut tokens = rest.split_whitespace();
    let name = tokens.next()?.to_lowercase();
    let args = tokens.map(str::to_string).collect();
    Some((name, args))
}
