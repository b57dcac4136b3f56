//! Error boundary - uniform handler failure reporting
//!
//! Every matched handler runs under this boundary. A failing handler gets
//! its full error logged for operators and a single generic notice sent back
//! to the surface it came from; nothing leaks to the caller and nothing
//! propagates back into the routing loop.

use crate::application::errors::CommandError;
use crate::domain::entities::{Invocation, Notice, Outgoing};
use crate::domain::traits::Gateway;

/// How a failure is rendered to the end user. Comes from configuration; the
/// defaults match the bot's original notices.
#[derive(Debug, Clone)]
pub struct FailureStyle {
    pub title: String,
    pub message: String,
    pub colour: u32,
}

impl Default for FailureStyle {
    fn default() -> Self {
        Self {
            title: "❌ Error".to_string(),
            message: "An error occurred while executing this command.".to_string(),
            colour: 0xFF0000,
        }
    }
}

pub struct ErrorBoundary {
    style: FailureStyle,
}

impl ErrorBoundary {
    pub fn new(style: FailureStyle) -> Self {
        Self { style }
    }

    /// Log a handler failure and notify the originating surface. For
    /// message-sourced invocations the notice is a public channel reply; for
    /// interactions it is caller-only. Never returns an error.
    pub async fn report(
        &self,
        invocation: &Invocation,
        command: &str,
        error: &CommandError,
        gateway: &dyn Gateway,
    ) {
        tracing::error!(
            invocation = %invocation.id,
            command,
            "Handler failed: {}",
            error
        );

        let notice = Notice::new(self.style.title.as_str())
            .with_colour(self.style.colour)
            .with_description(self.style.message.as_str())
            .stamped();
        let private = invocation.is_interaction();

        if let Err(e) = gateway
            .reply(&invocation.surface(), &Outgoing::Notice(notice), private)
            .await
        {
            tracing::warn!(
                invocation = %invocation.id,
                "Failure notice undeliverable: {}",
                e
            );
        }
    }
}

impl Default for ErrorBoundary {
    fn default() -> Self {
        Self::new(FailureStyle::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::RecordingGateway;
    use crate::domain::entities::{
        Author, IncomingInteraction, IncomingMessage, InteractionRef, Surface, UserId,
    };

    fn message_invocation() -> Invocation {
        let message = IncomingMessage::new(9u64, 77u64, Author::new(5u64, "someone"), "!boom")
            .in_guild(100u64);
        Invocation::from_message(message, vec![])
    }

    #[tokio::test]
    async fn message_failures_reply_publicly_in_channel() {
        let gateway = RecordingGateway::new(UserId(1));
        let boundary = ErrorBoundary::default();
        let error = CommandError::ExecutionFailed("kaput".to_string());

        boundary
            .report(&message_invocation(), "boom", &error, &gateway)
            .await;

        let replies = gateway.replies();
        assert_eq!(replies.len(), 1);
        let (surface, payload, private) = &replies[0];
        assert_eq!(
            *surface,
            Surface::Channel {
                channel: 77u64.into(),
                message: 9u64.into()
            }
        );
        assert!(!private);
        let Outgoing::Notice(notice) = payload else {
            panic!("failure payload should be a notice");
        };
        assert_eq!(notice.title, "❌ Error");
        // The underlying error text never reaches the caller.
        assert!(!format!("{:?}", notice).contains("kaput"));
    }

    #[tokio::test]
    async fn interaction_failures_reply_caller_only() {
        let gateway = RecordingGateway::new(UserId(1));
        let boundary = ErrorBoundary::default();
        let interaction =
            IncomingInteraction::command(InteractionRef::new(3, "tok"), "boom").in_guild(100u64);
        let invocation = Invocation::from_interaction(interaction);
        let error = CommandError::ExecutionFailed("kaput".to_string());

        boundary.report(&invocation, "boom", &error, &gateway).await;

        let replies = gateway.replies();
        assert_eq!(replies.len(), 1);
        assert!(replies[0].2, "interaction failure notice must be private");
    }

    #[tokio::test]
    async fn undeliverable_notice_is_swallowed() {
        let gateway = RecordingGateway::new(UserId(1)).failing_replies();
        let boundary = ErrorBoundary::default();
        let error = CommandError::ExecutionFailed("kaput".to_string());

        // Must not panic or propagate.
        boundary
            .report(&message_invocation(), "boom", &error, &gateway)
            .await;

        assert!(gateway.replies().is_empty());
    }
}
