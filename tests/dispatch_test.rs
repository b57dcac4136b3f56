//! End-to-end dispatch tests: registry, routers, gatekeeper, and the error
//! boundary wired together over the public API, observed through a recording
//! gateway double.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use gatewarden::application::errors::{CommandError, GatewayError};
use gatewarden::application::routing::{
    ErrorBoundary, InteractionRouter, MessageRouter, RouteOutcome,
};
use gatewarden::application::{GuildGatekeeper, HandlerRegistry, ModuleTable};
use gatewarden::domain::entities::{
    Author, ChannelId, GuildId, GuildProfile, IncomingInteraction, IncomingMessage,
    InteractionRef, Invocation, Outgoing, PrefixMap, Surface, UserId,
};
use gatewarden::domain::traits::{CommandModule, CommandSource, EventSource, Gateway};
use gatewarden::handlers;

const BOT: u64 = 42;
const SAFE_GUILD: u64 = 1000;
const LOG_CHANNEL: u64 = 2000;

#[derive(Debug, Clone)]
enum Seen {
    Leave(GuildId),
    Send(ChannelId, Outgoing),
    Reply(Surface, Outgoing, bool),
}

#[derive(Default)]
struct TestGateway {
    seen: Mutex<Vec<Seen>>,
}

impl TestGateway {
    fn new() -> Self {
        Self::default()
    }

    fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }

    fn replies(&self) -> Vec<(Surface, Outgoing, bool)> {
        self.seen()
            .into_iter()
            .filter_map(|s| match s {
                Seen::Reply(surface, payload, private) => Some((surface, payload, private)),
                _ => None,
            })
            .collect()
    }

    fn leaves(&self) -> Vec<GuildId> {
        self.seen()
            .into_iter()
            .filter_map(|s| match s {
                Seen::Leave(guild) => Some(guild),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl Gateway for TestGateway {
    fn bot_user(&self) -> UserId {
        UserId(BOT)
    }

    async fn leave_guild(&self, guild: GuildId) -> Result<(), GatewayError> {
        self.seen.lock().unwrap().push(Seen::Leave(guild));
        Ok(())
    }

    async fn send(&self, channel: ChannelId, payload: &Outgoing) -> Result<(), GatewayError> {
        self.seen
            .lock()
            .unwrap()
            .push(Seen::Send(channel, payload.clone()));
        Ok(())
    }

    async fn reply(
        &self,
        surface: &Surface,
        payload: &Outgoing,
        private: bool,
    ) -> Result<(), GatewayError> {
        self.seen
            .lock()
            .unwrap()
            .push(Seen::Reply(surface.clone(), payload.clone(), private));
        Ok(())
    }
}

/// A command that always fails, for exercising the boundary end to end.
struct Detonator;

#[async_trait]
impl CommandModule for Detonator {
    fn name(&self) -> &str {
        "boom"
    }

    fn slash_enabled(&self) -> bool {
        true
    }

    async fn execute(
        &self,
        _invocation: &Invocation,
        _gateway: &dyn Gateway,
    ) -> Result<(), CommandError> {
        Err(CommandError::ExecutionFailed(
            "synthetic handler failure".to_string(),
        ))
    }
}

struct Fixture {
    registry: Arc<HandlerRegistry>,
    messages: MessageRouter,
    interactions: InteractionRouter,
}

fn fixture() -> Fixture {
    let prefixes = Arc::new(PrefixMap::new("!").with_override(7u64, "$"));
    let builtins = handlers::builtins(prefixes.clone());
    let extras = ModuleTable::new().with_command(Arc::new(Detonator));
    let command_sources: [&dyn CommandSource; 2] = [&builtins, &extras];
    let event_sources: [&dyn EventSource; 1] = [&builtins];
    let registry = Arc::new(HandlerRegistry::load(&command_sources, &event_sources).unwrap());
    let boundary = Arc::new(ErrorBoundary::default());

    Fixture {
        messages: MessageRouter::new(registry.clone(), prefixes, boundary.clone()),
        interactions: InteractionRouter::new(registry.clone(), boundary),
        registry,
    }
}

fn guild_message(content: &str) -> IncomingMessage {
    IncomingMessage::new(1u64, 10u64, Author::new(5u64, "someone"), content)
        .in_guild(SAFE_GUILD)
}

fn slash(name: &str) -> IncomingInteraction {
    IncomingInteraction::command(InteractionRef::new(77, "tok"), name).in_guild(SAFE_GUILD)
}

#[tokio::test]
async fn text_ping_replies_publicly_in_channel() {
    let f = fixture();
    let gateway = TestGateway::new();

    let outcome = f.messages.route(guild_message("!ping"), &gateway).await;

    assert_eq!(outcome, RouteOutcome::Completed);
    let replies = gateway.replies();
    assert_eq!(replies.len(), 1);
    let (surface, payload, private) = &replies[0];
    assert_eq!(
        *surface,
        Surface::Channel {
            channel: ChannelId(10),
            message: 1u64.into()
        }
    );
    assert!(!private);
    assert!(matches!(payload, Outgoing::Text(t) if t == "Pong!"));
}

#[tokio::test]
async fn slash_ping_replies_on_the_interaction() {
    let f = fixture();
    let gateway = TestGateway::new();

    let outcome = f.interactions.route(slash("ping"), &gateway).await;

    assert_eq!(outcome, RouteOutcome::Completed);
    let replies = gateway.replies();
    assert_eq!(replies.len(), 1);
    assert_eq!(
        replies[0].0,
        Surface::Interaction(InteractionRef::new(77, "tok"))
    );
}

#[tokio::test]
async fn builtin_tables_split_by_slash_capability() {
    let f = fixture();

    // Round trip: every built-in is reachable by exact name.
    for name in ["ping", "uptime", "prefix", "boom"] {
        assert!(f.registry.text_command(name).is_some(), "text: {}", name);
    }
    // Slash-enabled modules are in both tables, text-only in one.
    for name in ["ping", "uptime", "boom"] {
        assert!(f.registry.slash_command(name).is_some(), "slash: {}", name);
    }
    assert!(f.registry.slash_command("prefix").is_none());
}

#[tokio::test]
async fn prefix_command_reports_the_guild_override() {
    let f = fixture();
    let gateway = TestGateway::new();
    let message = IncomingMessage::new(1u64, 10u64, Author::new(5u64, "someone"), "$prefix")
        .in_guild(7u64);

    let outcome = f.messages.route(message, &gateway).await;

    assert_eq!(outcome, RouteOutcome::Completed);
    let replies = gateway.replies();
    assert!(matches!(&replies[0].1, Outgoing::Text(t) if t.contains('$')));
}

#[tokio::test]
async fn handler_failure_notifies_each_surface_appropriately() {
    let f = fixture();
    let gateway = TestGateway::new();

    assert_eq!(
        f.messages.route(guild_message("!boom"), &gateway).await,
        RouteOutcome::Failed
    );
    assert_eq!(
        f.interactions.route(slash("boom"), &gateway).await,
        RouteOutcome::Failed
    );

    let replies = gateway.replies();
    assert_eq!(replies.len(), 2);
    // Channel failure notice is public, interaction notice caller-only.
    assert!(!replies[0].2);
    assert!(replies[1].2);
    for (_, payload, _) in &replies {
        let Outgoing::Notice(notice) = payload else {
            panic!("failure payload should be a notice");
        };
        assert_eq!(notice.title, "❌ Error");
        assert!(!format!("{:?}", notice).contains("synthetic"));
    }

    // The dispatcher is still live afterward.
    assert_eq!(
        f.messages.route(guild_message("!ping"), &gateway).await,
        RouteOutcome::Completed
    );
}

#[tokio::test]
async fn unknown_and_unaddressed_messages_stay_silent() {
    let f = fixture();
    let gateway = TestGateway::new();

    assert_eq!(
        f.messages.route(guild_message("!nosuch"), &gateway).await,
        RouteOutcome::NoMatch
    );
    assert_eq!(
        f.messages.route(guild_message("just chatting"), &gateway).await,
        RouteOutcome::Ignored
    );

    assert!(gateway.seen().is_empty());
}

#[tokio::test]
async fn gatekeeper_enforces_the_allow_list_end_to_end() {
    let gatekeeper = GuildGatekeeper::new(SAFE_GUILD, LOG_CHANNEL);
    let gateway = TestGateway::new();
    let joined = vec![
        GuildProfile::new(SAFE_GUILD, "home", 25),
        GuildProfile::new(3000u64, "intruder", 9),
    ];

    let evicted = gatekeeper.sweep(&joined, &gateway).await;

    assert_eq!(evicted, 1);
    assert_eq!(gateway.leaves(), vec![GuildId(3000)]);
    // Exactly one audit notice, after the departure, to the log channel.
    let seen = gateway.seen();
    assert_eq!(seen.len(), 2);
    assert!(matches!(seen[0], Seen::Leave(GuildId(3000))));
    match &seen[1] {
        Seen::Send(channel, Outgoing::Notice(notice)) => {
            assert_eq!(*channel, ChannelId(LOG_CHANNEL));
            assert!(notice.fields.iter().any(|f| f.value == "intruder"));
            assert!(notice.fields.iter().any(|f| f.value == "3000"));
            assert!(notice.fields.iter().any(|f| f.value == "9"));
        }
        other => panic!("expected audit notice, got {:?}", other),
    }

    // Re-running over the remaining set does nothing further.
    let again = gatekeeper
        .sweep(&[GuildProfile::new(SAFE_GUILD, "home", 25)], &gateway)
        .await;
    assert_eq!(again, 0);
    assert_eq!(gateway.leaves().len(), 1);
}
