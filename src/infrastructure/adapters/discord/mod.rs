//! Discord adapter
//!
//! Bridges serenity gateway events into the platform-free core: inbound
//! payloads are translated to domain entities before any routing decision,
//! and all outbound actions go through the `Gateway` trait so the core never
//! touches serenity types.

use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{
    ChannelId as DiscordChannelId, Colour, Context, CreateEmbed, CreateMessage, EventHandler,
    Guild, GuildId as DiscordGuildId, Interaction, InteractionId, Message,
    MessageId as DiscordMessageId, MessageReference, Ready, Timestamp,
};
use serenity::http::Http;

use crate::application::errors::GatewayError;
use crate::application::gatekeeper::GuildGatekeeper;
use crate::application::registry::HandlerRegistry;
use crate::application::routing::{ErrorBoundary, InteractionRouter, MessageRouter};
use crate::domain::entities::{
    Author, ChannelId, EventPayload, GuildId, GuildProfile, IncomingInteraction, IncomingMessage,
    InteractionRef, Notice, Outgoing, PrefixMap, Surface, UserId,
};
use crate::domain::traits::Gateway;

/// serenity-backed implementation of the outbound `Gateway` seam.
pub struct SerenityGateway {
    http: Arc<Http>,
    bot: UserId,
}

impl SerenityGateway {
    fn from_context(ctx: &Context) -> Self {
        Self {
            http: ctx.http.clone(),
            bot: UserId(ctx.cache.current_user().id.get()),
        }
    }

    fn message_builder(payload: &Outgoing) -> CreateMessage {
        match payload {
            Outgoing::Text(text) => CreateMessage::new().content(text.as_str()),
            Outgoing::Notice(notice) => CreateMessage::new().embed(notice_embed(notice)),
        }
    }
}

#[async_trait]
impl Gateway for SerenityGateway {
    fn bot_user(&self) -> UserId {
        self.bot
    }

    async fn leave_guild(&self, guild: GuildId) -> Result<(), GatewayError> {
        self.http
            .leave_guild(DiscordGuildId::new(guild.get()))
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))
    }

    async fn send(&self, channel: ChannelId, payload: &Outgoing) -> Result<(), GatewayError> {
        DiscordChannelId::new(channel.get())
            .send_message(&self.http, Self::message_builder(payload))
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?;
        Ok(())
    }

    async fn reply(
        &self,
        surface: &Surface,
        payload: &Outgoing,
        private: bool,
    ) -> Result<(), GatewayError> {
        match surface {
            Surface::Channel { channel, message } => {
                let reference = MessageReference::from((
                    DiscordChannelId::new(channel.get()),
                    DiscordMessageId::new(message.get()),
                ));
                DiscordChannelId::new(channel.get())
                    .send_message(
                        &self.http,
                        Self::message_builder(payload).reference_message(reference),
                    )
                    .await
                    .map_err(|e| GatewayError::Request(e.to_string()))?;
                Ok(())
            }
            Surface::Interaction(reference) => {
                let mut data = serde_json::Map::new();
                match payload {
                    Outgoing::Text(text) => {
                        data.insert("content".to_string(), serde_json::json!(text));
                    }
                    Outgoing::Notice(notice) => {
                        data.insert(
                            "embeds".to_string(),
                            serde_json::json!([notice_embed(notice)]),
                        );
                    }
                }
                if private {
                    // EPHEMERAL message flag
                    data.insert("flags".to_string(), serde_json::json!(64));
                }
                let body = serde_json::json!({ "type": 4, "data": data });
                self.http
                    .create_interaction_response(
                        InteractionId::new(reference.id),
                        &reference.token,
                        &body,
                        Vec::new(),
                    )
                    .await
                    .map_err(|e| GatewayError::Request(e.to_string()))
            }
        }
    }
}

fn notice_embed(notice: &Notice) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(notice.title.as_str())
        .colour(Colour::new(notice.colour));
    if let Some(description) = &notice.description {
        embed = embed.description(description.as_str());
    }
    for field in &notice.fields {
        embed = embed.field(field.name.as_str(), field.value.as_str(), field.inline);
    }
    if let Some(at) = notice.timestamp {
        if let Ok(at) = Timestamp::from_unix_timestamp(at.timestamp()) {
            embed = embed.timestamp(at);
        }
    }
    embed
}

fn translate_message(msg: &Message) -> IncomingMessage {
    let mut author = Author::new(msg.author.id.get(), msg.author.name.clone());
    if msg.author.bot {
        author = author.bot();
    }
    let mut incoming =
        IncomingMessage::new(msg.id.get(), msg.channel_id.get(), author, msg.content.clone());
    if let Some(guild) = msg.guild_id {
        incoming = incoming.in_guild(guild.get());
    }
    incoming
}

fn translate_interaction(interaction: &Interaction) -> Option<IncomingInteraction> {
    let incoming = match interaction {
        Interaction::Command(command) => {
            let mut incoming = IncomingInteraction::command(
                InteractionRef::new(command.id.get(), command.token.clone()),
                command.data.name.clone(),
            );
            if let Some(guild) = command.guild_id {
                incoming = incoming.in_guild(guild.get());
            }
            incoming
        }
        Interaction::Component(component) => IncomingInteraction::other(InteractionRef::new(
            component.id.get(),
            component.token.clone(),
        )),
        Interaction::Modal(modal) => IncomingInteraction::other(InteractionRef::new(
            modal.id.get(),
            modal.token.clone(),
        )),
        _ => return None,
    };
    Some(incoming)
}

fn guild_profile(guild: &Guild) -> GuildProfile {
    GuildProfile::new(guild.id.get(), guild.name.clone(), guild.member_count)
}

/// The serenity event handler wiring gateway callbacks to the core.
pub struct DiscordAdapter {
    registry: Arc<HandlerRegistry>,
    messages: MessageRouter,
    interactions: InteractionRouter,
    gatekeeper: GuildGatekeeper,
}

impl DiscordAdapter {
    pub fn new(
        registry: Arc<HandlerRegistry>,
        prefixes: Arc<PrefixMap>,
        gatekeeper: GuildGatekeeper,
        boundary: Arc<ErrorBoundary>,
    ) -> Self {
        Self {
            messages: MessageRouter::new(registry.clone(), prefixes, boundary.clone()),
            interactions: InteractionRouter::new(registry.clone(), boundary),
            registry,
            gatekeeper,
        }
    }
}

#[async_trait]
impl EventHandler for DiscordAdapter {
    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!("{} is online!", ready.user.tag());
        let gateway = SerenityGateway::from_context(&ctx);
        let payload = EventPayload::Ready {
            username: ready.user.name.clone(),
            guilds: ready.guilds.iter().map(|g| GuildId(g.id.get())).collect(),
        };
        self.registry.dispatch_event(&payload, &gateway).await;
    }

    /// Fires once the guilds from `ready` are fully cached; this is where
    /// the startup eviction sweep runs.
    async fn cache_ready(&self, ctx: Context, guilds: Vec<DiscordGuildId>) {
        let profiles: Vec<GuildProfile> = guilds
            .iter()
            .filter_map(|id| ctx.cache.guild(*id).map(|g| guild_profile(&g)))
            .collect();
        let gateway = SerenityGateway::from_context(&ctx);
        self.gatekeeper.sweep(&profiles, &gateway).await;
    }

    async fn guild_create(&self, ctx: Context, guild: Guild, is_new: Option<bool>) {
        // Startup availability replays are covered by the cache_ready sweep.
        if !is_new.unwrap_or(false) {
            return;
        }
        let profile = guild_profile(&guild);
        let gateway = SerenityGateway::from_context(&ctx);
        self.registry
            .dispatch_event(&EventPayload::GuildJoined(profile.clone()), &gateway)
            .await;
        let _ = self.gatekeeper.admit(&profile, &gateway).await;
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let incoming = translate_message(&msg);
        let gateway = SerenityGateway::from_context(&ctx);
        self.registry
            .dispatch_event(&EventPayload::Message(incoming.clone()), &gateway)
            .await;
        self.messages.route(incoming, &gateway).await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Some(incoming) = translate_interaction(&interaction) else {
            return;
        };
        let gateway = SerenityGateway::from_context(&ctx);
        self.registry
            .dispatch_event(&EventPayload::Interaction(incoming.clone()), &gateway)
            .await;
        self.interactions.route(incoming, &gateway).await;
    }
}
