//! Guild gatekeeper - single-tenant allow-list enforcement
//!
//! The bot is permitted to stay in exactly one guild. Every other guild it
//! finds itself in, at connect time or later, is departed and the departure
//! is reported to the audit channel. This is a safety net, not a security
//! boundary: a guild can still be joined transiently before eviction.

use crate::domain::entities::{ChannelId, GuildId, GuildProfile, Notice, Outgoing};
use crate::domain::traits::Gateway;

/// Outcome of checking one guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Retained,
    Evicted,
}

pub struct GuildGatekeeper {
    allowed: GuildId,
    log_channel: ChannelId,
}

impl GuildGatekeeper {
    pub fn new(allowed: impl Into<GuildId>, log_channel: impl Into<ChannelId>) -> Self {
        Self {
            allowed: allowed.into(),
            log_channel: log_channel.into(),
        }
    }

    pub fn allowed_guild(&self) -> GuildId {
        self.allowed
    }

    /// Check the full set of currently-joined guilds, sequentially. Called
    /// once after the initial connection. Returns how many guilds were
    /// evicted.
    pub async fn sweep(&self, guilds: &[GuildProfile], gateway: &dyn Gateway) -> usize {
        let mut evicted = 0;
        for guild in guilds {
            if self.admit(guild, gateway).await == Admission::Evicted {
                evicted += 1;
            }
        }
        if evicted > 0 {
            tracing::info!("Startup sweep evicted {} unauthorized guild(s)", evicted);
        }
        evicted
    }

    /// Check a single joined guild. Departure comes first; the audit notice
    /// is sent only after the departure completes, and a notice delivery
    /// failure never rolls anything back.
    pub async fn admit(&self, guild: &GuildProfile, gateway: &dyn Gateway) -> Admission {
        if guild.id == self.allowed {
            return Admission::Retained;
        }

        if let Err(e) = gateway.leave_guild(guild.id).await {
            // Not retried; the next sweep or join event covers it.
            tracing::error!("Failed to leave unauthorized guild {}: {}", guild.id, e);
            return Admission::Retained;
        }
        tracing::warn!(
            "Left unauthorized guild '{}' ({}, {} members)",
            guild.name,
            guild.id,
            guild.member_count
        );

        let notice = Outgoing::Notice(self.audit_notice(guild));
        if let Err(e) = gateway.send(self.log_channel, &notice).await {
            tracing::warn!("Audit notice for guild {} undeliverable: {}", guild.id, e);
        }

        Admission::Evicted
    }

    fn audit_notice(&self, guild: &GuildProfile) -> Notice {
        Notice::new("🛑 Left Unauthorized Server")
            .with_colour(0xFF0000)
            .with_field("Server Name", guild.name.as_str(), true)
            .with_field("Server ID", guild.id.to_string(), true)
            .with_field("Member Count", guild.member_count.to_string(), true)
            .stamped()
    }
}
