use std::collections::HashMap;

use super::ids::GuildId;

/// Per-guild command prefixes over a process-wide default. Populated once at
/// startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct PrefixMap {
    default: String,
    overrides: HashMap<GuildId, String>,
}

impl PrefixMap {
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            default: default.into(),
            overrides: HashMap::new(),
        }
    }

    pub fn with_override(mut self, guild: impl Into<GuildId>, prefix: impl Into<String>) -> Self {
        self.overrides.insert(guild.into(), prefix.into());
        self
    }

    pub fn insert(&mut self, guild: GuildId, prefix: String) {
        self.overrides.insert(guild, prefix);
    }

    /// The effective prefix for a guild; unknown guilds (and non-guild
    /// contexts) fall back to the default.
    pub fn prefix_for(&self, guild: Option<GuildId>) -> &str {
        guild
            .and_then(|g| self.overrides.get(&g))
            .map(String::as_str)
            .unwrap_or(&self.default)
    }

    pub fn default_prefix(&self) -> &str {
        &self.default
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}
