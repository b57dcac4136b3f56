use super::ids::GuildId;

/// Snapshot of a joined guild, as much as the gatekeeper's audit trail needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildProfile {
    pub id: GuildId,
    pub name: String,
    pub member_count: u64,
}

impl GuildProfile {
    pub fn new(id: impl Into<GuildId>, name: impl Into<String>, member_count: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            member_count,
        }
    }
}
