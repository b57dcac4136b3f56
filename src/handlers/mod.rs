//! Built-in handler modules, registered through an embedded table ahead of
//! anything discovered on disk (disk modules of the same name win).

pub mod ping;
pub mod prefix;
pub mod ready;
pub mod uptime;

use std::sync::Arc;

use crate::application::registry::ModuleTable;
use crate::domain::entities::PrefixMap;

pub use ping::Ping;
pub use prefix::Prefix;
pub use ready::ReadyAnnouncer;
pub use uptime::Uptime;

/// The embedded built-in module table.
pub fn builtins(prefixes: Arc<PrefixMap>) -> ModuleTable {
    ModuleTable::new()
        .with_command(Arc::new(Ping))
        .with_command(Arc::new(Uptime::new()))
        .with_command(Arc::new(Prefix::new(prefixes)))
        .with_event(Arc::new(ReadyAnnouncer))
}
