//! Domain entities - Core objects with no gateway-client dependencies

pub mod event;
pub mod guild;
pub mod ids;
pub mod interaction;
pub mod invocation;
pub mod message;
pub mod notice;
pub mod prefixes;

pub use event::EventPayload;
pub use guild::GuildProfile;
pub use ids::{ChannelId, GuildId, MessageId, UserId};
pub use interaction::{IncomingInteraction, InteractionKind, InteractionRef};
pub use invocation::{Invocation, Origin, Surface};
pub use message::{Author, IncomingMessage};
pub use notice::{Notice, NoticeField, Outgoing};
pub use prefixes::PrefixMap;
