pub mod error;
pub mod eviction;
pub mod exchange;
pub mod lobby;
pub mod lobby_id;
pub mod messages;
pub mod payload;
pub mod registry;
pub mod slot;

pub use error::{ApiError, RegistryError};
pub use eviction::IdlePolicy;
pub use payload::{Payload, PayloadKind, SessionDescription};
pub use registry::LobbyRegistry;
