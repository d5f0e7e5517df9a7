//! Online play: host-authoritative state sync over TCP

pub mod protocol;
pub mod session;
pub mod smoothing;

pub use protocol::DecodeError;
pub use session::{NetError, NetSession, PendingHost, Role};
pub use smoothing::SnapshotSmoother;
