mod broadcaster;
mod session_rng;

pub mod snake;

pub use broadcaster::SnapshotBroadcaster;
pub use session_rng::SessionRng;
