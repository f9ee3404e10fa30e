use std::future::Future;

use super::snake::SessionSnapshot;

pub trait SnapshotBroadcaster: Send + Sync + 'static {
    fn broadcast_state(&self, snapshot: SessionSnapshot) -> impl Future<Output = ()> + Send;
}
