use common::games::SnapshotBroadcaster;
use common::games::snake::SessionSnapshot;
use tokio::sync::mpsc;

/// Hands session snapshots to the render loop.
#[derive(Clone)]
pub struct LocalBroadcaster {
    sender: mpsc::UnboundedSender<SessionSnapshot>,
}

impl LocalBroadcaster {
    pub fn new(sender: mpsc::UnboundedSender<SessionSnapshot>) -> Self {
        Self { sender }
    }
}

impl SnapshotBroadcaster for LocalBroadcaster {
    async fn broadcast_state(&self, snapshot: SessionSnapshot) {
        let _ = self.sender.send(snapshot);
    }
}
