use educe::Educe;
use serde::{Deserialize, Serialize};

use crate::framework::{RoutingSystem, Timestamp};
use crate::router::INF;

#[derive(Educe)]
#[educe(Clone(bound()), Debug(bound()))]
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Route<T: RoutingSystem + ?Sized> {
    /// the lowest metric over all neighbours, or INF if the destination became unreachable
    pub metric: u16,
    /// the port through which this route is forwarded. Kept when the route becomes unreachable,
    /// so the withdrawal is still poisoned towards it.
    pub next_hop: T::PortId,
    /// the last time this route was selected or re-advertised by its next hop
    pub last_refreshed: Timestamp,
}

impl<T: RoutingSystem + ?Sized> Route<T> {
    pub fn is_reachable(&self) -> bool {
        self.metric < INF
    }

    pub fn is_stale(&self, now: Timestamp, threshold: Timestamp) -> bool {
        now.saturating_sub(self.last_refreshed) >= threshold
    }
}
