use std::fmt::Debug;
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Abstract time units, supplied by the host application. The router never reads a clock.
pub type Timestamp = u64;

pub trait RoutingSystem {
    /// Local interface identifier, one per attached link. Only needs to be unique within a single router
    type PortId: Ord + PartialOrd + RootData + RootKey;
    /// Address of a destination on the routing network, MUST be globally unique
    type HostId: Ord + PartialOrd + RootData + RootKey;
    /// Opaque body of a data packet, never inspected by the router
    type Payload: RootData;
    fn config() -> ProtocolParams {
        Default::default()
    }
}

pub trait RootData: Clone + Debug + Serialize + DeserializeOwned + Sized {}
pub trait RootKey: Eq + PartialEq + Hash {}
impl<T: Eq + PartialEq + Hash> RootKey for T {}
impl<T: Clone + Debug + Serialize + DeserializeOwned + Sized> RootData for T {}

/// Protocol Parameters
pub struct ProtocolParams {
    /// a learned route that has not been refreshed for this long is removed on the next timer tick
    pub expiry_threshold: Timestamp,
    /// how often the host application should call `Router::handle_timer`
    pub timer_interval: Timestamp,
    /// advertise INF to the next hop of a route (poison reverse), otherwise stay silent towards it (split horizon)
    pub poison_reverse: bool,
}
impl Default for ProtocolParams {
    fn default() -> Self {
        Self {
            expiry_threshold: 15,
            timer_interval: 5,
            poison_reverse: true,
        }
    }
}
