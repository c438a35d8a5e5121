use educe::Educe;
use serde::{Deserialize, Serialize};

use crate::framework::RoutingSystem;

#[derive(Educe)]
#[educe(Clone(bound()), Debug(bound()))]
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub enum Packet<T: RoutingSystem + ?Sized> {
    /// a neighbour's claimed cost to reach a destination, INF withdraws the route
    RouteAdvertisement { destination: T::HostId, cost: u16 },
    /// a directly attached host announcing itself
    HostDiscovery { host: T::HostId },
    /// best-effort user data, forwarded along the selected route
    Data {
        destination: T::HostId,
        payload: T::Payload,
    },
}

#[derive(Educe)]
#[educe(Clone(bound()), Debug(bound()))]
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct OutboundPacket<T: RoutingSystem + ?Sized> {
    /// if `flood` is false, send via this port only. Otherwise send via every up port except this one.
    pub port: T::PortId,
    pub flood: bool,
    pub packet: Packet<T>,
}
