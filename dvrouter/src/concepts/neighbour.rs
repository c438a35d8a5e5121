use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::framework::RoutingSystem;

#[serde_as]
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Neighbour<T: RoutingSystem + ?Sized> {
    /// the local port this neighbour is attached to
    pub port: T::PortId,
    /// Direct link-cost to this neighbour, INF if the link is unusable. Lower is better.
    pub link_cost: u16,
    /// the last metric this neighbour advertised for each destination, INF for a withdrawn (poisoned) route
    #[serde_as(as = "Vec<(_, _)>")]
    pub routes: HashMap<T::HostId, u16>,
}

impl<T: RoutingSystem + ?Sized> Neighbour<T> {
    pub fn new(port: T::PortId, link_cost: u16) -> Self {
        Self {
            port,
            link_cost,
            routes: HashMap::new(),
        }
    }

    /// Remembers the latest advertisement, replacing whatever was advertised before.
    pub fn record(&mut self, dest: T::HostId, metric: u16) {
        self.routes.insert(dest, metric);
    }

    pub fn advertised(&self, dest: &T::HostId) -> Option<u16> {
        self.routes.get(dest).copied()
    }

    pub fn forget(&mut self, dest: &T::HostId) {
        self.routes.remove(dest);
    }
}
