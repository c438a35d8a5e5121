use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::concepts::neighbour::Neighbour;
use crate::framework::RoutingSystem;
use crate::router::INF;

/// The locally attached links, together with what the neighbour on each link has advertised.
/// Dropping a link drops its advertisements with it.
#[serde_as]
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct LinkSet<T: RoutingSystem + ?Sized> {
    #[serde_as(as = "Vec<(_, _)>")]
    neighbours: HashMap<T::PortId, Neighbour<T>>,
}

impl<T: RoutingSystem + ?Sized> Default for LinkSet<T> {
    fn default() -> Self {
        Self {
            neighbours: HashMap::new(),
        }
    }
}

impl<T: RoutingSystem + ?Sized> LinkSet<T> {
    /// Registers a link, or updates the cost of an existing one.
    /// Returns the previous cost if the link was already up.
    pub fn up(&mut self, port: T::PortId, cost: u16) -> Option<u16> {
        if let Some(neigh) = self.neighbours.get_mut(&port) {
            let old = neigh.link_cost;
            neigh.link_cost = cost;
            return Some(old);
        }
        self.neighbours.insert(port.clone(), Neighbour::new(port, cost));
        None
    }

    /// Removes a link and every advertisement learned over it
    pub fn down(&mut self, port: &T::PortId) -> Option<Neighbour<T>> {
        self.neighbours.remove(port)
    }

    pub fn contains(&self, port: &T::PortId) -> bool {
        self.neighbours.contains_key(port)
    }

    pub fn get(&self, port: &T::PortId) -> Option<&Neighbour<T>> {
        self.neighbours.get(port)
    }

    pub fn cost(&self, port: &T::PortId) -> Option<u16> {
        self.neighbours.get(port).map(|neigh| neigh.link_cost)
    }

    pub fn neighbours(&self) -> impl Iterator<Item = &Neighbour<T>> {
        self.neighbours.values()
    }

    /// Records an advertisement received over `port`. Returns false if the port is not up.
    pub fn record(&mut self, port: &T::PortId, dest: T::HostId, metric: u16) -> bool {
        match self.neighbours.get_mut(port) {
            Some(neigh) => {
                neigh.record(dest, metric);
                true
            }
            None => false,
        }
    }

    /// Forgets what the neighbour on `port` advertised for `dest`
    pub fn forget(&mut self, port: &T::PortId, dest: &T::HostId) {
        if let Some(neigh) = self.neighbours.get_mut(port) {
            neigh.forget(dest);
        }
    }

    /// Forgets every withdrawn (INF) advertisement for `dest`
    pub fn forget_withdrawn(&mut self, dest: &T::HostId) {
        for neigh in self.neighbours.values_mut() {
            if neigh.advertised(dest) == Some(INF) {
                neigh.forget(dest);
            }
        }
    }
}
