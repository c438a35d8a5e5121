use crate::concepts::link_set::LinkSet;
use crate::concepts::packet::{OutboundPacket, Packet};
use crate::concepts::route::Route;
use crate::feedback::{RoutingError, RoutingWarning};
use crate::framework::{RoutingSystem, Timestamp};
use crate::util::{clamp_inf, sum_inf};
use anyhow::Context;
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_with::serde_as;
use std::collections::HashMap;

/// Metric of an unreachable destination
pub const INF: u16 = 16;

#[serde_as]
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Router<T: RoutingSystem + ?Sized> {
    pub links: LinkSet<T>,
    /// Destination, Route
    #[serde_as(as = "Vec<(_, _)>")]
    pub routes: HashMap<T::HostId, Route<T>>,
    /// directly attached hosts and the port they were discovered on.
    /// A route that goes out the discovery port never goes stale.
    #[serde_as(as = "Vec<(_, _)>")]
    pub hosts: HashMap<T::HostId, T::PortId>,
    pub outbound_packets: Vec<OutboundPacket<T>>,
}

impl<T: RoutingSystem> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RoutingSystem> Router<T> {
    pub fn new() -> Self {
        Self {
            links: LinkSet::default(),
            routes: HashMap::new(),
            hosts: HashMap::new(),
            outbound_packets: Vec::new(),
        }
    }

    pub fn route(&self, dest: &T::HostId) -> Option<&Route<T>> {
        self.routes.get(dest)
    }

    pub fn next_hop(&self, dest: &T::HostId) -> Option<&T::PortId> {
        self.routes.get(dest).map(|route| &route.next_hop)
    }

    pub fn metric(&self, dest: &T::HostId) -> Option<u16> {
        self.routes.get(dest).map(|route| route.metric)
    }

    pub fn is_host_bound(&self, dest: &T::HostId) -> bool {
        self.hosts.contains_key(dest)
    }

    /// Serializes the full router state to JSON, for diagnostics
    pub fn snapshot(&self) -> anyhow::Result<String> {
        serde_json::to_string(self).context("Failed to serialize router state")
    }

    pub fn from_snapshot(state: &str) -> anyhow::Result<Self> {
        serde_json::from_str(state).context("Failed to deserialize router state")
    }

    // region Route Selection

    /// Picks the cheapest finite route to `dest` over all neighbours that advertised it.
    /// On a tie the current next hop is kept, otherwise the lowest port wins.
    fn select_route(&self, dest: &T::HostId) -> Option<(u16, T::PortId)> {
        let current = self.routes.get(dest).map(|route| &route.next_hop);
        let mut best: Option<(u16, &T::PortId)> = None;
        for neigh in self.links.neighbours() {
            let Some(advertised) = neigh.advertised(dest) else {
                continue;
            };
            let metric = sum_inf(neigh.link_cost, advertised);
            if metric >= INF {
                continue;
            }
            let better = match best {
                None => true,
                Some((best_metric, best_port)) => {
                    metric < best_metric
                        || (metric == best_metric
                            && Some(best_port) != current
                            && (Some(&neigh.port) == current || neigh.port < *best_port))
                }
            };
            if better {
                best = Some((metric, &neigh.port));
            }
        }
        best.map(|(metric, port)| (metric, port.clone()))
    }

    /// Re-runs route selection for `dest` and stores the result.
    /// Returns true if the selected (metric, next hop) pair changed.
    fn update_route(&mut self, dest: &T::HostId, now: Timestamp) -> bool {
        let selected = self.select_route(dest);
        if !self.routes.contains_key(dest) {
            let Some((metric, next_hop)) = selected else {
                return false;
            };
            debug!(
                "New route to {}: metric {}, next hop {}",
                json!(dest),
                metric,
                json!(next_hop)
            );
            self.routes.insert(
                dest.clone(),
                Route {
                    metric,
                    next_hop,
                    last_refreshed: now,
                },
            );
            return true;
        }
        let Some(route) = self.routes.get_mut(dest) else {
            return false;
        };
        match selected {
            Some((metric, next_hop)) => {
                if route.metric == metric && route.next_hop == next_hop {
                    return false;
                }
                debug!(
                    "Route to {} changed: metric {} -> {}, next hop {} -> {}",
                    json!(dest),
                    route.metric,
                    metric,
                    json!(route.next_hop),
                    json!(next_hop)
                );
                route.metric = metric;
                route.next_hop = next_hop;
            }
            None => {
                if route.metric == INF {
                    return false;
                }
                debug!("Route to {} is now unreachable", json!(dest));
                // keep the old next hop, so the withdrawal is still poisoned towards it
                route.metric = INF;
            }
        }
        route.last_refreshed = now;
        true
    }

    /// Checks that every stored route agrees with a fresh run of route selection
    pub fn validate(&self) -> Result<(), RoutingError<T>> {
        for (dest, route) in &self.routes {
            if route.metric > INF {
                return Err(RoutingError::MetricOutOfBounds {
                    dest: dest.clone(),
                    metric: route.metric,
                });
            }
            let selected = self.select_route(dest);
            let consistent = match &selected {
                Some((metric, next_hop)) => route.metric == *metric && route.next_hop == *next_hop,
                None => route.metric == INF,
            };
            if !consistent {
                let (expected_metric, expected_next_hop) = match selected {
                    Some((metric, next_hop)) => (metric, Some(next_hop)),
                    None => (INF, None),
                };
                return Err(RoutingError::InconsistentRoute {
                    dest: dest.clone(),
                    metric: route.metric,
                    next_hop: route.next_hop.clone(),
                    expected_metric,
                    expected_next_hop,
                });
            }
        }
        Ok(())
    }
    // endregion

    // region Advertisement

    /// writes an advertisement for `dest` to all neighbours.
    /// The next hop is excluded from the flood, and gets INF instead if poison reverse is on.
    fn write_route_update(&mut self, dest: &T::HostId) {
        let Some(route) = self.routes.get(dest) else {
            return;
        };
        self.outbound_packets.push(OutboundPacket {
            port: route.next_hop.clone(),
            flood: true,
            packet: Packet::RouteAdvertisement {
                destination: dest.clone(),
                cost: route.metric,
            },
        });
        if T::config().poison_reverse && self.links.contains(&route.next_hop) {
            self.outbound_packets.push(OutboundPacket {
                port: route.next_hop.clone(),
                flood: false,
                packet: Packet::RouteAdvertisement {
                    destination: dest.clone(),
                    cost: INF,
                },
            });
        }
    }

    /// writes an advertisement for `dest` to the neighbour on `port` only
    fn write_route_update_to(&mut self, dest: &T::HostId, port: &T::PortId) {
        let Some(route) = self.routes.get(dest) else {
            return;
        };
        let cost = if route.next_hop == *port {
            if !T::config().poison_reverse {
                return; // split horizon
            }
            INF
        } else {
            route.metric
        };
        self.outbound_packets.push(OutboundPacket {
            port: port.clone(),
            flood: false,
            packet: Packet::RouteAdvertisement {
                destination: dest.clone(),
                cost,
            },
        });
    }

    /// destinations in a stable order, so the generated packets are deterministic
    fn sorted_destinations(&self) -> Vec<T::HostId> {
        let mut dests: Vec<T::HostId> = self.routes.keys().cloned().collect();
        dests.sort();
        dests
    }
    // endregion

    // region Event Handlers

    /// A link came up, or the cost of an existing link changed
    pub fn handle_link_up(&mut self, port: T::PortId, cost: u16, now: Timestamp) {
        let cost = if cost > INF {
            warn!("{}", RoutingWarning::<T>::CostClamped { port: port.clone(), cost });
            INF
        } else {
            cost
        };
        match self.links.up(port.clone(), cost) {
            None => {
                debug!("Link up on port {} with cost {}", json!(port), cost);
                // the new neighbour knows nothing yet, catch it up
                for dest in self.sorted_destinations() {
                    self.write_route_update_to(&dest, &port);
                }
            }
            Some(old) if old == cost => {}
            Some(old) => {
                debug!("Link cost on port {} changed {} -> {}", json!(port), old, cost);
                let mut dests = self.sorted_destinations();
                if let Some(neigh) = self.links.get(&port) {
                    for dest in neigh.routes.keys() {
                        if !self.routes.contains_key(dest) {
                            dests.push(dest.clone());
                        }
                    }
                }
                for dest in dests {
                    if self.update_route(&dest, now) {
                        self.write_route_update(&dest);
                    }
                }
            }
        }
    }

    /// A link went down, every route through it is re-selected or withdrawn
    pub fn handle_link_down(&mut self, port: &T::PortId, now: Timestamp) {
        if self.links.down(port).is_none() {
            return;
        }
        debug!("Link down on port {}", json!(port));
        self.hosts.retain(|_, host_port| host_port != port);

        let affected: Vec<T::HostId> = self
            .sorted_destinations()
            .into_iter()
            .filter(|dest| self.routes[dest].next_hop == *port)
            .collect();
        for dest in affected {
            if self.update_route(&dest, now) {
                self.write_route_update(&dest);
            }
        }
    }

    /// handle a single packet
    pub fn handle_packet(&mut self, packet: &Packet<T>, port: &T::PortId, now: Timestamp) {
        if !self.links.contains(port) {
            warn!("{}", RoutingWarning::<T>::UnknownPort { port: port.clone() });
            return;
        }
        match packet {
            Packet::RouteAdvertisement { destination, cost } => {
                self.handle_route_advertisement(destination, *cost, port, now);
            }
            Packet::HostDiscovery { host } => {
                self.handle_host_discovery(host, port, now);
            }
            Packet::Data { destination, .. } => {
                match self.routes.get(destination) {
                    // never bounce a packet back out the port it arrived on
                    Some(route) if route.is_reachable() && route.next_hop != *port => {
                        self.outbound_packets.push(OutboundPacket {
                            port: route.next_hop.clone(),
                            flood: false,
                            packet: packet.clone(),
                        });
                    }
                    _ => {
                        trace!(
                            "Dropped data packet for {} from port {}, no usable route",
                            json!(destination),
                            json!(port)
                        );
                    }
                }
            }
        }
    }

    fn handle_route_advertisement(
        &mut self,
        dest: &T::HostId,
        cost: u16,
        port: &T::PortId,
        now: Timestamp,
    ) {
        self.links.record(port, dest.clone(), clamp_inf(cost));
        if self.update_route(dest, now) {
            self.write_route_update(dest);
        } else if let Some(route) = self.routes.get_mut(dest) {
            // the next hop still vouches for this route
            if route.next_hop == *port {
                route.last_refreshed = now;
            }
        }
    }

    fn handle_host_discovery(&mut self, host: &T::HostId, port: &T::PortId, now: Timestamp) {
        debug!("Discovered host {} on port {}", json!(host), json!(port));
        self.hosts.insert(host.clone(), port.clone());
        // a host reaches itself at no cost
        self.links.record(port, host.clone(), 0);
        self.update_route(host, now);
        if let Some(route) = self.routes.get_mut(host) {
            // only the direct route is verified by the discovery, a cheaper learned route still has to be refreshed
            if route.next_hop == *port {
                route.last_refreshed = now;
            }
        }
        self.write_route_update(host);
    }

    /// Called periodically, expires stale routes then advertises the full table
    pub fn handle_timer(&mut self, now: Timestamp) {
        let params = T::config();
        let expired: Vec<(T::HostId, T::PortId)> = self
            .routes
            .iter()
            .filter(|(dest, route)| {
                self.hosts.get(*dest) != Some(&route.next_hop)
                    && (!route.is_reachable() || route.is_stale(now, params.expiry_threshold))
            })
            .map(|(dest, route)| (dest.clone(), route.next_hop.clone()))
            .collect();
        for (dest, next_hop) in expired {
            debug!("Expired route to {}", json!(dest));
            self.routes.remove(&dest);
            self.links.forget(&next_hop, &dest);
            self.links.forget_withdrawn(&dest);
            if self.hosts.contains_key(&dest) {
                // fall back to the directly attached host
                self.update_route(&dest, now);
            }
        }

        for dest in self.sorted_destinations() {
            self.write_route_update(&dest);
        }
    }
    // endregion
}
