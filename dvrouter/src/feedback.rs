use educe::Educe;
use thiserror::Error;
use crate::framework::RoutingSystem;

/// Internal invariant violations. The router never raises these while handling events,
/// they are reported by `Router::validate`.
#[derive(Error)]
#[derive(Educe)]
#[educe(Debug(bound()))]
pub enum RoutingError<T: RoutingSystem + ?Sized> {
    #[error("Route to {dest:?} has metric {metric}, which exceeds infinity")]
    MetricOutOfBounds {
        dest: T::HostId,
        metric: u16,
    },
    /// The stored route disagrees with a fresh run of route selection
    #[error("Route to {dest:?} is ({metric}, {next_hop:?}), but route selection yields ({expected_metric}, {expected_next_hop:?})")]
    InconsistentRoute {
        dest: T::HostId,
        metric: u16,
        next_hop: T::PortId,
        expected_metric: u16,
        expected_next_hop: Option<T::PortId>,
    },
}

/// Although this is an error enum, these should be treated as warnings.
#[derive(Error)]
#[derive(Educe)]
#[educe(Debug(bound()))]
pub enum RoutingWarning<T: RoutingSystem + ?Sized> {
    /// Costs are bounded by INF, anything larger is clamped to INF (unreachable)
    #[error("Link cost {cost} on port {port:?} exceeds infinity, treating the link as unreachable")]
    CostClamped {
        port: T::PortId,
        cost: u16,
    },
    /// The host application delivered a packet over a link that is not up, the packet is dropped
    #[error("Dropped packet received on port {port:?}, which is not up")]
    UnknownPort {
        port: T::PortId,
    },
}
