use crate::router::INF;
use std::cmp::min;

/// Adds two costs, saturating at INF
///
/// # Arguments
///
/// * `cost_a`: First cost
/// * `cost_b`: Second cost
///
/// returns: u16, never larger than INF
///
/// # Examples
///
/// ```
/// use dvrouter::router::INF;
/// use dvrouter::util::sum_inf;
///
/// assert_eq!(sum_inf(3, 4), 7);
/// assert_eq!(sum_inf(10, 6), INF);
/// assert_eq!(sum_inf(10, 9), INF);
/// assert_eq!(sum_inf(INF, 0), INF);
/// ```
pub fn sum_inf(cost_a: u16, cost_b: u16) -> u16 {
    min(INF as u32, cost_a as u32 + cost_b as u32) as u16
}

/// Bounds an externally supplied cost to INF
///
/// ```
/// assert_eq!(dvrouter::util::clamp_inf(3), 3);
/// assert_eq!(dvrouter::util::clamp_inf(500), dvrouter::router::INF);
/// ```
pub fn clamp_inf(cost: u16) -> u16 {
    min(cost, INF)
}
