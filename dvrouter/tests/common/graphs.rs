use crate::common::virtual_network::VirtualNetwork;

/// hA - A - B - C - hC, with hB on B
pub fn vnet_line() -> VirtualNetwork {
    VirtualNetwork::create(
        &["A", "B", "C"],
        &[
            (1, "A", "B", 1),
            (2, "B", "C", 1),
            (10, "hA", "A", 0),
            (11, "hB", "B", 0),
            (12, "hC", "C", 0),
        ],
    )
}

pub fn vnet_triangle() -> VirtualNetwork {
    VirtualNetwork::create(
        &["A", "B", "C"],
        &[
            (1, "A", "B", 1),
            (2, "B", "C", 1),
            (3, "C", "A", 1),
            (10, "hA", "A", 0),
            (11, "hB", "B", 0),
            (12, "hC", "C", 0),
        ],
    )
}

pub fn vnet_simple_weighted() -> VirtualNetwork {
    VirtualNetwork::create(
        &["1", "2", "3", "4", "5"],
        &[
            (0, "1", "2", 2),
            (1, "1", "3", 1),
            (2, "2", "3", 4),
            (3, "2", "4", 5),
            (4, "3", "4", 9),
            (5, "3", "5", 8),
            (6, "4", "5", 1),
            (101, "h1", "1", 0),
            (102, "h2", "2", 0),
            (103, "h3", "3", 0),
            (104, "h4", "4", 0),
            (105, "h5", "5", 0),
        ],
    )
}

/// a triangle with a single tail leading to h4, losing the tail forces the triangle to count to infinity
pub fn vnet_fragile_network() -> VirtualNetwork {
    VirtualNetwork::create(
        &["1", "2", "3", "4"],
        &[
            (0, "1", "2", 1),
            (1, "1", "3", 1),
            (2, "2", "3", 1),
            (3, "1", "4", 1),
            (104, "h4", "4", 0),
        ],
    )
}

/// hA - 1 - 2 - 3 - 4 - 5 - 6 - hB, built but not yet settled
pub fn vnet_chain_unsettled() -> VirtualNetwork {
    VirtualNetwork::build(
        &["1", "2", "3", "4", "5", "6"],
        &[
            (1, "1", "2", 1),
            (2, "2", "3", 1),
            (3, "3", "4", 1),
            (4, "4", "5", 1),
            (5, "5", "6", 1),
            (10, "hA", "1", 0),
            (11, "hB", "6", 0),
        ],
    )
}
