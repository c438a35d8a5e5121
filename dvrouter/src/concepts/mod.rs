pub mod link_set;
pub mod neighbour;
pub mod packet;
pub mod route;
