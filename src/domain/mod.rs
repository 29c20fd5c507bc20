pub mod node;
pub mod way;

pub use node::{Node, NodeLookup};
pub use way::{Category, Lane, Way, WayFlags};
