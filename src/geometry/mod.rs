pub mod bounds;
pub mod primitives;
pub mod projection;

pub use bounds::Bounds;
pub use primitives::{horizontal, intersect, intersect_2d, lift, perpendicular, perpendicular_2d};
pub use projection::Mercator;
