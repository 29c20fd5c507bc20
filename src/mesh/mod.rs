pub mod buffer;
pub mod footprint;
pub mod obj;
pub mod ribbon;
pub mod scene;
pub mod stl;
pub mod validation;

pub use buffer::{Material, MeshBuffer, Submesh, face_normal};
pub use footprint::{Footprint, extrude_walls, fan};
pub use obj::write_obj;
pub use ribbon::{Quad, RibbonBuilder, RibbonWidths, cross_section, street_quads};
pub use scene::{Layer, Scene, SceneObject};
pub use stl::write_stl;
pub use validation::{ValidationResult, remove_degenerate, validate_mesh};
