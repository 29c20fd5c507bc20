//! osmworld - Generate 3D scene meshes from OpenStreetMap data
//!
//! The pipeline reads an OSM XML extract ([`osm`]), stitches fragmented ways
//! into continuous streets ([`stitch`]), and builds ribbon and footprint
//! meshes for roads, waterways, buildings, rooftops and parks ([`layers`]).
//! Objects are seated on terrain through a [`ground::GroundQuery`] and can be
//! exported as OBJ or STL ([`mesh`]).

pub mod config;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod ground;
pub mod layers;
pub mod mesh;
pub mod osm;
pub mod stitch;
