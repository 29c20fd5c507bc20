use glam::Vec3;

use crate::config::dimensions::GREEN_GROUND_BIAS;
use crate::domain::Way;
use crate::ground::{GroundQuery, place_origin};
use crate::mesh::{Material, MeshBuffer, SceneObject, fan};
use crate::osm::OsmData;

use super::resolve_footprint;

/// Whether a way is a candidate green area
pub fn is_green_area(way: &Way) -> bool {
    way.flags.park && way.node_refs.len() > 1
}

/// Generate flat, double-sided fills for parks
///
/// Outlines with fewer than three distinct points enclose nothing and are
/// skipped.
pub fn generate_park_objects(data: &OsmData, ground: &dyn GroundQuery) -> Vec<SceneObject> {
    data.ways
        .iter()
        .filter(|way| is_green_area(way))
        .filter_map(|way| {
            let footprint = resolve_footprint(way, data)?;
            if !footprint.has_area() {
                return None;
            }

            let mut mesh = MeshBuffer::new();
            let triangles = fan(&mut mesh, footprint.ring(), 0.0, Vec3::ZERO);
            mesh.push_submesh(triangles, Material::Green);

            Some(SceneObject {
                name: way.name.clone(),
                local_origin: place_origin(ground, footprint.origin, GREEN_GROUND_BIAS),
                mesh,
            })
        })
        .collect()
}
