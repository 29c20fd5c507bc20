use crate::config::dimensions::BUILDING_GROUND_BIAS;
use crate::domain::Way;
use crate::ground::{GroundQuery, place_origin};
use crate::mesh::{Material, MeshBuffer, SceneObject, extrude_walls};
use crate::osm::OsmData;

use super::resolve_footprint;

/// Whether a way produces building walls
pub fn is_building(way: &Way) -> bool {
    way.flags.building && way.node_refs.len() > 1
}

/// Generate wall objects for every building outline
///
/// Walls rise from the ground to the way's height; each building is its own
/// object placed at the mean of its outline nodes.
pub fn generate_building_objects(data: &OsmData, ground: &dyn GroundQuery) -> Vec<SceneObject> {
    data.ways
        .iter()
        .filter(|way| is_building(way))
        .filter_map(|way| {
            let footprint = resolve_footprint(way, data)?;

            let mut mesh = MeshBuffer::new();
            let walls = extrude_walls(&mut mesh, &footprint.outline, 0.0, way.height);
            mesh.push_submesh(walls, Material::Building);

            Some(SceneObject {
                name: way.name.clone(),
                local_origin: place_origin(ground, footprint.origin, BUILDING_GROUND_BIAS),
                mesh,
            })
        })
        .collect()
}
