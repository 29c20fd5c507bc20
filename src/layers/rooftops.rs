use glam::Vec3;

use crate::config::dimensions::{ROOF_GROUND_BIAS, ROOF_RIM_HEIGHT};
use crate::domain::Way;
use crate::ground::{GroundQuery, place_origin};
use crate::mesh::{Material, MeshBuffer, SceneObject, extrude_walls, fan};
use crate::osm::OsmData;

use super::resolve_footprint;

/// Whether a building outline is large enough to carry a roof
pub fn has_rooftop(way: &Way) -> bool {
    way.flags.building && way.node_refs.len() > 3
}

/// Generate a peaked roof for every building with at least four refs
///
/// Each roof is a fascia rim on top of the walls plus a fan rising to an apex
/// `rooftop_height` above the wall top, over the outline's mean point.
///
/// # Arguments
/// * `data` - Parsed extract
/// * `rooftop_height` - Apex height above the wall top
/// * `ground` - Terrain the roofs are seated on
pub fn generate_rooftop_objects(
    data: &OsmData,
    rooftop_height: f32,
    ground: &dyn GroundQuery,
) -> Vec<SceneObject> {
    data.ways
        .iter()
        .filter(|way| has_rooftop(way))
        .filter_map(|way| {
            let footprint = resolve_footprint(way, data)?;
            let rim_top = way.height + ROOF_RIM_HEIGHT;

            let mut mesh = MeshBuffer::new();
            let mut triangles = extrude_walls(&mut mesh, &footprint.outline, way.height, rim_top);
            let apex = Vec3::new(0.0, way.height + rooftop_height, 0.0);
            triangles.extend(fan(&mut mesh, footprint.ring(), rim_top, apex));
            mesh.push_submesh(triangles, Material::Roof);

            Some(SceneObject {
                name: way.name.clone(),
                local_origin: place_origin(ground, footprint.origin, ROOF_GROUND_BIAS),
                mesh,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Node, WayFlags};
    use crate::ground::{FlatGround, NoGround};
    use glam::Vec2;

    fn data(refs: &[u64]) -> OsmData {
        OsmData {
            center: Vec2::ZERO,
            nodes: [
                Node::new(1, 0.0, 0.0),
                Node::new(2, 10.0, 0.0),
                Node::new(3, 10.0, 10.0),
                Node::new(4, 0.0, 10.0),
            ]
            .into_iter()
            .collect(),
            ways: vec![Way {
                id: 1,
                name: "House".to_string(),
                node_refs: refs.to_vec(),
                height: 10.0,
                flags: WayFlags {
                    building: true,
                    ..Default::default()
                },
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_rooftop_geometry() {
        let objects = generate_rooftop_objects(&data(&[1, 2, 3, 4, 1]), 3.0, &NoGround);

        assert_eq!(objects.len(), 1);
        let mesh = &objects[0].mesh;
        // Fascia: 4 edges x 4 vertices, fan: apex + 4 ring vertices
        assert_eq!(mesh.vertex_count(), 21);
        assert_eq!(mesh.triangle_count(), 16 + 8);
        assert_eq!(mesh.submeshes.len(), 1);
        assert_eq!(mesh.submeshes[0].material, Material::Roof);

        let apex = mesh.vertices[16];
        assert_eq!(apex, Vec3::new(0.0, 13.0, 0.0));
        let lowest = mesh.vertices.iter().map(|v| v.y).fold(f32::MAX, f32::min);
        assert_eq!(lowest, 10.0);
    }

    #[test]
    fn test_small_outline_has_no_roof() {
        assert!(generate_rooftop_objects(&data(&[1, 2, 3]), 3.0, &NoGround).is_empty());
    }

    #[test]
    fn test_roof_ground_bias() {
        let objects = generate_rooftop_objects(&data(&[1, 2, 3, 4, 1]), 3.0, &FlatGround { height: 5.0 });
        assert!((objects[0].local_origin.y - 3.0).abs() < 1e-5);
    }
}
