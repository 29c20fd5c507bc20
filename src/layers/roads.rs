use crate::config::dimensions::ROAD_GROUND_BIAS;
use crate::domain::Lane;
use crate::geometry::horizontal;
use crate::ground::{GroundQuery, place};
use crate::mesh::{Material, MeshBuffer, RibbonBuilder, RibbonWidths, SceneObject, cross_section};
use crate::stitch::Street;

/// Generate ribbon objects for stitched streets
///
/// A street is cut into a new object wherever the source-way name changes,
/// so every object carries a single street name.
///
/// # Arguments
/// * `streets` - Stitched road, footway or mixed chains
/// * `widths` - Half-width per category
/// * `ground` - Terrain the vertices are snapped onto
///
/// # Returns
/// One object per named stretch, each recentered on its vertex centroid
pub fn generate_road_objects(
    streets: &[Street],
    widths: &RibbonWidths,
    ground: &dyn GroundQuery,
) -> Vec<SceneObject> {
    let mut objects = Vec::new();
    for street in streets {
        emit_street(street, widths, ground, &mut objects);
    }
    objects
}

fn emit_street(
    street: &Street,
    widths: &RibbonWidths,
    ground: &dyn GroundQuery,
    objects: &mut Vec<SceneObject>,
) {
    let Some(first) = street.nodes.first() else {
        return;
    };

    let mut name = first.name.as_str();
    let mut builder = RibbonBuilder::new();

    for i in 1..street.len() {
        builder.push_quad(&cross_section(street, i, widths));

        let node = &street.nodes[i];
        if node.name != name || i == street.len() - 1 {
            let (primary, secondary) = lane_materials(street);
            let mesh = std::mem::take(&mut builder).finish(primary, secondary);
            objects.push(finish_object(name, mesh, ground));
            name = node.name.as_str();
        }
    }
}

/// Materials for the primary and secondary lanes of a street
fn lane_materials(street: &Street) -> (Material, Material) {
    let primary = street
        .nodes
        .iter()
        .map(|n| n.category)
        .find(|c| c.lane() == Lane::Primary)
        .map_or(Material::Road, |c| c.material());
    let secondary = street
        .nodes
        .iter()
        .map(|n| n.category)
        .find(|c| c.lane() == Lane::Secondary)
        .map_or(Material::Footway, |c| c.material());
    (primary, secondary)
}

/// Snap vertices onto the ground and move them into the object frame
fn finish_object(name: &str, mut mesh: MeshBuffer, ground: &dyn GroundQuery) -> SceneObject {
    let centroid = mesh.centroid();

    for v in &mut mesh.vertices {
        if let Some(h) = place(ground, horizontal(*v), ROAD_GROUND_BIAS) {
            v.y = h;
        }
    }
    mesh.recenter(centroid);

    SceneObject {
        name: name.to_string(),
        local_origin: centroid,
        mesh,
    }
}
