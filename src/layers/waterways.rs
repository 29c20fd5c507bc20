use crate::config::dimensions::WATER_GROUND_BIAS;
use crate::geometry::horizontal;
use crate::ground::{GroundQuery, place};
use crate::mesh::{Material, RibbonBuilder, RibbonWidths, SceneObject, street_quads};
use crate::stitch::Street;

/// Generate one water ribbon object per stitched river or stream
///
/// Rivers are not split by name. The object is named after every distinct
/// source-way name along the chain, and is seated by a single ground query
/// at its centroid.
pub fn generate_waterway_objects(
    chains: &[Street],
    widths: &RibbonWidths,
    ground: &dyn GroundQuery,
) -> Vec<SceneObject> {
    chains
        .iter()
        .filter_map(|chain| waterway_object(chain, widths, ground))
        .collect()
}

fn waterway_object(
    chain: &Street,
    widths: &RibbonWidths,
    ground: &dyn GroundQuery,
) -> Option<SceneObject> {
    let mut builder = RibbonBuilder::new();
    for quad in street_quads(chain, widths) {
        builder.push_quad(&quad);
    }
    if builder.is_empty() {
        return None;
    }

    let mut mesh = builder.finish(Material::Water, Material::Water);
    let mut origin = mesh.centroid();
    mesh.recenter(origin);
    if let Some(h) = place(ground, horizontal(origin), WATER_GROUND_BIAS) {
        origin.y = h;
    }

    Some(SceneObject {
        name: chain_name(chain),
        local_origin: origin,
        mesh,
    })
}

/// Distinct way names along the chain, in order of appearance
fn chain_name(chain: &Street) -> String {
    let mut names: Vec<&str> = Vec::new();
    for node in &chain.nodes {
        if !names.contains(&node.name.as_str()) {
            names.push(&node.name);
        }
    }
    names.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use crate::ground::{FlatGround, NoGround};
    use crate::stitch::StreetNode;
    use glam::Vec3;

    fn river(names: &[&str]) -> Street {
        Street {
            nodes: names
                .iter()
                .enumerate()
                .map(|(i, name)| StreetNode {
                    id: i as u64 + 1,
                    position: Vec3::new(i as f32 * 50.0, 0.0, (i % 2) as f32 * 10.0),
                    category: Category::River,
                    name: name.to_string(),
                })
                .collect(),
            looped: false,
            way_ids: vec![1, 2],
        }
    }

    #[test]
    fn test_one_object_per_chain() {
        let chain = river(&["Elbe", "Elbe", "Alster", "Alster", "Elbe"]);
        let objects = generate_waterway_objects(&[chain], &RibbonWidths::default(), &NoGround);

        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].name, "Elbe Alster");
        assert_eq!(objects[0].mesh.submeshes.len(), 1);
        assert_eq!(objects[0].mesh.submeshes[0].material, Material::Water);
        assert_eq!(objects[0].mesh.triangle_count(), 8);
    }

    #[test]
    fn test_river_width() {
        let chain = river(&["Elbe", "Elbe"]);
        let widths = RibbonWidths {
            river: 5.0,
            ..Default::default()
        };
        let objects = generate_waterway_objects(&[chain], &widths, &NoGround);
        let v = &objects[0].mesh.vertices;

        assert!((v[0].distance(v[1]) - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_seated_by_single_query() {
        let chain = river(&["Elbe", "Elbe", "Elbe"]);
        let objects =
            generate_waterway_objects(&[chain], &RibbonWidths::default(), &FlatGround { height: 1.0 });
        let object = &objects[0];

        assert!((object.local_origin.y - 1.035).abs() < 1e-5);
        assert!(object.mesh.vertices.iter().all(|v| v.y == 0.0));
    }
}
