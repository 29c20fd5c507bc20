use glam::Vec3;

use super::{Material, MeshBuffer};

/// A named mesh placed at a local origin
///
/// The world position of a vertex is `local_origin + vertex`.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub name: String,
    pub local_origin: Vec3,
    pub mesh: MeshBuffer,
}

impl SceneObject {
    /// Iterate over all triangles in world space
    pub fn world_triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.mesh.triangles_at(self.local_origin)
    }
}

/// A group of objects generated by one layer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layer {
    pub name: String,
    pub objects: Vec<SceneObject>,
}

impl Layer {
    pub fn new(name: impl Into<String>, objects: Vec<SceneObject>) -> Self {
        Self {
            name: name.into(),
            objects,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.objects.iter().map(|o| o.mesh.triangle_count()).sum()
    }
}

/// Everything generated from one OSM extract, in layer order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub layers: Vec<Layer>,
}

impl Scene {
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// All objects of all layers, paired with their layer
    pub fn objects(&self) -> impl Iterator<Item = (&Layer, &SceneObject)> {
        self.layers
            .iter()
            .flat_map(|layer| layer.objects.iter().map(move |object| (layer, object)))
    }

    pub fn object_count(&self) -> usize {
        self.layers.iter().map(|l| l.objects.len()).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.layers.iter().map(Layer::triangle_count).sum()
    }

    /// Materials referenced by any submesh, in declaration order
    pub fn materials(&self) -> Vec<Material> {
        Material::ALL
            .into_iter()
            .filter(|&m| {
                self.objects()
                    .any(|(_, o)| o.mesh.submeshes.iter().any(|s| s.material == m))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn object(name: &str, material: Material) -> SceneObject {
        let mut mesh = MeshBuffer::new();
        let a = mesh.push_vertex(Vec3::ZERO, Vec3::Y, Vec2::ZERO);
        let b = mesh.push_vertex(Vec3::X, Vec3::Y, Vec2::X);
        let c = mesh.push_vertex(Vec3::Z, Vec3::Y, Vec2::Y);
        mesh.push_submesh(vec![[a, b, c]], material);
        SceneObject {
            name: name.to_string(),
            local_origin: Vec3::new(5.0, 0.0, 5.0),
            mesh,
        }
    }

    #[test]
    fn test_scene_counts() {
        let scene = Scene {
            layers: vec![
                Layer::new("Roads", vec![object("A", Material::Road), object("B", Material::Road)]),
                Layer::new("Environment", vec![object("Park", Material::Green)]),
            ],
        };

        assert_eq!(scene.object_count(), 3);
        assert_eq!(scene.triangle_count(), 3);
        assert_eq!(scene.materials(), vec![Material::Road, Material::Green]);
        assert_eq!(scene.layer("Roads").map(|l| l.objects.len()), Some(2));
        assert!(scene.layer("Buildings").is_none());
    }

    #[test]
    fn test_world_triangles() {
        let tri: Vec<_> = object("A", Material::Road).world_triangles().collect();
        assert_eq!(tri[0][0], Vec3::new(5.0, 0.0, 5.0));
        assert_eq!(tri[0][2], Vec3::new(5.0, 0.0, 6.0));
    }
}
