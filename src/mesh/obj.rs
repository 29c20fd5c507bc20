//! Wavefront OBJ export with a sibling MTL material library.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::Scene;
use crate::config::Palette;

/// Write a scene as `path` (OBJ) and `path` with an `.mtl` extension
///
/// Every object becomes one `o` block named `<layer>/<object>`. Vertices are
/// written in world space and faces use global 1-based indices, so the file
/// can be imported without knowing the local origins.
///
/// # Arguments
/// * `path` - Output OBJ path
/// * `scene` - Generated scene
/// * `palette` - Diffuse colors for the MTL file
pub fn write_obj(path: &Path, scene: &Scene, palette: &Palette) -> Result<()> {
    let mtl_path = path.with_extension("mtl");
    let mtl_name = mtl_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .context("Output path has no file name")?;

    let file = File::create(path)
        .with_context(|| format!("Failed to create OBJ file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_obj_to(&mut writer, scene, &mtl_name)?;
    writer.flush()?;

    let file = File::create(&mtl_path)
        .with_context(|| format!("Failed to create MTL file: {}", mtl_path.display()))?;
    let mut writer = BufWriter::new(file);
    write_mtl_to(&mut writer, scene, palette)?;
    writer.flush()?;

    Ok(())
}

fn write_obj_to<W: Write>(w: &mut W, scene: &Scene, mtl_name: &str) -> Result<()> {
    writeln!(w, "# osmworld")?;
    writeln!(w, "mtllib {}", mtl_name)?;

    // OBJ indices are global across objects and 1-based
    let mut offset = 1usize;

    for (layer, object) in scene.objects() {
        let mesh = &object.mesh;
        writeln!(w, "o {}/{}", obj_name(&layer.name), obj_name(&object.name))?;

        for v in &mesh.vertices {
            let p = object.local_origin + *v;
            writeln!(w, "v {} {} {}", p.x, p.y, p.z)?;
        }
        for uv in &mesh.uvs {
            writeln!(w, "vt {} {}", uv.x, uv.y)?;
        }
        for n in &mesh.normals {
            writeln!(w, "vn {} {} {}", n.x, n.y, n.z)?;
        }

        for submesh in &mesh.submeshes {
            writeln!(w, "usemtl {}", submesh.material.name())?;
            for tri in &submesh.triangles {
                let [a, b, c] = tri.map(|i| i as usize + offset);
                writeln!(w, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
            }
        }

        offset += mesh.vertex_count();
    }

    Ok(())
}

fn write_mtl_to<W: Write>(w: &mut W, scene: &Scene, palette: &Palette) -> Result<()> {
    writeln!(w, "# osmworld")?;
    for material in scene.materials() {
        let [r, g, b] = palette.color(material);
        writeln!(w)?;
        writeln!(w, "newmtl {}", material.name())?;
        writeln!(w, "Kd {} {} {}", r, g, b)?;
        writeln!(w, "Ka 0 0 0")?;
        writeln!(w, "d 1")?;
        writeln!(w, "illum 1")?;
    }
    Ok(())
}

/// OBJ names end at whitespace
fn obj_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{Layer, Material, MeshBuffer, SceneObject};
    use glam::{Vec2, Vec3};
    use std::fs;
    use tempfile::tempdir;

    fn triangle_object(name: &str, materials: &[Material]) -> SceneObject {
        let mut mesh = MeshBuffer::new();
        for &material in materials {
            let a = mesh.push_vertex(Vec3::ZERO, Vec3::Y, Vec2::ZERO);
            let b = mesh.push_vertex(Vec3::X, Vec3::Y, Vec2::X);
            let c = mesh.push_vertex(Vec3::Z, Vec3::Y, Vec2::Y);
            mesh.push_submesh(vec![[a, b, c]], material);
        }
        SceneObject {
            name: name.to_string(),
            local_origin: Vec3::new(10.0, 0.0, 0.0),
            mesh,
        }
    }

    fn scene() -> Scene {
        Scene {
            layers: vec![
                Layer::new(
                    "Roads",
                    vec![triangle_object("Main Street", &[Material::Road, Material::Footway])],
                ),
                Layer::new("Environment", vec![triangle_object("Park", &[Material::Green])]),
            ],
        }
    }

    #[test]
    fn test_obj_structure() {
        let mut bytes = Vec::new();
        write_obj_to(&mut bytes, &scene(), "out.mtl").unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains("mtllib out.mtl"));
        assert_eq!(text.lines().filter(|l| l.starts_with("o ")).count(), 2);
        assert_eq!(text.lines().filter(|l| l.starts_with("usemtl ")).count(), 3);
        assert!(text.contains("o Roads/Main_Street"));
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 9);
        // World space
        assert!(text.contains("v 10 0 0"));
        // Second object continues the global index
        assert!(text.contains("f 7/7/7 8/8/8 9/9/9"));
    }

    #[test]
    fn test_write_obj_and_mtl() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("city.obj");

        write_obj(&path, &scene(), &Palette::default()).unwrap();

        let obj = fs::read_to_string(&path).unwrap();
        assert!(obj.contains("mtllib city.mtl"));

        let mtl = fs::read_to_string(dir.path().join("city.mtl")).unwrap();
        assert!(mtl.contains("newmtl road"));
        assert!(mtl.contains("newmtl footway"));
        assert!(mtl.contains("newmtl green"));
        assert!(!mtl.contains("newmtl water"));
    }

    #[test]
    fn test_obj_name() {
        assert_eq!(obj_name("Main  Street\tNorth"), "Main_Street_North");
        assert_eq!(obj_name("unnamed"), "unnamed");
    }
}
