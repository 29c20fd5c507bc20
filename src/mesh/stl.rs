use super::{Scene, face_normal};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write every triangle of a scene to a binary STL file
///
/// Objects are flattened into world space; layer and material information is
/// lost. Coordinates keep the scene's Y-up frame.
///
/// Binary STL format:
/// - 80 byte header
/// - 4 byte u32 triangle count (little endian)
/// - For each triangle:
///   - 3 x f32 normal (12 bytes)
///   - 3 x 3 x f32 vertices (36 bytes)
///   - 2 byte attribute (usually 0)
///
/// # Arguments
/// * `path` - Output file path
/// * `scene` - Generated scene
pub fn write_stl(path: &Path, scene: &Scene) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create STL file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_stl_to(&mut writer, scene)?;
    writer.flush()?;
    Ok(())
}

fn write_stl_to<W: Write>(writer: &mut W, scene: &Scene) -> Result<()> {
    let mut header = [b' '; 80];
    let title = b"osmworld - OpenStreetMap scene export";
    header[..title.len()].copy_from_slice(title);
    writer.write_all(&header)?;

    // Triangle count (u32, little endian)
    let count = u32::try_from(scene.triangle_count()).context("Too many triangles for STL")?;
    writer.write_all(&count.to_le_bytes())?;

    for (_, object) in scene.objects() {
        for [v0, v1, v2] in object.world_triangles() {
            let normal = face_normal(v0, v1, v2);
            for n in normal.to_array() {
                writer.write_all(&n.to_le_bytes())?;
            }

            for vertex in [v0, v1, v2] {
                for coord in vertex.to_array() {
                    writer.write_all(&coord.to_le_bytes())?;
                }
            }

            // Attribute byte count (2 bytes, usually 0)
            writer.write_all(&[0u8, 0u8])?;
        }
    }

    Ok(())
}

/// Get the file size of an STL with the given number of triangles
pub fn estimate_stl_size(triangle_count: usize) -> usize {
    // 80 (header) + 4 (count) + triangles * (12 normal + 36 vertices + 2 attribute)
    80 + 4 + triangle_count * 50
}
