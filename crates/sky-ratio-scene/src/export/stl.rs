//! Binary STL export.
//!
//! Layout:
//! - 80-byte zeroed header
//! - u32 triangle count (little-endian)
//! - For each triangle: 3×f32 normal + 3×(3×f32 vertex) + u16 attribute = 50 bytes

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use sky_ratio_tessellate::{triangle_normal, TriangleSoup};

use crate::Result;

/// Header length in bytes.
pub const HEADER_LEN: usize = 80;

/// Bytes per triangle record.
pub const TRIANGLE_RECORD_LEN: usize = 50;

/// Serialize a triangle soup as binary STL.
///
/// Normals come from the vertex winding; zero-area triangles get `(0, 0, 1)`.
pub fn to_stl_bytes(soup: &TriangleSoup) -> Vec<u8> {
    let tri_count = soup.num_triangles();
    let mut buf = Vec::with_capacity(HEADER_LEN + 4 + tri_count * TRIANGLE_RECORD_LEN);

    buf.resize(HEADER_LEN, 0u8);
    buf.extend_from_slice(&(tri_count as u32).to_le_bytes());

    for [a, b, c] in soup.triangles() {
        let n = triangle_normal(&a, &b, &c);
        for component in [n.x, n.y, n.z] {
            buf.extend_from_slice(&(component as f32).to_le_bytes());
        }
        for v in [a, b, c] {
            for component in [v.x, v.y, v.z] {
                buf.extend_from_slice(&(component as f32).to_le_bytes());
            }
        }
        buf.extend_from_slice(&0u16.to_le_bytes());
    }

    buf
}

/// Write a triangle soup to `path` as binary STL.
pub fn export_stl(soup: &TriangleSoup, path: impl AsRef<Path>) -> Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    file.write_all(&to_stl_bytes(soup))?;
    file.flush()?;
    Ok(())
}
