use itertools::iproduct;
use log::{debug, info};
use simple_error::bail;
use std::error::Error;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use ter::TerrainDescriptor;

/// Bytes per value in a raw32 height map.
const FLOAT_BYTES: usize = 4;

/// Returns the terrain's (x, y) dimensions, failing unless it holds a sample for every point
/// they declare. Unset dimensions count as zero.
fn complete_grid(terrain: &TerrainDescriptor) -> Result<(usize, usize), Box<dyn Error>> {
    let x_points = terrain.x_points().max(0) as usize;
    let y_points = terrain.y_points().max(0) as usize;
    let held = terrain.elevations().len();
    if x_points.checked_mul(y_points) != Some(held) {
        bail!(format!(
            "Terrain declares {}x{} points but holds {} elevations.",
            x_points, y_points, held
        ));
    }
    Ok((x_points, y_points))
}

/// Writes the terrain's absolute heights to out as headerless little-endian f32 values.
///
/// Heights are written a column at a time: every y for x = 0, then every y for x = 1, and so on.
/// Returns the number of values written.
pub fn write_raw32<W: Write>(
    terrain: &TerrainDescriptor,
    mut out: W,
) -> Result<usize, Box<dyn Error>> {
    let (x_points, y_points) = complete_grid(terrain)?;
    if x_points * y_points == 0 {
        out.flush()?;
        return Ok(0);
    }

    // The grid is stored column-major already, so each chunk is one x.
    let mut column: Vec<u8> = Vec::with_capacity(y_points * FLOAT_BYTES);
    for samples in terrain.elevations().chunks_exact(y_points) {
        column.clear();
        for &raw in samples {
            column.extend_from_slice(&terrain.absolute_height(raw).to_le_bytes());
        }
        out.write_all(&column)?;
    }
    out.flush()?;
    Ok(x_points * y_points)
}

/// Writes the terrain as a raw32 height map to the file at path, replacing it if it exists.
pub fn write_raw32_file<P: AsRef<Path>>(
    terrain: &TerrainDescriptor,
    path: P,
) -> Result<usize, Box<dyn Error>> {
    let out = File::create(path.as_ref())?;
    let count = write_raw32(terrain, out)?;
    info!("Wrote {} heights to {}.", count, path.as_ref().display());
    Ok(count)
}

/// Saves a 16 bit greyscale image of the terrain, with heights stretched to the full range.
///
/// The image is flipped vertically so that y = 0 is the bottom row.
pub fn export_png<P: AsRef<Path>>(
    terrain: &TerrainDescriptor,
    path: P,
) -> Result<(), Box<dyn Error>> {
    let (x_points, y_points) = complete_grid(terrain)?;
    let (min, max) = match terrain.height_bounds() {
        Some(bounds) => bounds,
        None => bail!("Terrain has no elevation data to render."),
    };
    let width = x_points as u32;
    let height = y_points as u32;
    debug!(
        "Rendering {}x{} preview, heights {} to {}.",
        width, height, min, max
    );

    let range = max - min;
    let mut img: image::ImageBuffer<image::Luma<u16>, Vec<u16>> =
        image::ImageBuffer::new(width, height);
    for (x, y) in iproduct!(0..width, 0..height) {
        let v = match terrain.absolute_height_at(x as i32, y as i32) {
            Some(v) => v,
            None => bail!(format!("No elevation data at ({}, {}).", x, y)),
        };
        let frac = if range > 0.0 { (v - min) / range } else { 0.0 };
        img[(x, height - 1 - y)] = image::Luma([(frac * u16::MAX as f32) as u16]);
    }
    img.save(path.as_ref())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terrain(chunks: &[u8]) -> TerrainDescriptor {
        let mut data = ter::HEADER_MAGIC.to_vec();
        data.extend_from_slice(chunks);
        TerrainDescriptor::read(data.as_slice()).unwrap()
    }

    /// A 2x3 grid with height_scale 0x4000 (a quarter) and base height 1.
    fn two_by_three() -> TerrainDescriptor {
        #[rustfmt::skip]
        let chunks: Vec<u8> = vec![
            b'X', b'P', b'T', b'S', 2, 0, 0, 0,
            b'Y', b'P', b'T', b'S', 3, 0, 0, 0,
            b'A', b'L', b'T', b'W',
            0x00, 0x40,  // height scale
            1, 0,  // base height
            0, 0, 4, 0, 8, 0,  // x = 0
            12, 0, 16, 0, 0xfc, 0xff,  // x = 1
            b'E', b'O', b'F', b' ',
        ];
        terrain(&chunks)
    }

    fn floats(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(FLOAT_BYTES)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect()
    }

    #[test]
    fn raw32_is_column_major() {
        let mut out: Vec<u8> = vec![];
        let count = write_raw32(&two_by_three(), &mut out).unwrap();
        assert_eq!(6, count);
        assert_eq!(24, out.len());
        assert_eq!(vec![1.0, 2.0, 3.0, 4.0, 5.0, 0.0], floats(&out));
    }

    #[test]
    fn raw32_of_header_only_file_is_empty() {
        let mut out: Vec<u8> = vec![];
        assert_eq!(0, write_raw32(&terrain(b""), &mut out).unwrap());
        assert!(out.is_empty());
    }

    #[test]
    fn raw32_needs_elevations_for_declared_grid() {
        #[rustfmt::skip]
        let chunks: Vec<u8> = vec![
            b'X', b'P', b'T', b'S', 1, 0, 0, 0,
            b'Y', b'P', b'T', b'S', 1, 0, 0, 0,
        ];
        let mut out: Vec<u8> = vec![];
        assert!(write_raw32(&terrain(&chunks), &mut out).is_err());
    }

    #[test]
    fn raw32_rejects_huge_grid_without_samples_before_allocating() {
        let mut chunks: Vec<u8> = vec![];
        chunks.extend_from_slice(b"XPTS");
        chunks.extend_from_slice(&1i32.to_le_bytes());
        chunks.extend_from_slice(b"YPTS");
        chunks.extend_from_slice(&i32::MAX.to_le_bytes());
        let huge = terrain(&chunks);
        let mut out: Vec<u8> = vec![];
        let err = write_raw32(&huge, &mut out).unwrap_err();
        assert_eq!(
            "Terrain declares 1x2147483647 points but holds 0 elevations.",
            err.to_string()
        );
        assert!(out.is_empty());
    }

    #[test]
    fn raw32_rejects_dimensions_changed_after_grid() {
        #[rustfmt::skip]
        let chunks: Vec<u8> = vec![
            b'S', b'I', b'Z', b'E', 0, 0, 0, 0,
            b'A', b'L', b'T', b'W', 0, 0, 0, 0, 7, 0,
            b'X', b'P', b'T', b'S', 9, 0, 0, 0,
        ];
        let reshaped = terrain(&chunks);
        assert_eq!((9, 1), (reshaped.x_points(), reshaped.y_points()));
        let mut out: Vec<u8> = vec![];
        assert!(write_raw32(&reshaped, &mut out).is_err());
        let path = std::env::temp_dir().join("ter2hm-test-reshaped.png");
        assert!(export_png(&reshaped, &path).is_err());
    }

    #[test]
    fn raw32_file_round_trips_through_disk() {
        let path = std::env::temp_dir().join(format!("ter2hm-test-{}.raw32", std::process::id()));
        assert_eq!(6, write_raw32_file(&two_by_three(), &path).unwrap());
        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(vec![1.0, 2.0, 3.0, 4.0, 5.0, 0.0], floats(&bytes));
    }

    #[test]
    fn png_preview() {
        let path = std::env::temp_dir().join(format!("ter2hm-test-{}.png", std::process::id()));
        export_png(&two_by_three(), &path).unwrap();
        let img = image::open(&path).unwrap().into_luma16();
        std::fs::remove_file(&path).unwrap();
        assert_eq!((2, 3), img.dimensions());
        // (1, 1) holds the highest point and (1, 2) the lowest; y is flipped.
        assert_eq!(u16::MAX, img[(1, 1)].0[0]);
        assert_eq!(0, img[(1, 0)].0[0]);
    }

    #[test]
    fn png_of_empty_terrain_fails() {
        let path = std::env::temp_dir().join("ter2hm-test-empty.png");
        assert!(export_png(&terrain(b""), &path).is_err());
    }
}
