// This is a library for reading Terragen terrain (.ter) files.
//
// The primary function is to decode the height field into memory so that it can be converted to
// other height map formats (see the ter2hm crate).
//
// TER - Terragen terrain format
//   http://www.planetside.co.uk/terragen/dev/tgterrain.html
//
// FILE FORMAT NOTES
// 1. "TERRAGENTERRAIN " magic cookie (16 bytes, note the trailing space).
// 2. CHUNKS: a 4 byte ASCII marker, followed by a payload whose layout depends on the marker.
//    There is no length field, so an unknown marker can't be skipped.
// 3. The stream ends at an "EOF " marker, or simply runs out.
// All numbers are little-endian.

use itertools::{Itertools, MinMaxResult};
use log::{debug, trace, warn};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

// =============== Format constants ================== //

/// The magic cookie at the start of every .ter file.
pub const HEADER_MAGIC: &[u8; 16] = b"TERRAGENTERRAIN ";

pub const MARKER_SIZE: usize = 4;
pub const X_POINTS_SIZE: usize = 4;
pub const Y_POINTS_SIZE: usize = 4;
pub const SIZE_SIZE: usize = 4;
pub const SCALE_COMPONENT_SIZE: usize = 4;
pub const SCALE_SIZE: usize = 3 * SCALE_COMPONENT_SIZE;
pub const RADIUS_SIZE: usize = 4;
pub const CURVE_MODE_SIZE: usize = 4;
pub const HEIGHT_SCALE_SIZE: usize = 2;
pub const BASE_HEIGHT_SIZE: usize = 2;
pub const ELEVATION_SIZE: usize = 2;

/// Planet radius (in km) used when the file has no CRAD chunk.
pub const DEFAULT_RADIUS: f32 = 6370.0;

/// Curve mode used when the file has no CRVM chunk.
pub const DEFAULT_CURVE_MODE: CurveMode = CurveMode::Flat;

/// The ALTW height scale is a multiplier in units of 1/65536.
pub const HEIGHT_SCALE_DIVISOR: f64 = 65536.0;

/// Upper bound on what a single payload read reserves up front. Larger payloads grow as bytes
/// actually arrive, so a bogus dimension chunk can't allocate more than the stream holds.
const MAX_PREALLOC: usize = 1 << 20;

// =============== Errors ================== //

/// Everything that can go wrong while decoding a .ter stream.
#[derive(Debug, thiserror::Error)]
pub enum TerError {
    #[error(
        "invalid header: expected {:?}, found {}",
        String::from_utf8_lossy(HEADER_MAGIC),
        describe_bytes(.0)
    )]
    InvalidHeader(Vec<u8>),

    #[error("expected {expected} bytes reading chunk type {chunk}, found {actual}")]
    Truncated {
        chunk: ChunkType,
        expected: usize,
        actual: usize,
    },

    #[error("unknown chunk marker {:?}", String::from_utf8_lossy(.0))]
    UnknownMarker(Vec<u8>),

    #[error("unknown curve mode number {0}")]
    UnknownCurveMode(i32),

    #[error("{0}")]
    Dimensions(#[from] DimensionError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Formats raw bytes from the file for an error message.
fn describe_bytes(bytes: &[u8]) -> String {
    format!("{} bytes {:?}", bytes.len(), String::from_utf8_lossy(bytes))
}

/// Reasons the grid dimensions can't be worked out when the ALTW chunk is reached.
#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
pub enum DimensionError {
    #[error("no size specified")]
    MissingSize,

    #[error("size {0} is not a perfect square and no explicit dimensions were given")]
    NotSquare(i32),

    #[error("X and Y points not both properly specified (x={x_points}, y={y_points})")]
    Unspecified { x_points: i32, y_points: i32 },

    #[error("grid of {x_points}x{y_points} points is too large to address")]
    TooLarge { x_points: i32, y_points: i32 },
}

// =============== Chunk types ================== //

/// The chunk markers understood by the reader.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum ChunkType {
    /// Number of data points in the x direction (XPTS).
    XPoints,
    /// Number of data points in the y direction (YPTS).
    YPoints,
    /// Number of data points along the shortest side, minus one (SIZE).
    Size,
    /// Scale of the terrain in metres per unit (SCAL).
    Scale,
    /// Radius of the planet the terrain sits on (CRAD).
    Radius,
    /// How the terrain is rendered against the planet's curvature (CRVM).
    CurveMode,
    /// Altitudes, as 16 bit words (ALTW).
    Elevation,
    /// End of file marker ("EOF ", with the trailing space).
    EndOfFile,
}

impl ChunkType {
    /// Parses a chunk marker, returning None if it isn't one of the known types.
    ///
    /// Markers are exactly four bytes, so a bare "EOF" (missing its trailing space) is not an
    /// end marker.
    pub fn from_marker(marker: &[u8]) -> Option<ChunkType> {
        match marker {
            b"XPTS" => Some(ChunkType::XPoints),
            b"YPTS" => Some(ChunkType::YPoints),
            b"SIZE" => Some(ChunkType::Size),
            b"SCAL" => Some(ChunkType::Scale),
            b"CRAD" => Some(ChunkType::Radius),
            b"CRVM" => Some(ChunkType::CurveMode),
            b"ALTW" => Some(ChunkType::Elevation),
            b"EOF " => Some(ChunkType::EndOfFile),
            _ => None,
        }
    }

    /// Returns the four byte marker for this chunk type.
    pub fn marker(&self) -> &'static [u8; MARKER_SIZE] {
        match self {
            ChunkType::XPoints => b"XPTS",
            ChunkType::YPoints => b"YPTS",
            ChunkType::Size => b"SIZE",
            ChunkType::Scale => b"SCAL",
            ChunkType::Radius => b"CRAD",
            ChunkType::CurveMode => b"CRVM",
            ChunkType::Elevation => b"ALTW",
            ChunkType::EndOfFile => b"EOF ",
        }
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Markers are plain ASCII.
        let marker: String = self.marker().iter().map(|&b| b as char).collect();
        f.write_str(marker.trim_end())
    }
}


// =============== Simple chunk values ================== //

/// How the terrain is mapped onto the planet.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CurveMode {
    /// The terrain is a flat plane.
    Flat = 0,
    /// The terrain is draped over a sphere of the file's radius.
    Draped = 1,
}

impl CurveMode {
    /// Parses the numeric CRVM value. Anything other than 0 or 1 is an error.
    pub fn from_code(code: i32) -> Result<CurveMode, TerError> {
        match code {
            0 => Ok(CurveMode::Flat),
            1 => Ok(CurveMode::Draped),
            _ => Err(TerError::UnknownCurveMode(code)),
        }
    }
}

impl Default for CurveMode {
    fn default() -> Self {
        DEFAULT_CURVE_MODE
    }
}

impl fmt::Display for CurveMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CurveMode::Flat => f.write_str("flat"),
            CurveMode::Draped => f.write_str("draped"),
        }
    }
}

/// Metres per terrain unit along each axis, from the SCAL chunk.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Scale {
    x: f32,
    y: f32,
    z: f32,
}

impl Scale {
    pub fn new(x: f32, y: f32, z: f32) -> Scale {
        Scale { x, y, z }
    }

    /// Decodes the 12 byte SCAL payload.
    fn from_le_bytes(bytes: &[u8; SCALE_SIZE]) -> Scale {
        let at = |i: usize| f32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]);
        Scale::new(
            at(0),
            at(SCALE_COMPONENT_SIZE),
            at(2 * SCALE_COMPONENT_SIZE),
        )
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn z(&self) -> f32 {
        self.z
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}


// =============== Stream reading ================== //

/// Wraps the byte source and reads little-endian values from it.
///
/// Short reads are reported against the chunk being decoded. The reader only ever moves forward.
struct ChunkReader<R> {
    inner: R,
    /// Bytes consumed so far; only used for logging.
    pos: u64,
}

impl<R: Read> ChunkReader<R> {
    fn new(inner: R) -> Self {
        Self { inner, pos: 0 }
    }

    /// Reads up to len bytes, returning fewer only if the source ran out.
    fn read_up_to(&mut self, len: usize) -> Result<Vec<u8>, TerError> {
        let mut buf = Vec::with_capacity(len.min(MAX_PREALLOC));
        self.inner.by_ref().take(len as u64).read_to_end(&mut buf)?;
        self.pos += buf.len() as u64;
        Ok(buf)
    }

    /// Reads exactly len bytes of the given chunk's payload.
    fn read_payload(&mut self, chunk: ChunkType, len: usize) -> Result<Vec<u8>, TerError> {
        let bytes = self.read_up_to(len)?;
        if bytes.len() != len {
            return Err(TerError::Truncated {
                chunk,
                expected: len,
                actual: bytes.len(),
            });
        }
        Ok(bytes)
    }

    /// Reads an N byte field; callers pass the field's width constant as N.
    fn read_array<const N: usize>(&mut self, chunk: ChunkType) -> Result<[u8; N], TerError> {
        let bytes = self.read_payload(chunk, N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&bytes);
        Ok(out)
    }


    /// Reads count little-endian i16 values.
    fn read_i16s(&mut self, chunk: ChunkType, count: usize) -> Result<Vec<i16>, TerError> {
        let bytes = self.read_payload(chunk, count.saturating_mul(ELEVATION_SIZE))?;
        Ok(bytes
            .chunks_exact(ELEVATION_SIZE)
            .map(|b| i16::from_le_bytes([b[0], b[1]]))
            .collect())
    }

    /// Consumes and checks the 16 byte magic cookie.
    fn read_header(&mut self) -> Result<(), TerError> {
        let header = self.read_up_to(HEADER_MAGIC.len())?;
        if header.as_slice() != HEADER_MAGIC {
            return Err(TerError::InvalidHeader(header));
        }
        Ok(())
    }

    /// Reads the next chunk marker. Returns None if the stream ended cleanly before it.
    ///
    /// A partial marker at the end of the stream is reported as an unknown marker.
    fn read_marker(&mut self) -> Result<Option<ChunkType>, TerError> {
        let marker = self.read_up_to(MARKER_SIZE)?;
        if marker.is_empty() {
            return Ok(None);
        }
        match ChunkType::from_marker(&marker) {
            Some(chunk) => Ok(Some(chunk)),
            None => Err(TerError::UnknownMarker(marker)),
        }
    }
}


// =============== Parsing ================== //

/// Chunk values accumulated while the stream is decoded.
struct ParseState {
    /// Cleared by the first XPTS or YPTS chunk; until then ALTW sizes itself from SIZE.
    must_be_square: bool,
    x_points: i32,
    y_points: i32,
    size: i32,
    scale: Option<Scale>,
    radius: f32,
    curve_mode: CurveMode,
    height_scale: i16,
    base_height: i16,
    elevations: Option<Vec<i16>>,
}

impl Default for ParseState {
    fn default() -> Self {
        ParseState {
            must_be_square: true,
            x_points: -1,
            y_points: -1,
            size: -1,
            scale: None,
            radius: DEFAULT_RADIUS,
            curve_mode: DEFAULT_CURVE_MODE,
            height_scale: 0,
            base_height: 0,
            elevations: None,
        }
    }
}

impl ParseState {
    /// Works out the dimensions of the grid in an ALTW chunk from the chunks seen so far.
    fn elevation_dimensions(&self) -> Result<(i32, i32), DimensionError> {
        if self.must_be_square {
            if self.size < 0 {
                return Err(DimensionError::MissingSize);
            }
            let points = self.size as i64 + 1;
            let side = integer_sqrt(points);
            if side * side != points {
                return Err(DimensionError::NotSquare(self.size));
            }
            // side <= sqrt(i32::MAX + 1), which fits.
            Ok((side as i32, side as i32))
        } else if self.x_points < 0 || self.y_points < 0 {
            Err(DimensionError::Unspecified {
                x_points: self.x_points,
                y_points: self.y_points,
            })
        } else {
            Ok((self.x_points, self.y_points))
        }
    }

    fn set_explicit_dimension<R: Read>(
        &mut self,
        reader: &mut ChunkReader<R>,
        chunk: ChunkType,
    ) -> Result<(), TerError> {
        let value = match chunk {
            ChunkType::XPoints => i32::from_le_bytes(reader.read_array::<X_POINTS_SIZE>(chunk)?),
            _ => i32::from_le_bytes(reader.read_array::<Y_POINTS_SIZE>(chunk)?),
        };
        if self.elevations.is_some() {
            warn!(
                "{} chunk after the elevation grid; it only applies to a later ALTW chunk",
                chunk
            );
        }
        self.must_be_square = false;
        match chunk {
            ChunkType::XPoints => self.x_points = value,
            _ => self.y_points = value,
        }
        trace!("  {} = {}", chunk, value);
        Ok(())
    }

    fn read_elevations<R: Read>(&mut self, reader: &mut ChunkReader<R>) -> Result<(), TerError> {
        let chunk = ChunkType::Elevation;
        let (x_points, y_points) = self.elevation_dimensions()?;
        let count = (x_points as usize)
            .checked_mul(y_points as usize)
            .ok_or(DimensionError::TooLarge { x_points, y_points })?;
        if count.checked_mul(ELEVATION_SIZE).is_none() {
            return Err(DimensionError::TooLarge { x_points, y_points }.into());
        }

        let height_scale = i16::from_le_bytes(reader.read_array::<HEIGHT_SCALE_SIZE>(chunk)?);
        let base_height = i16::from_le_bytes(reader.read_array::<BASE_HEIGHT_SIZE>(chunk)?);
        trace!(
            "  {}x{} grid, height_scale={} base_height={}",
            x_points,
            y_points,
            height_scale,
            base_height
        );
        let elevations = reader.read_i16s(chunk, count)?;

        if self.elevations.is_some() {
            warn!("Multiple ALTW chunks; replacing the earlier elevation grid.");
        }
        self.x_points = x_points;
        self.y_points = y_points;
        self.height_scale = height_scale;
        self.base_height = base_height;
        self.elevations = Some(elevations);
        Ok(())
    }

    fn finish(self) -> TerrainDescriptor {
        TerrainDescriptor {
            x_points: self.x_points,
            y_points: self.y_points,
            size: self.size,
            scale: self.scale,
            radius: self.radius,
            curve_mode: self.curve_mode,
            height_scale: self.height_scale,
            base_height: self.base_height,
            elevations: self.elevations.unwrap_or_default(),
        }
    }
}

/// Returns floor(sqrt(n)) for non-negative n.
fn integer_sqrt(n: i64) -> i64 {
    let mut root = (n as f64).sqrt() as i64;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}

// =============== Descriptor ================== //

/// Represents one decoded .ter file.
///
/// Built in a single pass by [`TerrainDescriptor::read`] and never modified afterwards; all
/// lookups index straight into the decoded grid.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainDescriptor {
    /// Grid dimensions; -1 if never specified or derived.
    x_points: i32,
    y_points: i32,

    /// The SIZE value (points along the shortest side - 1), or -1.
    size: i32,

    scale: Option<Scale>,
    radius: f32,
    curve_mode: CurveMode,

    /// Fixed point parameters from the start of the ALTW chunk.
    height_scale: i16,
    base_height: i16,

    /// Raw samples, indexed by y + x * y_points. Empty if there was no ALTW chunk.
    elevations: Vec<i16>,
}

impl fmt::Display for TerrainDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "XPoints: {}", self.x_points)?;
        writeln!(f, "YPoints: {}", self.y_points)?;
        writeln!(f, "Size: {}", self.size)?;
        match &self.scale {
            Some(scale) => writeln!(f, "Scale: {}", scale)?,
            None => writeln!(f, "Scale: none")?,
        }
        writeln!(f, "Radius: {}", self.radius)?;
        writeln!(f, "Curvature mode: {}", self.curve_mode)?;
        writeln!(f, "Height scale: {}", self.height_scale)?;
        write!(f, "Base height: {}", self.base_height)?;

        // Use {:+} for grid statistics.
        if f.sign_plus() {
            write!(f, "\nElevations: {}", self.elevations.len())?;
            if let Some((min, max)) = self.height_bounds() {
                write!(f, "\nHeights: {} to {}", min, max)?;
            }
        }
        Ok(())
    }
}

impl TerrainDescriptor {
    /// Opens and decodes the .ter file at path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<TerrainDescriptor, TerError> {
        let file = File::open(&path)?;
        let file_size = file.metadata()?.len();
        debug!(
            "Reading {} ({} bytes).",
            path.as_ref().display(),
            file_size
        );
        let terrain = Self::read(BufReader::new(file))?;
        debug!(
            "Decoded {}: {}x{} points, {} elevations.",
            path.as_ref().display(),
            terrain.x_points,
            terrain.y_points,
            terrain.elevations.len()
        );
        Ok(terrain)
    }

    /// Decodes a .ter stream, reading it forward until an EOF marker or the end of the stream.
    ///
    /// The first malformed chunk stops the decode; nothing is salvaged from a bad stream.
    pub fn read<R: Read>(source: R) -> Result<TerrainDescriptor, TerError> {
        let mut reader = ChunkReader::new(source);
        reader.read_header()?;

        let mut state = ParseState::default();
        loop {
            let offset = reader.pos;
            let chunk = match reader.read_marker()? {
                Some(chunk) => chunk,
                None => {
                    debug!("Stream ended after {} bytes with no EOF marker.", offset);
                    break;
                }
            };
            trace!("{} chunk at byte {}", chunk, offset);

            match chunk {
                ChunkType::Size => {
                    state.size = i32::from_le_bytes(reader.read_array::<SIZE_SIZE>(chunk)?);
                    trace!("  size = {}", state.size);
                }
                ChunkType::Scale => {
                    let scale = Scale::from_le_bytes(&reader.read_array::<SCALE_SIZE>(chunk)?);
                    trace!("  scale = {}", scale);
                    state.scale = Some(scale);
                }
                ChunkType::XPoints | ChunkType::YPoints => {
                    state.set_explicit_dimension(&mut reader, chunk)?;
                }
                ChunkType::Radius => {
                    state.radius = f32::from_le_bytes(reader.read_array::<RADIUS_SIZE>(chunk)?);
                    trace!("  radius = {}", state.radius);
                }
                ChunkType::CurveMode => {
                    let code = i32::from_le_bytes(reader.read_array::<CURVE_MODE_SIZE>(chunk)?);
                    state.curve_mode = CurveMode::from_code(code)?;
                    trace!("  curve mode = {}", state.curve_mode);
                }
                ChunkType::Elevation => state.read_elevations(&mut reader)?,
                ChunkType::EndOfFile => {
                    debug!("EOF marker at byte {}.", offset);
                    break;
                }
            }
        }
        Ok(state.finish())
    }

    pub fn x_points(&self) -> i32 {
        self.x_points
    }

    pub fn y_points(&self) -> i32 {
        self.y_points
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn scale(&self) -> Option<Scale> {
        self.scale
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn curve_mode(&self) -> CurveMode {
        self.curve_mode
    }

    pub fn height_scale(&self) -> i16 {
        self.height_scale
    }

    pub fn base_height(&self) -> i16 {
        self.base_height
    }

    /// The raw samples, indexed by y + x * y_points.
    pub fn elevations(&self) -> &[i16] {
        &self.elevations
    }

    /// Returns the raw sample at (x, y), or None if the point is outside the grid.
    pub fn elevation_at(&self, x: i32, y: i32) -> Option<i16> {
        if x < 0 || y < 0 || x >= self.x_points || y >= self.y_points {
            return None;
        }
        let index = y as usize + x as usize * self.y_points as usize;
        self.elevations.get(index).copied()
    }

    /// Converts a raw sample to an absolute height: base_height + raw * height_scale / 65536.
    pub fn absolute_height(&self, elevation: i16) -> f32 {
        let scale = self.height_scale as f64 / HEIGHT_SCALE_DIVISOR;
        (self.base_height as f64 + elevation as f64 * scale) as f32
    }

    /// Returns the absolute height at (x, y), or None if the point is outside the grid.
    pub fn absolute_height_at(&self, x: i32, y: i32) -> Option<f32> {
        self.elevation_at(x, y).map(|e| self.absolute_height(e))
    }

    /// Returns the lowest and highest absolute heights in the grid, or None if it is empty.
    pub fn height_bounds(&self) -> Option<(f32, f32)> {
        // A negative height scale flips the order, so compare after converting.
        match self.elevations.iter().copied().minmax() {
            MinMaxResult::NoElements => None,
            MinMaxResult::OneElement(e) => {
                let h = self.absolute_height(e);
                Some((h, h))
            }
            MinMaxResult::MinMax(lo, hi) => {
                let (a, b) = (self.absolute_height(lo), self.absolute_height(hi));
                Some((a.min(b), a.max(b)))
            }
        }
    }
}


#[cfg(test)]
mod descriptor_tests {
    use super::*;

    fn grid(
        height_scale: i16,
        base_height: i16,
        elevations: Vec<i16>,
        y_points: i32,
    ) -> TerrainDescriptor {
        let x_points = elevations.len() as i32 / y_points;
        TerrainDescriptor {
            x_points,
            y_points,
            size: -1,
            scale: None,
            radius: DEFAULT_RADIUS,
            curve_mode: DEFAULT_CURVE_MODE,
            height_scale,
            base_height,
            elevations,
        }
    }

    #[test]
    fn zero_height_scale_gives_base_height() {
        let terrain = grid(0, 17, vec![0], 1);
        for raw in [i16::MIN, -1, 0, 1, 1234, i16::MAX] {
            assert_eq!(17.0, terrain.absolute_height(raw));
        }
    }

    #[test]
    fn height_scale_is_not_truncated() {
        let terrain = grid(1, 0, vec![0], 1);
        assert_eq!((1.0 / 65536.0) as f32, terrain.absolute_height(1));
        let terrain = grid(-32768, 100, vec![0], 1);
        assert_eq!(150.0, terrain.absolute_height(-100));
    }

    #[test]
    fn lookups_are_bounds_checked() {
        let terrain = grid(0, 0, vec![1, 2, 3, 4, 5, 6], 3);
        assert_eq!(Some(4), terrain.elevation_at(1, 0));
        assert_eq!(Some(6), terrain.elevation_at(1, 2));
        assert_eq!(None, terrain.elevation_at(2, 0));
        assert_eq!(None, terrain.elevation_at(0, 3));
        assert_eq!(None, terrain.elevation_at(-1, 0));
        assert_eq!(None, terrain.absolute_height_at(0, -1));
    }

    #[test]
    fn bounds_follow_height_scale_sign() {
        let terrain = grid(-32768, 0, vec![-4, 0, 10], 1);
        assert_eq!(Some((-5.0, 2.0)), terrain.height_bounds());
        let terrain = grid(256, 10, vec![100], 1);
        assert_eq!(Some((10.390625, 10.390625)), terrain.height_bounds());
    }

    #[test]
    fn display() {
        let terrain = grid(256, 10, vec![0, 100, -50, 200], 2);
        let text = terrain.to_string();
        assert!(text.starts_with("XPoints: 2\nYPoints: 2\nSize: -1\nScale: none\n"));
        assert!(text.contains("Radius: 6370\n"));
        assert!(text.contains("Curvature mode: flat\n"));
        assert!(text.ends_with("Base height: 10"));
        let verbose = format!("{:+}", terrain);
        assert!(verbose.contains("Elevations: 4"));
        assert!(verbose.contains("Heights: 9.8046875 to 10.78125"));
    }
}
