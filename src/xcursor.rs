//! XDG cursor theme loading.
//!
//! Finds cursor themes on disk and parses the Xcursor binary format into
//! ARGB images. This is stable surface: it reads files and never touches
//! toolkit objects.
//!
//! Format reference: each cursor file starts with a "Xcur" magic, a table
//! of contents, and one image chunk per (size, frame) pair. All integers
//! are little-endian u32.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

const MAGIC: &[u8; 4] = b"Xcur";
const CHUNK_IMAGE: u32 = 0xfffd_0002;
const IMAGE_HEADER_LEN: u32 = 36;

/// Nominal size used when neither the caller nor the environment picks one.
pub const DEFAULT_SIZE: u32 = 24;

// ===== Errors =====

#[derive(Debug, Error)]
pub enum XCursorError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cursor theme not found: {name}")]
    ThemeNotFound { name: String },

    #[error("cursor '{cursor}' not found in theme '{theme}'")]
    CursorNotFound { theme: String, cursor: String },

    #[error("malformed cursor file: {reason}")]
    Malformed { reason: String },
}

impl XCursorError {
    fn malformed(reason: impl Into<String>) -> Self {
        XCursorError::Malformed {
            reason: reason.into(),
        }
    }
}

// ===== Images =====

/// A single decoded cursor image (one animation frame at one size).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorImage {
    /// Nominal size the image was designed for.
    pub size: u32,
    pub width: u32,
    pub height: u32,
    pub hotspot_x: u32,
    pub hotspot_y: u32,
    /// Frame delay in milliseconds. Zero for static cursors.
    pub delay_ms: u32,
    /// Pre-multiplied ARGB, 4 bytes per pixel, row-major.
    pub pixels: Vec<u8>,
}

/// A named cursor: one or more frames at the chosen nominal size.
#[derive(Debug, Clone)]
pub struct Cursor {
    pub name: String,
    pub images: Vec<CursorImage>,
}

impl Cursor {
    pub fn is_animated(&self) -> bool {
        self.images.len() > 1
    }
}

// ===== Theme =====

/// A cursor theme resolved to its on-disk directories.
#[derive(Debug, Clone)]
pub struct CursorTheme {
    name: String,
    size: u32,
    dirs: Vec<PathBuf>,
}

impl CursorTheme {
    /// Directories searched for themes, in priority order.
    ///
    /// `$XCURSOR_PATH` overrides the defaults entirely, matching libXcursor.
    pub fn search_path() -> Vec<PathBuf> {
        if let Ok(path) = std::env::var("XCURSOR_PATH") {
            return path
                .split(':')
                .filter(|p| !p.is_empty())
                .map(PathBuf::from)
                .collect();
        }
        let mut dirs = Vec::new();
        if let Ok(home) = std::env::var("HOME") {
            dirs.push(Path::new(&home).join(".icons"));
        }
        dirs.push(PathBuf::from("/usr/share/icons"));
        dirs.push(PathBuf::from("/usr/share/pixmaps"));
        dirs
    }

    /// Resolve a theme by name.
    ///
    /// `name` defaults to `$XCURSOR_THEME` then `"default"`; `size == 0`
    /// defaults to `$XCURSOR_SIZE` then [`DEFAULT_SIZE`].
    pub fn load(name: Option<&str>, size: u32) -> Result<Self, XCursorError> {
        let name = match name {
            Some(n) => n.to_string(),
            None => std::env::var("XCURSOR_THEME").unwrap_or_else(|_| "default".to_string()),
        };
        let size = if size != 0 {
            size
        } else {
            std::env::var("XCURSOR_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_SIZE)
        };

        let dirs: Vec<PathBuf> = Self::search_path()
            .into_iter()
            .map(|base| base.join(&name).join("cursors"))
            .filter(|dir| dir.is_dir())
            .collect();
        if dirs.is_empty() {
            return Err(XCursorError::ThemeNotFound { name });
        }
        debug!(theme = %name, size, dirs = dirs.len(), "resolved cursor theme");
        Ok(Self { name, size, dirs })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Load and decode one cursor by name, following one level of symlink
    /// aliasing via the filesystem.
    pub fn get_cursor(&self, cursor: &str) -> Result<Cursor, XCursorError> {
        for dir in &self.dirs {
            let path = dir.join(cursor);
            if !path.is_file() {
                continue;
            }
            let bytes = fs::read(&path)?;
            let images = parse_cursor_bytes(&bytes, self.size)?;
            return Ok(Cursor {
                name: cursor.to_string(),
                images,
            });
        }
        Err(XCursorError::CursorNotFound {
            theme: self.name.clone(),
            cursor: cursor.to_string(),
        })
    }
}

// ===== Parser =====

fn read_u32(bytes: &[u8], offset: usize) -> Result<u32, XCursorError> {
    let end = offset
        .checked_add(4)
        .ok_or_else(|| XCursorError::malformed("offset overflow"))?;
    let slice = bytes
        .get(offset..end)
        .ok_or_else(|| XCursorError::malformed(format!("truncated at byte {offset}")))?;
    let mut buf = [0u8; 4];
    buf.copy_from_slice(slice);
    Ok(u32::from_le_bytes(buf))
}

/// Decode an Xcursor file, returning the frames of the nominal size
/// closest to `preferred_size`.
pub fn parse_cursor_bytes(
    bytes: &[u8],
    preferred_size: u32,
) -> Result<Vec<CursorImage>, XCursorError> {
    if bytes.len() < 16 || &bytes[0..4] != MAGIC {
        return Err(XCursorError::malformed("bad magic"));
    }
    let header_len = read_u32(bytes, 4)?;
    if header_len < 16 {
        return Err(XCursorError::malformed("header too short"));
    }
    let ntoc = read_u32(bytes, 12)? as usize;

    // Collect image entries: (nominal size, file position).
    let mut entries = Vec::new();
    for i in 0..ntoc {
        let base = header_len as usize + i * 12;
        let chunk_type = read_u32(bytes, base)?;
        let subtype = read_u32(bytes, base + 4)?;
        let position = read_u32(bytes, base + 8)?;
        if chunk_type == CHUNK_IMAGE {
            entries.push((subtype, position));
        }
    }
    if entries.is_empty() {
        return Err(XCursorError::malformed("no image chunks"));
    }

    let best = entries
        .iter()
        .map(|(size, _)| *size)
        .min_by_key(|size| size.abs_diff(preferred_size))
        .ok_or_else(|| XCursorError::malformed("no image chunks"))?;

    let mut images = Vec::new();
    for (size, position) in entries.into_iter().filter(|(s, _)| *s == best) {
        images.push(parse_image_chunk(bytes, position as usize, size)?);
    }
    Ok(images)
}

fn parse_image_chunk(
    bytes: &[u8],
    position: usize,
    size: u32,
) -> Result<CursorImage, XCursorError> {
    let header = read_u32(bytes, position)?;
    let chunk_type = read_u32(bytes, position + 4)?;
    if header != IMAGE_HEADER_LEN || chunk_type != CHUNK_IMAGE {
        return Err(XCursorError::malformed("bad image chunk header"));
    }
    let width = read_u32(bytes, position + 16)?;
    let height = read_u32(bytes, position + 20)?;
    let hotspot_x = read_u32(bytes, position + 24)?;
    let hotspot_y = read_u32(bytes, position + 28)?;
    let delay_ms = read_u32(bytes, position + 32)?;

    // Sanity cap from libXcursor: images larger than 0x7fff are rejected.
    if width == 0 || height == 0 || width > 0x7fff || height > 0x7fff {
        return Err(XCursorError::malformed("implausible image dimensions"));
    }
    if hotspot_x > width || hotspot_y > height {
        return Err(XCursorError::malformed("hotspot outside image"));
    }

    let pixel_count = (width as usize) * (height as usize);
    let data_start = position + IMAGE_HEADER_LEN as usize;
    let data_end = data_start + pixel_count * 4;
    let pixels = bytes
        .get(data_start..data_end)
        .ok_or_else(|| XCursorError::malformed("truncated pixel data"))?
        .to_vec();

    Ok(CursorImage {
        size,
        width,
        height,
        hotspot_x,
        hotspot_y,
        delay_ms,
        pixels,
    })
}
