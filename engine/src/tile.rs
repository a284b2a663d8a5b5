//! [`Tile`] and [`TileSet`]: the immutable per-cell reference and the
//! paletted atlas it indexes into.

use arrayvec::ArrayVec;

use crate::color::Rgba;
use crate::error::{RasterError, RasterResult};

/// One cell of a layer's tile grid. A `nil` tile contributes no pixels and
/// its `id`/`horizontal_flip` are never consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub id: u32,
    pub nil: bool,
    pub horizontal_flip: bool,
}

impl Tile {
    pub fn new(id: u32) -> Tile {
        Tile {
            id,
            nil: false,
            horizontal_flip: false,
        }
    }

    pub fn nil() -> Tile {
        Tile {
            id: 0,
            nil: true,
            horizontal_flip: false,
        }
    }

    pub fn flipped(id: u32) -> Tile {
        Tile {
            id,
            nil: false,
            horizontal_flip: true,
        }
    }
}

/// A paletted tile atlas: a single image holding every tile of a layer in a
/// regular row-major grid, plus the palette those pixels index into.
///
/// Always 8bpp: one palette of up to 256 colors, no 4bpp/16-color mode.
#[derive(Debug, Clone)]
pub struct TileSet {
    palette: ArrayVec<Rgba, 256>,
    pixels: Box<[u8]>,
    columns: u32,
    rows: u32,
    tile_width: u32,
    tile_height: u32,
}

impl TileSet {
    /// Builds a tileset, deriving `rows` from the pixel buffer length.
    ///
    /// `pixels` must be exactly `columns * rows * tile_width * tile_height`
    /// bytes for some integer `rows`; anything else is an atlas that can't
    /// represent a whole number of tile rows and is rejected.
    pub fn new(
        palette: impl IntoIterator<Item = Rgba>,
        pixels: impl Into<Box<[u8]>>,
        columns: u32,
        tile_width: u32,
        tile_height: u32,
    ) -> RasterResult<TileSet> {
        if columns == 0 || tile_width == 0 || tile_height == 0 {
            return Err(RasterError::InvalidDimensions(format!(
                "tileset columns/tile_width/tile_height must be positive (got {}x{} tiles, {} columns)",
                tile_width, tile_height, columns
            )));
        }

        let palette: ArrayVec<Rgba, 256> = palette.into_iter().collect();
        let pixels = pixels.into();

        let row_bytes = (columns as usize) * (tile_width as usize) * (tile_height as usize);
        if row_bytes == 0 || pixels.len() % row_bytes != 0 {
            return Err(RasterError::InvalidDimensions(format!(
                "tileset pixel buffer of {} bytes isn't a multiple of {} bytes per tile row",
                pixels.len(),
                row_bytes
            )));
        }
        let rows = (pixels.len() / row_bytes) as u32;

        Ok(TileSet {
            palette,
            pixels,
            columns,
            rows,
            tile_width,
            tile_height,
        })
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    /// Whether `id` is a valid row-major tile index into this atlas.
    pub fn contains_tile(&self, id: u32) -> bool {
        id / self.columns < self.rows
    }

    /// Resolves the palette index stored at atlas pixel `(x, y)` to a
    /// color. An index past the end of a short palette reads as
    /// transparent rather than panicking — malformed host data shouldn't
    /// crash the rasterizer mid-frame.
    #[inline]
    pub(crate) fn color_at(&self, atlas_x: u32, atlas_y: u32) -> Rgba {
        let stride = self.columns * self.tile_width;
        let offset = crate::index2d!(usize, atlas_x, atlas_y, stride);
        let index = self.pixels[offset] as usize;
        self.palette.get(index).copied().unwrap_or(Rgba::TRANSPARENT)
    }
}
