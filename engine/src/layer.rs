//! [`Layer`]: a positioned, optionally-repeating, optionally-transformed
//! tilemap, plus the [`Tilemap`] value an external loader hands the core to
//! build one.

use crate::affine::AffineTransform;
use crate::error::{RasterError, RasterResult};
use crate::tile::{Tile, TileSet};
use crate::util::Shared;

/// The fully-decoded tilemap a host's tmx/tileset loader produces. This is
/// the entire contract between the core and its file-loading callers — the
/// core never reads a file or decodes an image itself, it only consumes
/// this struct.
#[derive(Debug, Clone)]
pub struct Tilemap {
    pub width: u32,
    pub height: u32,
    pub tileset: Shared<TileSet>,
    pub tiles: Vec<Tile>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IVec2 {
    pub x: i32,
    pub y: i32,
}

impl IVec2 {
    pub fn new(x: i32, y: i32) -> IVec2 {
        IVec2 { x, y }
    }
}

#[derive(Debug)]
pub struct Layer {
    width: u32,
    height: u32,
    tile_width: u32,
    tile_height: u32,
    pixel_width: u32,
    pixel_height: u32,
    tiles: Vec<Tile>,
    tileset: Shared<TileSet>,

    origin: IVec2,
    translation: (f64, f64),
    rotation: f64,
    scale: (f64, f64),
    repeat: bool,
    disabled: bool,

    transformed: bool,
    transform: AffineTransform,
    inverse: Option<AffineTransform>,
}

impl Layer {
    /// Consumes a fully-decoded [`Tilemap`], validating it against its own
    /// tileset. Returns `InvalidDimensions` for a non-positive grid or tile
    /// cell size, `InvalidLayer` for a grid/tile-count mismatch or a tile
    /// id outside the atlas.
    pub fn new(tilemap: Tilemap) -> RasterResult<Layer> {
        if tilemap.width == 0 || tilemap.height == 0 {
            let err = RasterError::InvalidDimensions(format!(
                "layer grid must be positive, got {}x{} tiles",
                tilemap.width, tilemap.height
            ));
            warn!("rejecting layer: {}", err);
            return Err(err);
        }

        let expected = (tilemap.width as usize) * (tilemap.height as usize);
        if tilemap.tiles.len() != expected {
            let err = RasterError::InvalidLayer(format!(
                "tile array has {} entries, expected {} for a {}x{} grid",
                tilemap.tiles.len(),
                expected,
                tilemap.width,
                tilemap.height
            ));
            warn!("rejecting layer: {}", err);
            return Err(err);
        }

        let (tile_width, tile_height) = {
            let tileset = tilemap.tileset.borrow();
            (tileset.tile_width(), tileset.tile_height())
        };

        {
            let tileset = tilemap.tileset.borrow();
            for tile in &tilemap.tiles {
                if !tile.nil && !tileset.contains_tile(tile.id) {
                    let err = RasterError::InvalidLayer(format!(
                        "tile id {} addresses outside a {}x{} atlas",
                        tile.id,
                        tileset.columns(),
                        tileset.rows()
                    ));
                    warn!("rejecting layer: {}", err);
                    return Err(err);
                }
            }
        }

        Ok(Layer {
            width: tilemap.width,
            height: tilemap.height,
            tile_width,
            tile_height,
            pixel_width: tilemap.width * tile_width,
            pixel_height: tilemap.height * tile_height,
            tiles: tilemap.tiles,
            tileset: tilemap.tileset,
            origin: IVec2::default(),
            translation: (0.0, 0.0),
            rotation: 0.0,
            scale: (1.0, 1.0),
            repeat: false,
            disabled: false,
            transformed: false,
            transform: AffineTransform::identity(),
            inverse: Some(AffineTransform::identity()),
        })
    }

    fn recompute_transform(&mut self) {
        self.transform = AffineTransform::new(self.translation, self.rotation, self.scale);
        self.inverse = self.transform.inverse();
        self.transformed = self.rotation != 0.0 || self.scale != (1.0, 1.0);
    }

    pub fn set_origin(&mut self, x: i32, y: i32) {
        self.origin = IVec2::new(x, y);
    }

    pub fn set_translation(&mut self, x: f64, y: f64) {
        self.translation = (x, y);
        self.recompute_transform();
    }

    pub fn set_rotation(&mut self, radians: f64) {
        self.rotation = radians;
        self.recompute_transform();
    }

    pub fn set_scale(&mut self, sx: f64, sy: f64) {
        self.scale = (sx, sy);
        self.recompute_transform();
    }

    pub fn set_repeat(&mut self, repeat: bool) {
        self.repeat = repeat;
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn origin(&self) -> IVec2 {
        self.origin
    }

    pub fn repeat(&self) -> bool {
        self.repeat
    }

    pub fn disabled(&self) -> bool {
        self.disabled
    }

    pub fn transformed(&self) -> bool {
        self.transformed
    }

    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    pub fn pixel_width(&self) -> u32 {
        self.pixel_width
    }

    pub fn pixel_height(&self) -> u32 {
        self.pixel_height
    }

    /// The cached inverse transform (texture → screen becomes screen →
    /// texture). `None` when the transform is degenerate, in which case the
    /// affine scanline path draws nothing for this layer.
    pub(crate) fn inverse_transform(&self) -> Option<AffineTransform> {
        self.inverse
    }

    pub(crate) fn tile_at(&self, tile_x: u32, tile_y: u32) -> Tile {
        self.tiles[crate::index2d!(usize, tile_x, tile_y, self.width)]
    }

    pub(crate) fn tileset(&self) -> &Shared<TileSet> {
        &self.tileset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    fn tileset_2x1() -> Shared<TileSet> {
        Shared::new(
            TileSet::new(
                [Rgba::TRANSPARENT, Rgba::new(255, 0, 0, 255)],
                vec![0u8, 1u8],
                2,
                1,
                1,
            )
            .unwrap(),
        )
    }

    fn tilemap(tiles: Vec<Tile>, width: u32, height: u32) -> Tilemap {
        Tilemap {
            width,
            height,
            tileset: tileset_2x1(),
            tiles,
        }
    }

    #[test]
    fn derives_pixel_dimensions_from_tileset() {
        let layer = Layer::new(tilemap(vec![Tile::new(1); 4], 2, 2)).unwrap();
        assert_eq!(layer.pixel_width(), 2);
        assert_eq!(layer.pixel_height(), 2);
        assert!(!layer.transformed());
    }

    #[test]
    fn rejects_tile_count_mismatch() {
        let err = Layer::new(tilemap(vec![Tile::new(1); 3], 2, 2)).unwrap_err();
        assert!(matches!(err, RasterError::InvalidLayer(_)));
    }

    #[test]
    fn rejects_tile_id_outside_atlas() {
        let err = Layer::new(tilemap(vec![Tile::new(5); 1], 1, 1)).unwrap_err();
        assert!(matches!(err, RasterError::InvalidLayer(_)));
    }

    #[test]
    fn nil_tile_ids_are_not_validated() {
        let mut tiles = vec![Tile::new(1); 4];
        tiles[0] = Tile::nil();
        tiles[0].id = 999; // ignored because nil
        assert!(Layer::new(tilemap(tiles, 2, 2)).is_ok());
    }

    #[test]
    fn rotation_and_scale_set_the_transformed_flag() {
        let mut layer = Layer::new(tilemap(vec![Tile::new(1); 4], 2, 2)).unwrap();
        assert!(!layer.transformed());
        layer.set_rotation(0.5);
        assert!(layer.transformed());
        layer.set_rotation(0.0);
        assert!(!layer.transformed());
        layer.set_scale(2.0, 1.0);
        assert!(layer.transformed());
        layer.set_scale(1.0, 1.0);
        assert!(!layer.transformed());
    }
}
