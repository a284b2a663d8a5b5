//! [`Engine`]: drives `draw_frame`, the per-scanline hblank/background/layer
//! composition loop, and dispatches each layer to the plain or affine
//! scanline path.

use crate::color::Rgba;
use crate::error::{RasterError, RasterResult};
use crate::layer::Layer;
use crate::tile::Tile;
use crate::util::Shared;

pub type HBlank = Box<dyn FnMut(u32)>;
pub type Plot = Box<dyn FnMut(u32, u32, u8, u8, u8, u8)>;

/// Euclidean (floored) modulo: always non-negative for a positive modulus,
/// unlike Rust's `%` which carries the dividend's sign.
#[inline]
fn euclid_mod(a: i64, m: i64) -> i64 {
    ((a % m) + m) % m
}

pub struct Engine {
    width: u32,
    height: u32,
    background: Option<Rgba>,
    hblank: Option<HBlank>,
    plot: Option<Plot>,
    layers: Vec<Shared<Layer>>,
}

impl Engine {
    pub fn new(width: u32, height: u32) -> RasterResult<Engine> {
        if width == 0 || height == 0 {
            return Err(RasterError::InvalidDimensions(format!(
                "engine dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        Ok(Engine {
            width,
            height,
            background: None,
            hblank: None,
            plot: None,
            layers: Vec::new(),
        })
    }

    pub fn set_background_color(&mut self, color: Option<Rgba>) {
        self.background = color;
    }

    pub fn set_hblank(&mut self, hblank: Option<HBlank>) {
        self.hblank = hblank;
    }

    pub fn set_plot(&mut self, plot: Plot) {
        self.plot = Some(plot);
    }

    /// Appends at the tail: registration order is composition order, drawn
    /// last (on top), there is no separate z field.
    pub fn add_layer(&mut self, layer: Shared<Layer>) {
        self.layers.push(layer);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Composes one frame, scanline by scanline, into the installed `plot`
    /// sink. Errors with `MissingSink` if no sink was ever installed; the
    /// engine never buffers a frame internally.
    pub fn draw_frame(&mut self) -> RasterResult<()> {
        if self.plot.is_none() {
            return Err(RasterError::MissingSink);
        }
        trace!("draw_frame: {}x{}, {} layers", self.width, self.height, self.layers.len());

        for line in 0..self.height {
            if let Some(hblank) = self.hblank.as_mut() {
                trace!("hblank: line {}", line);
                hblank(line);
            }

            let plot = self.plot.as_mut().expect("checked above");
            if let Some(color) = self.background {
                for x in 0..self.width {
                    plot(x, line, color.r, color.g, color.b, 255);
                }
            }

            for layer_handle in &self.layers {
                let layer = layer_handle.borrow();
                if layer.disabled() {
                    continue;
                }
                let plot = self.plot.as_mut().expect("checked above");
                if layer.transformed() {
                    draw_layer_line_affine(self.width, &layer, line, plot);
                } else {
                    draw_layer_line(self.width, &layer, line, plot);
                }
            }
        }
        Ok(())
    }
}

/// Resolves a tile-space coordinate against one axis's extent: in range as-is,
/// Euclidean-folded if `repeat`, or `None` (caller must skip the pixel) if
/// out of range and not repeating.
#[inline]
fn resolve_axis(coord: i64, extent: u32, repeat: bool) -> Option<i64> {
    let extent = extent as i64;
    if coord < 0 || coord >= extent {
        if !repeat {
            return None;
        }
        Some(euclid_mod(coord, extent))
    } else {
        Some(coord)
    }
}

/// Samples `layer`'s atlas for the tile covering texture position
/// `(x_tex, y_tex)` (already wrapped into range) and, unless the tile is
/// `nil` or its sampled pixel is key-transparent, returns the opaque color
/// to emit.
fn sample(layer: &Layer, x_tex: i64, y_tex: i64) -> Option<Rgba> {
    let tile_width = layer.tile_width();
    let tile_height = layer.tile_height();
    let tile_col = (x_tex as u32) / tile_width;
    let tile_row = (y_tex as u32) / tile_height;
    let tile: Tile = layer.tile_at(tile_col, tile_row);
    if tile.nil {
        return None;
    }

    let tileset = layer.tileset().borrow();
    let columns = tileset.columns();
    let atlas_row = tile.id / columns;
    let atlas_col = tile.id % columns;
    let local_x = (x_tex as u32) % tile_width;
    let local_y = (y_tex as u32) % tile_height;

    let sample_x = if tile.horizontal_flip {
        atlas_col * tile_width + (tile_width - 1 - local_x)
    } else {
        atlas_col * tile_width + local_x
    };
    let sample_y = atlas_row * tile_height + local_y;

    let color = tileset.color_at(sample_x, sample_y);
    if color.is_key_transparent() {
        None
    } else {
        Some(color)
    }
}

fn draw_layer_line(width: u32, layer: &Layer, line: u32, plot: &mut dyn FnMut(u32, u32, u8, u8, u8, u8)) {
    let origin = layer.origin();
    let y_tex = match resolve_axis(origin.y as i64 + line as i64, layer.pixel_height(), layer.repeat()) {
        Some(y) => y,
        None => return,
    };

    for x in 0..width {
        let x_tex = match resolve_axis(origin.x as i64 + x as i64, layer.pixel_width(), layer.repeat()) {
            Some(v) => v,
            None => continue,
        };
        if let Some(color) = sample(layer, x_tex, y_tex) {
            plot(x, line, color.r, color.g, color.b, 255);
        }
    }
}

fn draw_layer_line_affine(
    width: u32,
    layer: &Layer,
    line: u32,
    plot: &mut dyn FnMut(u32, u32, u8, u8, u8, u8),
) {
    let inverse = match layer.inverse_transform() {
        Some(inv) => inv,
        None => return,
    };
    let origin = layer.origin();
    let y_screen = origin.y as f64 + line as f64;

    let (lx, ly) = inverse.apply((origin.x as f64 + 0.0, y_screen));
    let (rx, ry) = inverse.apply((origin.x as f64 + width as f64, y_screen));

    let dx = (rx - lx) / width as f64;
    let dy = (ry - ly) / width as f64;

    let (mut u, mut v) = (lx, ly);
    for x in 0..width {
        let ut = u.trunc() as i64;
        let vt = v.trunc() as i64;
        u += dx;
        v += dy;

        let x_tex = match resolve_axis(ut, layer.pixel_width(), layer.repeat()) {
            Some(v) => v,
            None => continue,
        };
        let y_tex = match resolve_axis(vt, layer.pixel_height(), layer.repeat()) {
            Some(v) => v,
            None => continue,
        };

        if let Some(color) = sample(layer, x_tex, y_tex) {
            plot(x, line, color.r, color.g, color.b, 255);
        }
    }
}
