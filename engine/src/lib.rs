#[macro_use]
extern crate log;

mod affine;
mod color;
mod engine;
mod error;
mod layer;
mod tile;
#[macro_use]
mod util;

pub use affine::AffineTransform;
pub use color::Rgba;
pub use engine::{Engine, HBlank, Plot};
pub use error::{RasterError, RasterResult};
pub use layer::{IVec2, Layer, Tilemap};
pub use tile::{Tile, TileSet};
pub use util::Shared;

pub mod prelude {
    pub use super::{
        AffineTransform, Engine, IVec2, Layer, RasterError, RasterResult, Rgba, Shared, Tile,
        Tilemap, TileSet,
    };
}
