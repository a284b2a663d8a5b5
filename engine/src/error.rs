//! Construction- and draw-time error taxonomy.
//!
//! One crate-wide error enum with a hand-written `Display` impl rather than
//! pulling in `thiserror`: the taxonomy here is small and closed (three
//! kinds), so the derive machinery would buy nothing.

use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    /// A tilemap's declared grid doesn't match its tile array, or a
    /// non-nil tile addresses outside its tileset's atlas.
    InvalidLayer(String),
    /// `draw_frame` was called before `set_plot` installed a sink.
    MissingSink,
    /// An engine, layer, or tileset dimension was zero or negative, or a
    /// tileset's pixel buffer length isn't a multiple of one atlas row.
    InvalidDimensions(String),
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RasterError::InvalidLayer(msg) => write!(f, "invalid layer: {}", msg),
            RasterError::MissingSink => {
                write!(f, "draw_frame called without a plot sink configured")
            }
            RasterError::InvalidDimensions(msg) => write!(f, "invalid dimensions: {}", msg),
        }
    }
}

impl Error for RasterError {}

pub type RasterResult<T> = Result<T, RasterError>;
