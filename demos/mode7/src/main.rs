//! Synthetic mode-7-style perspective demo: a single affine-transformed
//! track layer, its scale lerped per scanline to fake a ground-plane
//! horizon, its rotation and origin animated frame over frame to fake a
//! vehicle driving around the track. Frames are written out as PPM images;
//! there is no windowing here, that's left to a host application.

use std::cell::RefCell;
use std::env;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::rc::Rc;

use scanraster::{Engine, Layer, Rgba, Shared, Tile, Tilemap, TileSet};

const SCREEN_WIDTH: u32 = 256;
const SCREEN_HEIGHT: u32 = 224;
const TILE_SIZE: u32 = 16;
const TRACK_TILES: u32 = 16;
const FRAME_COUNT: u32 = 8;

fn lerp(x2: f64, x1: f64, x3: f64, y1: f64, y3: f64) -> f64 {
    (x2 - x1) * (y3 - y1) / (x3 - x1) + y1
}

/// Builds a synthetic checkered "track" tileset: two alternating tile
/// colors standing in for a loaded tmx rainbow-road tileset.
fn track_tileset() -> Shared<TileSet> {
    let palette = [Rgba::new(200, 30, 30, 255), Rgba::new(230, 230, 230, 255)];
    let pixels = vec![0u8; (TILE_SIZE * TILE_SIZE) as usize];
    Shared::new(TileSet::new(palette, pixels, 1, TILE_SIZE, TILE_SIZE).unwrap())
}

fn track_layer() -> Shared<Layer> {
    let tiles: Vec<Tile> = (0..TRACK_TILES * TRACK_TILES)
        .map(|i| {
            let x = i % TRACK_TILES;
            let y = i / TRACK_TILES;
            Tile::new((x + y) % 2)
        })
        .collect();
    let layer = Layer::new(Tilemap {
        width: TRACK_TILES,
        height: TRACK_TILES,
        tileset: track_tileset(),
        tiles,
    })
    .unwrap();
    Shared::new(layer)
}

fn write_ppm(path: &Path, width: u32, height: u32, pixels: &[u8]) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "P6\n{} {}\n255", width, height)?;
    out.write_all(pixels)?;
    Ok(())
}

fn main() {
    let verbose = env::args().any(|a| a == "--verbose");
    flexi_logger::Logger::try_with_str(if verbose { "trace" } else { "info" })
        .expect("logger spec is a constant")
        .start()
        .expect("only one logger is started per process");

    let out_dir = Path::new("target/mode7-frames");
    fs::create_dir_all(out_dir).expect("could not create demo output directory");

    let mut engine = Engine::new(SCREEN_WIDTH, SCREEN_HEIGHT).unwrap();
    engine.set_background_color(Some(Rgba::BLACK));

    let track = track_layer();
    track.borrow_mut().set_translation(SCREEN_WIDTH as f64 / 2.0, SCREEN_HEIGHT as f64);

    let track_hblank = track.clone();
    let mut theta = std::f64::consts::PI;
    let ratio = 4.0;
    engine.set_hblank(Some(Box::new(move |line: u32| {
        let scale = lerp(line as f64, 0.0, SCREEN_HEIGHT as f64, 0.2, 5.0);
        track_hblank.borrow_mut().set_scale(scale * ratio, scale * ratio);
    })));

    engine.add_layer(track.clone());

    let frame = Rc::new(RefCell::new(vec![
        0u8;
        (SCREEN_WIDTH * SCREEN_HEIGHT * 3) as usize
    ]));
    let frame_sink = frame.clone();
    engine.set_plot(Box::new(move |x, y, r, g, b, _a| {
        let offset = ((y * SCREEN_WIDTH + x) * 3) as usize;
        let mut buf = frame_sink.borrow_mut();
        buf[offset] = r;
        buf[offset + 1] = g;
        buf[offset + 2] = b;
    }));

    for frame_index in 0..FRAME_COUNT {
        theta += 0.08;
        let x = -theta.sin() * 48.0;
        let y = theta.cos() * 48.0;
        track.borrow_mut().set_origin(x as i32, y as i32);
        track.borrow_mut().set_rotation(theta);

        engine.draw_frame().unwrap();

        let path = out_dir.join(format!("frame_{:04}.ppm", frame_index));
        write_ppm(&path, SCREEN_WIDTH, SCREEN_HEIGHT, &frame.borrow()).expect("failed to write frame");
        log::trace!("wrote {}", path.display());
    }

    println!("wrote {} frames to {}", FRAME_COUNT, out_dir.display());
}
