//! Synthetic curved-horizon parallax demo: two plain-scrolling layers (a
//! foreground "overworld" and a background "clouds" layer), each given a
//! precomputed per-scanline horizontal offset via `hblank` to fake the
//! pseudo-3D horizon curvature of an SNES-style road/terrain effect, with
//! the camera auto-scrolling frame over frame. Frames are written out as
//! PPM images; there is no windowing here, that's left to a host
//! application.

use std::cell::RefCell;
use std::env;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::rc::Rc;

use scanraster::{Engine, Layer, Rgba, Shared, Tile, Tilemap, TileSet};

const SCREEN_WIDTH: u32 = 256;
const SCREEN_HEIGHT: u32 = 240;
const TILE_SIZE: u32 = 16;
const FRAME_COUNT: u32 = 8;

fn lerp(x2: i32, x1: i32, x3: i32, y1: f64, y3: f64) -> f64 {
    ((x2 - x1) as f64 * (y3 - y1)) / (x3 - x1) as f64 + y1
}

fn overworld_tileset() -> Shared<TileSet> {
    let palette = [
        Rgba::new(34, 120, 40, 255),
        Rgba::new(60, 150, 70, 255),
        Rgba::new(90, 70, 30, 255),
    ];
    let pixels = vec![0u8; (TILE_SIZE * TILE_SIZE) as usize];
    Shared::new(TileSet::new(palette, pixels, 1, TILE_SIZE, TILE_SIZE).unwrap())
}

fn clouds_tileset() -> Shared<TileSet> {
    let palette = [Rgba::TRANSPARENT, Rgba::new(240, 240, 250, 255)];
    let pixels = vec![0u8; (TILE_SIZE * TILE_SIZE) as usize];
    Shared::new(TileSet::new(palette, pixels, 1, TILE_SIZE, TILE_SIZE).unwrap())
}

fn checkered_layer(tileset: Shared<TileSet>, tiles_wide: u32, tiles_tall: u32) -> Shared<Layer> {
    let tiles: Vec<Tile> = (0..tiles_wide * tiles_tall)
        .map(|i| {
            let x = i % tiles_wide;
            let y = i / tiles_wide;
            Tile::new((x + y) % 2)
        })
        .collect();
    Shared::new(
        Layer::new(Tilemap {
            width: tiles_wide,
            height: tiles_tall,
            tileset,
            tiles,
        })
        .unwrap(),
    )
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

    let out_dir = Path::new("target/curvature-frames");
    fs::create_dir_all(out_dir).expect("could not create demo output directory");

    let offsets: Vec<f64> = (0..SCREEN_HEIGHT)
        .map(|n| {
            let degrees = lerp(n as i32, 0, SCREEN_HEIGHT as i32, 105.0, 180.0);
            (degrees * std::f64::consts::PI / 180.0).tan()
        })
        .collect();

    let mut engine = Engine::new(SCREEN_WIDTH, SCREEN_HEIGHT).unwrap();
    engine.set_background_color(Some(Rgba::BLACK));

    let overworld = checkered_layer(overworld_tileset(), 64, 64);
    engine.add_layer(overworld.clone());

    let clouds = checkered_layer(clouds_tileset(), 32, 32);
    clouds.borrow_mut().set_repeat(true);
    engine.add_layer(clouds.clone());

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

    let overworld_hblank = overworld.clone();
    let clouds_hblank = clouds.clone();
    let mut camera_x = 0i32;
    let mut camera_y = 0i32;
    engine.set_hblank(Some(Box::new(move |line: u32| {
        let offset = offsets[line as usize];
        clouds_hblank.borrow_mut().set_origin(
            -camera_x << 1,
            camera_y * 4 + (offset * 64.0) as i32 - line as i32,
        );
        overworld_hblank.borrow_mut().set_origin(
            camera_x << 2,
            camera_y * 4 + (offset * -16.0) as i32 - line as i32,
        );
    })));

    for frame_index in 0..FRAME_COUNT {
        camera_y -= 1; // auto-scroll
        if frame_index % 3 == 0 {
            camera_x += 1;
        }

        engine.draw_frame().unwrap();

        let path = out_dir.join(format!("frame_{:04}.ppm", frame_index));
        write_ppm(&path, SCREEN_WIDTH, SCREEN_HEIGHT, &frame.borrow()).expect("failed to write frame");
        log::trace!("wrote {}", path.display());
    }

    println!("wrote {} frames to {}", FRAME_COUNT, out_dir.display());
}
