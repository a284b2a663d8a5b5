use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use scanraster::{Engine, Rgba, Shared, Tile, Tilemap, TileSet};

const WIDTH: u32 = 240;
const HEIGHT: u32 = 160;
const TILE_SIZE: u32 = 8;

fn checkerboard_tileset() -> Shared<TileSet> {
    let palette = [
        Rgba::new(24, 24, 24, 255),
        Rgba::new(200, 200, 200, 255),
        Rgba::new(255, 64, 64, 255),
    ];
    let pixels = vec![0u8; (TILE_SIZE * TILE_SIZE * 3) as usize];
    Shared::new(TileSet::new(palette, pixels, 3, TILE_SIZE, TILE_SIZE).unwrap())
}

fn create_engine() -> Engine {
    let mut engine = Engine::new(WIDTH, HEIGHT).unwrap();
    engine.set_background_color(Some(Rgba::BLACK));
    engine.set_plot(Box::new(|_x, _y, _r, _g, _b, _a| {}));

    let plain_width = WIDTH / TILE_SIZE + 2;
    let plain_height = HEIGHT / TILE_SIZE + 2;
    let plain_tiles: Vec<Tile> = (0..plain_width * plain_height)
        .map(|i| Tile::new(i % 2))
        .collect();
    let plain = Shared::new(
        scanraster::Layer::new(Tilemap {
            width: plain_width,
            height: plain_height,
            tileset: checkerboard_tileset(),
            tiles: plain_tiles,
        })
        .unwrap(),
    );
    plain.borrow_mut().set_repeat(true);
    engine.add_layer(plain);

    let affine_width = 32;
    let affine_height = 32;
    let affine_tiles: Vec<Tile> = (0..affine_width * affine_height).map(|_| Tile::new(2)).collect();
    let affine = Shared::new(
        scanraster::Layer::new(Tilemap {
            width: affine_width,
            height: affine_height,
            tileset: checkerboard_tileset(),
            tiles: affine_tiles,
        })
        .unwrap(),
    );
    affine.borrow_mut().set_repeat(true);
    affine.borrow_mut().set_translation(WIDTH as f64 / 2.0, HEIGHT as f64);
    affine.borrow_mut().set_rotation(0.1);
    affine.borrow_mut().set_scale(1.5, 1.5);
    engine.add_layer(affine);

    engine
}

pub fn raster_benchmark(c: &mut Criterion) {
    c.bench_function("draw_60_frames", |b| {
        b.iter_batched(
            create_engine,
            |mut engine| {
                for _ in 0..60 {
                    black_box(engine.draw_frame().unwrap());
                }
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = raster_benchmark
}
criterion_main!(benches);
