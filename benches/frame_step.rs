//! Benchmarks for the CPU side of a frame.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use ember::{
    ColorMod, Colorizer, FrameLoop, ParticleSystem, RenderError, Renderer, Settings, SpriteRect,
    Sprites, TextureHandle,
};

/// Renderer that only counts sprites, so the bench measures the loop itself.
#[derive(Default)]
struct CountingRenderer {
    sprites: usize,
}

impl Renderer for CountingRenderer {
    fn clear(&mut self) {
        self.sprites = 0;
    }

    fn draw_sprite(&mut self, _texture: TextureHandle, _dest: SpriteRect, _color: ColorMod) {
        self.sprites += 1;
    }

    fn present(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}

fn sprites() -> Sprites {
    Sprites {
        particle: TextureHandle::from_raw(0),
        glow: TextureHandle::from_raw(1),
    }
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");

    for count in [1_000usize, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let settings = Settings::default().with_particle_count(count);
            let mut frame_loop =
                FrameLoop::new(&settings, ParticleSystem::with_seed(&settings, 42), sprites());
            b.iter(|| frame_loop.update(black_box(16)))
        });
    }

    group.finish();
}

fn bench_draw(c: &mut Criterion) {
    let settings = Settings::default();
    let mut frame_loop = FrameLoop::new(&settings, ParticleSystem::with_seed(&settings, 42), sprites());
    // Spread the pool out before measuring.
    for _ in 0..60 {
        frame_loop.update(16);
    }
    let mut renderer = CountingRenderer::default();

    c.bench_function("draw_1000", |b| {
        b.iter(|| {
            renderer.clear();
            frame_loop.draw(&mut renderer);
            black_box(renderer.sprites)
        })
    });
}

fn bench_colorize(c: &mut Criterion) {
    let colorizer = Colorizer::new(1000, 16.0);
    c.bench_function("shade_full_life_range", |b| {
        b.iter(|| {
            for life in 0..1500 {
                black_box(colorizer.shade(black_box(life)));
            }
        })
    });
}

criterion_group!(benches, bench_update, bench_draw, bench_colorize);
criterion_main!(benches);
