//! Benchmarks for the three per-voxel hot paths: cave density, biome
//! influence blending, and terrain height.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use biome_core::{GeneratorConfig, WorldGenerator};

struct TempDir(PathBuf);

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

fn write_biome(dir: &Path, file_name: &str, contents: &str) {
    let mut f = fs::File::create(dir.join(file_name)).unwrap();
    f.write_all(contents.as_bytes()).unwrap();
}

fn sample_world() -> (TempDir, WorldGenerator) {
    let mut path = std::env::temp_dir();
    let unique = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    path.push(format!("biome_core_bench_{unique}"));
    fs::create_dir_all(&path).unwrap();
    let tmp = TempDir(path);

    write_biome(
        &tmp.0,
        "plains.toml",
        r#"
        name = "Plains"
        temperature = 55
        moisture = 45
        age = 60
        activity = 30
        temperature_min = 40
        temperature_max = 70
        moisture_min = 30
        moisture_max = 60
        rarity_weight = 80
        falloff_type = "smootherstep"
        search_radius = 28
        "#,
    );
    write_biome(
        &tmp.0,
        "desert.toml",
        r#"
        name = "Desert"
        temperature = 85
        moisture = 8
        age = 70
        activity = 20
        temperature_min = 75
        temperature_max = 100
        moisture_min = 0
        moisture_max = 15
        rarity_weight = 45
        falloff_type = "polynomial_3"
        search_radius = 24
        "#,
    );
    write_biome(
        &tmp.0,
        "mountain.toml",
        r#"
        name = "Mountain"
        temperature = 15
        moisture = 30
        age = 20
        activity = 80
        temperature_min = 0
        temperature_max = 40
        moisture_min = 10
        moisture_max = 55
        rarity_weight = 30
        falloff_type = "sharp"
        search_radius = 32
        height_multiplier = 2.0
        "#,
    );
    write_biome(
        &tmp.0,
        "ocean.toml",
        r#"
        name = "Ocean"
        temperature = 50
        moisture = 92
        age = 90
        activity = 10
        temperature_min = 0
        temperature_max = 100
        moisture_min = 85
        moisture_max = 100
        rarity_weight = 70
        underwater_biome = true
        falloff_type = "cosine"
        search_radius = 50
        base_height_offset = -20
        "#,
    );

    let world = WorldGenerator::init(GeneratorConfig::new(12345), &tmp.0).unwrap();
    (tmp, world)
}

fn bench_height_at(c: &mut Criterion) {
    let (_tmp, world) = sample_world();
    let mut x = 0.0_f64;
    c.bench_function("height_at", |b| {
        b.iter(|| {
            x += 1.0;
            black_box(world.height_at(black_box(x), black_box(x * 0.37)))
        })
    });
}

fn bench_influences_at(c: &mut Criterion) {
    let (_tmp, world) = sample_world();
    let mut x = 0.0_f64;
    c.bench_function("influences_at", |b| {
        b.iter(|| {
            x += 1.0;
            black_box(world.influences_at(black_box(x), black_box(x * 0.61)))
        })
    });
}

fn bench_cave_density_at(c: &mut Criterion) {
    let (_tmp, world) = sample_world();
    let mut x = 0.0_f64;
    c.bench_function("cave_density_at", |b| {
        b.iter(|| {
            x += 1.0;
            black_box(world.cave_density_at(black_box(x), black_box(10.0), black_box(x * 0.83)))
        })
    });
}

criterion_group!(benches, bench_height_at, bench_influences_at, bench_cave_density_at);
criterion_main!(benches);
