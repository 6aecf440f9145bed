//! End-to-end scenarios against a full eight-biome catalog (plains, desert,
//! forest, mountain, ocean, taiga, swamp, savanna), seed 12345.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use biome_core::{BlockId, GeneratorConfig, WorldGenerator, WorldWriter};
use hashbrown::HashSet;

struct TempDir(PathBuf);

impl TempDir {
    fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

fn tempdir(label: &str) -> TempDir {
    let mut path = std::env::temp_dir();
    let unique = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    path.push(format!("biome_core_scenarios_{label}_{unique}"));
    fs::create_dir_all(&path).unwrap();
    TempDir(path)
}

fn write_biome(dir: &Path, file_name: &str, contents: &str) {
    let mut f = fs::File::create(dir.join(file_name)).unwrap();
    f.write_all(contents.as_bytes()).unwrap();
}

fn eight_biome_catalog_dir() -> TempDir {
    let tmp = tempdir("eight");
    let dir = tmp.path();

    write_biome(
        dir,
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
        dir,
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
        dir,
        "forest.toml",
        r#"
        name = "Forest"
        temperature = 50
        moisture = 70
        age = 55
        activity = 35
        temperature_min = 35
        temperature_max = 65
        moisture_min = 55
        moisture_max = 85
        rarity_weight = 65
        falloff_type = "gaussian"
        search_radius = 26
        tree_density = 75
        "#,
    );
    write_biome(
        dir,
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
        dir,
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
        spawn_location = "above_ground"
        falloff_type = "cosine"
        search_radius = 50
        base_height_offset = -20
        "#,
    );
    write_biome(
        dir,
        "taiga.toml",
        r#"
        name = "Taiga"
        temperature = 20
        moisture = 58
        age = 65
        activity = 25
        temperature_min = 5
        temperature_max = 35
        moisture_min = 40
        moisture_max = 75
        rarity_weight = 35
        falloff_type = "very_smooth"
        search_radius = 30
        "#,
    );
    write_biome(
        dir,
        "swamp.toml",
        r#"
        name = "Swamp"
        temperature = 60
        moisture = 88
        age = 40
        activity = 45
        temperature_min = 45
        temperature_max = 75
        moisture_min = 75
        moisture_max = 100
        rarity_weight = 25
        falloff_type = "inverse_square"
        search_radius = 22
        base_height_offset = -4
        "#,
    );
    write_biome(
        dir,
        "savanna.toml",
        r#"
        name = "Savanna"
        temperature = 75
        moisture = 27
        age = 50
        activity = 50
        temperature_min = 60
        temperature_max = 90
        moisture_min = 15
        moisture_max = 40
        rarity_weight = 40
        falloff_type = "sigmoid"
        search_radius = 27
        "#,
    );

    tmp
}

fn init(seed: i32, dir: &Path) -> WorldGenerator {
    WorldGenerator::init(GeneratorConfig::new(seed), dir).expect("catalog should load")
}

#[test]
fn all_eight_biomes_load_and_get_tree_templates() {
    let dir = eight_biome_catalog_dir();
    let world = init(12345, dir.path());
    assert_eq!(world.catalog().count(), 8);

    for name in [
        "plains", "desert", "forest", "mountain", "ocean", "taiga", "swamp", "savanna",
    ] {
        let biome = world.catalog().get_by_name(name).unwrap_or_else(|| panic!("missing {name}"));
        assert!(!biome.tree_templates.is_empty(), "{name} should have tree templates");
    }
}

#[test]
fn same_seed_is_fully_deterministic_across_instances() {
    let dir = eight_biome_catalog_dir();
    let a = init(12345, dir.path());
    let b = init(12345, dir.path());

    for i in 0..64 {
        let x = (i as f64) * 61.5 - 1000.0;
        let z = (i as f64) * -37.25 + 500.0;

        assert_eq!(a.temperature_at(x, z), b.temperature_at(x, z));
        assert_eq!(a.moisture_at(x, z), b.moisture_at(x, z));
        assert_eq!(a.height_at(x, z), b.height_at(x, z));
        assert_eq!(a.biome_at(x, z).name, b.biome_at(x, z).name);
        assert_eq!(a.cave_density_at(x, 20.0, z), b.cave_density_at(x, 20.0, z));

        let ia = a.influences_at(x, z);
        let ib = b.influences_at(x, z);
        assert_eq!(ia.len(), ib.len());
        for (wa, wb) in ia.iter().zip(ib.iter()) {
            assert_eq!(wa.biome.name, wb.biome.name);
            assert_eq!(wa.weight, wb.weight);
        }
    }
}

#[test]
fn different_seeds_diverge_somewhere_in_a_wide_sample() {
    let dir = eight_biome_catalog_dir();
    let a = init(12345, dir.path());
    let b = init(54321, dir.path());

    let mut any_difference = false;
    for i in 0..128 {
        let x = (i as f64) * 113.0;
        let z = (i as f64) * 91.0;
        if a.height_at(x, z) != b.height_at(x, z) || a.biome_at(x, z).name != b.biome_at(x, z).name {
            any_difference = true;
            break;
        }
    }
    assert!(any_difference, "two different seeds should not produce an identical sampled field");
}

#[test]
fn climate_scalars_always_stay_in_documented_range() {
    let dir = eight_biome_catalog_dir();
    let world = init(999, dir.path());

    for i in 0..200 {
        let x = (i as f64) * 271.0 - 20000.0;
        let z = (i as f64) * -199.0 + 15000.0;
        let t = world.temperature_at(x, z);
        let m = world.moisture_at(x, z);
        assert!((0.0..=100.0).contains(&t), "temperature {t} out of range at ({x},{z})");
        assert!((0.0..=100.0).contains(&m), "moisture {m} out of range at ({x},{z})");
    }
}

#[test]
fn biome_influence_weights_are_normalized_everywhere() {
    let dir = eight_biome_catalog_dir();
    let world = init(2024, dir.path());

    for i in 0..100 {
        let x = (i as f64) * 47.0;
        let z = (i as f64) * -83.0;
        let influences = world.influences_at(x, z);
        assert!(!influences.is_empty());
        let sum: f64 = influences.iter().map(|inf| inf.weight).sum();
        assert!((sum - 1.0).abs() < 1e-6, "weights summed to {sum} at ({x}, {z})");
        for inf in influences.iter() {
            assert!(inf.weight >= 0.0 && inf.weight <= 1.0);
        }
    }
}

#[test]
fn blending_actually_mixes_more_than_one_biome_somewhere() {
    // A dense scan crossing many Voronoi cell boundaries should find at least
    // one query point where more than one center's falloff clears its search
    // radius, i.e. real multi-biome blending rather than a hard cutover.
    let dir = eight_biome_catalog_dir();
    let world = init(13, dir.path());

    let mut max_size = 0;
    for i in 0..400 {
        let x = (i as f64) * 23.0 - 4000.0;
        let z = (i as f64) * 17.0 - 2000.0;
        let influences = world.influences_at(x, z);
        max_size = max_size.max(influences.len());
        if max_size > 1 {
            break;
        }
    }
    assert!(max_size > 1, "expected at least one position blending more than one biome");
}

#[test]
fn underwater_ocean_biome_carries_its_flag_and_covers_the_wettest_band() {
    let dir = eight_biome_catalog_dir();
    let world = init(77, dir.path());
    let ocean = world.catalog().get_by_name("ocean").unwrap();
    assert!(ocean.flags.contains(biome_core::biome::BiomeFlags::UNDERWATER_BIOME));
    assert!(ocean.contains_climate(50.0, 90.0));
}

#[test]
fn cave_density_and_height_stay_in_documented_bounds() {
    let dir = eight_biome_catalog_dir();
    let world = init(31415, dir.path());

    for i in 0..80 {
        let x = (i as f64) * 19.0;
        let z = (i as f64) * -23.0;
        let h = world.height_at(x, z);
        assert!(h > -512 && h < 512, "height {h} implausible at ({x},{z})");

        for y in [-40.0, 0.0, 40.0, 80.0, 120.0] {
            let density = world.cave_density_at(x, y, z);
            assert!((0.0..=1.0).contains(&density), "cave density {density} out of range");
        }
    }
}

#[test]
fn flooding_only_occurs_below_the_local_water_table() {
    let dir = eight_biome_catalog_dir();
    let world = init(2718, dir.path());

    for i in 0..50 {
        let x = (i as f64) * 17.0;
        let z = (i as f64) * -29.0;
        assert!(!world.is_flooded_at(x, 200, z), "should never flood far above sea level");
    }
}

#[test]
fn repeated_queries_at_the_same_point_are_idempotent_through_the_cache() {
    let dir = eight_biome_catalog_dir();
    let world = init(42, dir.path());

    let first = world.height_at(12345.0, -6789.0);
    for _ in 0..10 {
        assert_eq!(world.height_at(12345.0, -6789.0), first);
    }
}

struct FakeWorld {
    occupied: HashSet<(i32, i32, i32)>,
    written: Vec<(i32, i32, i32, BlockId)>,
}

impl FakeWorld {
    fn new() -> Self {
        Self {
            occupied: HashSet::new(),
            written: Vec::new(),
        }
    }
}

impl WorldWriter for FakeWorld {
    fn is_air_or_grass(&self, x: i32, y: i32, z: i32) -> bool {
        !self.occupied.contains(&(x, y, z))
    }

    fn set_block(&mut self, x: i32, y: i32, z: i32, block: BlockId) {
        self.written.push((x, y, z, block));
    }
}

#[test]
fn placing_a_tree_writes_a_nonempty_atomic_batch_translated_to_origin() {
    let dir = eight_biome_catalog_dir();
    let world = init(5, dir.path());
    let mut fake = FakeWorld::new();

    let placed = world
        .place_tree("forest", 0, &mut fake, 1000, 64, -500)
        .expect("forest should have templates");
    assert!(placed);
    assert!(!fake.written.is_empty());
    assert!(fake.written.iter().any(|(x, _, z, _)| *x == 1000 && *z == -500));
}

#[test]
fn placing_a_tree_writes_nothing_when_the_site_is_occupied() {
    let dir = eight_biome_catalog_dir();
    let world = init(5, dir.path());
    let mut fake = FakeWorld::new();
    fake.occupied.insert((1000, 64, -500));

    let placed = world
        .place_tree("forest", 0, &mut fake, 1000, 64, -500)
        .expect("forest should have templates");
    assert!(!placed);
    assert!(fake.written.is_empty());
}
