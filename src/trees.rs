//! Tree template catalog (C10, §4.10): generates a small fixed set of seeded
//! procedural tree shapes per biome at startup, and places a chosen template
//! at a world position as a single atomic batch of block writes.

use parking_lot::Mutex;
use rand::Rng;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

use crate::biome::catalog::BiomeCatalog;
use crate::biome::glam_like::IVec3;
use crate::biome::{BiomeFlags, BlockId, TreeSize, TreeTemplate};

/// How many templates of each size are generated per biome.
const TEMPLATES_PER_SIZE: usize = 10;

/// A collaborator's voxel world, queried and written to while placing a tree.
/// This crate never stores block state itself (§3 supplement) — it only
/// decides what a tree's blocks should be and where, and leaves the actual
/// world representation to the engine embedding it.
pub trait WorldWriter {
    /// Whether the voxel at this position is free for a tree to occupy
    /// (typically air or the biome's own grass/surface block).
    fn is_air_or_grass(&self, x: i32, y: i32, z: i32) -> bool;

    fn set_block(&mut self, x: i32, y: i32, z: i32, block: BlockId);
}

/// Generates tree templates for every biome that allows trees, and places
/// them atomically at query time. Holds the only mutable, shared state in the
/// crate: a single seeded RNG behind a `Mutex`, used exclusively during the
/// startup-phase template generation (§5) — never on the per-voxel hot path.
pub struct TreeGenerator {
    rng: Mutex<Xoshiro256StarStar>,
}

impl TreeGenerator {
    pub fn new(seed: i32, tree_rng_offset: i32) -> Self {
        let combined = (seed as i64).wrapping_add(tree_rng_offset as i64) as u64;
        Self {
            rng: Mutex::new(Xoshiro256StarStar::seed_from_u64(combined)),
        }
    }

    /// Populates `tree_templates` for every biome with `BiomeFlags::TREES_SPAWN`
    /// set. Intended to run once, after the catalog loads and before any world
    /// queries begin.
    pub fn generate_tree_templates(&self, catalog: &mut BiomeCatalog) {
        for biome in catalog.all_mut() {
            if !biome.flags.contains(BiomeFlags::TREES_SPAWN) {
                continue;
            }

            let log = biome.primary_log_block;
            let leaf = biome.primary_leaf_block;
            let mut templates = smallvec::SmallVec::new();
            for &size in &[TreeSize::Small, TreeSize::Medium, TreeSize::Large] {
                for _ in 0..TEMPLATES_PER_SIZE {
                    templates.push(self.generate_one(size, log, leaf));
                }
            }
            biome.tree_templates = templates;
        }
    }

    fn generate_one(&self, size: TreeSize, log: BlockId, leaf: BlockId) -> TreeTemplate {
        let mut rng = self.rng.lock();

        let (trunk_height, canopy_radius, branch_levels) = match size {
            TreeSize::Small => (rng.gen_range(3..=4), 2, 0),
            TreeSize::Medium => (rng.gen_range(5..=7), 2, 1),
            TreeSize::Large => (rng.gen_range(8..=12), 3, 2),
        };

        let mut blocks = Vec::new();

        for y in 0..trunk_height {
            blocks.push((IVec3::new(0, y, 0), log));
        }

        add_canopy(&mut blocks, &mut rng, 0, trunk_height - 1, 0, canopy_radius, leaf);

        for level in 0..branch_levels {
            let branch_y = trunk_height - 2 - level;
            if branch_y < 1 {
                continue;
            }
            for &(dx, dz) in &[(1, 0), (-1, 0), (0, 1), (0, -1)] {
                if !rng.gen_bool(0.6) {
                    continue;
                }
                let branch_len = rng.gen_range(1..=2);
                for step in 1..=branch_len {
                    blocks.push((IVec3::new(dx * step, branch_y, dz * step), log));
                }
                add_canopy(
                    &mut blocks,
                    &mut rng,
                    dx * branch_len,
                    branch_y,
                    dz * branch_len,
                    canopy_radius - 1,
                    leaf,
                );
            }
        }

        TreeTemplate { size, blocks }
    }

    /// Places a pre-generated template at `origin` against a collaborator's
    /// world, atomically (§4.10, §8 "tree placement atomicity"): every target
    /// voxel is checked via [`WorldWriter::is_air_or_grass`] first, and only
    /// if *all* of them pass are any blocks written. Returns `false` (writing
    /// nothing) if the site doesn't have room.
    pub fn place_tree(
        template: &TreeTemplate,
        world: &mut impl WorldWriter,
        origin_x: i32,
        origin_y: i32,
        origin_z: i32,
    ) -> bool {
        let fits = template.blocks.iter().all(|(offset, _)| {
            world.is_air_or_grass(origin_x + offset.x, origin_y + offset.y, origin_z + offset.z)
        });
        if !fits {
            return false;
        }

        for (offset, block) in &template.blocks {
            world.set_block(origin_x + offset.x, origin_y + offset.y, origin_z + offset.z, *block);
        }
        true
    }
}

fn add_canopy(
    blocks: &mut Vec<(IVec3, BlockId)>,
    rng: &mut Xoshiro256StarStar,
    cx: i32,
    cy: i32,
    cz: i32,
    radius: i32,
    leaf: BlockId,
) {
    let r2 = (radius * radius) as f64;
    for dy in 0..=radius {
        for dx in -radius..=radius {
            for dz in -radius..=radius {
                let dist2 = (dx * dx + dy * dy + dz * dz) as f64;
                if dist2 > r2 {
                    continue;
                }
                if !rng.gen_bool(0.8) {
                    continue;
                }
                blocks.push((IVec3::new(cx + dx, cy + dy, cz + dz), leaf));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashSet;

    /// An in-memory test double: air everywhere except a fixed set of
    /// pre-occupied voxels, recording every block it's told to set.
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

        fn occupy(&mut self, x: i32, y: i32, z: i32) {
            self.occupied.insert((x, y, z));
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
    fn deterministic_for_same_seed() {
        let a = TreeGenerator::new(1, 9999);
        let b = TreeGenerator::new(1, 9999);
        let ta = a.generate_one(TreeSize::Medium, BlockId::new(6), BlockId::new(7));
        let tb = b.generate_one(TreeSize::Medium, BlockId::new(6), BlockId::new(7));
        assert_eq!(ta.blocks, tb.blocks);
    }

    #[test]
    fn every_template_includes_a_trunk_at_the_origin_column() {
        let gen = TreeGenerator::new(7, 9999);
        let template = gen.generate_one(TreeSize::Large, BlockId::new(6), BlockId::new(7));
        assert!(template
            .blocks
            .iter()
            .any(|(pos, block)| pos.x == 0 && pos.z == 0 && pos.y == 0 && *block == BlockId::new(6)));
    }

    #[test]
    fn place_tree_writes_every_offset_translated_by_the_origin_when_clear() {
        let gen = TreeGenerator::new(7, 9999);
        let template = gen.generate_one(TreeSize::Small, BlockId::new(6), BlockId::new(7));
        let mut world = FakeWorld::new();

        let placed = TreeGenerator::place_tree(&template, &mut world, 100, 64, -200);
        assert!(placed);
        assert_eq!(world.written.len(), template.blocks.len());
        for (offset, _) in &template.blocks {
            let expected = (100 + offset.x, 64 + offset.y, -200 + offset.z);
            assert!(world.written.iter().any(|(x, y, z, _)| (*x, *y, *z) == expected));
        }
    }

    #[test]
    fn place_tree_writes_nothing_when_any_target_voxel_is_occupied() {
        let gen = TreeGenerator::new(7, 9999);
        let template = gen.generate_one(TreeSize::Large, BlockId::new(6), BlockId::new(7));
        let mut world = FakeWorld::new();
        // Block the trunk base itself so the whole placement must abort.
        world.occupy(100, 64, -200);

        let placed = TreeGenerator::place_tree(&template, &mut world, 100, 64, -200);
        assert!(!placed);
        assert!(world.written.is_empty());
    }
}
