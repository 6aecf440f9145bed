/// Jittered-grid cellular (Worley) noise returning distance to the nearest and
/// second-nearest feature point. The `noise` crate's own `Worley` type only
/// exposes a single return mode (nearest-point distance or nearest-point value),
/// so the chamber/entrance fields of the cave system — which need both F1 and
/// F2 simultaneously — are served by this small hand-rolled generator instead.
/// It uses the same seeded-hash jittered-grid technique as the Voronoi center
/// placement, just at a much finer, densely-tiled scale.
pub struct CellularNoise {
    seed: u32,
    frequency: f64,
}

impl CellularNoise {
    pub fn new(seed: u32, frequency: f64) -> Self {
        Self { seed, frequency }
    }

    fn point2(&self, cx: i64, cz: i64) -> (f64, f64) {
        let h = hash2(self.seed, cx, cz);
        let jx = (h & 0xFFFF) as f64 / 65536.0;
        let jz = ((h >> 16) & 0xFFFF) as f64 / 65536.0;
        (cx as f64 + jx, cz as f64 + jz)
    }

    fn point3(&self, cx: i64, cy: i64, cz: i64) -> (f64, f64, f64) {
        let h = hash3(self.seed, cx, cy, cz);
        let jx = (h & 0xFFFF) as f64 / 65536.0;
        let jy = ((h >> 16) & 0xFFFF) as f64 / 65536.0;
        let jz = ((h >> 32) & 0xFFFF) as f64 / 65536.0;
        (cx as f64 + jx, cy as f64 + jy, cz as f64 + jz)
    }

    /// Distances (in the noise's own scaled space) to the nearest and
    /// second-nearest feature points around a 2D sample position.
    pub fn distances2(&self, x: f64, z: f64) -> (f64, f64) {
        let px = x * self.frequency;
        let pz = z * self.frequency;
        let cx = px.floor() as i64;
        let cz = pz.floor() as i64;

        let mut f1 = f64::MAX;
        let mut f2 = f64::MAX;
        for dx in -1..=1 {
            for dz in -1..=1 {
                let (ptx, ptz) = self.point2(cx + dx, cz + dz);
                let ddx = ptx - px;
                let ddz = ptz - pz;
                let d = (ddx * ddx + ddz * ddz).sqrt();
                if d < f1 {
                    f2 = f1;
                    f1 = d;
                } else if d < f2 {
                    f2 = d;
                }
            }
        }
        (f1, f2)
    }

    /// Distances to the nearest and second-nearest feature points around a 3D
    /// sample position.
    pub fn distances3(&self, x: f64, y: f64, z: f64) -> (f64, f64) {
        let px = x * self.frequency;
        let py = y * self.frequency;
        let pz = z * self.frequency;
        let cx = px.floor() as i64;
        let cy = py.floor() as i64;
        let cz = pz.floor() as i64;

        let mut f1 = f64::MAX;
        let mut f2 = f64::MAX;
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let (ptx, pty, ptz) = self.point3(cx + dx, cy + dy, cz + dz);
                    let ddx = ptx - px;
                    let ddy = pty - py;
                    let ddz = ptz - pz;
                    let d = (ddx * ddx + ddy * ddy + ddz * ddz).sqrt();
                    if d < f1 {
                        f2 = f1;
                        f1 = d;
                    } else if d < f2 {
                        f2 = d;
                    }
                }
            }
        }
        (f1, f2)
    }

    pub fn nearest2(&self, x: f64, z: f64) -> f64 {
        self.distances2(x, z).0
    }

    pub fn nearest3(&self, x: f64, y: f64, z: f64) -> f64 {
        self.distances3(x, y, z).0
    }
}

/// SplitMix64-style finalizer mixed in with the coordinates; deterministic and
/// seed-sensitive, with no dependency on a PRNG crate for this purely
/// positional lookup.
fn hash2(seed: u32, x: i64, z: i64) -> u64 {
    let mut h = seed as u64 ^ 0x9E3779B97F4A7C15;
    h = h.wrapping_mul(0xBF58476D1CE4E5B9).wrapping_add(x as u64);
    h ^= h >> 33;
    h = h.wrapping_mul(0x94D049BB133111EB).wrapping_add(z as u64);
    h ^= h >> 33;
    h = h.wrapping_mul(0xFF51AFD7ED558CCD);
    h ^= h >> 33;
    h
}

fn hash3(seed: u32, x: i64, y: i64, z: i64) -> u64 {
    let mut h = hash2(seed, x, z);
    h = h.wrapping_mul(0xC4CEB9FE1A85EC53).wrapping_add(y as u64);
    h ^= h >> 33;
    h
}
