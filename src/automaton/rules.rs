//! Birth rules.
//!
//! Hex and layered lattices grow from fixed count sets; the cubic lattice
//! draws a Von Neumann face table and a Moore face/edge/corner table from a
//! seeded stream, so the same seed always yields the same tables.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

use super::grid::Activity;
use super::topology::Neighborhood;

pub const MAX_FACES: usize = 6;
pub const MAX_EDGES: usize = 12;
pub const MAX_CORNERS: usize = 8;

const MOORE_LEN: usize = (MAX_FACES + 1) * (MAX_EDGES + 1) * (MAX_CORNERS + 1);

/// Set of neighbour totals that cause birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthCounts(u32);

impl BirthCounts {
    /// Counts above 31 are ignored.
    pub fn from_counts(counts: &[u8]) -> Self {
        BirthCounts(
            counts
                .iter()
                .filter(|&&c| c < 32)
                .fold(0, |bits, &c| bits | 1 << c),
        )
    }

    #[inline]
    pub fn contains(&self, count: u8) -> bool {
        count < 32 && self.0 & (1 << count) != 0
    }
}

/// Birth decision per active face count, index 0 always `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VonNeumannTable([bool; MAX_FACES + 1]);

impl VonNeumannTable {
    pub fn from_faces(faces: &[u8]) -> Self {
        let mut table = [false; MAX_FACES + 1];
        for &f in faces {
            if (1..=MAX_FACES as u8).contains(&f) {
                table[f as usize] = true;
            }
        }
        VonNeumannTable(table)
    }

    #[inline]
    pub fn births(&self, faces: u8) -> bool {
        self.0.get(faces as usize).copied().unwrap_or(false)
    }

    /// Face counts that cause birth, ascending.
    pub fn faces(&self) -> Vec<u8> {
        (1..=MAX_FACES as u8).filter(|&f| self.births(f)).collect()
    }
}

/// Dense face × edge × corner birth table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MooreTable(Vec<bool>);

impl MooreTable {
    pub fn empty() -> Self {
        MooreTable(vec![false; MOORE_LEN])
    }

    #[inline]
    fn index(faces: u8, edges: u8, corners: u8) -> Option<usize> {
        let (f, e, c) = (faces as usize, edges as usize, corners as usize);
        if f > MAX_FACES || e > MAX_EDGES || c > MAX_CORNERS {
            return None;
        }
        Some((f * (MAX_EDGES + 1) + e) * (MAX_CORNERS + 1) + c)
    }

    #[inline]
    pub fn births(&self, faces: u8, edges: u8, corners: u8) -> bool {
        Self::index(faces, edges, corners).map_or(false, |i| self.0[i])
    }

    /// # Panics
    /// If a count exceeds its class capacity.
    pub fn set(&mut self, faces: u8, edges: u8, corners: u8, birth: bool) {
        let i = Self::index(faces, edges, corners).unwrap_or_else(|| {
            panic!("counts ({faces}, {edges}, {corners}) exceed the Moore table")
        });
        self.0[i] = birth;
    }

    /// `(faces, edges, corners)` of every birth entry, faces slowest.
    pub fn entries(&self) -> impl Iterator<Item = (u8, u8, u8)> + '_ {
        (0..=MAX_FACES as u8).flat_map(move |f| {
            (0..=MAX_EDGES as u8).flat_map(move |e| {
                (0..=MAX_CORNERS as u8)
                    .filter(move |&c| self.births(f, e, c))
                    .map(move |c| (f, e, c))
            })
        })
    }
}

/// The generated cubic-lattice tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    pub von_neumann: VonNeumannTable,
    pub moore: MooreTable,
}

impl RuleTable {
    /// Draw both tables from `seed`. Each Von Neumann entry is true with
    /// probability `vn_probability`, each Moore entry with `moore_probability`.
    pub fn generate(seed: u64, vn_probability: f64, moore_probability: f64) -> Self {
        let mut rng = ChaCha12Rng::seed_from_u64(seed);
        Self::generate_with(&mut rng, vn_probability, moore_probability)
    }

    pub fn generate_with<R: Rng>(rng: &mut R, vn_probability: f64, moore_probability: f64) -> Self {
        let mut vn = [false; MAX_FACES + 1];
        let mut moore = MooreTable::empty();

        // One face draw per slot, then that face's Moore block; slot 0 is
        // drawn and discarded to keep the stream layout fixed.
        for face in 0..=MAX_FACES as u8 {
            let draw = rng.gen_bool(vn_probability);
            vn[face as usize] = draw && face != 0;
            for edge in 0..=MAX_EDGES as u8 {
                for corner in 0..=MAX_CORNERS as u8 {
                    if rng.gen_bool(moore_probability) {
                        moore.set(face, edge, corner, true);
                    }
                }
            }
        }

        RuleTable {
            von_neumann: VonNeumannTable(vn),
            moore,
        }
    }

    /// Flat byte image: 7 face entries followed by the Moore cube.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.von_neumann
            .0
            .iter()
            .chain(self.moore.0.iter())
            .map(|&b| b as u8)
            .collect()
    }
}

/// Rules a simulation evaluates dead cells against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rules {
    /// Fixed neighbour totals (hex sides, layered edges + corners).
    Counts(BirthCounts),
    /// Generated cubic tables.
    Table(RuleTable),
}

impl Rules {
    /// Birth decision for a dead, unfrozen cell with cached `activity`.
    pub fn should_birth(&self, activity: &Activity, neighborhood: Neighborhood) -> bool {
        match (self, activity) {
            (Rules::Counts(counts), _) => counts.contains(activity.total()),
            (Rules::Table(table), Activity::Cubic { faces, .. })
                if neighborhood == Neighborhood::VonNeumann =>
            {
                table.von_neumann.births(*faces)
            }
            (
                Rules::Table(table),
                Activity::Cubic {
                    faces,
                    edges,
                    corners,
                },
            ) => table.moore.births(*faces, *edges, *corners),
            (Rules::Table(_), other) => panic!("rule table evaluated against {other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_birth_counts() {
        let counts = BirthCounts::from_counts(&[1, 3, 5]);
        assert!(counts.contains(1) && counts.contains(3) && counts.contains(5));
        assert!(!counts.contains(0) && !counts.contains(2) && !counts.contains(6));
        assert!(!BirthCounts::from_counts(&[]).contains(1));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = RuleTable::generate(42, 0.5, 0.2);
        let b = RuleTable::generate(42, 0.5, 0.2);
        assert_eq!(a.to_bytes(), b.to_bytes());

        let c = RuleTable::generate(43, 0.5, 0.2);
        assert_ne!(a.to_bytes(), c.to_bytes());
    }

    #[test]
    fn test_face_zero_never_births() {
        for seed in 0..32 {
            let t = RuleTable::generate(seed, 1.0, 0.0);
            assert!(!t.von_neumann.births(0));
            assert_eq!(t.von_neumann.faces(), vec![1, 2, 3, 4, 5, 6]);
            assert_eq!(t.moore.entries().count(), 0);
        }
    }

    #[test]
    fn test_moore_density_is_roughly_one_fifth() {
        let t = RuleTable::generate(7, 0.5, 0.2);
        let trues = t.moore.entries().count();
        // 819 entries at p = 0.2; mean 163.8, sd ~11.4
        assert!((110..=220).contains(&trues), "got {trues}");
    }

    #[test]
    fn test_moore_entries_order_and_bounds() {
        let mut t = MooreTable::empty();
        t.set(6, 12, 8, true);
        t.set(0, 0, 1, true);
        t.set(2, 5, 0, true);
        assert_eq!(t.entries().collect::<Vec<_>>(), vec![(0, 0, 1), (2, 5, 0), (6, 12, 8)]);
        assert!(!t.births(7, 0, 0));
        assert!(!t.births(0, 13, 0));
    }

    #[test]
    fn test_rules_follow_active_neighborhood() {
        let mut moore = MooreTable::empty();
        moore.set(1, 2, 3, true);
        let rules = Rules::Table(RuleTable {
            von_neumann: VonNeumannTable::from_faces(&[2]),
            moore,
        });

        let a = Activity::Cubic {
            faces: 1,
            edges: 2,
            corners: 3,
        };
        assert!(!rules.should_birth(&a, Neighborhood::VonNeumann));
        assert!(rules.should_birth(&a, Neighborhood::Moore));

        let b = Activity::Cubic {
            faces: 2,
            edges: 0,
            corners: 0,
        };
        assert!(rules.should_birth(&b, Neighborhood::VonNeumann));
        assert!(!rules.should_birth(&b, Neighborhood::Moore));
    }

    #[test]
    fn test_counts_rules_sum_classes() {
        let rules = Rules::Counts(BirthCounts::from_counts(&[3, 4]));
        let a = Activity::Layered {
            edges: 2,
            corners: 1,
        };
        assert!(rules.should_birth(&a, Neighborhood::Moore));
        let b = Activity::Layered {
            edges: 2,
            corners: 3,
        };
        assert!(!rules.should_birth(&b, Neighborhood::Moore));
    }
}
