//! Initial seeding inside a centred sub-region.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GrowthError;

use super::grid::{Coord, Dims, Grid};
use super::region::{import_region, Bounds};
use super::topology::{Axis, Topology};

/// How the initial live cells are chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeedPattern {
    /// Each cell of the seed box lives with probability 0.5.
    Random,
    /// Draw one half/quadrant/octant and reflect it across this many axes.
    Mirror(u8),
    /// Exactly these cells.
    Cells(Vec<Coord>),
    /// A previously captured snapshot, cell for cell.
    Snapshot(SeedSnapshot),
}

/// Liveness of a box as a flat 0/1 sequence, z slowest and x fastest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSnapshot {
    pub origin: Coord,
    pub extent: Dims,
    pub cells: Vec<u8>,
}

impl SeedSnapshot {
    pub fn bounds(&self) -> Bounds {
        if self.extent.volume() == 0 {
            return Bounds::EMPTY;
        }
        Bounds::new(
            self.origin,
            Coord::new(
                self.origin.x + self.extent.width - 1,
                self.origin.y + self.extent.height - 1,
                self.origin.z + self.extent.depth - 1,
            ),
        )
    }

    pub fn live_cells(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }
}

/// Inclusive seed box of edge `seed_size` centred on the grid. The 2D
/// lattices seed layer 0 only.
pub fn seed_box(topology: Topology, dims: Dims, seed_size: usize) -> Bounds {
    let half = seed_size / 2;
    let mut lo = Coord::default();
    let mut hi = Coord::default();
    for axis in topology.tracked_axes() {
        let centre = axis.extent(dims) / 2;
        axis.set(&mut lo, centre - half);
        axis.set(&mut hi, centre + half - 1);
    }
    Bounds::new(lo, hi)
}

/// Whether a cell may be seeded: at least two cells from the border on
/// every tracked axis, layer 0 on the 2D lattices.
pub fn seedable(topology: Topology, dims: Dims, c: Coord) -> bool {
    let planar = topology != Topology::Cubic3D;
    (!planar || c.y == 0)
        && c.x < dims.width
        && c.y < dims.height
        && c.z < dims.depth
        && topology.tracked_axes().iter().all(|axis| {
            let v = axis.of(c);
            v >= 2 && v + 3 <= axis.extent(dims)
        })
}

/// Whether a centred seed box of `seed_size` fits the seedable interior.
pub fn seed_size_fits(topology: Topology, dims: Dims, seed_size: usize) -> bool {
    let half = seed_size / 2;
    half > 0
        && topology.tracked_axes().iter().all(|axis| {
            let extent = axis.extent(dims);
            let centre = extent / 2;
            centre >= half + 2 && centre + half + 2 <= extent
        })
}

/// Reject a pattern before anything is mutated.
pub fn validate(
    pattern: &SeedPattern,
    topology: Topology,
    dims: Dims,
    seed_size: usize,
) -> Result<(), GrowthError> {
    match pattern {
        SeedPattern::Random | SeedPattern::Mirror(_)
            if !seed_size_fits(topology, dims, seed_size) =>
        {
            Err(GrowthError::InvalidConfig(
                "seed box must leave a two-cell margin from the grid border",
            ))
        }
        SeedPattern::Random => Ok(()),
        SeedPattern::Mirror(axes) => {
            let max = topology.max_mirror_axes();
            if *axes == 0 || *axes > max {
                return Err(GrowthError::UnsupportedMirrorAxes {
                    requested: *axes,
                    max,
                });
            }
            Ok(())
        }
        SeedPattern::Cells(cells) => {
            for &c in cells {
                if !seedable(topology, dims, c) {
                    return Err(GrowthError::SeedOutOfBounds {
                        x: c.x,
                        y: c.y,
                        z: c.z,
                    });
                }
            }
            Ok(())
        }
        SeedPattern::Snapshot(snapshot) => {
            if snapshot.cells.len() != snapshot.extent.volume() {
                return Err(GrowthError::InvalidConfig(
                    "seed snapshot length does not match its extent",
                ));
            }
            let b = snapshot.bounds();
            if !b.is_empty() {
                for c in [b.lo, b.hi] {
                    if !seedable(topology, dims, c) {
                        return Err(GrowthError::SeedOutOfBounds {
                            x: c.x,
                            y: c.y,
                            z: c.z,
                        });
                    }
                }
            }
            Ok(())
        }
    }
}

/// Reflect `v` across the centre of the seed box on its axis.
#[inline]
fn reflect(axis: Axis, dims: Dims, v: usize) -> usize {
    2 * (axis.extent(dims) / 2) - 1 - v
}

/// Populate `grid` according to `pattern`. Returns the number of cells born.
/// The pattern must already have passed [`validate`].
pub fn plant<R: Rng>(
    grid: &mut Grid,
    pattern: &SeedPattern,
    seed_size: usize,
    rng: &mut R,
) -> usize {
    let topology = grid.topology();
    let dims = grid.dims();
    let seed_box = seed_box(topology, dims, seed_size);

    match pattern {
        SeedPattern::Random => {
            let mut born = 0;
            for c in seed_box.iter() {
                if rng.gen_bool(0.5) && grid.birth(c) {
                    born += 1;
                }
            }
            born
        }
        SeedPattern::Mirror(axes) => {
            let mirrored = &topology.tracked_axes()[..*axes as usize];

            // Only the low half of each mirrored axis is drawn.
            let mut drawn = seed_box;
            for axis in mirrored {
                axis.set(&mut drawn.hi, axis.extent(dims) / 2 - 1);
            }

            let mut born = 0;
            for c in drawn.iter() {
                if !rng.gen_bool(0.5) {
                    continue;
                }
                for mask in 0..(1usize << mirrored.len()) {
                    let mut image = c;
                    for (bit, axis) in mirrored.iter().enumerate() {
                        if mask & (1 << bit) != 0 {
                            axis.set(&mut image, reflect(*axis, dims, axis.of(c)));
                        }
                    }
                    if grid.birth(image) {
                        born += 1;
                    }
                }
            }
            born
        }
        SeedPattern::Cells(cells) => cells.iter().filter(|&&c| grid.birth(c)).count(),
        SeedPattern::Snapshot(snapshot) => import_region(grid, snapshot.bounds(), &snapshot.cells),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    fn live_coords(grid: &Grid) -> Vec<Coord> {
        (0..grid.dims().volume())
            .filter(|&i| grid.cell_at(i).alive)
            .map(|i| grid.coord_of(i))
            .collect()
    }

    #[test]
    fn test_seed_box_is_centred() {
        let b = seed_box(Topology::Cubic3D, Topology::Cubic3D.dims(100), 8);
        assert_eq!(b.lo, Coord::new(46, 46, 46));
        assert_eq!(b.hi, Coord::new(53, 53, 53));

        let b = seed_box(Topology::Hex2D, Topology::Hex2D.dims(800), 8);
        assert_eq!(b.lo, Coord::new(396, 0, 396));
        assert_eq!(b.hi, Coord::new(403, 0, 403));
    }

    #[test]
    fn test_random_seed_stays_in_box() {
        let mut grid = Grid::new(Topology::Cubic3D, 32);
        let mut rng = ChaCha12Rng::seed_from_u64(1);
        let born = plant(&mut grid, &SeedPattern::Random, 8, &mut rng);
        assert_eq!(born, grid.live_cells());
        assert!(born > 0 && born < 512);

        let b = seed_box(Topology::Cubic3D, grid.dims(), 8);
        assert!(live_coords(&grid).iter().all(|c| b.contains(*c)));
    }

    #[test]
    fn test_mirror_seed_is_symmetric() {
        for axes in 1..=3u8 {
            let mut grid = Grid::new(Topology::Cubic3D, 32);
            let mut rng = ChaCha12Rng::seed_from_u64(axes as u64);
            let born = plant(&mut grid, &SeedPattern::Mirror(axes), 8, &mut rng);
            assert_eq!(born % (1 << axes), 0);
            assert_eq!(born, grid.live_cells());

            let dims = grid.dims();
            for c in live_coords(&grid) {
                for axis in &Topology::Cubic3D.tracked_axes()[..axes as usize] {
                    let mut image = c;
                    axis.set(&mut image, reflect(*axis, dims, axis.of(c)));
                    assert!(grid.cell(image).alive, "{c:?} mirrored on {axis:?}");
                }
            }
        }
    }

    #[test]
    fn test_hex_mirror_uses_plane_axes() {
        let mut grid = Grid::new(Topology::Hex2D, 40);
        let mut rng = ChaCha12Rng::seed_from_u64(9);
        let born = plant(&mut grid, &SeedPattern::Mirror(2), 10, &mut rng);
        assert_eq!(born % 4, 0);
        assert!(live_coords(&grid).iter().all(|c| c.y == 0));
    }

    #[test]
    fn test_mirror_axes_validation() {
        let dims = Topology::Cubic3D.dims(32);
        assert!(validate(&SeedPattern::Mirror(3), Topology::Cubic3D, dims, 8).is_ok());
        assert!(matches!(
            validate(&SeedPattern::Mirror(4), Topology::Cubic3D, dims, 8),
            Err(GrowthError::UnsupportedMirrorAxes { requested: 4, max: 3 })
        ));
        assert!(matches!(
            validate(&SeedPattern::Mirror(0), Topology::Cubic3D, dims, 8),
            Err(GrowthError::UnsupportedMirrorAxes { .. })
        ));
        let dims = Topology::Layered2D.dims(32);
        assert!(matches!(
            validate(&SeedPattern::Mirror(3), Topology::Layered2D, dims, 8),
            Err(GrowthError::UnsupportedMirrorAxes { requested: 3, max: 2 })
        ));
    }

    #[test]
    fn test_explicit_cells_validation() {
        let dims = Topology::Cubic3D.dims(16);
        let ok = SeedPattern::Cells(vec![Coord::new(2, 2, 2), Coord::new(13, 13, 13)]);
        assert!(validate(&ok, Topology::Cubic3D, dims, 8).is_ok());

        let bad = SeedPattern::Cells(vec![Coord::new(1, 5, 5)]);
        assert!(matches!(
            validate(&bad, Topology::Cubic3D, dims, 8),
            Err(GrowthError::SeedOutOfBounds { x: 1, y: 5, z: 5 })
        ));

        let dims = Topology::Layered2D.dims(16);
        let off_layer = SeedPattern::Cells(vec![Coord::new(5, 1, 5)]);
        assert!(validate(&off_layer, Topology::Layered2D, dims, 8).is_err());
    }

    #[test]
    fn test_snapshot_replants_exactly() {
        let snapshot = SeedSnapshot {
            origin: Coord::new(4, 4, 4),
            extent: Dims::new(2, 1, 2),
            cells: vec![1, 0, 0, 1],
        };
        let pattern = SeedPattern::Snapshot(snapshot);
        let mut grid = Grid::new(Topology::Cubic3D, 12);
        assert!(validate(&pattern, Topology::Cubic3D, grid.dims(), 4).is_ok());

        let mut rng = ChaCha12Rng::seed_from_u64(0);
        assert_eq!(plant(&mut grid, &pattern, 4, &mut rng), 2);
        assert_eq!(live_coords(&grid), vec![Coord::new(4, 4, 4), Coord::new(5, 4, 5)]);

        let short = SeedPattern::Snapshot(SeedSnapshot {
            origin: Coord::new(4, 4, 4),
            extent: Dims::new(2, 2, 2),
            cells: vec![1; 3],
        });
        assert!(matches!(
            validate(&short, Topology::Cubic3D, grid.dims(), 4),
            Err(GrowthError::InvalidConfig(_))
        ));
    }
}
