//! Neighbour link sets.
//!
//! Links are linear index deltas into the grid's cell arena, one table per
//! neighbour class (two for hex lattices, by column parity). Cells on the
//! outermost ring resolve to no links at all.

use super::grid::{Coord, Dims, Grid};
use super::topology::{NeighborClass, Neighborhood, Offset, Topology};

#[derive(Debug, Clone)]
struct ClassLinks {
    class: NeighborClass,
    even: Vec<isize>,
    odd: Vec<isize>,
}

/// Static neighbour graph for one topology/neighbourhood pair.
#[derive(Debug, Clone)]
pub struct LinkSet {
    topology: Topology,
    neighborhood: Neighborhood,
    dims: Dims,
    classes: Vec<ClassLinks>,
}

fn delta(dims: Dims, offset: &Offset) -> isize {
    let w = dims.width as isize;
    let h = dims.height as isize;
    offset.dz as isize * w * h + offset.dy as isize * w + offset.dx as isize
}

impl LinkSet {
    /// Derive the full link set for `neighborhood`.
    pub fn build(grid: &Grid, neighborhood: Neighborhood) -> Self {
        let topology = grid.topology();
        let dims = grid.dims();
        let classes = topology
            .classes(neighborhood)
            .iter()
            .map(|&class| {
                let table = |x: usize| -> Vec<isize> {
                    topology
                        .offsets(class, x)
                        .iter()
                        .map(|o| delta(dims, o))
                        .collect()
                };
                ClassLinks {
                    class,
                    even: table(0),
                    odd: table(1),
                }
            })
            .collect();

        LinkSet {
            topology,
            neighborhood,
            dims,
            classes,
        }
    }

    pub fn neighborhood(&self) -> Neighborhood {
        self.neighborhood
    }

    /// Classes linked, in count storage order.
    pub fn classes(&self) -> impl Iterator<Item = NeighborClass> + '_ {
        self.classes.iter().map(|c| c.class)
    }

    /// Indices of the `slot`-th class's neighbours of the cell at `idx`.
    /// Empty on the boundary ring.
    pub fn neighbors(
        &self,
        coord: Coord,
        idx: usize,
        slot: usize,
    ) -> impl Iterator<Item = usize> + '_ {
        let links = &self.classes[slot];
        let deltas: &[isize] = if !self.topology.is_linked(self.dims, coord) {
            &[]
        } else if coord.x % 2 == 0 {
            &links.even
        } else {
            &links.odd
        };
        deltas.iter().map(move |d| (idx as isize + d) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_resolve_to_topology_neighbors() {
        let grid = Grid::new(Topology::Cubic3D, 8);
        let links = LinkSet::build(&grid, Neighborhood::Moore);
        let c = Coord::new(3, 4, 5);
        let idx = grid.index_of(c);

        for (slot, class) in links.classes().enumerate() {
            let from_links: Vec<Coord> = links
                .neighbors(c, idx, slot)
                .map(|i| grid.coord_of(i))
                .collect();
            let expected: Vec<Coord> = Topology::Cubic3D
                .offsets(class, c.x)
                .iter()
                .map(|o| Topology::Cubic3D.neighbor(grid.dims(), c, *o).unwrap())
                .collect();
            assert_eq!(from_links, expected);
        }
    }

    #[test]
    fn test_von_neumann_links_faces_only() {
        let grid = Grid::new(Topology::Cubic3D, 8);
        let links = LinkSet::build(&grid, Neighborhood::VonNeumann);
        assert_eq!(links.classes().collect::<Vec<_>>(), vec![NeighborClass::Face]);
        let c = Coord::new(4, 4, 4);
        assert_eq!(links.neighbors(c, grid.index_of(c), 0).count(), 6);
    }

    #[test]
    fn test_boundary_cells_have_no_links() {
        let grid = Grid::new(Topology::Hex2D, 8);
        let links = LinkSet::build(&grid, Neighborhood::VonNeumann);
        let edge = Coord::new(0, 0, 3);
        assert_eq!(links.neighbors(edge, grid.index_of(edge), 0).count(), 0);

        let odd = Coord::new(3, 0, 3);
        let found: Vec<Coord> = links
            .neighbors(odd, grid.index_of(odd), 0)
            .map(|i| grid.coord_of(i))
            .collect();
        assert!(found.contains(&Coord::new(2, 0, 4)));
        assert!(found.contains(&Coord::new(4, 0, 4)));
    }

    #[test]
    fn test_layered_links_stay_in_plane() {
        let grid = Grid::new(Topology::Layered2D, 8);
        let links = LinkSet::build(&grid, Neighborhood::Moore);
        let c = Coord::new(3, 5, 3);
        for slot in 0..2 {
            assert!(links
                .neighbors(c, grid.index_of(c), slot)
                .all(|i| grid.coord_of(i).y == 5));
        }
    }
}
