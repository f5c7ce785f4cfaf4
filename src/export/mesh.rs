//! Unit-cube surface geometry for live cells, as OBJ or ASCII STL.

use std::io::Write;

use crate::automaton::grid::Coord;
use crate::automaton::simulation::Simulation;
use crate::automaton::topology::Topology;
use crate::error::GrowthError;

pub type Vertex = [f32; 3];
pub type Triangle = [Vertex; 3];

const fn v(x: f32, y: f32, z: f32) -> Vertex {
    [x, y, z]
}

/// Twelve triangles of a unit cube centred on the origin.
const CUBE: [Triangle; 12] = [
    // front
    [v(-0.5, -0.5, -0.5), v(0.5, -0.5, -0.5), v(0.5, 0.5, -0.5)],
    [v(-0.5, -0.5, -0.5), v(0.5, 0.5, -0.5), v(-0.5, 0.5, -0.5)],
    // right
    [v(0.5, -0.5, -0.5), v(0.5, -0.5, 0.5), v(0.5, 0.5, 0.5)],
    [v(0.5, -0.5, -0.5), v(0.5, 0.5, 0.5), v(0.5, 0.5, -0.5)],
    // back
    [v(-0.5, -0.5, 0.5), v(-0.5, 0.5, 0.5), v(0.5, 0.5, 0.5)],
    [v(0.5, 0.5, 0.5), v(0.5, -0.5, 0.5), v(-0.5, -0.5, 0.5)],
    // left
    [v(-0.5, 0.5, 0.5), v(-0.5, -0.5, 0.5), v(-0.5, -0.5, -0.5)],
    [v(-0.5, -0.5, -0.5), v(-0.5, 0.5, -0.5), v(-0.5, 0.5, 0.5)],
    // bottom
    [v(0.5, -0.5, 0.5), v(0.5, -0.5, -0.5), v(-0.5, -0.5, -0.5)],
    [v(-0.5, -0.5, -0.5), v(-0.5, -0.5, 0.5), v(0.5, -0.5, 0.5)],
    // top
    [v(-0.5, 0.5, -0.5), v(0.5, 0.5, -0.5), v(0.5, 0.5, 0.5)],
    [v(0.5, 0.5, 0.5), v(-0.5, 0.5, 0.5), v(-0.5, 0.5, -0.5)],
];

/// Triangles of every cell in `cells`, shifted so the grid centre sits at
/// the origin.
pub fn cube_triangles(cells: impl IntoIterator<Item = Coord>, grid_size: usize) -> Vec<Triangle> {
    let offset = grid_size as f32 / 2.0;
    cells
        .into_iter()
        .flat_map(|c| {
            let origin = [
                c.x as f32 - offset,
                c.y as f32 - offset,
                c.z as f32 - offset,
            ];
            CUBE.iter().map(move |tri| {
                tri.map(|p| [origin[0] + p[0], origin[1] + p[1], origin[2] + p[2]])
            })
        })
        .collect()
}

/// Triangles for every live cell of `sim`. Hex lattices have no cube
/// geometry.
pub fn simulation_triangles(sim: &Simulation) -> Result<Vec<Triangle>, GrowthError> {
    if sim.topology() == Topology::Hex2D {
        return Err(GrowthError::Unsupported {
            operation: "cube geometry export",
            topology: Topology::Hex2D,
        });
    }
    Ok(cube_triangles(sim.live_coords(), sim.config().grid_size))
}

/// Unit normal of the face spanned from the first vertex; zero when the
/// triangle is degenerate.
pub fn normal(tri: &Triangle) -> Vertex {
    let [a, b, c] = *tri;
    let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let w = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
    let n = [
        u[1] * w[2] - u[2] * w[1],
        u[2] * w[0] - u[0] * w[2],
        u[0] * w[1] - u[1] * w[0],
    ];
    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    if len <= f32::EPSILON {
        return [0.0; 3];
    }
    [n[0] / len, n[1] / len, n[2] / len]
}

pub fn write_obj<W: Write>(w: &mut W, triangles: &[Triangle]) -> Result<(), GrowthError> {
    for tri in triangles {
        for p in tri {
            writeln!(w, "v {} {} {} ", p[0], p[1], p[2])?;
        }
        write!(w, "f -1 -2 -3\n\n")?;
    }
    Ok(())
}

pub fn write_stl<W: Write>(w: &mut W, triangles: &[Triangle]) -> Result<(), GrowthError> {
    writeln!(w, "solid")?;
    for tri in triangles {
        let n = normal(tri);
        writeln!(w, "facet normal {} {} {}", n[0], n[1], n[2])?;
        writeln!(w, "outer loop")?;
        for p in tri {
            writeln!(w, "vertex {} {} {}", p[0], p[1], p[2])?;
        }
        writeln!(w, "endloop")?;
        writeln!(w, "endfacet")?;
    }
    write!(w, "endsolid")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_cell_makes_twelve_triangles() {
        let tris = cube_triangles([Coord::new(5, 5, 5)], 10);
        assert_eq!(tris.len(), 12);
        assert_eq!(tris[0][0], [-0.5, -0.5, -0.5]);
        assert!(tris
            .iter()
            .flatten()
            .all(|p| p.iter().all(|&c| c == -0.5 || c == 0.5)));
    }

    #[test]
    fn test_normals_are_unit_axes() {
        assert_eq!(normal(&CUBE[0]), [0.0, 0.0, 1.0]);
        assert_eq!(normal(&CUBE[10]), [0.0, -1.0, 0.0]);
        for tri in &CUBE {
            let n = normal(tri);
            let len: f32 = n.iter().map(|c| c * c).sum();
            assert!((len - 1.0).abs() < 1e-6);
        }
        let flat = [v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(2.0, 0.0, 0.0)];
        assert_eq!(normal(&flat), [0.0; 3]);
    }

    #[test]
    fn test_obj_layout() {
        let tris = cube_triangles([Coord::new(1, 1, 1)], 2);
        let mut out = Vec::new();
        write_obj(&mut out, &tris[..1]).expect("write");
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "v -0.5 -0.5 -0.5 \nv 0.5 -0.5 -0.5 \nv 0.5 0.5 -0.5 \nf -1 -2 -3\n\n"
        );
    }

    #[test]
    fn test_stl_layout() {
        let tris = cube_triangles([Coord::new(1, 1, 1)], 2);
        let mut out = Vec::new();
        write_stl(&mut out, &tris).expect("write");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.starts_with("solid\nfacet normal 0 0 1\nouter loop\nvertex -0.5 -0.5 -0.5\n"));
        assert!(text.ends_with("endfacet\nendsolid"));
        assert_eq!(text.matches("facet normal").count(), 12);
    }
}
