//! Polygonization of a single tetrahedron.

use glam::Vec3;

use super::{Triangle, Vertex};

/// Corner-index sets splitting a unit cube into six tetrahedra around the 1-6 diagonal.
pub(crate) const TETRAHEDRA: [[usize; 4]; 6] = [
    [0, 1, 2, 6],
    [0, 1, 4, 6],
    [1, 2, 3, 6],
    [1, 3, 6, 7],
    [1, 4, 5, 6],
    [1, 5, 6, 7],
];

/// Triangles with a smaller area are dropped.
pub const DEGENERATE_AREA: f32 = 1e-6;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Corner {
    pub position: Vec3,
    pub value: f32,
    pub gradient: Vec3,
}

impl Corner {
    fn above(&self) -> bool {
        self.value > 0.0
    }
}

/// Zero crossing on the edge `a`-`b`, whose ends lie on opposite sides.
fn crossing(a: &Corner, b: &Corner) -> Vertex {
    let t = a.value / (a.value - b.value);
    let position = a.position.lerp(b.position, t);
    let outward = if a.value > b.value { a.position - b.position } else { b.position - a.position };
    let normal = a
        .gradient
        .lerp(b.gradient, t)
        .try_normalize()
        .or_else(|| outward.try_normalize())
        .unwrap_or(Vec3::Z);
    Vertex::new(position, normal)
}

fn emit(mut triangle: Triangle, out: &mut Vec<Triangle>) {
    if triangle.area() < DEGENERATE_AREA {
        return;
    }
    triangle.orient();
    out.push(triangle);
}

/// Orders four quad corners into the cycle with the shortest perimeter.
///
/// All 4! orderings are tried; the first minimum in enumeration order wins.
fn shortest_cycle(q: &[Vertex; 4]) -> [Vertex; 4] {
    let mut best = [0, 1, 2, 3];
    let mut best_len = f32::INFINITY;
    for a in 0..4 {
        for b in (0..4).filter(|&b| b != a) {
            for c in (0..4).filter(|&c| c != a && c != b) {
                let d = 6 - a - b - c;
                let order = [a, b, c, d];
                let len: f32 = (0..4)
                    .map(|i| q[order[i]].position.distance(q[order[(i + 1) % 4]].position))
                    .sum();
                if len < best_len {
                    best_len = len;
                    best = order;
                }
            }
        }
    }
    best.map(|i| q[i])
}

/// Appends the surface triangles of one tetrahedron to `out`.
pub(crate) fn polygonize(corners: &[Corner; 4], out: &mut Vec<Triangle>) {
    let mask = corners
        .iter()
        .enumerate()
        .fold(0u8, |m, (i, c)| if c.above() { m | (1 << i) } else { m });

    match mask.count_ones() {
        0 | 4 => {}
        1 | 3 => {
            // The corner alone on its side is the apex; 3 above mirrors 1 above.
            let lone_above = mask.count_ones() == 1;
            let apex = (0..4).find(|&i| corners[i].above() == lone_above).unwrap_or(0);
            let mut verts = (0..4).filter(|&i| i != apex).map(|i| crossing(&corners[apex], &corners[i]));
            if let (Some(a), Some(b), Some(c)) = (verts.next(), verts.next(), verts.next()) {
                emit(Triangle::new(a, b, c), out);
            }
        }
        _ => {
            let mut quad = Vec::with_capacity(4);
            for i in 0..4 {
                for j in (i + 1)..4 {
                    if corners[i].above() != corners[j].above() {
                        quad.push(crossing(&corners[i], &corners[j]));
                    }
                }
            }
            if let Ok(quad) = <[Vertex; 4]>::try_from(quad) {
                let [a, b, c, d] = shortest_cycle(&quad);
                emit(Triangle::new(a, b, c), out);
                emit(Triangle::new(a, c, d), out);
            }
        }
    }
}
