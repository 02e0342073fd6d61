use num_traits::Float;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::error::{Error, Result};
use crate::graph::model::{Adjacency, Point};

/// Adjacency between two faces, crossing one primal edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DualEdge<W> {
    pub faces: (usize, usize),
    pub length: W,
}

/// Dual of a planar embedding: one vertex per face, one undirected edge per
/// shared primal edge.
///
/// `crossings` maps a face pair, in the orientation it was authored, to the
/// primal edge it crosses. Parallel dual edges between the same two faces share
/// one crossing entry.
#[derive(Debug, Clone)]
pub struct DualGraph<W> {
    faces: Vec<Point>,
    edges: Vec<DualEdge<W>>,
    crossings: BTreeMap<(usize, usize), (usize, usize)>,
    s_hat: usize,
    t_hat: usize,
}

impl<W> DualGraph<W>
where
    W: Float + Debug,
{
    /// # Errors
    /// * `InvalidVertex` if an edge, crossing, `s_hat` or `t_hat` names a face
    ///   that does not exist
    /// * `InvalidInput` if a length is NaN
    pub fn build<E, C>(
        faces: Vec<Point>,
        edges: E,
        crossings: C,
        s_hat: usize,
        t_hat: usize,
    ) -> Result<Self>
    where
        E: IntoIterator<Item = (usize, usize, W)>,
        C: IntoIterator<Item = ((usize, usize), (usize, usize))>,
    {
        let count = faces.len();
        let check = |face: usize| {
            if face < count {
                Ok(())
            } else {
                Err(Error::InvalidVertex {
                    vertex: face,
                    count,
                })
            }
        };

        let mut dual_edges = Vec::new();
        for (a, b, length) in edges {
            check(a)?;
            check(b)?;
            if length.is_nan() {
                return Err(Error::invalid_input(format!(
                    "dual edge ({}, {}) has a NaN length",
                    a, b
                )));
            }
            dual_edges.push(DualEdge {
                faces: (a, b),
                length,
            });
        }

        let mut map = BTreeMap::new();
        for ((a, b), primal) in crossings {
            check(a)?;
            check(b)?;
            map.insert((a, b), primal);
        }

        check(s_hat)?;
        check(t_hat)?;

        Ok(DualGraph {
            faces,
            edges: dual_edges,
            crossings: map,
            s_hat,
            t_hat,
        })
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn faces(&self) -> &[Point] {
        &self.faces
    }

    pub fn face_position(&self, face: usize) -> Option<Point> {
        self.faces.get(face).copied()
    }

    pub fn edges(&self) -> &[DualEdge<W>] {
        &self.edges
    }

    pub fn s_hat(&self) -> usize {
        self.s_hat
    }

    pub fn t_hat(&self) -> usize {
        self.t_hat
    }

    /// Authored crossings, ordered by face pair.
    pub fn crossings(&self) -> impl Iterator<Item = ((usize, usize), (usize, usize))> + '_ {
        self.crossings.iter().map(|(&faces, &edge)| (faces, edge))
    }

    /// The primal edge crossed between faces `a` and `b`, in either orientation.
    pub fn primal_edge(&self, a: usize, b: usize) -> Option<(usize, usize)> {
        self.crossings
            .get(&(a, b))
            .or_else(|| self.crossings.get(&(b, a)))
            .copied()
    }
}

impl<W> Adjacency<W> for DualGraph<W>
where
    W: Float + Debug,
{
    fn node_count(&self) -> usize {
        self.face_count()
    }

    fn arcs_from(&self, u: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_> {
        Box::new(self.edges.iter().flat_map(move |edge| {
            let (a, b) = edge.faces;
            let forward = (a == u).then_some((b, edge.length));
            let backward = (b == u).then_some((a, edge.length));
            [forward, backward].into_iter().flatten()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faces(n: usize) -> Vec<Point> {
        (0..n).map(|i| Point::new(0.0, i as f64)).collect()
    }

    #[test]
    fn test_primal_edge_lookup_both_orders() {
        let dual = DualGraph::build(
            faces(3),
            vec![(0, 1, 2.0), (1, 2, 1.0)],
            vec![((0, 1), (4, 5)), ((2, 1), (5, 6))],
            0,
            2,
        )
        .unwrap();

        assert_eq!(dual.primal_edge(0, 1), Some((4, 5)));
        assert_eq!(dual.primal_edge(1, 0), Some((4, 5)));
        assert_eq!(dual.primal_edge(1, 2), Some((5, 6)));
        assert_eq!(dual.primal_edge(0, 2), None);
    }

    #[test]
    fn test_arcs_traverse_both_directions() {
        let dual = DualGraph::build(
            faces(3),
            vec![(0, 1, 2.0), (2, 0, 5.0), (0, 1, 1.0)],
            Vec::new(),
            0,
            1,
        )
        .unwrap();

        let from_zero: Vec<_> = dual.arcs_from(0).collect();
        assert_eq!(from_zero, vec![(1, 2.0), (2, 5.0), (1, 1.0)]);
        let from_two: Vec<_> = dual.arcs_from(2).collect();
        assert_eq!(from_two, vec![(0, 5.0)]);
    }

    #[test]
    fn test_out_of_range_faces() {
        let result = DualGraph::build(faces(2), vec![(0, 3, 1.0)], Vec::new(), 0, 1);
        assert!(matches!(
            result,
            Err(Error::InvalidVertex { vertex: 3, count: 2 })
        ));

        let result = DualGraph::<f64>::build(faces(2), Vec::new(), Vec::new(), 0, 2);
        assert!(matches!(result, Err(Error::InvalidVertex { vertex: 2, .. })));

        let result =
            DualGraph::<f64>::build(faces(2), Vec::new(), vec![((0, 5), (0, 1))], 0, 1);
        assert!(matches!(result, Err(Error::InvalidVertex { vertex: 5, .. })));
    }

    #[test]
    fn test_negative_length_visible_to_search() {
        let dual = DualGraph::build(faces(2), vec![(0, 1, -1.0)], Vec::new(), 0, 1).unwrap();
        assert_eq!(dual.negative_arc(), Some((0, 1, -1.0)));
    }
}
