use ndarray::Array2;
use num_traits::Float;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::ops::Sub;

use crate::error::{Error, Result};

/// A position in the drawing plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// z-component of the 2-D cross product; positive when `other` lies
    /// counter-clockwise of `self`.
    pub fn cross(self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Point::new(x, y)
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// An input edge as supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge<W> {
    pub from: usize,
    pub to: usize,
    pub weight: W,
}

impl<W> From<(usize, usize, W)> for Edge<W> {
    fn from((from, to, weight): (usize, usize, W)) -> Self {
        Edge { from, to, weight }
    }
}

/// Outgoing arcs of a vertex, used by searches that run over both primal and
/// dual graphs.
pub trait Adjacency<W> {
    fn node_count(&self) -> usize;

    /// Arcs leaving `u` as `(target, weight)` in a fixed, deterministic order.
    fn arcs_from(&self, u: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_>;

    /// The first arc with a negative weight, scanning sources in ascending order.
    fn negative_arc(&self) -> Option<(usize, usize, W)>
    where
        W: Float,
    {
        (0..self.node_count()).find_map(|u| {
            self.arcs_from(u)
                .find(|&(_, w)| w < W::zero())
                .map(|(v, w)| (u, v, w))
        })
    }
}

/// Fixed weighted graph with a dense weight matrix.
///
/// Vertex ids are insertion order. `None` cells mean "no edge", so a zero-weight
/// edge stays distinguishable from a missing one.
#[derive(Debug, Clone)]
pub struct Graph<W> {
    positions: Vec<Point>,
    edges: Vec<Edge<W>>,
    weights: Array2<Option<W>>,
    directed: bool,
}

impl<W> Graph<W>
where
    W: Float + Debug,
{
    /// Builds the graph and its weight matrix.
    ///
    /// For undirected graphs every edge is mirrored into the matrix; the edge
    /// list is kept as supplied. Repeated ordered pairs overwrite earlier ones.
    ///
    /// # Errors
    /// * `InvalidVertex` if an edge endpoint is not a vertex
    /// * `InvalidInput` if a weight is NaN
    pub fn build<I>(positions: Vec<Point>, edges: I, directed: bool) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, W)>,
    {
        let n = positions.len();
        let edges: Vec<Edge<W>> = edges.into_iter().map(Into::into).collect();
        let mut weights = Array2::from_elem((n, n), None);

        for edge in &edges {
            for vertex in [edge.from, edge.to] {
                if vertex >= n {
                    return Err(Error::InvalidVertex { vertex, count: n });
                }
            }
            if edge.weight.is_nan() {
                return Err(Error::invalid_input(format!(
                    "edge ({}, {}) has a NaN weight",
                    edge.from, edge.to
                )));
            }
            weights[[edge.from, edge.to]] = Some(edge.weight);
            if !directed {
                weights[[edge.to, edge.from]] = Some(edge.weight);
            }
        }

        log::debug!(
            "built {} graph with {} vertices and {} edges",
            if directed { "directed" } else { "undirected" },
            n,
            edges.len()
        );

        Ok(Graph {
            positions,
            edges,
            weights,
            directed,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn edges(&self) -> &[Edge<W>] {
        &self.edges
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    pub fn position(&self, v: usize) -> Option<Point> {
        self.positions.get(v).copied()
    }

    pub fn weight(&self, u: usize, v: usize) -> Option<W> {
        self.weights.get((u, v)).copied().flatten()
    }

    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.weight(u, v).is_some()
    }

    /// Capacity of `u -> v`; absent edges have capacity zero.
    pub fn capacity(&self, u: usize, v: usize) -> W {
        self.weight(u, v).unwrap_or_else(W::zero)
    }

    pub fn capacity_matrix(&self) -> Array2<W> {
        self.weights.mapv(|w| w.unwrap_or_else(W::zero))
    }

    /// Every stored arc `(u, v, weight)` in row-major order.
    pub fn arcs(&self) -> impl Iterator<Item = (usize, usize, W)> + '_ {
        self.weights
            .indexed_iter()
            .filter_map(|((u, v), w)| (*w).map(|w| (u, v, w)))
    }

    pub fn check_vertex(&self, vertex: usize) -> Result<()> {
        if vertex < self.vertex_count() {
            Ok(())
        } else {
            Err(Error::InvalidVertex {
                vertex,
                count: self.vertex_count(),
            })
        }
    }

    pub fn ensure_non_negative(&self) -> Result<()> {
        match self.negative_arc() {
            Some((from, to, weight)) => Err(Error::NegativeWeight {
                from,
                to,
                weight: weight.to_f64().unwrap_or(f64::NAN),
            }),
            None => Ok(()),
        }
    }
}

impl<W> Adjacency<W> for Graph<W>
where
    W: Float + Debug,
{
    fn node_count(&self) -> usize {
        self.vertex_count()
    }

    fn arcs_from(&self, u: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_> {
        Box::new(
            self.weights
                .row(u)
                .into_iter()
                .enumerate()
                .filter_map(|(v, w)| (*w).map(|w| (v, w))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(n: usize) -> Vec<Point> {
        (0..n).map(|i| Point::new(i as f64, 0.0)).collect()
    }

    #[test]
    fn test_undirected_mirrors_matrix_only() {
        let graph = Graph::build(points(3), vec![(0, 1, 4.0), (1, 2, 1.0)], false).unwrap();
        assert_eq!(graph.edges().len(), 2);
        assert_eq!(graph.weight(0, 1), Some(4.0));
        assert_eq!(graph.weight(1, 0), Some(4.0));
        assert_eq!(graph.weight(0, 2), None);
        assert_eq!(graph.arcs().count(), 4);
    }

    #[test]
    fn test_directed_keeps_orientation() {
        let graph = Graph::build(points(2), vec![(0, 1, 3.0)], true).unwrap();
        assert!(graph.has_edge(0, 1));
        assert!(!graph.has_edge(1, 0));
        assert_eq!(graph.capacity(1, 0), 0.0);
    }

    #[test]
    fn test_zero_weight_is_an_edge() {
        let graph = Graph::build(points(2), vec![(0, 1, 0.0)], true).unwrap();
        assert_eq!(graph.weight(0, 1), Some(0.0));
        assert_eq!(graph.arcs().collect::<Vec<_>>(), vec![(0, 1, 0.0)]);
    }

    #[test]
    fn test_last_write_wins() {
        let graph = Graph::build(points(2), vec![(0, 1, 3.0), (0, 1, 5.0)], true).unwrap();
        assert_eq!(graph.weight(0, 1), Some(5.0));
        assert_eq!(graph.edges().len(), 2);
    }

    #[test]
    fn test_out_of_range_edge() {
        let result = Graph::build(points(2), vec![(0, 2, 1.0)], true);
        assert!(matches!(
            result,
            Err(Error::InvalidVertex { vertex: 2, count: 2 })
        ));
    }

    #[test]
    fn test_nan_weight_rejected() {
        let result = Graph::build(points(2), vec![(0, 1, f64::NAN)], true);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_arcs_from_ascending() {
        let graph = Graph::build(points(4), vec![(0, 3, 1.0), (0, 1, 2.0)], true).unwrap();
        let arcs: Vec<_> = graph.arcs_from(0).collect();
        assert_eq!(arcs, vec![(1, 2.0), (3, 1.0)]);
    }

    #[test]
    fn test_negative_arc_detection() {
        let graph = Graph::build(points(3), vec![(0, 1, 2.0), (2, 1, -1.0)], true).unwrap();
        assert_eq!(graph.negative_arc(), Some((2, 1, -1.0)));
        assert!(matches!(
            graph.ensure_non_negative(),
            Err(Error::NegativeWeight { from: 2, to: 1, .. })
        ));
    }

    #[test]
    fn test_point_geometry() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(2.0, 0.0);
        assert_eq!(a.midpoint(b), Point::new(1.0, 0.0));
        assert!((b - a).cross(Point::new(0.0, 1.0)) > 0.0);
        assert!((b - a).cross(Point::new(0.0, -1.0)) < 0.0);
    }
}
