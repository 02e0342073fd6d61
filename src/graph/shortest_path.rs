use num_traits::Float;
use serde::Serialize;
use std::fmt::{self, Debug, Display};

use crate::error::Result;
use crate::graph::model::Graph;
use crate::graph::snapshot::{PathSnapshot, SnapshotSink};

/// Distances and shortest-path tree from a single source.
///
/// Unreached vertices have distance `+inf` and no parent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortestPaths<W> {
    pub source: usize,
    pub distances: Vec<W>,
    pub parents: Vec<Option<usize>>,
}

impl<W> ShortestPaths<W>
where
    W: Float + Debug,
{
    pub(crate) fn init(n: usize, source: usize) -> Self {
        let mut distances = vec![W::infinity(); n];
        distances[source] = W::zero();
        ShortestPaths {
            source,
            distances,
            parents: vec![None; n],
        }
    }

    /// Applies `dist[u] + w < dist[v]`, returning whether `v` improved.
    pub(crate) fn relax(&mut self, u: usize, v: usize, w: W) -> bool {
        let candidate = self.distances[u] + w;
        if candidate < self.distances[v] {
            self.distances[v] = candidate;
            self.parents[v] = Some(u);
            true
        } else {
            false
        }
    }

    pub(crate) fn snapshot(
        &self,
        pass: Option<usize>,
        finalized: &[usize],
        edge: Option<(usize, usize)>,
        relaxed: bool,
    ) -> PathSnapshot<W> {
        PathSnapshot {
            pass,
            finalized: finalized.to_vec(),
            edge,
            relaxed,
            distances: self.distances.clone(),
            parents: self.parents.clone(),
        }
    }

    /// Finite distance to `v`, or `None` if `v` is unreachable.
    pub fn distance(&self, v: usize) -> Option<W> {
        self.distances.get(v).copied().filter(|d| d.is_finite())
    }

    pub fn is_reachable(&self, v: usize) -> bool {
        self.distance(v).is_some()
    }

    /// Vertices from the source to `target` along the parent pointers.
    pub fn path_to(&self, target: usize) -> Option<Vec<usize>> {
        if !self.is_reachable(target) {
            return None;
        }
        let mut path = vec![target];
        let mut current = target;
        while let Some(parent) = self.parents[current] {
            // parent pointers of a finished run form a tree
            if path.len() > self.parents.len() {
                return None;
            }
            path.push(parent);
            current = parent;
        }
        path.reverse();
        (path[0] == self.source).then_some(path)
    }

    /// `(parent, child)` pairs of the shortest-path tree, by child id.
    pub fn tree_edges(&self) -> Vec<(usize, usize)> {
        self.parents
            .iter()
            .enumerate()
            .filter_map(|(child, parent)| parent.map(|p| (p, child)))
            .collect()
    }
}

impl<W> Display for ShortestPaths<W>
where
    W: Float + Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (v, d) in self.distances.iter().enumerate() {
            if d.is_finite() {
                writeln!(f, "v{}: {}", v, d)?;
            } else {
                writeln!(f, "v{}: unreachable", v)?;
            }
        }
        Ok(())
    }
}

/// Single-source shortest-path algorithm over a [`Graph`].
pub trait ShortestPathSolver<W>
where
    W: Float + Debug,
{
    fn name(&self) -> &'static str;

    fn solve(
        &self,
        graph: &Graph<W>,
        source: usize,
        snapshots: &mut dyn SnapshotSink<PathSnapshot<W>>,
    ) -> Result<ShortestPaths<W>>;
}
