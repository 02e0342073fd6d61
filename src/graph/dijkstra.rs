use bitvec::prelude::*;
use num_traits::Float;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt::Debug;

use crate::error::{Error, Result};
use crate::graph::model::{Adjacency, Graph};
use crate::graph::shortest_path::{ShortestPathSolver, ShortestPaths};
use crate::graph::snapshot::{Discard, PathSnapshot, SnapshotSink};

/// Entry in the priority queue: smallest distance first, then lowest vertex id.
#[derive(Copy, Clone, Debug)]
struct State<W> {
    cost: W,
    vertex: usize,
}

impl<W: PartialOrd> Eq for State<W> {}

impl<W: PartialOrd> PartialEq for State<W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<W: PartialOrd> PartialOrd for State<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: PartialOrd> Ord for State<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

/// Dijkstra's algorithm as a [`ShortestPathSolver`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Dijkstra;

impl<W> ShortestPathSolver<W> for Dijkstra
where
    W: Float + Debug,
{
    fn name(&self) -> &'static str {
        "dijkstra"
    }

    fn solve(
        &self,
        graph: &Graph<W>,
        source: usize,
        snapshots: &mut dyn SnapshotSink<PathSnapshot<W>>,
    ) -> Result<ShortestPaths<W>> {
        run(graph, source, snapshots)
    }
}

/// Computes single-source shortest paths over non-negative weights.
///
/// # Errors
/// * `InvalidVertex` if `source` is not a vertex
/// * `NegativeWeight` if any arc weight is negative
pub fn shortest_paths<W, N>(network: &N, source: usize) -> Result<ShortestPaths<W>>
where
    W: Float + Debug,
    N: Adjacency<W> + ?Sized,
{
    run(network, source, &mut Discard)
}

/// Dijkstra's algorithm, recording one snapshot per arc examined.
///
/// The unfinalized vertex with the smallest tentative distance is finalized
/// next, ties going to the lowest id. Arcs into finalized vertices are not
/// examined. An initial and a final snapshot bracket the run.
///
/// # Complexity
/// * Time: O(V² + E log V) with the dense adjacency of [`Graph`]
/// * Space: O(V)
pub fn run<W, N, S>(network: &N, source: usize, snapshots: &mut S) -> Result<ShortestPaths<W>>
where
    W: Float + Debug,
    N: Adjacency<W> + ?Sized,
    S: SnapshotSink<PathSnapshot<W>> + ?Sized,
{
    let n = network.node_count();
    if source >= n {
        return Err(Error::InvalidVertex {
            vertex: source,
            count: n,
        });
    }
    if let Some((from, to, weight)) = network.negative_arc() {
        return Err(Error::NegativeWeight {
            from,
            to,
            weight: weight.to_f64().unwrap_or(f64::NAN),
        });
    }

    let mut paths = ShortestPaths::init(n, source);
    let mut finalized = bitvec![0; n];
    let mut order = Vec::with_capacity(n);
    let mut heap = BinaryHeap::new();
    heap.push(State {
        cost: W::zero(),
        vertex: source,
    });

    snapshots.record(paths.snapshot(None, &order, None, false));

    while let Some(State { cost, vertex: u }) = heap.pop() {
        if finalized[u] || cost > paths.distances[u] {
            continue;
        }
        finalized.set(u, true);
        order.push(u);
        log::trace!("finalized vertex {} at distance {:?}", u, cost);

        for (v, w) in network.arcs_from(u) {
            if finalized[v] {
                continue;
            }
            let relaxed = paths.relax(u, v, w);
            if relaxed {
                heap.push(State {
                    cost: paths.distances[v],
                    vertex: v,
                });
            }
            snapshots.record(paths.snapshot(None, &order, Some((u, v)), relaxed));
        }
    }

    snapshots.record(paths.snapshot(None, &order, None, false));
    log::debug!(
        "dijkstra from {} finalized {} of {} vertices",
        source,
        order.len(),
        n
    );

    Ok(paths)
}
