use bitvec::prelude::*;
use ndarray::Array2;
use num_traits::Float;
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt::Debug;

use crate::config::SolverConfig;
use crate::error::{Error, Result};
use crate::graph::model::Graph;
use crate::graph::snapshot::{Discard, FlowPhase, FlowSnapshot, SnapshotSink};

/// Result of a maximum-flow run.
#[derive(Debug, Clone, Serialize)]
pub struct MaxFlow<W> {
    pub source: usize,
    pub sink: usize,
    pub total: W,
    /// Flow carried by each arc; never exceeds the arc's capacity.
    pub flow: Array2<W>,
    /// Vertices reachable from the source in the final residual graph.
    pub source_side: BitVec,
    /// Capacitated arcs leaving `source_side`, in row-major order.
    pub cut: Vec<(usize, usize)>,
}

impl<W> MaxFlow<W>
where
    W: Float + Debug,
{
    pub fn flow_on(&self, u: usize, v: usize) -> W {
        self.flow.get((u, v)).copied().unwrap_or_else(W::zero)
    }

    pub fn is_source_side(&self, v: usize) -> bool {
        self.source_side.get(v).map(|bit| *bit).unwrap_or(false)
    }

    /// Total capacity of the cut arcs.
    pub fn cut_capacity(&self, graph: &Graph<W>) -> W {
        self.cut
            .iter()
            .fold(W::zero(), |acc, &(u, v)| acc + graph.capacity(u, v))
    }

    /// Flow leaving `v` minus flow entering it.
    pub fn net_outflow(&self, v: usize) -> W {
        let out = self.flow.row(v).iter().fold(W::zero(), |acc, &f| acc + f);
        let into = self.flow.column(v).iter().fold(W::zero(), |acc, &f| acc + f);
        out - into
    }
}

/// Computes the maximum flow between the terminals named in `config`.
pub fn max_flow<W>(graph: &Graph<W>, config: &SolverConfig) -> Result<MaxFlow<W>>
where
    W: Float + Debug,
{
    run(graph, config, &mut Discard)
}

/// Edmonds-Karp: augments along shortest residual paths found by BFS until the
/// sink is unreachable.
///
/// Residual capacity is `capacity[u][v] - flow[u][v]` over a skew-symmetric
/// `flow` matrix, so pushing along `u -> v` opens `v -> u` for cancellation.
/// Records `Search`, `Path`, `Bottleneck` and `Augment` snapshots for every
/// augmentation and one `Finished` snapshot carrying the cut.
///
/// # Errors
/// * `InvalidVertex` / `InvalidInput` for bad terminals
/// * `NegativeWeight` if a capacity is negative
/// * `IterationBudgetExhausted` if `config.max_iterations` augmentations did
///   not reach a maximum flow
///
/// # Complexity
/// * Time: O(V * E * V²) with the dense residual matrix
/// * Space: O(V²)
pub fn run<W, S>(
    graph: &Graph<W>,
    config: &SolverConfig,
    snapshots: &mut S,
) -> Result<MaxFlow<W>>
where
    W: Float + Debug,
    S: SnapshotSink<FlowSnapshot<W>> + ?Sized,
{
    let n = graph.vertex_count();
    let (source, sink) = config.terminals(n)?;
    graph.ensure_non_negative()?;

    let capacity = graph.capacity_matrix();
    let mut flow = Array2::<W>::zeros((n, n));
    let mut total = W::zero();
    let mut iteration = 0;

    // While there exists an augmenting path
    loop {
        let search = find_augmenting_path(&capacity, &flow, source, sink);
        let Some(path) = search.path else {
            break;
        };
        if let Some(limit) = config.max_iterations {
            if iteration >= limit {
                return Err(Error::IterationBudgetExhausted { limit });
            }
        }
        iteration += 1;

        let step = |phase, path: &[usize], bottleneck, flow: &Array2<W>, total| FlowSnapshot {
            iteration,
            phase,
            flow: arc_flow(flow),
            total,
            discovered: search.discovered.clone(),
            path: path.to_vec(),
            bottleneck,
            source_side: None,
        };

        snapshots.record(step(FlowPhase::Search, &[], None, &flow, total));
        snapshots.record(step(FlowPhase::Path, &path, None, &flow, total));

        let (arc, amount) = bottleneck(&capacity, &flow, &path);
        snapshots.record(step(FlowPhase::Bottleneck, &path, Some(arc), &flow, total));

        // Update flow along the path
        for pair in path.windows(2) {
            let (u, v) = (pair[0], pair[1]);
            flow[[u, v]] = flow[[u, v]] + amount;
            flow[[v, u]] = flow[[v, u]] - amount; // Reverse edge
        }
        total = total + amount;
        log::trace!(
            "augmentation {}: pushed {:?} along {:?}, bottleneck {:?}",
            iteration,
            amount,
            path,
            arc
        );
        snapshots.record(step(FlowPhase::Augment, &path, Some(arc), &flow, total));
    }

    let source_side = reachable(&capacity, &flow, source);
    let cut: Vec<(usize, usize)> = graph
        .arcs()
        .filter(|&(u, v, c)| c > W::zero() && source_side[u] && !source_side[v])
        .map(|(u, v, _)| (u, v))
        .collect();
    let flow = arc_flow(&flow);

    snapshots.record(FlowSnapshot {
        iteration,
        phase: FlowPhase::Finished,
        flow: flow.clone(),
        total,
        discovered: Vec::new(),
        path: Vec::new(),
        bottleneck: None,
        source_side: Some(source_side.iter().map(|bit| *bit).collect()),
    });
    log::debug!(
        "max flow {:?} from {} to {} after {} augmentations, {} cut arcs",
        total,
        source,
        sink,
        iteration,
        cut.len()
    );

    Ok(MaxFlow {
        source,
        sink,
        total,
        flow,
        source_side,
        cut,
    })
}

/// Positive part of the skew-symmetric flow: what each arc actually carries.
fn arc_flow<W: Float>(flow: &Array2<W>) -> Array2<W> {
    flow.mapv(|f| if f > W::zero() { f } else { W::zero() })
}

struct Search {
    path: Option<Vec<usize>>,
    discovered: Vec<(usize, usize)>,
}

fn find_augmenting_path<W: Float>(
    capacity: &Array2<W>,
    flow: &Array2<W>,
    source: usize,
    sink: usize,
) -> Search {
    let n = capacity.nrows();
    let mut visited = bitvec![0; n];
    let mut parent = vec![None; n];
    let mut discovered = Vec::new();
    let mut queue = VecDeque::new();

    queue.push_back(source);
    visited.set(source, true);

    // BFS to find augmenting path
    while let Some(u) = queue.pop_front() {
        for v in 0..n {
            let residual_capacity = capacity[[u, v]] - flow[[u, v]];
            if !visited[v] && residual_capacity > W::zero() {
                parent[v] = Some(u);
                visited.set(v, true);
                discovered.push((u, v));

                if v == sink {
                    return Search {
                        path: Some(construct_path(&parent, sink)),
                        discovered,
                    };
                }
                queue.push_back(v);
            }
        }
    }
    Search {
        path: None,
        discovered,
    }
}

fn construct_path(parent: &[Option<usize>], sink: usize) -> Vec<usize> {
    let mut path = vec![sink];
    let mut curr = sink;
    while let Some(prev) = parent[curr] {
        path.push(prev);
        curr = prev;
    }
    path.reverse();
    path
}

/// First arc of minimum residual capacity along `path`, and that capacity.
fn bottleneck<W: Float>(
    capacity: &Array2<W>,
    flow: &Array2<W>,
    path: &[usize],
) -> ((usize, usize), W) {
    let mut arc = (path[0], path[0]);
    let mut min_flow = W::infinity();
    for pair in path.windows(2) {
        let (u, v) = (pair[0], pair[1]);
        let residual = capacity[[u, v]] - flow[[u, v]];
        if residual < min_flow {
            min_flow = residual;
            arc = (u, v);
        }
    }
    (arc, min_flow)
}

fn reachable<W: Float>(capacity: &Array2<W>, flow: &Array2<W>, source: usize) -> BitVec {
    let n = capacity.nrows();
    let mut visited = bitvec![0; n];
    let mut queue = VecDeque::from([source]);
    visited.set(source, true);
    while let Some(u) = queue.pop_front() {
        for v in 0..n {
            if !visited[v] && capacity[[u, v]] - flow[[u, v]] > W::zero() {
                visited.set(v, true);
                queue.push_back(v);
            }
        }
    }
    visited
}
