//! Minimum cut and maximum flow of a planar graph through its dual.
//!
//! Shortest-path distances from the dual source `s_hat` act as face
//! potentials. The dual shortest path from `s_hat` to `t_hat` crosses exactly
//! the primal edges of a minimum cut, and the potential difference across each
//! primal edge is the flow it carries.

use num_traits::Float;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;

use crate::error::{Error, Result};
use crate::graph::dijkstra;
use crate::graph::dual::DualGraph;
use crate::graph::model::Graph;
use crate::graph::snapshot::{Discard, PathSnapshot, PotentialSnapshot, SnapshotSink};

/// Cut and flow recovered from the dual graph.
#[derive(Debug, Clone, Serialize)]
pub struct PlanarFlowCut<W> {
    pub s_hat: usize,
    pub t_hat: usize,
    /// Shortest dual distance from `s_hat` to `t_hat`: the cut capacity.
    pub value: W,
    /// Face potentials; unreachable faces are `+inf`.
    pub potentials: Vec<W>,
    pub parents: Vec<Option<usize>>,
    /// Dual tree edges from `s_hat` to `t_hat`.
    pub dual_cut: Vec<(usize, usize)>,
    /// Primal edges crossed by `dual_cut`, each as `(min, max)`.
    pub cut_edges: BTreeSet<(usize, usize)>,
    /// Directed flow per primal arc; arcs with zero flow are absent.
    #[serde(serialize_with = "arc_list")]
    pub flow: BTreeMap<(usize, usize), W>,
}

impl<W> PlanarFlowCut<W>
where
    W: Float + Debug,
{
    pub fn flow_on(&self, u: usize, v: usize) -> W {
        self.flow.get(&(u, v)).copied().unwrap_or_else(W::zero)
    }

    /// Total primal capacity of the cut edges.
    pub fn cut_capacity(&self, primal: &Graph<W>) -> W {
        self.cut_edges.iter().fold(W::zero(), |acc, &(u, v)| {
            acc + primal
                .weight(u, v)
                .or_else(|| primal.weight(v, u))
                .unwrap_or_else(W::zero)
        })
    }

    /// Flow leaving `v` minus flow entering it.
    pub fn net_outflow(&self, v: usize) -> W {
        self.flow
            .iter()
            .fold(W::zero(), |acc, (&(from, to), &amount)| {
                if from == v {
                    acc + amount
                } else if to == v {
                    acc - amount
                } else {
                    acc
                }
            })
    }
}

fn arc_list<S, W>(
    flow: &BTreeMap<(usize, usize), W>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
    W: Serialize,
{
    serializer.collect_seq(flow.iter().map(|(&(u, v), amount)| (u, v, amount)))
}

/// Forwards the relaxing steps of a dual Dijkstra run as potential snapshots.
struct Relaxations<'a, S: ?Sized> {
    inner: &'a mut S,
}

impl<W, S> SnapshotSink<PathSnapshot<W>> for Relaxations<'_, S>
where
    S: SnapshotSink<PotentialSnapshot<W>> + ?Sized,
{
    fn record(&mut self, snapshot: PathSnapshot<W>) {
        if let (true, Some((_, face))) = (snapshot.relaxed, snapshot.edge) {
            self.inner.record(PotentialSnapshot {
                face,
                potentials: snapshot.distances,
            });
        }
    }
}

pub fn solve<W>(primal: &Graph<W>, dual: &DualGraph<W>) -> Result<PlanarFlowCut<W>>
where
    W: Float + Debug,
{
    run(primal, dual, &mut Discard)
}

/// Computes face potentials, the minimum cut and the induced flow.
///
/// Records one snapshot per potential decrease during the dual search.
///
/// # Errors
/// * `InvalidInput` if `s_hat == t_hat`
/// * `NegativeWeight` if a dual length is negative
/// * `DisconnectedDual` if `t_hat` is unreachable from `s_hat`
/// * `UnmappedDualEdge` if a cut edge of the dual tree has no primal edge
/// * `MissingPrimalEdge` / `InvalidVertex` if a crossing names a primal edge
///   the primal graph lacks
pub fn run<W, S>(
    primal: &Graph<W>,
    dual: &DualGraph<W>,
    snapshots: &mut S,
) -> Result<PlanarFlowCut<W>>
where
    W: Float + Debug,
    S: SnapshotSink<PotentialSnapshot<W>> + ?Sized,
{
    let (s_hat, t_hat) = (dual.s_hat(), dual.t_hat());
    if s_hat == t_hat {
        return Err(Error::invalid_input("dual source and dual sink must differ"));
    }

    let tree = dijkstra::run(dual, s_hat, &mut Relaxations { inner: snapshots })?;
    let value = tree
        .distance(t_hat)
        .ok_or(Error::DisconnectedDual { s_hat, t_hat })?;
    let faces = tree
        .path_to(t_hat)
        .ok_or(Error::DisconnectedDual { s_hat, t_hat })?;
    let dual_cut: Vec<(usize, usize)> = faces.windows(2).map(|w| (w[0], w[1])).collect();

    let mut cut_edges = BTreeSet::new();
    for &(prev, cur) in &dual_cut {
        let (u, v) = dual
            .primal_edge(prev, cur)
            .ok_or(Error::UnmappedDualEdge { faces: (prev, cur) })?;
        check_crossing(primal, (prev, cur), (u, v))?;
        cut_edges.insert((u.min(v), u.max(v)));
    }

    let flow = reconstruct_flow(primal, dual, &tree.distances)?;
    log::debug!(
        "dual cut of value {:?} crosses {} primal edges; {} arcs carry flow",
        value,
        cut_edges.len(),
        flow.len()
    );

    Ok(PlanarFlowCut {
        s_hat,
        t_hat,
        value,
        potentials: tree.distances,
        parents: tree.parents,
        dual_cut,
        cut_edges,
        flow,
    })
}

fn check_crossing<W>(
    primal: &Graph<W>,
    faces: (usize, usize),
    (u, v): (usize, usize),
) -> Result<()>
where
    W: Float + Debug,
{
    primal.check_vertex(u)?;
    primal.check_vertex(v)?;
    if primal.has_edge(u, v) || primal.has_edge(v, u) {
        Ok(())
    } else {
        Err(Error::MissingPrimalEdge {
            faces,
            edge: (u, v),
        })
    }
}

/// Flow across every mapped primal edge from the potential difference of its
/// two faces.
///
/// For a crossing `(a, b) -> (u, v)` face `a` lies left of `u -> v` when the
/// cross product of the edge direction with the vector from the edge midpoint
/// to `a` is positive. `φ(right) - φ(left)` then flows along `u -> v`, or its
/// negation along `v -> u`.
fn reconstruct_flow<W>(
    primal: &Graph<W>,
    dual: &DualGraph<W>,
    potentials: &[W],
) -> Result<BTreeMap<(usize, usize), W>>
where
    W: Float + Debug,
{
    let mut flow = BTreeMap::new();
    for ((a, b), (u, v)) in dual.crossings() {
        check_crossing(primal, (a, b), (u, v))?;

        let positions = primal.positions();
        let (pu, pv) = (positions[u], positions[v]);
        let face = dual.faces()[a];
        let cross = (pv - pu).cross(face - pu.midpoint(pv));
        let (left, right) = if cross > 0.0 { (a, b) } else { (b, a) };

        let (phi_left, phi_right) = (potentials[left], potentials[right]);
        if !phi_left.is_finite() || !phi_right.is_finite() {
            log::warn!(
                "skipping primal edge ({}, {}): face {} or {} has no potential",
                u,
                v,
                left,
                right
            );
            continue;
        }

        let value = phi_right - phi_left;
        if value > W::zero() {
            flow.insert((u, v), value);
        } else if value < W::zero() {
            flow.insert((v, u), -value);
        }
    }
    Ok(flow)
}
