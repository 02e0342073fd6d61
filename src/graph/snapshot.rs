//! Step-by-step records of solver progress.
//!
//! Solvers write one snapshot per algorithmic step, in step order, to a
//! caller-supplied [`SnapshotSink`]. A renderer can replay the recorded
//! sequence to redraw the search frame by frame.

use ndarray::Array2;
use serde::Serialize;

pub trait SnapshotSink<S> {
    fn record(&mut self, snapshot: S);
}

impl<S> SnapshotSink<S> for Vec<S> {
    fn record(&mut self, snapshot: S) {
        self.push(snapshot);
    }
}

/// Sink that drops every snapshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl<S> SnapshotSink<S> for Discard {
    fn record(&mut self, _snapshot: S) {}
}

/// State of a shortest-path search after one step.
///
/// The first and last snapshots of a run have no `edge`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathSnapshot<W> {
    /// Relaxation pass, counted from 1; `None` for Dijkstra.
    pub pass: Option<usize>,
    /// Finalized vertices in finalization order; empty for label-correcting.
    pub finalized: Vec<usize>,
    /// Arc under examination.
    pub edge: Option<(usize, usize)>,
    /// Whether examining `edge` improved a distance.
    pub relaxed: bool,
    pub distances: Vec<W>,
    pub parents: Vec<Option<usize>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FlowPhase {
    /// Breadth-first search reached the sink.
    Search,
    /// Augmenting path reconstructed.
    Path,
    /// Bottleneck arc identified.
    Bottleneck,
    /// Flow pushed along the path.
    Augment,
    /// No augmenting path is left.
    Finished,
}

/// State of an Edmonds-Karp run after one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowSnapshot<W> {
    /// Augmenting iteration, counted from 1.
    pub iteration: usize,
    pub phase: FlowPhase,
    /// Flow carried by each arc.
    pub flow: Array2<W>,
    pub total: W,
    /// Residual arcs the search discovered, in discovery order.
    pub discovered: Vec<(usize, usize)>,
    pub path: Vec<usize>,
    pub bottleneck: Option<(usize, usize)>,
    /// Vertices reachable from the source in the final residual graph; only
    /// set on [`FlowPhase::Finished`].
    pub source_side: Option<Vec<bool>>,
}

/// Face potentials after one relaxation of the dual search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PotentialSnapshot<W> {
    /// Face whose potential just decreased.
    pub face: usize,
    pub potentials: Vec<W>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_keeps_order() {
        let mut sink: Vec<usize> = Vec::new();
        for i in 0..4 {
            sink.record(i);
        }
        assert_eq!(sink, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_discard_sink() {
        let mut sink = Discard;
        SnapshotSink::<u8>::record(&mut sink, 1);
    }

    #[test]
    fn test_snapshot_serializes() {
        let snapshot = PotentialSnapshot {
            face: 2,
            potentials: vec![0.0, 1.5, 3.0],
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(json, r#"{"face":2,"potentials":[0.0,1.5,3.0]}"#);
    }
}
