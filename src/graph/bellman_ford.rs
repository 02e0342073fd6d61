use num_traits::Float;
use std::fmt::Debug;

use crate::error::{Error, Result};
use crate::graph::model::Graph;
use crate::graph::shortest_path::{ShortestPathSolver, ShortestPaths};
use crate::graph::snapshot::{Discard, PathSnapshot, SnapshotSink};

/// Label-correcting (Bellman-Ford) search as a [`ShortestPathSolver`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LabelCorrecting;

impl<W> ShortestPathSolver<W> for LabelCorrecting
where
    W: Float + Debug,
{
    fn name(&self) -> &'static str {
        "label-correcting"
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

/// Computes single-source shortest paths, allowing negative weights.
///
/// # Errors
/// * `InvalidVertex` if `source` is not a vertex
/// * `NegativeCycle` if a negative-weight cycle is reachable from `source`
pub fn shortest_paths<W>(graph: &Graph<W>, source: usize) -> Result<ShortestPaths<W>>
where
    W: Float + Debug,
{
    run(graph, source, &mut Discard)
}

/// Bellman-Ford relaxation, recording one snapshot per arc per pass.
///
/// Performs at most `V - 1` passes over every stored arc in row-major order,
/// stopping after the first pass that relaxes nothing. A final scan that still
/// finds an improving arc reports a negative cycle; snapshots recorded up to
/// that point stay in the sink.
///
/// # Complexity
/// * Time: O(V * E)
/// * Space: O(V + E)
pub fn run<W, S>(graph: &Graph<W>, source: usize, snapshots: &mut S) -> Result<ShortestPaths<W>>
where
    W: Float + Debug,
    S: SnapshotSink<PathSnapshot<W>> + ?Sized,
{
    graph.check_vertex(source)?;

    let n = graph.vertex_count();
    let arcs: Vec<(usize, usize, W)> = graph.arcs().collect();
    let mut paths = ShortestPaths::init(n, source);
    snapshots.record(paths.snapshot(None, &[], None, false));

    let mut passes = 0;
    for pass in 1..n {
        passes = pass;
        let mut changed = false;
        for &(u, v, w) in &arcs {
            let relaxed = paths.relax(u, v, w);
            changed |= relaxed;
            snapshots.record(paths.snapshot(Some(pass), &[], Some((u, v)), relaxed));
        }
        if !changed {
            break;
        }
    }

    if let Some(&(u, v, _)) = arcs
        .iter()
        .find(|&&(u, v, w)| paths.distances[u] + w < paths.distances[v])
    {
        log::debug!(
            "negative cycle from {}: arc ({}, {}) still relaxes after {} passes",
            source,
            u,
            v,
            passes
        );
        return Err(Error::NegativeCycle);
    }

    snapshots.record(paths.snapshot(None, &[], None, false));
    log::debug!(
        "label-correcting from {} settled after {} passes over {} arcs",
        source,
        passes,
        arcs.len()
    );

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::model::Point;

    fn graph(n: usize, edges: Vec<(usize, usize, f64)>) -> Graph<f64> {
        let positions = (0..n).map(|i| Point::new(i as f64, 0.0)).collect();
        Graph::build(positions, edges, true).unwrap()
    }

    #[test]
    fn test_negative_edges_without_cycle() {
        let g = graph(4, vec![(0, 1, 4.0), (0, 2, 5.0), (2, 1, -3.0), (1, 3, 2.0)]);
        let paths = shortest_paths(&g, 0).unwrap();
        assert_eq!(paths.distances, vec![0.0, 2.0, 5.0, 4.0]);
        assert_eq!(paths.path_to(3), Some(vec![0, 2, 1, 3]));
    }

    #[test]
    fn test_negative_cycle() {
        let g = graph(3, vec![(0, 1, 1.0), (1, 2, -3.0), (2, 0, 1.0)]);
        assert!(matches!(shortest_paths(&g, 0), Err(Error::NegativeCycle)));
    }

    #[test]
    fn test_unreachable_negative_cycle_ignored() {
        let g = graph(4, vec![(0, 1, 2.0), (2, 3, -1.0), (3, 2, -1.0)]);
        let paths = shortest_paths(&g, 0).unwrap();
        assert_eq!(paths.distance(1), Some(2.0));
        assert!(!paths.is_reachable(2));
        assert!(!paths.is_reachable(3));
    }

    #[test]
    fn test_snapshots_per_arc_per_pass() {
        let g = graph(3, vec![(0, 1, 1.0), (1, 2, 2.0)]);
        let mut snapshots = Vec::new();
        let paths = run(&g, 0, &mut snapshots).unwrap();
        assert_eq!(paths.distances, vec![0.0, 1.0, 3.0]);

        // initial, two arcs in pass 1, two arcs in the quiet pass 2, final
        assert_eq!(snapshots.len(), 6);
        let tags: Vec<_> = snapshots
            .iter()
            .map(|s| (s.pass, s.edge, s.relaxed))
            .collect();
        assert_eq!(
            tags,
            vec![
                (None, None, false),
                (Some(1), Some((0, 1)), true),
                (Some(1), Some((1, 2)), true),
                (Some(2), Some((0, 1)), false),
                (Some(2), Some((1, 2)), false),
                (None, None, false),
            ]
        );
        assert!(snapshots.iter().all(|s| s.finalized.is_empty()));
    }

    #[test]
    fn test_negative_cycle_keeps_snapshots() {
        let g = graph(3, vec![(0, 1, 1.0), (1, 2, -3.0), (2, 0, 1.0)]);
        let mut snapshots = Vec::new();
        assert!(run(&g, 0, &mut snapshots).is_err());
        // initial snapshot plus three arcs over two passes, no final snapshot
        assert_eq!(snapshots.len(), 7);
        assert!(snapshots.last().unwrap().edge.is_some());
    }

    #[test]
    fn test_single_vertex() {
        let g = graph(1, Vec::new());
        let paths = shortest_paths(&g, 0).unwrap();
        assert_eq!(paths.distances, vec![0.0]);
    }

    #[test]
    fn test_invalid_source() {
        let g = graph(2, vec![(0, 1, 1.0)]);
        assert!(matches!(
            shortest_paths(&g, 2),
            Err(Error::InvalidVertex { vertex: 2, count: 2 })
        ));
    }
}
