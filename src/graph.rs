pub mod bellman_ford;
pub mod description;
pub mod dijkstra;
pub mod dual;
pub mod edmonds_karp;
pub mod model;
pub mod planar_cut;
pub mod shortest_path;
pub mod snapshot;


pub use bellman_ford::LabelCorrecting;
pub use description::{DualGraphDescription, GraphDescription};
pub use dijkstra::Dijkstra;
pub use dual::{DualEdge, DualGraph};
pub use edmonds_karp::{max_flow, MaxFlow};
pub use model::{Adjacency, Edge, Graph, Point};
pub use planar_cut::PlanarFlowCut;
pub use shortest_path::{ShortestPathSolver, ShortestPaths};
pub use snapshot::{
    Discard, FlowPhase, FlowSnapshot, PathSnapshot, PotentialSnapshot, SnapshotSink,
};
