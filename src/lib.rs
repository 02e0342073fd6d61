pub mod config;
pub mod error;
pub mod graph;

pub use config::SolverConfig;
pub use error::{Error, Result};
pub use graph::{
    DualGraph, DualGraphDescription, Graph, GraphDescription, MaxFlow, PlanarFlowCut, Point,
    ShortestPathSolver, ShortestPaths,
};
