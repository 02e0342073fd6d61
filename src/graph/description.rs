//! Serialized graph inputs, in the shape the graph and dual-graph editors save.
//!
//! ```json
//! {"vertices": [[120, 80], [300, 95]], "edges": [[0, 1, 4.0]]}
//! ```
//!
//! ```json
//! {
//!   "dual_vertices": [[200, 20], [210, 160]],
//!   "dual_edges": [[0, 1, 4.0]],
//!   "dual_to_primal_map": {"0,1": "0,1"},
//!   "s_hat": 0,
//!   "t_hat": 1
//! }
//! ```

use num_traits::Float;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::io::Read;

use crate::error::{Error, Result};
use crate::graph::dual::DualGraph;
use crate::graph::model::{Graph, Point};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDescription<W> {
    pub vertices: Vec<Point>,
    pub edges: Vec<(usize, usize, W)>,
}

impl<W> GraphDescription<W>
where
    W: Float + Debug + DeserializeOwned,
{
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn into_graph(self, directed: bool) -> Result<Graph<W>> {
        Graph::build(self.vertices, self.edges, directed)
    }
}

impl<W> From<&Graph<W>> for GraphDescription<W>
where
    W: Float + Debug,
{
    fn from(graph: &Graph<W>) -> Self {
        GraphDescription {
            vertices: graph.positions().to_vec(),
            edges: graph
                .edges()
                .iter()
                .map(|e| (e.from, e.to, e.weight))
                .collect(),
        }
    }
}

/// Dual graph as saved by the face overlay editor.
///
/// Crossing keys and values are comma-joined indices: `"faceA,faceB"` maps to
/// `"u,v"`. `s_hat` and `t_hat` are `null` until the user has marked them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DualGraphDescription<W> {
    pub dual_vertices: Vec<Point>,
    pub dual_edges: Vec<(usize, usize, W)>,
    #[serde(default)]
    pub dual_to_primal_map: BTreeMap<String, String>,
    #[serde(default)]
    pub s_hat: Option<usize>,
    #[serde(default)]
    pub t_hat: Option<usize>,
}

impl<W> DualGraphDescription<W>
where
    W: Float + Debug + DeserializeOwned,
{
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// # Errors
    /// * `InvalidInput` if `s_hat`/`t_hat` is unset or a map entry is malformed
    /// * anything [`DualGraph::build`] rejects
    pub fn into_dual_graph(self) -> Result<DualGraph<W>> {
        let s_hat = self
            .s_hat
            .ok_or_else(|| Error::invalid_input("dual graph has no s_hat"))?;
        let t_hat = self
            .t_hat
            .ok_or_else(|| Error::invalid_input("dual graph has no t_hat"))?;

        let crossings = self
            .dual_to_primal_map
            .iter()
            .map(|(faces, edge)| Ok((parse_pair(faces)?, parse_pair(edge)?)))
            .collect::<Result<Vec<_>>>()?;

        DualGraph::build(self.dual_vertices, self.dual_edges, crossings, s_hat, t_hat)
    }
}

fn parse_pair(text: &str) -> Result<(usize, usize)> {
    let malformed = || Error::invalid_input(format!("expected \"a,b\", found {:?}", text));
    let (a, b) = text.split_once(',').ok_or_else(malformed)?;
    let a = a.trim().parse().map_err(|_| malformed())?;
    let b = b.trim().parse().map_err(|_| malformed())?;
    Ok((a, b))
}
