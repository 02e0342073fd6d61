use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Terminal selection and limits shared by the flow solvers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Source vertex. The first vertex placed in the editor is `0`.
    pub source: usize,
    /// Sink vertex; `None` selects the last vertex of the graph.
    pub sink: Option<usize>,
    /// Maximum number of augmenting iterations; `None` runs to completion.
    pub max_iterations: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            source: 0,
            sink: None,
            max_iterations: None,
        }
    }
}

impl SolverConfig {
    pub fn new(source: usize, sink: usize) -> Self {
        Self {
            source,
            sink: Some(sink),
            ..Self::default()
        }
    }

    pub fn with_max_iterations(mut self, limit: usize) -> Self {
        self.max_iterations = Some(limit);
        self
    }

    /// Resolves `(source, sink)` for a graph with `count` vertices.
    pub fn terminals(&self, count: usize) -> Result<(usize, usize)> {
        let sink = match self.sink {
            Some(sink) => sink,
            None => count.checked_sub(1).ok_or(Error::InvalidVertex {
                vertex: 0,
                count,
            })?,
        };
        for vertex in [self.source, sink] {
            if vertex >= count {
                return Err(Error::InvalidVertex { vertex, count });
            }
        }
        if self.source == sink {
            return Err(Error::invalid_input("source and sink must differ"));
        }
        Ok((self.source, sink))
    }
}
