use thiserror::Error;

/// Errors reported by graph construction and the solvers.
#[derive(Debug, Error)]
pub enum Error {
    /// An edge, terminal or face refers to an index outside the graph.
    #[error("vertex {vertex} is out of range for a graph with {count} vertices")]
    InvalidVertex { vertex: usize, count: usize },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A solver that requires non-negative weights was handed a negative one.
    #[error("negative weight {weight} on edge ({from}, {to})")]
    NegativeWeight { from: usize, to: usize, weight: f64 },

    #[error("negative-weight cycle reachable from the source")]
    NegativeCycle,

    /// A dual shortest-path tree edge has no primal edge mapped to it.
    #[error("dual edge {faces:?} has no mapped primal edge")]
    UnmappedDualEdge { faces: (usize, usize) },

    /// A dual edge maps to a primal edge the primal graph does not contain.
    #[error("dual edge {faces:?} maps to primal edge {edge:?} which is not in the graph")]
    MissingPrimalEdge {
        faces: (usize, usize),
        edge: (usize, usize),
    },

    #[error("dual sink {t_hat} is unreachable from dual source {s_hat}")]
    DisconnectedDual { s_hat: usize, t_hat: usize },

    #[error("augmentation budget of {limit} iterations exhausted")]
    IterationBudgetExhausted { limit: usize },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Malformed graph or dual graph input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::InvalidVertex { .. } | Error::InvalidInput(_))
    }

    /// The dual graph cannot be translated back onto the primal graph.
    pub fn is_mapping(&self) -> bool {
        matches!(
            self,
            Error::UnmappedDualEdge { .. } | Error::MissingPrimalEdge { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::InvalidVertex { vertex: 7, count: 3 };
        assert_eq!(
            err.to_string(),
            "vertex 7 is out of range for a graph with 3 vertices"
        );

        let err = Error::MissingPrimalEdge {
            faces: (0, 2),
            edge: (1, 4),
        };
        assert_eq!(
            err.to_string(),
            "dual edge (0, 2) maps to primal edge (1, 4) which is not in the graph"
        );
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::invalid_input("bad key").is_validation());
        assert!(Error::UnmappedDualEdge { faces: (1, 2) }.is_mapping());
        assert!(!Error::NegativeCycle.is_validation());
        assert!(!Error::NegativeCycle.is_mapping());
    }
}
