use crate::graph::Graph;
use crate::tree_decomposition::TreeDecomposition;
use std::fmt;
use std::fmt::{Display, Formatter};

pub use clean_and_glue::CleanAndGlue;

mod clean_and_glue;

/// Outcomes of an exact run that do not carry a decomposition. Per-width
/// failures are not errors; the driver simply moves on to the next width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanAndGlueError {
    /// The cancellation flag was observed; partial state is discarded.
    Interrupted,
    /// The next trial width would reach the caller-supplied upper bound, so
    /// the caller's own decomposition of that width cannot be improved upon.
    UpperboundReached(usize),
}

impl Display for CleanAndGlueError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            CleanAndGlueError::Interrupted => write!(f, "search interrupted"),
            CleanAndGlueError::UpperboundReached(width) => {
                write!(f, "upper bound reached at width {}", width)
            }
        }
    }
}

impl std::error::Error for CleanAndGlueError {}

/// Quality a decomposer declares for the decompositions it emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompositionQuality {
    Exact,
}

impl Display for DecompositionQuality {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            DecompositionQuality::Exact => write!(f, "exact"),
        }
    }
}

pub trait ExactSolver<G: Graph>: Sized {
    fn with_graph(graph: &G) -> Self;
    fn with_bounds(graph: &G, lowerbound: usize, upperbound: usize) -> Self;
    fn compute_exact(self) -> Result<TreeDecomposition, CleanAndGlueError>;

    fn decomposition_quality(&self) -> DecompositionQuality {
        DecompositionQuality::Exact
    }
}
