use crate::exact::{CleanAndGlue, CleanAndGlueError, DecompositionQuality};
use crate::graph::{Graph, HashMapGraph};
use crate::lowerbound::{LowerboundHeuristic, MinorMinWidth};
use crate::tree_decomposition::TreeDecomposition;
use log::info;
use std::cmp::max;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub struct SolverBuilder {
    apply_lowerbound: bool,
    upper_bound: Option<usize>,
    glue_budget: usize,
    cancellation_flag: Option<Arc<AtomicBool>>,
}

impl SolverBuilder {
    pub fn new() -> Self {
        Self {
            apply_lowerbound: true,
            upper_bound: None,
            glue_budget: usize::MAX,
            cancellation_flag: None,
        }
    }

    impl_setter!(self, apply_lowerbound, bool);
    impl_setter!(self, upper_bound, Option<usize>);
    impl_setter!(self, glue_budget, usize);

    pub fn cancellation_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancellation_flag = Some(flag);
        self
    }

    pub fn build(self) -> Solver {
        Solver {
            apply_lowerbound: self.apply_lowerbound,
            upper_bound: self.upper_bound,
            glue_budget: self.glue_budget,
            cancellation_flag: self.cancellation_flag,
        }
    }
}

impl Default for SolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Solver {
    apply_lowerbound: bool,
    upper_bound: Option<usize>,
    glue_budget: usize,
    cancellation_flag: Option<Arc<AtomicBool>>,
}

impl Solver {
    pub fn decomposition_quality(&self) -> DecompositionQuality {
        DecompositionQuality::Exact
    }

    /// Computes a tree decomposition of minimum width. The result is exact;
    /// the only failures are cancellation and a caller-supplied upper bound
    /// that cannot be beaten.
    pub fn solve(&self, graph: &HashMapGraph) -> Result<TreeDecomposition, CleanAndGlueError> {
        if graph.order() <= 2 {
            let mut td = TreeDecomposition::default();
            td.add_bag(graph.vertices().collect());
            return Ok(td);
        }

        let lowerbound = if self.apply_lowerbound {
            let lb = max(1, MinorMinWidth::compute(graph));
            info!("lower bound {}", lb);
            lb
        } else {
            1
        };

        let mut engine = CleanAndGlue::new(graph)
            .lowerbound(lowerbound)
            .upper_bound(self.upper_bound)
            .glue_budget(self.glue_budget);
        if let Some(flag) = &self.cancellation_flag {
            engine = engine.cancellation_flag(flag.clone());
        }

        let mut td = engine.compute()?;
        td.flatten();
        Ok(td)
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{HashMapGraph, MutableGraph};
    use crate::solver::SolverBuilder;

    fn graph_from(n: usize, edges: &[(usize, usize)]) -> HashMapGraph {
        let mut graph = HashMapGraph::with_capacity(n);
        (0..n).for_each(|v| graph.add_vertex(v));
        for &(u, v) in edges {
            graph.add_edge(u, v);
        }
        graph
    }

    #[test]
    fn solves_path_with_flattened_bags() {
        let graph = graph_from(4, &[(0, 1), (1, 2), (2, 3)]);
        let td = SolverBuilder::new().build().solve(&graph).unwrap();
        td.verify(&graph).unwrap();
        assert_eq!(td.width(), 1);
        assert_eq!(td.bags.len(), 3);
    }

    #[test]
    fn lowerbound_heuristic_does_not_change_result() {
        let graph = graph_from(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        let with_lb = SolverBuilder::new().build().solve(&graph).unwrap();
        let without_lb = SolverBuilder::new()
            .apply_lowerbound(false)
            .build()
            .solve(&graph)
            .unwrap();
        assert_eq!(with_lb.width(), 2);
        assert_eq!(without_lb.width(), 2);
    }

    #[test]
    fn upper_bound_failure_propagates() {
        let graph = graph_from(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        // K4 has width 3, a claimed upper bound of 2 cannot be improved
        let result = SolverBuilder::new()
            .upper_bound(Some(2))
            .build()
            .solve(&graph);
        assert!(result.is_err());
    }
}
