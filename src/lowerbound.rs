use crate::graph::{Graph, MutableGraph};
use std::cmp::max;

pub trait LowerboundHeuristic {
    fn compute<G: MutableGraph>(graph: &G) -> usize;
}

/// Minor-min-width: repeatedly contract a minimum-degree vertex with its
/// minimum-degree neighbor; the largest minimum degree seen is a lower bound
/// on the tree width.
pub struct MinorMinWidth {}

impl LowerboundHeuristic for MinorMinWidth {
    fn compute<G: MutableGraph>(graph: &G) -> usize {
        let mut graph = graph.clone();
        let mut lb = 0;
        loop {
            let v = graph
                .vertices()
                .filter(|v| graph.degree(*v) > 0)
                .min_by_key(|v| graph.degree(*v));
            match v {
                Some(v) => {
                    lb = max(lb, graph.degree(v));
                    let u = graph
                        .neighborhood(v)
                        .min_by_key(|u| graph.degree(*u))
                        .unwrap();
                    graph.contract(v, u);
                }
                None => break,
            }
        }
        lb
    }
}
