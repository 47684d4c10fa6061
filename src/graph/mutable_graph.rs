use crate::graph::base_graph::Graph;

pub trait MutableGraph: Graph {
    fn new() -> Self;
    fn with_capacity(capacity: usize) -> Self;
    fn add_vertex(&mut self, u: usize);
    fn remove_vertex(&mut self, u: usize);
    fn add_edge(&mut self, u: usize, v: usize);
    fn remove_edge(&mut self, u: usize, v: usize);
    /// Contracts the edge (u, v): v is removed, u inherits its neighborhood.
    fn contract(&mut self, u: usize, v: usize);
}
