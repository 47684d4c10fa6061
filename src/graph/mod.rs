pub use base_graph::Graph;
pub use bit_graph::BitGraph;
pub use hash_map_graph::HashMapGraph;
pub use mutable_graph::MutableGraph;

mod base_graph;
mod bit_graph;
mod hash_map_graph;
mod mutable_graph;
