use std::fmt::Debug;

pub trait Graph: Clone + Debug {
    fn order(&self) -> usize;
    fn degree(&self, u: usize) -> usize;
    fn has_edge(&self, u: usize, v: usize) -> bool;
    fn vertices(&self) -> Box<dyn Iterator<Item = usize> + '_>;
    fn neighborhood(&self, u: usize) -> Box<dyn Iterator<Item = usize> + '_>;
}
