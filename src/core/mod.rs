pub mod graph;

pub use graph::{DiGraph, LabelLookup, Node, NodePath};
