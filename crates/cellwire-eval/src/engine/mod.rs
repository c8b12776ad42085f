//! Cellwire dependency-graph engine
//!
//! Resolves a target cell's execution environment by recursively evaluating
//! its ancestors, with per-request memoization and cycle detection.

pub mod cache;
pub mod graph;
pub mod resolver;

#[cfg(test)]
mod tests;

pub use cache::EnvCache;
pub use graph::{DependencyGraph, Edge, Node};
pub use resolver::{AncestorFailure, Resolution, Resolver, resolve_and_evaluate};
