//! Navigating references between objects
//!
//! Trees and commits point at other objects by address only. These walkers
//! resolve those addresses one decode at a time, so memory stays bounded by
//! what is actually visited:
//!
//! - `ancestry`: commit history, first-parent or all parents, with cycle detection
//! - `tree_walk`: tree entries, optionally descending into sub-trees

pub mod ancestry;
pub mod tree_walk;
