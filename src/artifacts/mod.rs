//! Git data structures and algorithms
//!
//! - `objects`: Git object types (blob, tree, commit, tag) and their grammars
//! - `graph`: Lazy walks over the references between objects

pub mod graph;
pub mod objects;
