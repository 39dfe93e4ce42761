//! Porcelain commands (user-facing views)
//!
//! - `log`: Show commit history starting from a commit

pub mod log;
