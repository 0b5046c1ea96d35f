//! Filesystem resources touched by the engine.
//!
//! Each resource inspects or changes a single path; deciding whether a mutation is safe belongs to the
//! planner, which runs before any resource is touched.
pub mod helpers;
pub mod symlink;
pub mod template;
