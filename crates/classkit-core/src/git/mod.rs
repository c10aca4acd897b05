//! Git operations for bulk cloning

pub mod clone;

pub use clone::{clone_repository, CloneAuth};
