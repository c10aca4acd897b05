//! Bulk administrative operations over an organization's repositories

pub mod cloner;
pub mod deleter;

pub use cloner::{BulkCloner, CloneOptions};
pub use deleter::{select_delete_targets, RepoDeleter};
