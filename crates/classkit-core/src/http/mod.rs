//! HTTP client for the GitHub API

pub mod client;

pub use client::ClassroomApiClient;
