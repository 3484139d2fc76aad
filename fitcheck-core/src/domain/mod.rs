//! Core domain types
//!
//! These types describe what the remote services hand back to us (job
//! status reports, shopping results, styling feedback) and are shared by
//! the clients, the HTTP service and the CLI.

pub mod analysis;
pub mod shopping;
pub mod tryon;
