//! Service Module
//!
//! Business logic layer of the server.
//! Services validate input, call the remote clients and classify failures.

pub mod analysis;
pub mod shopping;
pub mod tryon;

// Re-export for convenience
pub use analysis as analysis_service;
pub use shopping as shopping_service;
pub use tryon as tryon_service;
