//! Services layer - orchestration logic
//!
//! This module coordinates between domain logic and infrastructure.
//! Services use infrastructure adapters to perform I/O operations.

pub mod build_service;
pub mod mirror_service;
pub mod tags;

// Re-export commonly used types
pub use build_service::BuildService;
pub use mirror_service::{MirrorOutcome, MirrorReport, MirrorService};
pub use tags::TagResolver;
