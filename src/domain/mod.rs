//! Domain layer - pure business logic
//!
//! This module contains business logic with no external I/O.
//! Types and functions here can be unit tested without mocking.

pub mod ecr_login;
pub mod remote;
pub mod tag;

// Re-export commonly used types
pub use ecr_login::EcrLogin;
pub use remote::Remote;
pub use tag::ContainerRef;
