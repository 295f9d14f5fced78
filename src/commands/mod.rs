pub mod build;
pub mod mirror;
