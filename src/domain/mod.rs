//! Domain layer - Core business logic
//!
//! Entities describing images and their validated descriptors, the ports
//! (repository traits) the pipeline talks to, and the pure domain services.
//! Nothing in here performs I/O directly.

pub mod entities;
pub mod repositories;
pub mod services;
