//! Domain models for the directory.
//!
//! Project, User, and Resource records plus the caller identity used
//! for audit stamping. All models are plain data; validity judgments
//! (`User::is_active_at`) are evaluated at read time, never stored.

pub mod actor;
pub mod project;
pub mod resource;
pub mod user;
