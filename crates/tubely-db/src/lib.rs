//! Tubely Database Library
//!
//! Persistence for video records: the [`VideoStore`] seam, its PostgreSQL
//! implementation and an in-memory implementation for tests and local runs.

pub mod memory;
pub mod video;

pub use memory::InMemoryVideoStore;
pub use video::{VideoRepository, VideoStore};
