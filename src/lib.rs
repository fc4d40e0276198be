//! Conflict-free academic timetable scheduling engine.
//!
//! Three independent generation strategies sit on top of one shared conflict
//! kernel: a deterministic greedy first-fit, a graph-coloring assignment
//! (Welsh-Powell and DSATUR), and a genetic optimizer. A comparator runs all
//! three against the same input and reports which produced the best result.
//!
//! # Example
//!
//! ```no_run
//! use timetable_engine::repository::InMemoryRepository;
//! use timetable_engine::generator::greedy::generate_greedy;
//! use timetable_engine::types::EngineConfig;
//!
//! let repo = InMemoryRepository::default();
//! let config = EngineConfig::default();
//! let snapshot = repo.snapshot("fall-2026", None);
//! let result = generate_greedy(&repo, &config, &snapshot, "fall-2026", "2026").unwrap();
//! println!("placed {} of {} sessions", result.placed.len(), result.placed.len() + result.unscheduled.len());
//! ```

pub mod error;
pub mod generator;
pub mod kernel;
pub mod parser;
pub mod reporter;
pub mod repository;
pub mod types;

pub use error::{Result, SchedulerError};
