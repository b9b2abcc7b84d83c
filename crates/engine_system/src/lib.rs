//! # engine_system
//!
//! The "S" in ECS. A system owns the component types constructed for it and
//! drives their instances once per tick.
//!
//! A system is an opaque driver object implementing [`System`]. The scheduler
//! never calls component callbacks itself (apart from the pending `start`
//! batch); it hands the driver a [`Traversal`] over the system's component
//! list and the driver decides what to invoke and in which order.
//!
//! ## Usage
//!
//! ```rust
//! use engine_system::{System, SystemConfig, Traversal};
//!
//! struct EveryOtherTick;
//!
//! impl System for EveryOtherTick {
//!     fn update(&mut self, traversal: &mut Traversal<'_>) -> anyhow::Result<()> {
//!         if traversal.tick() % 2 == 0 {
//!             traversal.update_all();
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let config = SystemConfig::new("sparse");
//! assert_eq!(config.name, "sparse");
//! ```

pub mod config;
pub mod context;
pub mod runner;

pub use config::SystemConfig;
pub use context::Traversal;
pub use runner::{ComponentRunner, System};
