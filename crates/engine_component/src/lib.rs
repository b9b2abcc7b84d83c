//! # engine_component
//!
//! The "C" in ECS: what a component is, where its instances live and what a
//! lifecycle callback may touch.
//!
//! This crate provides:
//!
//! - [`Component`] trait, the contract every component type satisfies.
//! - [`ComponentRegistry`], per-type slot pools keyed by [`ComponentTypeId`].
//! - [`EntityRegistry`], live entities and their ordered component lists.
//! - [`Commands`], the deferred structural change queue.
//! - [`Context`], the view of the world handed to every callback.
//! - [`Resources`], type-keyed world singletons.

pub mod command;
pub mod component;
pub mod config;
pub mod context;
pub mod entity;
pub mod error;
pub mod id;
pub(crate) mod pool;
pub mod registry;
pub mod resource;

pub use command::{Command, Commands};
pub use component::{Component, ComponentHeader, ComponentType, ComponentTypeId, Phase};
pub use config::EcsConfig;
pub use context::{Context, Services};
pub use entity::{Entity, EntityRecord, EntityRegistry};
pub use error::EcsError;
pub use id::{IdAllocator, InstanceId, SystemId, fnv1a};
pub use registry::ComponentRegistry;
pub use resource::Resources;
