//! Scene graph storage for the Vellum renderer.
//!
//! # Scope
//!
//! This crate provides:
//! - **Scene nodes** - drawable entities with dirty/visibility state and an
//!   optional binding to a native node
//! - **Scene store** - ordered, deduplicated membership with observer hooks
//!   for additions and removals
//! - **Display lists** - the sorted paint order painters iterate
//!
//! The store never interprets a node's [`Shape`]; turning shapes into native
//! nodes is a painter's job.

mod node;
mod shape;
mod store;

pub use node::{SceneNode, SceneNodeId};
pub use shape::Shape;
pub use store::{DisplayList, SceneStore, StoreError, StoreObserver, SubscriptionId};
