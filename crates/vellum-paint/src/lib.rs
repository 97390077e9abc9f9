//! Retained-mode painting for the Vellum renderer.
//!
//! This crate keeps a native node tree in step with a [`SceneStore`]:
//!
//! ```text
//! SceneStore ──display_list──▶ RetainedPainter ──bind──▶ NativeBinding
//!     │                              │
//!     └──add/remove──▶ MembershipBridge ──▶ RenderSurface (container ▶ host)
//! ```
//!
//! Only dirty, visible nodes are re-rendered on [`RetainedPainter::refresh`].
//! The container is built detached and attached to the host once, after the
//! first complete pass, so the host lays out the initial scene a single time.
//!
//! [`SceneStore`]: vellum_scene::SceneStore

mod binding;
mod bridge;
mod capability;
mod config;
mod error;
mod metrics;
mod painter;
mod surface;

pub use binding::{NativeBinding, ShapeBinding};
pub use bridge::MembershipBridge;
pub use capability::{Capabilities, SurfaceOp, Unsupported};
pub use config::SurfaceConfig;
pub use error::{BindError, PaintError};
pub use metrics::{HostMetrics, parse_int10};
pub use painter::RetainedPainter;
pub use surface::RenderSurface;
