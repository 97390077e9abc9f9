//! Painter capabilities.
//!
//! Some painters composite several layers or can export the surface as an
//! image; a retained native-node painter can do neither. Callers query
//! [`Capabilities`] up front. Invoking an absent operation is a reported
//! no-op, not a failure.

use bitflags::bitflags;
use strum_macros::{Display, EnumIter, IntoStaticStr};
use vellum_common::warning::warn_once;

bitflags! {
    /// Optional painter features.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u8 {
        /// Multiple compositing layers keyed by z-level.
        const LAYERS = 1 << 0;
        /// Rasterizing the surface or a single path to an image.
        const EXPORT = 1 << 1;
    }
}

/// Every optional painter operation, named as hosts call it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
pub enum SurfaceOp {
    /// Look up the layer for a z-level.
    #[strum(serialize = "getLayer")]
    GetLayer,
    /// Insert a layer at a z-level.
    #[strum(serialize = "insertLayer")]
    InsertLayer,
    /// Visit every layer.
    #[strum(serialize = "eachLayer")]
    EachLayer,
    /// Visit the painter's own layers.
    #[strum(serialize = "eachBuildinLayer")]
    EachBuiltinLayer,
    /// Visit host-supplied layers.
    #[strum(serialize = "eachOtherLayer")]
    EachOtherLayer,
    /// List all layers.
    #[strum(serialize = "getLayers")]
    GetLayers,
    /// Change a layer's configuration.
    #[strum(serialize = "modLayer")]
    ModLayer,
    /// Delete a layer.
    #[strum(serialize = "delLayer")]
    DelLayer,
    /// Clear a layer's content.
    #[strum(serialize = "clearLayer")]
    ClearLayer,
    /// Export the surface as an image URL.
    #[strum(serialize = "toDataURL")]
    ToDataUrl,
    /// Rasterize one path to an image.
    #[strum(serialize = "pathToImage")]
    PathToImage,
}

impl SurfaceOp {
    /// The capability this operation belongs to.
    #[must_use]
    pub const fn capability(self) -> Capabilities {
        match self {
            Self::ToDataUrl | Self::PathToImage => Capabilities::EXPORT,
            _ => Capabilities::LAYERS,
        }
    }

    /// The operation's host-facing name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Result of invoking an operation the painter lacks.
///
/// Carries which operation was attempted; nothing was rendered and the native
/// tree is untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unsupported {
    /// The attempted operation.
    pub op: SurfaceOp,
}

impl Unsupported {
    /// Report `op` as unsupported and return the report.
    pub(crate) fn report(op: SurfaceOp) -> Self {
        warn_once("Paint", &Self::message(op));
        Self { op }
    }

    /// The diagnostic emitted for `op`.
    #[must_use]
    pub fn message(op: SurfaceOp) -> String {
        format!("painter does not support method \"{op}\"")
    }
}
