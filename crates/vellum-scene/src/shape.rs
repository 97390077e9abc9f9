//! Shape descriptions carried by scene nodes.

use serde::{Deserialize, Serialize};

/// What a scene node draws.
///
/// Geometry is in surface pixels. `fill` is an opaque color string handed to
/// the native binding unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    /// Axis-aligned rectangle.
    Rect {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        width: f64,
        /// Height.
        height: f64,
        /// Fill color.
        #[serde(default)]
        fill: Option<String>,
    },
    /// Circle given by center and radius.
    Circle {
        /// Center x.
        cx: f64,
        /// Center y.
        cy: f64,
        /// Radius.
        r: f64,
        /// Fill color.
        #[serde(default)]
        fill: Option<String>,
    },
    /// A single line of text anchored at its top-left corner.
    Text {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// The text content.
        text: String,
        /// Text color.
        #[serde(default)]
        fill: Option<String>,
    },
}

impl Shape {
    /// The fill color, if any.
    #[must_use]
    pub fn fill(&self) -> Option<&str> {
        match self {
            Self::Rect { fill, .. } | Self::Circle { fill, .. } | Self::Text { fill, .. } => {
                fill.as_deref()
            }
        }
    }
}
