//! Host element metrics.
//!
//! The content box of the host is what the container fills: the live
//! measured size when the host has been laid out, otherwise the declared
//! `width`/`height` style, minus padding on both sides.

use std::num::FpCategory;

use vellum_dom::{NativeTree, NodeId};

/// Parse the leading base-10 integer of a CSS length (`"12.7px"` → `12`).
///
/// Leading whitespace and a single sign are accepted. Returns `None` when no
/// digit follows.
#[must_use]
pub fn parse_int10(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let (negative, digits) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Size-related state of a host element, read once per resize.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HostMetrics {
    /// Live measured width; `0` when not laid out.
    pub client_width: f64,
    /// Live measured height; `0` when not laid out.
    pub client_height: f64,
    /// Declared `width` style.
    pub declared_width: Option<i64>,
    /// Declared `height` style.
    pub declared_height: Option<i64>,
    /// `padding-top`.
    pub padding_top: Option<i64>,
    /// `padding-right`.
    pub padding_right: Option<i64>,
    /// `padding-bottom`.
    pub padding_bottom: Option<i64>,
    /// `padding-left`.
    pub padding_left: Option<i64>,
}

impl HostMetrics {
    /// Read metrics from the element `host`. Non-elements read as all zero.
    #[must_use]
    pub fn read(tree: &NativeTree, host: NodeId) -> Self {
        let Some(el) = tree.as_element(host) else {
            return Self::default();
        };
        let style = |property: &str| el.style.get(property).and_then(parse_int10);
        let client = el.client.unwrap_or_default();

        Self {
            client_width: client.client_width,
            client_height: client.client_height,
            declared_width: style("width"),
            declared_height: style("height"),
            padding_top: style("padding-top"),
            padding_right: style("padding-right"),
            padding_bottom: style("padding-bottom"),
            padding_left: style("padding-left"),
        }
    }

    /// Content-box width in whole pixels.
    #[must_use]
    pub fn content_width(&self) -> i32 {
        content_extent(
            self.client_width,
            self.declared_width,
            self.padding_left,
            self.padding_right,
        )
    }

    /// Content-box height in whole pixels.
    #[must_use]
    pub fn content_height(&self) -> i32 {
        content_extent(
            self.client_height,
            self.declared_height,
            self.padding_top,
            self.padding_bottom,
        )
    }
}

/// Missing values count as zero; the result truncates toward zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn content_extent(
    measured: f64,
    declared: Option<i64>,
    start: Option<i64>,
    end: Option<i64>,
) -> i32 {
    let outer = if matches!(measured.classify(), FpCategory::Zero | FpCategory::Nan) {
        declared.unwrap_or(0) as f64
    } else {
        measured
    };
    let padding = start.unwrap_or(0) as f64 + end.unwrap_or(0) as f64;
    (outer - padding).trunc() as i32
}
