//! Surface configuration.

/// How the painter builds its container node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceConfig {
    /// Tag of the container element.
    pub container_tag: String,
    /// Initial inline style of the container, as `cssText`.
    pub container_css: String,
}

impl SurfaceConfig {
    /// Width every surface starts with before the first resize, in pixels.
    pub const DEFAULT_WIDTH: i32 = 300;
    /// Height every surface starts with before the first resize, in pixels.
    pub const DEFAULT_HEIGHT: i32 = 150;
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            container_tag: "div".to_string(),
            container_css: format!(
                "display:inline-block;overflow:hidden;position:relative;width:{}px;height:{}px;",
                Self::DEFAULT_WIDTH,
                Self::DEFAULT_HEIGHT
            ),
        }
    }
}
