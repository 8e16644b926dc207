//! Configuration types for Archmap diagram rendering.
//!
//! This module provides the configuration forwarded to the external D2
//! compiler. All types implement [`serde::Deserialize`] for loading from
//! external sources. The engine never interprets these options itself; it
//! only validates them at construction time and passes them on.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration root.
//! - [`RenderConfig`] - Padding, font, [`LayoutEngine`], theme and sketch style.
//!
//! # Example
//!
//! ```
//! # use archmap::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [render]
//!     layout = "elk"
//!     theme = 200
//!     sketch = true
//!     "#,
//! )
//! .expect("valid config");
//!
//! assert_eq!(config.render().theme(), 200);
//! assert!(config.validate().is_ok());
//! ```

use serde::Deserialize;

use archmap_core::layout::LayoutEngine;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,
}

impl AppConfig {
    pub fn new(render: RenderConfig) -> Self {
        Self { render }
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Checks options that deserialization alone cannot reject.
    ///
    /// # Errors
    ///
    /// Returns a description of the first malformed option.
    pub fn validate(&self) -> Result<(), String> {
        self.render.validate()
    }
}

fn default_padding() -> u32 {
    100
}

fn default_compiler() -> String {
    "d2".to_string()
}

/// Options forwarded to the D2 compiler.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// Padding around the rendered diagram, in pixels.
    #[serde(default = "default_padding")]
    padding: u32,

    /// Font used for regular text. Unset means the compiler default.
    #[serde(default)]
    font_family: Option<String>,

    /// Layout algorithm.
    #[serde(default)]
    layout: LayoutEngine,

    /// D2 theme identifier.
    #[serde(default)]
    theme: i64,

    /// Render in hand-drawn sketch style.
    #[serde(default)]
    sketch: bool,

    /// Compiler executable, looked up on `PATH` when not absolute.
    #[serde(default = "default_compiler")]
    compiler: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            padding: default_padding(),
            font_family: None,
            layout: LayoutEngine::default(),
            theme: 0,
            sketch: false,
            compiler: default_compiler(),
        }
    }
}

impl RenderConfig {
    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = Some(font_family.into());
        self
    }

    pub fn with_layout(mut self, layout: LayoutEngine) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_theme(mut self, theme: i64) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_sketch(mut self, sketch: bool) -> Self {
        self.sketch = sketch;
        self
    }

    pub fn with_compiler(mut self, compiler: impl Into<String>) -> Self {
        self.compiler = compiler.into();
        self
    }

    pub fn padding(&self) -> u32 {
        self.padding
    }

    pub fn font_family(&self) -> Option<&str> {
        self.font_family.as_deref()
    }

    pub fn layout(&self) -> LayoutEngine {
        self.layout
    }

    pub fn theme(&self) -> i64 {
        self.theme
    }

    pub fn sketch(&self) -> bool {
        self.sketch
    }

    pub fn compiler(&self) -> &str {
        &self.compiler
    }

    fn validate(&self) -> Result<(), String> {
        if self.compiler.trim().is_empty() {
            return Err("render.compiler must not be empty".to_string());
        }
        if self
            .font_family
            .as_deref()
            .is_some_and(|font| font.trim().is_empty())
        {
            return Err("render.font_family must not be blank when set".to_string());
        }
        Ok(())
    }
}
