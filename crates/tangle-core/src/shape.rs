#![forbid(unsafe_code)]

//! Rendered sub-shape descriptions and the sink that receives them.
//!
//! The edge renderer does not talk to a canvas; it emits [`ShapeSpec`]
//! values into a [`ShapeSink`] and the host maps them onto its backend
//! (SVG, canvas, WebGL). Paths are carried as SVG path strings, the one
//! geometry encoding every backend in this space consumes.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};
use crate::id::{ItemId, ShapeId};

/// What a sub-shape draws.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ShapePayload {
    /// Stroked/filled path in SVG path syntax.
    Path(String),

    /// Axis-aligned rectangle (delegate boxes, node bodies).
    Rect(Rect),

    /// Text anchored at a point.
    Text { position: Point, content: String },

    /// Small circle marker.
    Circle { center: Point, radius: f64 },
}

/// Presentation attributes of a sub-shape.
///
/// Colors are CSS color strings; style resolution beyond these raw values
/// is the host's concern.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShapeStyle {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: f64,
    pub opacity: f64,
    pub line_dash: Option<Vec<f64>>,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            stroke_width: 1.0,
            opacity: 1.0,
            line_dash: None,
        }
    }
}

impl ShapeStyle {
    /// Stroke-only style, the common case for edge paths.
    #[must_use]
    pub fn stroked(color: impl Into<String>, width: f64) -> Self {
        Self {
            stroke: Some(color.into()),
            stroke_width: width,
            ..Self::default()
        }
    }

    /// Fill-only style.
    #[must_use]
    pub fn filled(color: impl Into<String>) -> Self {
        Self {
            fill: Some(color.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    #[must_use]
    pub fn with_line_dash(mut self, dash: Vec<f64>) -> Self {
        self.line_dash = Some(dash);
        self
    }

    #[must_use]
    pub fn with_fill(mut self, color: impl Into<String>) -> Self {
        self.fill = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_stroke(mut self, color: impl Into<String>) -> Self {
        self.stroke = Some(color.into());
        self
    }
}

/// One renderable sub-shape of an item.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShapeSpec {
    pub id: ShapeId,
    pub payload: ShapePayload,
    pub style: ShapeStyle,
}

impl ShapeSpec {
    #[must_use]
    pub fn new(id: ShapeId, payload: ShapePayload) -> Self {
        Self {
            id,
            payload,
            style: ShapeStyle::default(),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }
}

/// Receives rendered sub-shapes for items.
///
/// `upsert_shape` replaces an existing shape with the same id or inserts a
/// new one; `remove_shape` on an absent shape is a no-op. Both properties
/// let the renderer re-emit an edge every frame without tracking what it
/// drew last time.
pub trait ShapeSink {
    fn upsert_shape(&mut self, owner: &ItemId, spec: ShapeSpec);

    fn remove_shape(&mut self, owner: &ItemId, shape: &ShapeId);
}
