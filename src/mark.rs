//! Mark kinds and mark-level style.
//!
//! A [`Mark`] says how one layer draws its records. Marks carry only style;
//! positions and content come from the layer's encoding channels. Which
//! channels a mark requires is checked when the layer is built.

use crate::color::Rgba;

/// Horizontal text anchoring relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// Anchor is the left edge of the text.
    Left,
    /// Anchor is the horizontal center.
    Center,
    /// Anchor is the right edge.
    Right,
}

/// How a layer renders its records.
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    /// One polyline per color group, records connected in dataset order,
    /// with optional circular point markers at each vertex.
    Line {
        /// Stroke width in pixels.
        stroke_width: f64,
        /// Point marker area in square pixels; `None` draws no markers.
        point_area: Option<f64>,
    },

    /// A reference rule spanning the panel, one per record, positioned by
    /// whichever positional channel is bound (x gives a vertical rule).
    Rule {
        /// Stroke width in pixels.
        stroke_width: f64,
        /// Dash pattern as (on, off) lengths in pixels; `None` is solid.
        dash: Option<(f64, f64)>,
        /// Stroke color.
        color: Rgba,
    },

    /// Free-standing annotation text, one per record, anchored at the
    /// (x, y) channel position with a pixel offset.
    Text {
        /// Horizontal anchoring.
        align: TextAlign,
        /// Horizontal pixel offset from the anchor.
        dx: f64,
        /// Vertical pixel offset from the anchor (positive moves down).
        dy: f64,
        /// Font size in pixels.
        font_size: f64,
        /// Bold weight.
        bold: bool,
        /// Text color.
        color: Rgba,
    },

    /// Vertical bars over a nominal x channel, 0.8 of the band wide,
    /// rising from the baseline to the y channel value.
    Bar {
        /// Corner radius of the bar top, in pixels.
        corner_radius: f64,
        /// Fill override; `None` takes the color channel (or palette default).
        fill: Option<Rgba>,
    },

    /// Per-record labels centered on the x channel position, content from
    /// the text channel.
    Label {
        /// Vertical pixel offset (negative moves above the anchor).
        dy: f64,
        /// Font size in pixels.
        font_size: f64,
        /// Bold weight.
        bold: bool,
        /// Text color.
        color: Rgba,
        /// Fixed y position in data units; `None` anchors at the y channel.
        at_y: Option<f64>,
    },
}

impl Mark {
    /// The mark kind name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Mark::Line { .. } => "line",
            Mark::Rule { .. } => "rule",
            Mark::Text { .. } => "text",
            Mark::Bar { .. } => "bar",
            Mark::Label { .. } => "label",
        }
    }
}

/// Point marker radius for a given marker area.
///
/// Marker size is specified as an area in square pixels; the drawn radius
/// is half the side of the bounding square.
#[must_use]
pub fn point_radius(area: f64) -> f64 {
    area.max(0.0).sqrt() / 2.0
}
