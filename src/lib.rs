//! # Paperfig
//!
//! Static figure generation for the peer review simulation paper.
//!
//! Builds two publication-quality figures (a quality-vs-noise line chart and
//! a strategy-comparison bar chart) from embedded literal datasets, and
//! exports each as raster (PNG at a configurable oversampling factor) and
//! vector (PDF) output.
//!
//! The building blocks form a small declarative pipeline of immutable values,
//! each validated at construction:
//!
//! ```text
//! Dataset -> Encoding -> Layer -> Figure -> Scene -> {PNG, PDF}
//! ```
//!
//! - [`data::Dataset`]: ordered records with a uniform field set
//! - [`encode::Encoding`]: field-to-channel bindings (x, y, color, text)
//! - [`layer::Layer`]: one mark kind bound to a dataset and an encoding
//! - [`figure::Figure`]: an ordered overlay of layers plus global style
//! - [`output::Exporter`]: writes the raster and vector files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use paperfig::figures;
//! use paperfig::output::Exporter;
//!
//! let fig = figures::quality_noise_figure()?;
//! Exporter::export(&fig, "quality-x-noise.png", "quality-x-noise.pdf", 2.0)?;
//! ```

#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and hex parsing.
pub mod color;

/// Ordered record datasets with schema validation.
pub mod data;

/// Declarative field-to-channel encodings.
pub mod encode;

/// Mark kinds and mark-level style.
pub mod mark;

/// Layers binding marks to data and encodings.
pub mod layer;

/// Composite figures and figure-global style.
pub mod figure;

/// Scale functions for data-to-visual mappings.
pub mod scale;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Rasterization primitives and scene rasterizer.
pub mod render;

/// Backend-independent display list built from a figure.
pub mod scene;

/// Output encoders (PNG, PDF) and the exporter.
pub mod output;

// ============================================================================
// Figure Definitions
// ============================================================================

/// The two fixed paper figures and their literal datasets.
pub mod figures;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for paperfig operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust,ignore
/// use paperfig::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Rgba;
    pub use crate::data::{Dataset, Record, Value};
    pub use crate::encode::{ColorDef, Encoding, FieldType, Position, TextDef};
    pub use crate::error::{Error, Result};
    pub use crate::figure::{Figure, FigureStyle};
    pub use crate::layer::Layer;
    pub use crate::mark::{Mark, TextAlign};
    pub use crate::output::Exporter;
    pub use crate::scale::{BandScale, LinearScale, Scale};
}
