//! Composite figures and figure-global style.
//!
//! A [`Figure`] is an ordered overlay of layers sharing one coordinate
//! system, plus panel dimensions, optional title text and a [`FigureStyle`].
//! Layers draw back-to-front in the order they were added.

use crate::error::{Error, Result};
use crate::layer::Layer;

/// Figure-global typography and chrome settings.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureStyle {
    /// Font family name, carried through to the vector backend.
    pub font_family: String,
    /// Axis tick label size in pixels.
    pub axis_label_size: f64,
    /// Axis title size in pixels.
    pub axis_title_size: f64,
    /// Legend entry label size in pixels.
    pub legend_label_size: f64,
    /// Legend title size in pixels.
    pub legend_title_size: f64,
    /// Figure title size in pixels.
    pub title_size: f64,
    /// Figure subtitle size in pixels.
    pub subtitle_size: f64,
    /// Whether to stroke the panel frame.
    pub show_frame: bool,
}

impl Default for FigureStyle {
    fn default() -> Self {
        Self {
            font_family: "Helvetica".to_string(),
            axis_label_size: 11.0,
            axis_title_size: 12.0,
            legend_label_size: 11.0,
            legend_title_size: 12.0,
            title_size: 14.0,
            subtitle_size: 12.0,
            show_frame: true,
        }
    }
}

/// An ordered overlay of layers with shared axes and global style.
#[derive(Debug, Clone)]
pub struct Figure {
    name: String,
    width: u32,
    height: u32,
    title: Option<String>,
    subtitle: Option<String>,
    style: FigureStyle,
    layers: Vec<Layer>,
}

impl Figure {
    /// Start building a figure with the given name.
    ///
    /// The name identifies the figure in diagnostics and export errors.
    #[must_use]
    pub fn builder(name: &str) -> FigureBuilder {
        FigureBuilder {
            name: name.to_string(),
            width: 450,
            height: 300,
            title: None,
            subtitle: None,
            style: FigureStyle::default(),
            layers: Vec::new(),
        }
    }

    /// The figure name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Panel width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Panel height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The figure title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The figure subtitle, if any.
    #[must_use]
    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    /// The figure-global style.
    #[must_use]
    pub fn style(&self) -> &FigureStyle {
        &self.style
    }

    /// The layers, in draw order (first is bottom-most).
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }
}

/// Builder for [`Figure`].
#[derive(Debug, Clone)]
pub struct FigureBuilder {
    name: String,
    width: u32,
    height: u32,
    title: Option<String>,
    subtitle: Option<String>,
    style: FigureStyle,
    layers: Vec<Layer>,
}

impl FigureBuilder {
    /// Panel dimensions in pixels.
    #[must_use]
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Figure title, drawn above the panel.
    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Subtitle, drawn under the title.
    #[must_use]
    pub fn subtitle(mut self, subtitle: &str) -> Self {
        self.subtitle = Some(subtitle.to_string());
        self
    }

    /// Replace the figure-global style.
    #[must_use]
    pub fn style(mut self, style: FigureStyle) -> Self {
        self.style = style;
        self
    }

    /// Append a layer; layers draw in append order.
    #[must_use]
    pub fn layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Finish the figure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rendering`] if no layers were added or
    /// [`Error::InvalidDimensions`] for a zero-sized panel.
    pub fn build(self) -> Result<Figure> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.layers.is_empty() {
            return Err(Error::Rendering(format!(
                "figure `{}` has no layers",
                self.name
            )));
        }

        Ok(Figure {
            name: self.name,
            width: self.width,
            height: self.height,
            title: self.title,
            subtitle: self.subtitle,
            style: self.style,
            layers: self.layers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::data::{Dataset, Record};
    use crate::encode::{Encoding, Position, TextDef};
    use crate::mark::{Mark, TextAlign};

    fn one_layer() -> Layer {
        let ds = Dataset::new(vec![
            Record::new().field("x", 1.0).field("y", 2.0),
            Record::new().field("x", 2.0).field("y", 3.0),
        ])
        .unwrap();
        let enc = Encoding::builder(&ds)
            .x(Position::quantitative("x"))
            .y(Position::quantitative("y"))
            .build()
            .unwrap();
        Layer::new(ds, enc, Mark::Line { stroke_width: 2.0, point_area: None })
            .unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let fig = Figure::builder("test").layer(one_layer()).build().unwrap();
        assert_eq!(fig.width(), 450);
        assert_eq!(fig.height(), 300);
        assert_eq!(fig.name(), "test");
        assert!(fig.title().is_none());
        assert_eq!(fig.layers().len(), 1);
    }

    #[test]
    fn test_empty_figure_fails() {
        let err = Figure::builder("empty").build().unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_zero_size_fails() {
        let err = Figure::builder("flat")
            .size(450, 0)
            .layer(one_layer())
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { height: 0, .. }));
    }

    #[test]
    fn test_layers_preserve_order() {
        let ds = Dataset::new(vec![Record::new()
            .field("x", 1.0)
            .field("y", 2.0)
            .field("label", "a")])
        .unwrap();
        let enc = || {
            Encoding::builder(&ds)
                .x(Position::quantitative("x"))
                .y(Position::quantitative("y"))
                .text(TextDef::field("label"))
                .build()
                .unwrap()
        };
        let rule = Layer::new(
            ds.clone(),
            enc(),
            Mark::Rule { stroke_width: 1.0, dash: None, color: Rgba::BLACK },
        )
        .unwrap();
        let text = Layer::new(
            ds.clone(),
            enc(),
            Mark::Text {
                align: TextAlign::Left,
                dx: 0.0,
                dy: 0.0,
                font_size: 11.0,
                bold: false,
                color: Rgba::BLACK,
            },
        )
        .unwrap();

        let fig = Figure::builder("stacked")
            .layer(one_layer())
            .layer(rule)
            .layer(text)
            .build()
            .unwrap();
        let names: Vec<&str> = fig.layers().iter().map(|l| l.mark().name()).collect();
        assert_eq!(names, vec!["line", "rule", "text"]);
    }

    #[test]
    fn test_style_defaults_match_paper_typography() {
        let style = FigureStyle::default();
        assert_eq!(style.font_family, "Helvetica");
        assert!((style.axis_label_size - 11.0).abs() < f64::EPSILON);
        assert!((style.axis_title_size - 12.0).abs() < f64::EPSILON);
    }
}
