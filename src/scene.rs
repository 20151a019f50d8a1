//! Backend-independent display list built from a figure.
//!
//! [`Scene::from_figure`] performs the entire layout pass once: axis domain
//! resolution, tick placement, margins, legend sizing and mark positioning.
//! The result is a flat list of [`SceneNode`]s in logical pixel coordinates
//! (y grows downward) that both the rasterizer and the PDF backend replay
//! without further measurement.

use crate::color::Rgba;
use crate::encode::{BoundColor, BoundPosition, Encoding};
use crate::error::{Error, Result};
use crate::figure::Figure;
use crate::layer::Layer;
use crate::mark::{point_radius, Mark, TextAlign};
use crate::scale::{nice_ticks, BandScale, LinearScale, Scale};

/// Default series color when neither a color channel nor a fill is given.
const FALLBACK_COLOR: Rgba = Rgba::rgb(0x25, 0x63, 0xeb);

/// Axis chrome colors.
const GRID_COLOR: Rgba = Rgba::rgb(0xdd, 0xdd, 0xdd);
const FRAME_COLOR: Rgba = Rgba::rgb(0xcc, 0xcc, 0xcc);
const AXIS_COLOR: Rgba = Rgba::rgb(0x44, 0x44, 0x44);
const LABEL_COLOR: Rgba = Rgba::rgb(0x33, 0x33, 0x33);

const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 56.0;
const MARGIN_TOP: f64 = 16.0;
const TICK_LENGTH: f64 = 5.0;
const LEGEND_GAP: f64 = 12.0;
const LEGEND_SWATCH: f64 = 12.0;
const LEGEND_ROW: f64 = 18.0;

/// One drawing command in logical pixel space.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    /// Filled rectangle, optionally with rounded top corners.
    Rect {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        w: f64,
        /// Height.
        h: f64,
        /// Top corner radius.
        corner_radius: f64,
        /// Fill color.
        fill: Rgba,
    },
    /// Rectangle outline of unit thickness.
    Frame {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        w: f64,
        /// Height.
        h: f64,
        /// Stroke color.
        color: Rgba,
    },
    /// Straight line segment.
    Line {
        /// Start x.
        x0: f64,
        /// Start y.
        y0: f64,
        /// End x.
        x1: f64,
        /// End y.
        y1: f64,
        /// Stroke width.
        width: f64,
        /// Dash pattern (on, off); `None` is solid.
        dash: Option<(f64, f64)>,
        /// Stroke color.
        color: Rgba,
    },
    /// Connected line through all points, in order.
    Polyline {
        /// Vertices.
        points: Vec<(f64, f64)>,
        /// Stroke width.
        width: f64,
        /// Stroke color.
        color: Rgba,
    },
    /// Filled circle.
    Circle {
        /// Center x.
        cx: f64,
        /// Center y.
        cy: f64,
        /// Radius.
        radius: f64,
        /// Fill color.
        color: Rgba,
    },
    /// Text run. For horizontal text `y` is the top edge; for rotated text
    /// the run reads bottom to top and `y` is the anchor along the run.
    Text {
        /// Anchor x.
        x: f64,
        /// Anchor y.
        y: f64,
        /// The text content.
        content: String,
        /// Font size.
        size: f64,
        /// Text color.
        color: Rgba,
        /// Bold weight.
        bold: bool,
        /// Anchoring along the run.
        align: TextAlign,
        /// Rotate 90 degrees counterclockwise.
        rot90: bool,
    },
}

/// A laid-out figure: canvas size, background and draw-ordered nodes.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Canvas width in logical pixels.
    pub width: f64,
    /// Canvas height in logical pixels.
    pub height: f64,
    /// Canvas background.
    pub background: Rgba,
    /// Nodes in draw order.
    pub nodes: Vec<SceneNode>,
}

/// Resolved horizontal axis.
enum XAxis {
    Linear { scale: LinearScale, ticks: Vec<f64> },
    Band(BandScale),
}

impl XAxis {
    fn position(&self, layer: &Layer, record_index: usize) -> Option<f64> {
        let x = layer.encoding().x.as_ref()?;
        let record = layer.dataset().records().get(record_index)?;
        let value = record.get(&x.field)?;
        match self {
            XAxis::Linear { scale, .. } => value.as_number().map(|v| scale.scale(v)),
            XAxis::Band(band) => value.as_text().and_then(|c| band.position(c)),
        }
    }
}

struct Panel {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl Scene {
    /// Lay out a figure into a display list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rendering`] when the figure cannot be laid out, for
    /// example a record whose category is unknown to the shared band scale
    /// or an axis with no resolvable domain.
    pub fn from_figure(figure: &Figure) -> Result<Self> {
        let style = figure.style();

        let mut top = MARGIN_TOP;
        if figure.title().is_some() {
            top += style.title_size * 1.5;
        }
        if figure.subtitle().is_some() {
            top += style.subtitle_size * 1.5;
        }

        let panel = Panel {
            left: MARGIN_LEFT,
            top,
            right: MARGIN_LEFT + f64::from(figure.width()),
            bottom: top + f64::from(figure.height()),
        };

        let legend = legend_source(figure);
        let legend_width = legend.map_or(0.0, |color| {
            let label_chars = color
                .categories
                .iter()
                .map(|c| c.chars().count())
                .chain(color.title.iter().map(|t| t.chars().count()))
                .max()
                .unwrap_or(0);
            LEGEND_GAP
                + LEGEND_SWATCH
                + 6.0
                + label_chars as f64 * style.legend_label_size
        });

        let width = panel.right + MARGIN_RIGHT + legend_width;
        let height = panel.bottom + MARGIN_BOTTOM;

        let x_axis = resolve_x_axis(figure, &panel)?;
        let (y_scale, y_ticks) = resolve_y_axis(figure, &panel)?;

        let mut nodes = Vec::new();

        draw_grid(&mut nodes, figure, &panel, &x_axis, &y_scale, &y_ticks);

        for layer in figure.layers() {
            draw_layer(&mut nodes, layer, &x_axis, &y_scale, &panel)?;
        }

        draw_axes(&mut nodes, figure, &panel, &x_axis, &y_scale, &y_ticks);

        if let Some(color) = legend {
            draw_legend(&mut nodes, figure, &panel, color);
        }

        draw_titles(&mut nodes, figure, &panel);

        Ok(Self { width, height, background: Rgba::WHITE, nodes })
    }
}

/// The color channel that feeds the legend, if any layer carries one.
fn legend_source(figure: &Figure) -> Option<&BoundColor> {
    figure
        .layers()
        .iter()
        .find_map(|layer| layer.encoding().color.as_ref())
}

fn x_channels(figure: &Figure) -> impl Iterator<Item = (&Layer, &BoundPosition)> {
    figure
        .layers()
        .iter()
        .filter_map(|layer| layer.encoding().x.as_ref().map(|x| (layer, x)))
}

fn resolve_x_axis(figure: &Figure, panel: &Panel) -> Result<XAxis> {
    // A nominal channel anywhere makes the whole axis a band axis.
    for (_, x) in x_channels(figure) {
        if let Some(categories) = &x.categories {
            let band = BandScale::new(categories.clone(), (panel.left, panel.right))?;
            return Ok(XAxis::Band(band));
        }
    }

    let domain = quantitative_domain(
        x_channels(figure).map(|(layer, x)| (layer, x)),
        "x",
    )?;
    let scale = LinearScale::new(domain, (panel.left, panel.right))?;
    let ticks = nice_ticks(domain.0, domain.1);
    Ok(XAxis::Linear { scale, ticks })
}

fn resolve_y_axis(figure: &Figure, panel: &Panel) -> Result<(LinearScale, Vec<f64>)> {
    let channels = figure
        .layers()
        .iter()
        .filter_map(|layer| layer.encoding().y.as_ref().map(|y| (layer, y)));
    let domain = quantitative_domain(channels, "y")?;
    // Screen y grows downward.
    let scale = LinearScale::new(domain, (panel.bottom, panel.top))?;
    let ticks = nice_ticks(domain.0, domain.1);
    Ok((scale, ticks))
}

/// Shared quantitative domain: the first explicit domain wins, otherwise
/// the extent of the data across all layers.
fn quantitative_domain<'a>(
    channels: impl Iterator<Item = (&'a Layer, &'a BoundPosition)>,
    axis: &str,
) -> Result<(f64, f64)> {
    let mut extent: Option<(f64, f64)> = None;

    for (layer, channel) in channels {
        if let Some(domain) = channel.domain {
            return Ok(domain);
        }
        for value in layer.dataset().numbers(&channel.field) {
            extent = Some(match extent {
                None => (value, value),
                Some((lo, hi)) => (lo.min(value), hi.max(value)),
            });
        }
    }

    match extent {
        Some((lo, hi)) if hi > lo => Ok((lo, hi)),
        Some((lo, hi)) => Ok((lo - 1.0, hi + 1.0)),
        None => Err(Error::Rendering(format!("no data resolves the {axis} axis"))),
    }
}

fn format_tick(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn draw_grid(
    nodes: &mut Vec<SceneNode>,
    figure: &Figure,
    panel: &Panel,
    x_axis: &XAxis,
    y_scale: &LinearScale,
    y_ticks: &[f64],
) {
    if let XAxis::Linear { scale, ticks } = x_axis {
        for &tick in ticks {
            let px = scale.scale(tick);
            nodes.push(SceneNode::Line {
                x0: px,
                y0: panel.top,
                x1: px,
                y1: panel.bottom,
                width: 1.0,
                dash: None,
                color: GRID_COLOR,
            });
        }
    }

    for &tick in y_ticks {
        let py = y_scale.scale(tick);
        nodes.push(SceneNode::Line {
            x0: panel.left,
            y0: py,
            x1: panel.right,
            y1: py,
            width: 1.0,
            dash: None,
            color: GRID_COLOR,
        });
    }

    if figure.style().show_frame {
        nodes.push(SceneNode::Frame {
            x: panel.left,
            y: panel.top,
            w: panel.right - panel.left,
            h: panel.bottom - panel.top,
            color: FRAME_COLOR,
        });
    }
}

fn draw_layer(
    nodes: &mut Vec<SceneNode>,
    layer: &Layer,
    x_axis: &XAxis,
    y_scale: &LinearScale,
    panel: &Panel,
) -> Result<()> {
    match *layer.mark() {
        Mark::Line { stroke_width, point_area } => {
            draw_line_mark(nodes, layer, x_axis, y_scale, stroke_width, point_area)
        }
        Mark::Rule { stroke_width, dash, color } => {
            draw_rule_mark(nodes, layer, x_axis, y_scale, panel, stroke_width, dash, color)
        }
        Mark::Text { align, dx, dy, font_size, bold, color } => {
            draw_text_mark(nodes, layer, x_axis, y_scale, align, dx, dy, font_size, bold, color)
        }
        Mark::Bar { corner_radius, fill } => {
            draw_bar_mark(nodes, layer, x_axis, y_scale, corner_radius, fill)
        }
        Mark::Label { dy, font_size, bold, color, at_y } => {
            draw_label_mark(nodes, layer, x_axis, y_scale, dy, font_size, bold, color, at_y)
        }
    }
}

fn series_color(encoding: &Encoding, category: Option<&str>) -> Rgba {
    encoding
        .color
        .as_ref()
        .zip(category)
        .and_then(|(color, cat)| color.color_of(cat))
        .unwrap_or(FALLBACK_COLOR)
}

fn y_value(layer: &Layer, record_index: usize) -> Option<f64> {
    let y = layer.encoding().y.as_ref()?;
    layer
        .dataset()
        .records()
        .get(record_index)?
        .get(&y.field)?
        .as_number()
}

fn draw_line_mark(
    nodes: &mut Vec<SceneNode>,
    layer: &Layer,
    x_axis: &XAxis,
    y_scale: &LinearScale,
    stroke_width: f64,
    point_area: Option<f64>,
) -> Result<()> {
    let encoding = layer.encoding();
    let groups: Vec<Option<String>> = match &encoding.color {
        Some(color) => color.categories.iter().cloned().map(Some).collect(),
        None => vec![None],
    };

    for group in groups {
        let mut points = Vec::new();
        for (index, record) in layer.dataset().records().iter().enumerate() {
            if let (Some(color), Some(category)) = (&encoding.color, &group) {
                let member = record
                    .get(&color.field)
                    .and_then(|v| v.as_text())
                    .is_some_and(|c| c == category);
                if !member {
                    continue;
                }
            }

            let px = x_axis
                .position(layer, index)
                .ok_or_else(|| Error::Rendering("line vertex outside the x axis".to_string()))?;
            let py = y_value(layer, index)
                .map(|v| y_scale.scale(v))
                .ok_or_else(|| Error::Rendering("line vertex missing y value".to_string()))?;
            points.push((px, py));
        }

        if points.is_empty() {
            continue;
        }

        let color = series_color(encoding, group.as_deref());
        if points.len() > 1 {
            nodes.push(SceneNode::Polyline {
                points: points.clone(),
                width: stroke_width,
                color,
            });
        }
        if let Some(area) = point_area {
            for &(px, py) in &points {
                nodes.push(SceneNode::Circle {
                    cx: px,
                    cy: py,
                    radius: point_radius(area),
                    color,
                });
            }
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn draw_rule_mark(
    nodes: &mut Vec<SceneNode>,
    layer: &Layer,
    x_axis: &XAxis,
    y_scale: &LinearScale,
    panel: &Panel,
    stroke_width: f64,
    dash: Option<(f64, f64)>,
    color: Rgba,
) -> Result<()> {
    let encoding = layer.encoding();
    for index in 0..layer.dataset().len() {
        if encoding.x.is_some() {
            let px = x_axis
                .position(layer, index)
                .ok_or_else(|| Error::Rendering("rule outside the x axis".to_string()))?;
            nodes.push(SceneNode::Line {
                x0: px,
                y0: panel.top,
                x1: px,
                y1: panel.bottom,
                width: stroke_width,
                dash,
                color,
            });
        } else if let Some(value) = y_value(layer, index) {
            let py = y_scale.scale(value);
            nodes.push(SceneNode::Line {
                x0: panel.left,
                y0: py,
                x1: panel.right,
                y1: py,
                width: stroke_width,
                dash,
                color,
            });
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn draw_text_mark(
    nodes: &mut Vec<SceneNode>,
    layer: &Layer,
    x_axis: &XAxis,
    y_scale: &LinearScale,
    align: TextAlign,
    dx: f64,
    dy: f64,
    font_size: f64,
    bold: bool,
    color: Rgba,
) -> Result<()> {
    let encoding = layer.encoding();
    let text = encoding
        .text
        .as_ref()
        .ok_or_else(|| Error::Rendering("text mark without content".to_string()))?;

    for index in 0..layer.dataset().len() {
        let px = x_axis
            .position(layer, index)
            .ok_or_else(|| Error::Rendering("text anchor outside the x axis".to_string()))?;
        let py = y_value(layer, index)
            .map(|v| y_scale.scale(v))
            .ok_or_else(|| Error::Rendering("text anchor missing y value".to_string()))?;
        let content = text.values.get(index).cloned().unwrap_or_default();

        nodes.push(SceneNode::Text {
            x: px + dx,
            // The anchor is the vertical center of the run.
            y: py + dy - font_size / 2.0,
            content,
            size: font_size,
            color,
            bold,
            align,
            rot90: false,
        });
    }
    Ok(())
}

fn draw_bar_mark(
    nodes: &mut Vec<SceneNode>,
    layer: &Layer,
    x_axis: &XAxis,
    y_scale: &LinearScale,
    corner_radius: f64,
    fill: Option<Rgba>,
) -> Result<()> {
    let XAxis::Band(band) = x_axis else {
        return Err(Error::Rendering("bar mark needs a band x axis".to_string()));
    };

    let encoding = layer.encoding();
    let bar_width = band.band_width() * 0.8;
    // Bars rise from the axis baseline, never below the domain floor.
    let (domain_min, _) = Scale::domain(y_scale);
    let baseline = y_scale.scale(domain_min.max(0.0));

    for (index, record) in layer.dataset().records().iter().enumerate() {
        let category = encoding
            .x
            .as_ref()
            .and_then(|x| record.get(&x.field))
            .and_then(|v| v.as_text())
            .ok_or_else(|| Error::Rendering("bar record without a category".to_string()))?;
        let center = band
            .position(category)
            .ok_or_else(|| Error::Rendering(format!("unknown bar category `{category}`")))?;
        let value = y_value(layer, index)
            .ok_or_else(|| Error::Rendering("bar record without a value".to_string()))?;

        let top = y_scale.scale(value);
        let color = fill.unwrap_or_else(|| series_color(encoding, Some(category)));

        nodes.push(SceneNode::Rect {
            x: center - bar_width / 2.0,
            y: top.min(baseline),
            w: bar_width,
            h: (baseline - top).abs(),
            corner_radius,
            fill: color,
        });
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn draw_label_mark(
    nodes: &mut Vec<SceneNode>,
    layer: &Layer,
    x_axis: &XAxis,
    y_scale: &LinearScale,
    dy: f64,
    font_size: f64,
    bold: bool,
    color: Rgba,
    at_y: Option<f64>,
) -> Result<()> {
    let encoding = layer.encoding();
    let text = encoding
        .text
        .as_ref()
        .ok_or_else(|| Error::Rendering("label mark without content".to_string()))?;

    for index in 0..layer.dataset().len() {
        let px = x_axis
            .position(layer, index)
            .ok_or_else(|| Error::Rendering("label outside the x axis".to_string()))?;
        let value = match at_y {
            Some(fixed) => fixed,
            None => y_value(layer, index)
                .ok_or_else(|| Error::Rendering("label missing y value".to_string()))?,
        };
        let py = y_scale.scale(value);
        let content = text.values.get(index).cloned().unwrap_or_default();

        nodes.push(SceneNode::Text {
            x: px,
            y: py + dy - font_size / 2.0,
            content,
            size: font_size,
            color,
            bold,
            align: TextAlign::Center,
            rot90: false,
        });
    }
    Ok(())
}

fn axis_titles(figure: &Figure) -> (Option<String>, Option<String>) {
    let x_title = figure
        .layers()
        .iter()
        .find_map(|l| l.encoding().x.as_ref().and_then(|x| x.title.clone()));
    let y_title = figure
        .layers()
        .iter()
        .find_map(|l| l.encoding().y.as_ref().and_then(|y| y.title.clone()));
    (x_title, y_title)
}

fn draw_axes(
    nodes: &mut Vec<SceneNode>,
    figure: &Figure,
    panel: &Panel,
    x_axis: &XAxis,
    y_scale: &LinearScale,
    y_ticks: &[f64],
) {
    let style = figure.style();
    let label_size = style.axis_label_size;

    // Domain lines.
    nodes.push(SceneNode::Line {
        x0: panel.left,
        y0: panel.bottom,
        x1: panel.right,
        y1: panel.bottom,
        width: 1.0,
        dash: None,
        color: AXIS_COLOR,
    });
    nodes.push(SceneNode::Line {
        x0: panel.left,
        y0: panel.top,
        x1: panel.left,
        y1: panel.bottom,
        width: 1.0,
        dash: None,
        color: AXIS_COLOR,
    });

    // X ticks and labels.
    match x_axis {
        XAxis::Linear { scale, ticks } => {
            for &tick in ticks {
                let px = scale.scale(tick);
                nodes.push(SceneNode::Line {
                    x0: px,
                    y0: panel.bottom,
                    x1: px,
                    y1: panel.bottom + TICK_LENGTH,
                    width: 1.0,
                    dash: None,
                    color: AXIS_COLOR,
                });
                nodes.push(SceneNode::Text {
                    x: px,
                    y: panel.bottom + TICK_LENGTH + 3.0,
                    content: format_tick(tick),
                    size: label_size,
                    color: LABEL_COLOR,
                    bold: false,
                    align: TextAlign::Center,
                    rot90: false,
                });
            }
        }
        XAxis::Band(band) => {
            for category in band.categories() {
                if let Some(px) = band.position(category) {
                    nodes.push(SceneNode::Text {
                        x: px,
                        y: panel.bottom + TICK_LENGTH + 3.0,
                        content: category.clone(),
                        size: label_size,
                        color: LABEL_COLOR,
                        bold: false,
                        align: TextAlign::Center,
                        rot90: false,
                    });
                }
            }
        }
    }

    // Y ticks and labels.
    for &tick in y_ticks {
        let py = y_scale.scale(tick);
        nodes.push(SceneNode::Line {
            x0: panel.left - TICK_LENGTH,
            y0: py,
            x1: panel.left,
            y1: py,
            width: 1.0,
            dash: None,
            color: AXIS_COLOR,
        });
        nodes.push(SceneNode::Text {
            x: panel.left - TICK_LENGTH - 3.0,
            y: py - label_size / 2.0,
            content: format_tick(tick),
            size: label_size,
            color: LABEL_COLOR,
            bold: false,
            align: TextAlign::Right,
            rot90: false,
        });
    }

    // Axis titles.
    let (x_title, y_title) = axis_titles(figure);
    if let Some(title) = x_title {
        nodes.push(SceneNode::Text {
            x: (panel.left + panel.right) / 2.0,
            y: panel.bottom + TICK_LENGTH + label_size + 14.0,
            content: title,
            size: style.axis_title_size,
            color: LABEL_COLOR,
            bold: false,
            align: TextAlign::Center,
            rot90: false,
        });
    }
    if let Some(title) = y_title {
        nodes.push(SceneNode::Text {
            x: 8.0,
            y: (panel.top + panel.bottom) / 2.0,
            content: title,
            size: style.axis_title_size,
            color: LABEL_COLOR,
            bold: false,
            align: TextAlign::Center,
            rot90: true,
        });
    }
}

fn draw_legend(
    nodes: &mut Vec<SceneNode>,
    figure: &Figure,
    panel: &Panel,
    color: &BoundColor,
) {
    let style = figure.style();
    let x = panel.right + LEGEND_GAP;
    let mut y = panel.top;

    if let Some(title) = &color.title {
        nodes.push(SceneNode::Text {
            x,
            y,
            content: title.clone(),
            size: style.legend_title_size,
            color: LABEL_COLOR,
            bold: true,
            align: TextAlign::Left,
            rot90: false,
        });
        y += LEGEND_ROW;
    }

    for (category, swatch) in color.categories.iter().zip(color.palette.iter()) {
        nodes.push(SceneNode::Rect {
            x,
            y: y + (LEGEND_ROW - LEGEND_SWATCH) / 2.0 - 2.0,
            w: LEGEND_SWATCH,
            h: LEGEND_SWATCH,
            corner_radius: 0.0,
            fill: *swatch,
        });
        nodes.push(SceneNode::Text {
            x: x + LEGEND_SWATCH + 6.0,
            y,
            content: category.clone(),
            size: style.legend_label_size,
            color: LABEL_COLOR,
            bold: false,
            align: TextAlign::Left,
            rot90: false,
        });
        y += LEGEND_ROW;
    }
}

fn draw_titles(nodes: &mut Vec<SceneNode>, figure: &Figure, panel: &Panel) {
    let style = figure.style();
    let center = (panel.left + panel.right) / 2.0;
    let mut y = 6.0;

    if let Some(title) = figure.title() {
        nodes.push(SceneNode::Text {
            x: center,
            y,
            content: title.to_string(),
            size: style.title_size,
            color: Rgba::BLACK,
            bold: true,
            align: TextAlign::Center,
            rot90: false,
        });
        y += style.title_size * 1.5;
    }
    if let Some(subtitle) = figure.subtitle() {
        nodes.push(SceneNode::Text {
            x: center,
            y,
            content: subtitle.to_string(),
            size: style.subtitle_size,
            color: LABEL_COLOR,
            bold: false,
            align: TextAlign::Center,
            rot90: false,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Dataset, Record};
    use crate::encode::{ColorDef, Position, TextDef};
    use crate::figure::FigureStyle;

    fn line_figure() -> Figure {
        let ds = Dataset::new(vec![
            Record::new().field("q", 50.0).field("p", 10.0).field("n", "Low"),
            Record::new().field("q", 70.0).field("p", 40.0).field("n", "Low"),
            Record::new().field("q", 50.0).field("p", 5.0).field("n", "High"),
            Record::new().field("q", 70.0).field("p", 20.0).field("n", "High"),
        ])
        .unwrap();
        let enc = Encoding::builder(&ds)
            .x(Position::quantitative("q").domain(45.0, 95.0).title("Quality"))
            .y(Position::quantitative("p").domain(0.0, 100.0).title("Probability"))
            .color(ColorDef::nominal("n").order(&["Low", "High"]).title("Noise"))
            .build()
            .unwrap();
        let layer = Layer::new(
            ds,
            enc,
            Mark::Line { stroke_width: 2.5, point_area: Some(80.0) },
        )
        .unwrap();
        Figure::builder("lines").size(450, 300).layer(layer).build().unwrap()
    }

    fn bar_figure() -> Figure {
        let ds = Dataset::new(vec![
            Record::new().field("s", "A").field("v", 0.82),
            Record::new().field("s", "B").field("v", 0.60),
        ])
        .unwrap();
        let enc = Encoding::builder(&ds)
            .x(Position::nominal("s"))
            .y(Position::quantitative("v").domain(0.0, 1.0))
            .build()
            .unwrap();
        let layer = Layer::new(
            ds,
            enc,
            Mark::Bar { corner_radius: 3.0, fill: Some(FALLBACK_COLOR) },
        )
        .unwrap();
        Figure::builder("bars")
            .size(400, 300)
            .style(FigureStyle { show_frame: false, ..FigureStyle::default() })
            .layer(layer)
            .build()
            .unwrap()
    }

    #[test]
    fn test_line_scene_has_one_polyline_per_group() {
        let scene = Scene::from_figure(&line_figure()).unwrap();
        let polylines = scene
            .nodes
            .iter()
            .filter(|n| matches!(n, SceneNode::Polyline { .. }))
            .count();
        assert_eq!(polylines, 2);
    }

    #[test]
    fn test_line_scene_has_point_markers() {
        let scene = Scene::from_figure(&line_figure()).unwrap();
        let circles = scene
            .nodes
            .iter()
            .filter(|n| matches!(n, SceneNode::Circle { .. }))
            .count();
        assert_eq!(circles, 4);
    }

    #[test]
    fn test_legend_widens_canvas_beyond_panel() {
        let scene = Scene::from_figure(&line_figure()).unwrap();
        assert!(scene.width > MARGIN_LEFT + 450.0 + MARGIN_RIGHT);
    }

    #[test]
    fn test_legend_entries_in_channel_order() {
        let scene = Scene::from_figure(&line_figure()).unwrap();
        let labels: Vec<&str> = scene
            .nodes
            .iter()
            .filter_map(|n| match n {
                SceneNode::Text { content, .. }
                    if content == "Low" || content == "High" =>
                {
                    Some(content.as_str())
                }
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["Low", "High"]);
    }

    #[test]
    fn test_bar_scene_bars_rise_from_baseline() {
        let scene = Scene::from_figure(&bar_figure()).unwrap();
        let bars: Vec<(f64, f64)> = scene
            .nodes
            .iter()
            .filter_map(|n| match n {
                SceneNode::Rect { y, h, corner_radius, .. } if *corner_radius > 0.0 => {
                    Some((*y, *h))
                }
                _ => None,
            })
            .collect();
        assert_eq!(bars.len(), 2);
        // Both bars end at the same baseline.
        let bottom0 = bars[0].0 + bars[0].1;
        let bottom1 = bars[1].0 + bars[1].1;
        assert!((bottom0 - bottom1).abs() < 0.001);
        // The 0.82 bar is taller than the 0.60 bar.
        assert!(bars[0].1 > bars[1].1);
    }

    #[test]
    fn test_frame_respects_style() {
        let framed = Scene::from_figure(&line_figure()).unwrap();
        assert!(framed.nodes.iter().any(|n| matches!(n, SceneNode::Frame { .. })));

        let unframed = Scene::from_figure(&bar_figure()).unwrap();
        assert!(!unframed.nodes.iter().any(|n| matches!(n, SceneNode::Frame { .. })));
    }

    #[test]
    fn test_axis_titles_present() {
        let scene = Scene::from_figure(&line_figure()).unwrap();
        let has_x = scene.nodes.iter().any(|n| {
            matches!(n, SceneNode::Text { content, rot90: false, .. } if content == "Quality")
        });
        let has_y = scene.nodes.iter().any(|n| {
            matches!(n, SceneNode::Text { content, rot90: true, .. } if content == "Probability")
        });
        assert!(has_x && has_y);
    }

    #[test]
    fn test_explicit_domain_fixes_ticks() {
        let scene = Scene::from_figure(&line_figure()).unwrap();
        // [45, 95] ticks by 10: 50..90 appear as x labels.
        for label in ["50", "70", "90"] {
            assert!(scene.nodes.iter().any(|n| {
                matches!(n, SceneNode::Text { content, .. } if content == label)
            }));
        }
    }
}
