//! The two fixed paper figures and their literal datasets.
//!
//! Every value here is part of the published figures: the simulated
//! acceptance probabilities, the strategy payoffs, the palette and the
//! annotation geometry. Changing them changes the paper.

use crate::color::Rgba;
use crate::data::{Dataset, Record, Value};
use crate::encode::{ColorDef, Encoding, Position, TextDef};
use crate::error::Result;
use crate::figure::{Figure, FigureStyle};
use crate::layer::Layer;
use crate::mark::{Mark, TextAlign};

/// Series palette shared by both figures (blue, purple, red).
const SERIES_HEX: [&str; 3] = ["#2563eb", "#9333ea", "#dc2626"];

/// Annotation grays.
const RULE_HEX: &str = "#888888";
const TEXT_HEX: &str = "#666666";

fn series_palette() -> Result<Vec<Rgba>> {
    SERIES_HEX.iter().map(|hex| Rgba::from_hex(hex)).collect()
}

/// Simulated acceptance probability by true quality and reviewer noise.
pub fn quality_noise_data() -> Result<Dataset> {
    let rows = [
        (50.0, "Low (SD=15)", 0.2, 1),
        (60.0, "Low (SD=15)", 2.8, 1),
        (70.0, "Low (SD=15)", 26.8, 1),
        (80.0, "Low (SD=15)", 66.7, 1),
        (90.0, "Low (SD=15)", 93.9, 1),
        (50.0, "Medium (SD=30)", 3.4, 2),
        (60.0, "Medium (SD=30)", 11.0, 2),
        (70.0, "Medium (SD=30)", 24.3, 2),
        (80.0, "Medium (SD=30)", 46.1, 2),
        (90.0, "Medium (SD=30)", 67.7, 2),
        (50.0, "High (SD=45)", 7.0, 3),
        (60.0, "High (SD=45)", 13.6, 3),
        (70.0, "High (SD=45)", 23.8, 3),
        (80.0, "High (SD=45)", 37.6, 3),
        (90.0, "High (SD=45)", 51.6, 3),
    ];

    Dataset::new(
        rows.iter()
            .map(|&(quality, noise, probability, order)| {
                Record::new()
                    .field("quality", quality)
                    .field("noise", noise)
                    .field("probability", probability)
                    .field("order", order)
            })
            .collect(),
    )
}

/// Expected publications per research strategy at fixed total effort.
pub fn strategy_data() -> Result<Dataset> {
    let rows = [
        ("Two Very Good", 0.82, 2, 78),
        ("Three Decent", 0.60, 3, 68),
        ("Two Good", 0.57, 2, 72),
        ("One Excellent", 0.56, 1, 85),
    ];

    Dataset::new(
        rows.iter()
            .map(|&(strategy, expected, papers, quality)| {
                Record::new()
                    .field("strategy", strategy)
                    .field("expected", expected)
                    .field("papers", papers)
                    .field("quality", quality)
            })
            .collect(),
    )
}

/// Figure 1: acceptance probability against true quality, one line per
/// reviewer noise band, with a dashed threshold rule at quality 70.
pub fn quality_noise_figure() -> Result<Figure> {
    let data = quality_noise_data()?;

    let lines = Layer::new(
        data.clone(),
        Encoding::builder(&data)
            .x(Position::quantitative("quality")
                .domain(45.0, 95.0)
                .title("True Paper Quality"))
            .y(Position::quantitative("probability")
                .domain(0.0, 100.0)
                .title("Acceptance Probability (%)"))
            .color(
                ColorDef::nominal("noise")
                    .order(&["Low (SD=15)", "Medium (SD=30)", "High (SD=45)"])
                    .palette(series_palette()?)
                    .title("Reviewer Noise"),
            )
            .build()?,
        Mark::Line { stroke_width: 2.5, point_area: Some(80.0) },
    )?;

    let rule_data = Dataset::new(vec![Record::new().field("x", 70.0)])?;
    let threshold_rule = Layer::new(
        rule_data.clone(),
        Encoding::builder(&rule_data)
            .x(Position::quantitative("x"))
            .build()?,
        Mark::Rule {
            stroke_width: 1.5,
            dash: Some((6.0, 4.0)),
            color: Rgba::from_hex(RULE_HEX)?,
        },
    )?;

    let label_data = Dataset::new(vec![Record::new()
        .field("x", 70.0)
        .field("y", 92.0)
        .field("text", "Threshold")])?;
    let threshold_label = Layer::new(
        label_data.clone(),
        Encoding::builder(&label_data)
            .x(Position::quantitative("x"))
            .y(Position::quantitative("y"))
            .text(TextDef::field("text"))
            .build()?,
        Mark::Text {
            align: TextAlign::Left,
            dx: 5.0,
            dy: 0.0,
            font_size: 11.0,
            bold: false,
            color: Rgba::from_hex(TEXT_HEX)?,
        },
    )?;

    Figure::builder("quality-x-noise")
        .size(450, 300)
        .title("How Noise Redistributes Acceptance")
        .subtitle("Good papers lose acceptance probability, bad papers gain")
        .layer(lines)
        .layer(threshold_rule)
        .layer(threshold_label)
        .build()
}

/// Figure 2: expected publications per strategy, bars sorted by payoff,
/// value labels above the bars and composition labels inside them.
pub fn strategy_figure() -> Result<Figure> {
    let data = strategy_data()?;
    let palette = series_palette()?;

    let x = || {
        Position::nominal("strategy")
            .sort_by_desc("expected")
            .title("Research Strategy (Fixed Total Effort)")
    };

    let bars = Layer::new(
        data.clone(),
        Encoding::builder(&data)
            .x(x())
            .y(Position::quantitative("expected")
                .domain(0.0, 1.0)
                .title("Expected Publications"))
            .build()?,
        Mark::Bar { corner_radius: 3.0, fill: Some(palette[0]) },
    )?;

    let value_labels = Layer::new(
        data.clone(),
        Encoding::builder(&data)
            .x(x())
            .y(Position::quantitative("expected"))
            .text(TextDef::field_with_decimals("expected", 2))
            .build()?,
        Mark::Label {
            dy: -8.0,
            font_size: 12.0,
            bold: true,
            color: Rgba::BLACK,
            at_y: None,
        },
    )?;

    let info_labels = Layer::new(
        data.clone(),
        Encoding::builder(&data)
            .x(x())
            .text(TextDef::computed(|record| {
                let papers = record
                    .get("papers")
                    .and_then(Value::as_number)
                    .unwrap_or_default();
                let quality = record
                    .get("quality")
                    .and_then(Value::as_number)
                    .unwrap_or_default();
                let plural = if papers > 1.0 { "s" } else { "" };
                format!("{papers:.0} paper{plural}, Q={quality:.0}")
            }))
            .build()?,
        Mark::Label {
            dy: 0.0,
            font_size: 10.0,
            bold: false,
            color: Rgba::WHITE,
            at_y: Some(0.08),
        },
    )?;

    Figure::builder("strategy-comparison")
        .size(400, 300)
        .title("Perverse Incentives: Quantity Over Quality")
        .subtitle("Lower quality strategy yields 46% more expected publications")
        .style(FigureStyle { show_frame: false, ..FigureStyle::default() })
        .layer(bars)
        .layer(value_labels)
        .layer(info_labels)
        .build()
}
