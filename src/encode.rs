//! Declarative field-to-channel encodings.
//!
//! An [`Encoding`] maps dataset fields to visual channels (x, y, color,
//! text). Channel definitions ([`Position`], [`ColorDef`], [`TextDef`]) are
//! declarative values; binding them to a dataset through
//! [`Encoding::builder`] validates everything up front:
//!
//! - every referenced field must exist in the dataset schema,
//! - an explicit category ordering must cover exactly the distinct values
//!   present (a bijection), and
//! - text content is resolved to concrete strings at binding time.
//!
//! Quantitative domains are deliberately permissive: a `[min, max]` domain
//! fixes the axis but never rejects or clamps data values. Out-of-domain
//! points render at their scaled position and may fall outside the panel.

use crate::color::Rgba;
use crate::data::{Dataset, Record, Value};
use crate::error::{Error, Result};

/// Semantic type of an encoded field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Continuous numeric data.
    Quantitative,
    /// Unordered categories.
    Nominal,
    /// Categories with an explicit order.
    Ordinal,
}

/// How categories of a nominal position channel are ordered.
#[derive(Debug, Clone)]
pub enum Sort {
    /// Explicit category list; must be a bijection with the data.
    Explicit(Vec<String>),
    /// Descending by another (quantitative) field's value.
    ByFieldDesc(String),
}

/// A positional channel definition (x or y), unbound.
#[derive(Debug, Clone)]
pub struct Position {
    field: String,
    field_type: FieldType,
    domain: Option<(f64, f64)>,
    title: Option<String>,
    sort: Option<Sort>,
}

impl Position {
    /// A quantitative position channel.
    #[must_use]
    pub fn quantitative(field: &str) -> Self {
        Self {
            field: field.to_string(),
            field_type: FieldType::Quantitative,
            domain: None,
            title: None,
            sort: None,
        }
    }

    /// A nominal (categorical) position channel.
    #[must_use]
    pub fn nominal(field: &str) -> Self {
        Self {
            field: field.to_string(),
            field_type: FieldType::Nominal,
            domain: None,
            title: None,
            sort: None,
        }
    }

    /// Fix the axis domain. Data outside the domain is not rejected.
    #[must_use]
    pub fn domain(mut self, min: f64, max: f64) -> Self {
        self.domain = Some((min, max));
        self
    }

    /// Axis title.
    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Explicit category order (nominal channels).
    #[must_use]
    pub fn sort(mut self, order: &[&str]) -> Self {
        self.sort = Some(Sort::Explicit(order.iter().map(|s| (*s).to_string()).collect()));
        self
    }

    /// Order categories descending by another field's value.
    #[must_use]
    pub fn sort_by_desc(mut self, field: &str) -> Self {
        self.sort = Some(Sort::ByFieldDesc(field.to_string()));
        self
    }
}

/// A color channel definition, unbound.
#[derive(Debug, Clone)]
pub struct ColorDef {
    field: String,
    order: Option<Vec<String>>,
    palette: Vec<Rgba>,
    title: Option<String>,
}

impl ColorDef {
    /// A nominal color channel over the given field.
    #[must_use]
    pub fn nominal(field: &str) -> Self {
        Self {
            field: field.to_string(),
            order: None,
            palette: Vec::new(),
            title: None,
        }
    }

    /// Explicit category order; must be a bijection with the data.
    #[must_use]
    pub fn order(mut self, order: &[&str]) -> Self {
        self.order = Some(order.iter().map(|s| (*s).to_string()).collect());
        self
    }

    /// Color range, applied to categories in order.
    #[must_use]
    pub fn palette(mut self, palette: Vec<Rgba>) -> Self {
        self.palette = palette;
        self
    }

    /// Legend title.
    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }
}

/// Text channel content, unbound.
///
/// Content is either a field reference (with an optional fixed number of
/// decimals for numeric fields) or a pure record-to-string function. Both
/// are evaluated once, at binding time.
pub enum TextDef {
    /// Render a field's value, optionally with fixed decimals.
    Field {
        /// The source field.
        field: String,
        /// Decimal places for numeric values; `None` renders naturally.
        decimals: Option<usize>,
    },
    /// Compute the text from the whole record.
    Computed(Box<dyn Fn(&Record) -> String>),
}

impl TextDef {
    /// Text from a field, rendered naturally.
    #[must_use]
    pub fn field(field: &str) -> Self {
        TextDef::Field { field: field.to_string(), decimals: None }
    }

    /// Numeric text from a field with a fixed number of decimals.
    #[must_use]
    pub fn field_with_decimals(field: &str, decimals: usize) -> Self {
        TextDef::Field { field: field.to_string(), decimals: Some(decimals) }
    }

    /// Text computed from the whole record by a pure function.
    #[must_use]
    pub fn computed(f: impl Fn(&Record) -> String + 'static) -> Self {
        TextDef::Computed(Box::new(f))
    }
}

/// A bound positional channel.
#[derive(Debug, Clone)]
pub struct BoundPosition {
    /// The bound field name.
    pub field: String,
    /// Semantic type.
    pub field_type: FieldType,
    /// Fixed axis domain, if any (quantitative channels).
    pub domain: Option<(f64, f64)>,
    /// Axis title, if any.
    pub title: Option<String>,
    /// Resolved category order (nominal channels).
    pub categories: Option<Vec<String>>,
}

/// A bound color channel: resolved category order plus palette.
#[derive(Debug, Clone)]
pub struct BoundColor {
    /// The bound field name.
    pub field: String,
    /// Categories in legend/palette order.
    pub categories: Vec<String>,
    /// One color per category.
    pub palette: Vec<Rgba>,
    /// Legend title, if any.
    pub title: Option<String>,
}

impl BoundColor {
    /// The color for a category value, if it is known.
    #[must_use]
    pub fn color_of(&self, category: &str) -> Option<Rgba> {
        self.categories
            .iter()
            .position(|c| c == category)
            .and_then(|i| self.palette.get(i).copied())
    }
}

/// A bound text channel: one string per record.
#[derive(Debug, Clone)]
pub struct BoundText {
    /// Rendered text, in record order.
    pub values: Vec<String>,
}

/// A validated encoding bound to a dataset.
#[derive(Debug, Clone, Default)]
pub struct Encoding {
    /// X channel.
    pub x: Option<BoundPosition>,
    /// Y channel.
    pub y: Option<BoundPosition>,
    /// Color channel.
    pub color: Option<BoundColor>,
    /// Text channel.
    pub text: Option<BoundText>,
}

impl Encoding {
    /// Start an encoding bound to `dataset`.
    #[must_use]
    pub fn builder(dataset: &Dataset) -> EncodingBuilder<'_> {
        EncodingBuilder {
            dataset,
            x: None,
            y: None,
            color: None,
            text: None,
        }
    }
}

/// Builder validating channel definitions against one dataset.
pub struct EncodingBuilder<'a> {
    dataset: &'a Dataset,
    x: Option<Position>,
    y: Option<Position>,
    color: Option<ColorDef>,
    text: Option<TextDef>,
}

impl EncodingBuilder<'_> {
    /// Bind the x channel.
    #[must_use]
    pub fn x(mut self, def: Position) -> Self {
        self.x = Some(def);
        self
    }

    /// Bind the y channel.
    #[must_use]
    pub fn y(mut self, def: Position) -> Self {
        self.y = Some(def);
        self
    }

    /// Bind the color channel.
    #[must_use]
    pub fn color(mut self, def: ColorDef) -> Self {
        self.color = Some(def);
        self
    }

    /// Bind the text channel.
    #[must_use]
    pub fn text(mut self, def: TextDef) -> Self {
        self.text = Some(def);
        self
    }

    /// Validate all bindings and produce the immutable [`Encoding`].
    ///
    /// # Errors
    ///
    /// - [`Error::SchemaMismatch`] if a referenced field is absent.
    /// - [`Error::OrderingMismatch`] if an explicit ordering is not a
    ///   bijection with the distinct values present.
    pub fn build(self) -> Result<Encoding> {
        let x = self.x.map(|def| bind_position(self.dataset, def)).transpose()?;
        let y = self.y.map(|def| bind_position(self.dataset, def)).transpose()?;
        let color = self.color.map(|def| bind_color(self.dataset, def)).transpose()?;
        let text = self.text.map(|def| bind_text(self.dataset, def)).transpose()?;

        Ok(Encoding { x, y, color, text })
    }
}

/// Default categorical palette, applied when a [`ColorDef`] gives none.
const DEFAULT_PALETTE: [Rgba; 6] = [
    Rgba::rgb(0x25, 0x63, 0xeb),
    Rgba::rgb(0xdc, 0x26, 0x26),
    Rgba::rgb(0x16, 0xa3, 0x4a),
    Rgba::rgb(0x93, 0x33, 0xea),
    Rgba::rgb(0xea, 0x58, 0x0c),
    Rgba::rgb(0x0d, 0x94, 0x88),
];

fn require_field(dataset: &Dataset, field: &str) -> Result<()> {
    if dataset.has_field(field) {
        Ok(())
    } else {
        Err(Error::SchemaMismatch {
            field: field.to_string(),
            detail: "not present in the bound dataset".to_string(),
        })
    }
}

/// Check that `order` and the distinct values of `field` are the same set.
fn check_bijection(dataset: &Dataset, field: &str, order: &[String]) -> Result<()> {
    let present = dataset.distinct_texts(field);

    let missing: Vec<String> =
        present.iter().filter(|c| !order.contains(c)).cloned().collect();
    let mut extra: Vec<String> =
        order.iter().filter(|c| !present.contains(c)).cloned().collect();
    extra.dedup();

    let duplicated = order.len()
        != order.iter().collect::<std::collections::BTreeSet<_>>().len();

    if missing.is_empty() && extra.is_empty() && !duplicated {
        Ok(())
    } else {
        Err(Error::OrderingMismatch {
            field: field.to_string(),
            missing,
            extra,
        })
    }
}

fn bind_position(dataset: &Dataset, def: Position) -> Result<BoundPosition> {
    require_field(dataset, &def.field)?;

    let categories = match def.field_type {
        FieldType::Quantitative => None,
        FieldType::Nominal | FieldType::Ordinal => {
            Some(resolve_categories(dataset, &def)?)
        }
    };

    Ok(BoundPosition {
        field: def.field,
        field_type: def.field_type,
        domain: def.domain,
        title: def.title,
        categories,
    })
}

fn resolve_categories(dataset: &Dataset, def: &Position) -> Result<Vec<String>> {
    match &def.sort {
        None => Ok(dataset.distinct_texts(&def.field)),
        Some(Sort::Explicit(order)) => {
            check_bijection(dataset, &def.field, order)?;
            Ok(order.clone())
        }
        Some(Sort::ByFieldDesc(key)) => {
            require_field(dataset, key)?;

            let mut pairs: Vec<(String, f64)> = Vec::new();
            for record in dataset.records() {
                let Some(category) = record.get(&def.field).and_then(Value::as_text)
                else {
                    continue;
                };
                if pairs.iter().any(|(c, _)| c == category) {
                    continue;
                }
                let value =
                    record.get(key).and_then(Value::as_number).unwrap_or(f64::MIN);
                pairs.push((category.to_string(), value));
            }

            // Stable sort keeps first-appearance order for ties.
            pairs.sort_by(|a, b| {
                b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal)
            });
            Ok(pairs.into_iter().map(|(c, _)| c).collect())
        }
    }
}

fn bind_color(dataset: &Dataset, def: ColorDef) -> Result<BoundColor> {
    require_field(dataset, &def.field)?;

    let categories = match &def.order {
        Some(order) => {
            check_bijection(dataset, &def.field, order)?;
            order.clone()
        }
        None => dataset.distinct_texts(&def.field),
    };

    let palette: Vec<Rgba> = if def.palette.is_empty() {
        categories
            .iter()
            .enumerate()
            .map(|(i, _)| DEFAULT_PALETTE[i % DEFAULT_PALETTE.len()])
            .collect()
    } else {
        def.palette
            .iter()
            .cycle()
            .take(categories.len())
            .copied()
            .collect()
    };

    Ok(BoundColor {
        field: def.field,
        categories,
        palette,
        title: def.title,
    })
}

fn bind_text(dataset: &Dataset, def: TextDef) -> Result<BoundText> {
    let values = match def {
        TextDef::Field { field, decimals } => {
            require_field(dataset, &field)?;
            dataset
                .records()
                .iter()
                .map(|record| {
                    let value = record.get(&field);
                    match (value, decimals) {
                        (Some(Value::Number(n)), Some(d)) => format!("{n:.d$}"),
                        (Some(v), _) => v.render(),
                        (None, _) => String::new(),
                    }
                })
                .collect()
        }
        TextDef::Computed(f) => dataset.records().iter().map(|r| f(r)).collect(),
    };

    Ok(BoundText { values })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Record;

    fn noise_dataset() -> Dataset {
        Dataset::new(vec![
            Record::new().field("quality", 70.0).field("noise", "Low (SD=15)"),
            Record::new().field("quality", 80.0).field("noise", "Medium (SD=30)"),
            Record::new().field("quality", 90.0).field("noise", "High (SD=45)"),
        ])
        .unwrap()
    }

    fn strategy_dataset() -> Dataset {
        Dataset::new(vec![
            Record::new().field("strategy", "One Excellent").field("expected", 0.56),
            Record::new().field("strategy", "Two Very Good").field("expected", 0.82),
            Record::new().field("strategy", "Two Good").field("expected", 0.57),
            Record::new().field("strategy", "Three Decent").field("expected", 0.60),
        ])
        .unwrap()
    }

    #[test]
    fn test_bind_quantitative_with_domain() {
        let ds = noise_dataset();
        let enc = Encoding::builder(&ds)
            .x(Position::quantitative("quality").domain(45.0, 95.0).title("Q"))
            .build()
            .unwrap();

        let x = enc.x.unwrap();
        assert_eq!(x.domain, Some((45.0, 95.0)));
        assert_eq!(x.title.as_deref(), Some("Q"));
        assert!(x.categories.is_none());
    }

    #[test]
    fn test_missing_field_is_schema_mismatch() {
        let ds = noise_dataset();
        let err = Encoding::builder(&ds)
            .x(Position::quantitative("probability"))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch { ref field, .. } if field == "probability"));
    }

    #[test]
    fn test_color_order_bijection_ok() {
        let ds = noise_dataset();
        let enc = Encoding::builder(&ds)
            .color(
                ColorDef::nominal("noise")
                    .order(&["Low (SD=15)", "Medium (SD=30)", "High (SD=45)"]),
            )
            .build()
            .unwrap();

        let color = enc.color.unwrap();
        assert_eq!(
            color.categories,
            vec!["Low (SD=15)", "Medium (SD=30)", "High (SD=45)"]
        );
        assert_eq!(color.palette.len(), 3);
    }

    #[test]
    fn test_color_order_missing_category_fails() {
        let ds = noise_dataset();
        let err = Encoding::builder(&ds)
            .color(ColorDef::nominal("noise").order(&["Low (SD=15)", "Medium (SD=30)"]))
            .build()
            .unwrap_err();
        match err {
            Error::OrderingMismatch { missing, extra, .. } => {
                assert_eq!(missing, vec!["High (SD=45)".to_string()]);
                assert!(extra.is_empty());
            }
            other => panic!("expected OrderingMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_color_order_extra_category_fails() {
        let ds = noise_dataset();
        let err = Encoding::builder(&ds)
            .color(ColorDef::nominal("noise").order(&[
                "Low (SD=15)",
                "Medium (SD=30)",
                "High (SD=45)",
                "Extreme (SD=60)",
            ]))
            .build()
            .unwrap_err();
        match err {
            Error::OrderingMismatch { missing, extra, .. } => {
                assert!(missing.is_empty());
                assert_eq!(extra, vec!["Extreme (SD=60)".to_string()]);
            }
            other => panic!("expected OrderingMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_color_duplicate_order_entry_fails() {
        let ds = noise_dataset();
        let result = Encoding::builder(&ds)
            .color(ColorDef::nominal("noise").order(&[
                "Low (SD=15)",
                "Low (SD=15)",
                "Medium (SD=30)",
                "High (SD=45)",
            ]))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_nominal_sort_by_desc() {
        let ds = strategy_dataset();
        let enc = Encoding::builder(&ds)
            .x(Position::nominal("strategy").sort_by_desc("expected"))
            .build()
            .unwrap();

        let x = enc.x.unwrap();
        assert_eq!(
            x.categories.unwrap(),
            vec!["Two Very Good", "Three Decent", "Two Good", "One Excellent"]
        );
    }

    #[test]
    fn test_nominal_default_order_is_first_appearance() {
        let ds = strategy_dataset();
        let enc = Encoding::builder(&ds)
            .x(Position::nominal("strategy"))
            .build()
            .unwrap();
        assert_eq!(
            enc.x.unwrap().categories.unwrap()[0],
            "One Excellent"
        );
    }

    #[test]
    fn test_explicit_position_sort_checked() {
        let ds = strategy_dataset();
        let result = Encoding::builder(&ds)
            .x(Position::nominal("strategy").sort(&["Two Good"]))
            .build();
        assert!(matches!(result, Err(Error::OrderingMismatch { .. })));
    }

    #[test]
    fn test_text_with_decimals() {
        let ds = strategy_dataset();
        let enc = Encoding::builder(&ds)
            .text(TextDef::field_with_decimals("expected", 2))
            .build()
            .unwrap();
        assert_eq!(
            enc.text.unwrap().values,
            vec!["0.56", "0.82", "0.57", "0.60"]
        );
    }

    #[test]
    fn test_text_computed_at_binding_time() {
        let ds = strategy_dataset();
        let enc = Encoding::builder(&ds)
            .text(TextDef::computed(|r| {
                format!("E={}", r.get("expected").map_or(String::new(), |v| v.render()))
            }))
            .build()
            .unwrap();
        assert_eq!(enc.text.unwrap().values[1], "E=0.82");
    }

    #[test]
    fn test_text_missing_field_fails() {
        let ds = strategy_dataset();
        let result = Encoding::builder(&ds).text(TextDef::field("label")).build();
        assert!(matches!(result, Err(Error::SchemaMismatch { .. })));
    }

    #[test]
    fn test_color_of() {
        let ds = noise_dataset();
        let enc = Encoding::builder(&ds)
            .color(
                ColorDef::nominal("noise")
                    .order(&["Low (SD=15)", "Medium (SD=30)", "High (SD=45)"])
                    .palette(vec![
                        Rgba::rgb(1, 1, 1),
                        Rgba::rgb(2, 2, 2),
                        Rgba::rgb(3, 3, 3),
                    ]),
            )
            .build()
            .unwrap();

        let color = enc.color.unwrap();
        assert_eq!(color.color_of("Medium (SD=30)"), Some(Rgba::rgb(2, 2, 2)));
        assert_eq!(color.color_of("Unknown"), None);
    }
}
