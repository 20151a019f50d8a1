//! Scale functions for data-to-visual mappings.
//!
//! Scales transform data values to positions. Quantitative axes use
//! [`LinearScale`]; nominal axes use [`BandScale`], which gives every
//! category an equal-width band. Tick placement for quantitative axes is
//! produced by [`nice_ticks`].

use crate::error::{Error, Result};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Linear scale for continuous-to-continuous mapping.
///
/// The mapping is not clamped: values outside the domain extrapolate past
/// the range ends.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain is degenerate.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Result<Self> {
        if (domain.0 - domain.1).abs() < f64::EPSILON {
            return Err(Error::ScaleDomain(
                "domain min and max cannot be equal".to_string(),
            ));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }

}

impl Scale<f64, f64> for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f64, f64) {
        (self.range_min, self.range_max)
    }
}

/// Band scale for nominal-to-position mapping.
///
/// The range is split into one equal band per category, in the order given.
/// Marks center on the band midpoint; bars take a fraction of the band.
#[derive(Debug, Clone)]
pub struct BandScale {
    categories: Vec<String>,
    range_min: f64,
    range_max: f64,
}

impl BandScale {
    /// Create a band scale over the given category order.
    ///
    /// # Errors
    ///
    /// Returns an error if `categories` is empty.
    pub fn new(categories: Vec<String>, range: (f64, f64)) -> Result<Self> {
        if categories.is_empty() {
            return Err(Error::ScaleDomain(
                "band scale requires at least one category".to_string(),
            ));
        }

        Ok(Self { categories, range_min: range.0, range_max: range.1 })
    }

    /// The width of one band.
    #[must_use]
    pub fn band_width(&self) -> f64 {
        (self.range_max - self.range_min) / self.categories.len() as f64
    }

    /// The center position of a category's band, if the category is known.
    #[must_use]
    pub fn position(&self, category: &str) -> Option<f64> {
        let index = self.categories.iter().position(|c| c == category)?;
        Some(self.range_min + (index as f64 + 0.5) * self.band_width())
    }

    /// The categories, in band order.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }
}

/// Tick positions for a quantitative axis, targeting about five intervals.
///
/// The step is 1, 2 or 5 times a power of ten; ticks are the multiples of
/// the step inside `[min, max]`.
#[must_use]
pub fn nice_ticks(min: f64, max: f64) -> Vec<f64> {
    if !(max > min) {
        return Vec::new();
    }

    let raw_step = (max - min) / 5.0;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let normalized = raw_step / magnitude;
    let step = if normalized <= 1.0 {
        magnitude
    } else if normalized <= 2.0 {
        2.0 * magnitude
    } else if normalized <= 5.0 {
        5.0 * magnitude
    } else {
        10.0 * magnitude
    };

    let first = (min / step).ceil() as i64;
    let last = (max / step + 1e-9).floor() as i64;

    (first..=last).map(|i| i as f64 * step).collect()
}
