//! Layers binding marks to data and encodings.
//!
//! A [`Layer`] is one dataset, one validated encoding and one mark. Building
//! a layer checks that the encoding carries every channel the mark needs, so
//! a figure composed of valid layers can always be rendered.

use crate::data::Dataset;
use crate::encode::{Encoding, FieldType};
use crate::error::{Error, Result};
use crate::mark::Mark;

/// One mark bound to a dataset and an encoding.
#[derive(Debug, Clone)]
pub struct Layer {
    dataset: Dataset,
    encoding: Encoding,
    mark: Mark,
}

impl Layer {
    /// Bind a mark to a dataset and encoding, checking channel requirements.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleMark`] naming the first missing channel.
    pub fn new(dataset: Dataset, encoding: Encoding, mark: Mark) -> Result<Self> {
        check_channels(&encoding, &mark)?;
        Ok(Self { dataset, encoding, mark })
    }

    /// The layer's dataset.
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// The layer's encoding.
    #[must_use]
    pub fn encoding(&self) -> &Encoding {
        &self.encoding
    }

    /// The layer's mark.
    #[must_use]
    pub fn mark(&self) -> &Mark {
        &self.mark
    }
}

fn missing(mark: &Mark, channel: &str) -> Error {
    Error::IncompatibleMark {
        mark: mark.name().to_string(),
        channel: channel.to_string(),
    }
}

fn check_channels(encoding: &Encoding, mark: &Mark) -> Result<()> {
    match mark {
        Mark::Line { .. } => {
            let x = encoding.x.as_ref().ok_or_else(|| missing(mark, "x"))?;
            let y = encoding.y.as_ref().ok_or_else(|| missing(mark, "y"))?;
            if x.field_type != FieldType::Quantitative {
                return Err(missing(mark, "quantitative x"));
            }
            if y.field_type != FieldType::Quantitative {
                return Err(missing(mark, "quantitative y"));
            }
        }
        Mark::Rule { .. } => {
            if encoding.x.is_none() && encoding.y.is_none() {
                return Err(missing(mark, "x or y"));
            }
        }
        Mark::Text { .. } => {
            if encoding.x.is_none() {
                return Err(missing(mark, "x"));
            }
            if encoding.y.is_none() {
                return Err(missing(mark, "y"));
            }
            if encoding.text.is_none() {
                return Err(missing(mark, "text"));
            }
        }
        Mark::Bar { .. } => {
            let x = encoding.x.as_ref().ok_or_else(|| missing(mark, "x"))?;
            let y = encoding.y.as_ref().ok_or_else(|| missing(mark, "y"))?;
            if x.categories.is_none() {
                return Err(missing(mark, "nominal x"));
            }
            if y.field_type != FieldType::Quantitative {
                return Err(missing(mark, "quantitative y"));
            }
        }
        Mark::Label { at_y, .. } => {
            if encoding.x.is_none() {
                return Err(missing(mark, "x"));
            }
            if encoding.text.is_none() {
                return Err(missing(mark, "text"));
            }
            if at_y.is_none() && encoding.y.is_none() {
                return Err(missing(mark, "y"));
            }
        }
    }
    Ok(())
}
