//! Output encoders (PNG, PDF) and the exporter.
//!
//! [`Exporter::export`] is the one-call path from a built [`Figure`] to its
//! raster and vector files. Any failure is wrapped in [`Error::Export`] with
//! the figure name and the target path, so callers can report exactly which
//! artifact failed.

pub mod pdf;
pub mod png;

pub use pdf::PdfEncoder;
pub use png::PngEncoder;

use std::path::Path;

use crate::error::{Error, Result};
use crate::figure::Figure;
use crate::render::rasterize;
use crate::scene::Scene;

/// Writes the raster and vector files for a figure.
pub struct Exporter;

impl Exporter {
    /// Render `figure` and write it as PNG (at `scale_factor` oversampling)
    /// and as a single-page PDF.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Export`] naming the figure and the path that failed.
    /// Export is fatal on first failure; nothing is retried.
    pub fn export<P: AsRef<Path>, Q: AsRef<Path>>(
        figure: &Figure,
        png_path: P,
        pdf_path: Q,
        scale_factor: f64,
    ) -> Result<()> {
        let png_path = png_path.as_ref();
        let pdf_path = pdf_path.as_ref();

        let scene =
            Scene::from_figure(figure).map_err(|e| wrap(figure, png_path, e))?;

        let fb = rasterize(&scene, scale_factor).map_err(|e| wrap(figure, png_path, e))?;
        PngEncoder::write_to_file(&fb, png_path).map_err(|e| wrap(figure, png_path, e))?;

        PdfEncoder::write_to_file(&scene, figure.name(), pdf_path)
            .map_err(|e| wrap(figure, pdf_path, e))?;

        Ok(())
    }
}

fn wrap(figure: &Figure, path: &Path, source: Error) -> Error {
    Error::Export {
        figure: figure.name().to_string(),
        path: path.to_path_buf(),
        source: Box::new(source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Dataset, Record};
    use crate::encode::{Encoding, Position};
    use crate::layer::Layer;
    use crate::mark::Mark;

    fn figure() -> Figure {
        let ds = Dataset::new(vec![
            Record::new().field("x", 1.0).field("y", 2.0),
            Record::new().field("x", 2.0).field("y", 5.0),
        ])
        .unwrap();
        let enc = Encoding::builder(&ds)
            .x(Position::quantitative("x"))
            .y(Position::quantitative("y"))
            .build()
            .unwrap();
        let layer =
            Layer::new(ds, enc, Mark::Line { stroke_width: 2.0, point_area: None }).unwrap();
        Figure::builder("tiny").size(120, 80).layer(layer).build().unwrap()
    }

    #[test]
    fn test_export_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("fig.png");
        let pdf = dir.path().join("fig.pdf");

        Exporter::export(&figure(), &png, &pdf, 2.0).unwrap();

        assert!(png.exists());
        assert!(pdf.exists());
        let png_bytes = std::fs::read(&png).unwrap();
        assert_eq!(&png_bytes[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    }

    #[test]
    fn test_export_failure_names_figure_and_path() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("fig.pdf");

        let err = Exporter::export(&figure(), "/no/such/dir/fig.png", &pdf, 2.0)
            .unwrap_err();
        match err {
            Error::Export { figure, path, .. } => {
                assert_eq!(figure, "tiny");
                assert_eq!(path, Path::new("/no/such/dir/fig.png").to_path_buf());
            }
            other => panic!("expected Export, got {other:?}"),
        }
        // The PNG failed first; the PDF is never attempted.
        assert!(!pdf.exists());
    }
}
