//! Chart rendering.
//!
//! Two charts are produced with [`plotters`]: a bar chart of the most frequent
//! k-mers and a scatter marker for the ORI candidate on a genome-length axis.
//!
//! The output format follows the file extension (see [`ChartFormat`]). Both
//! formats carry the same caption, axis descriptions, tick labels and legend.
//! Text is set in DejaVu Sans, embedded in the binary and registered with
//! plotters on first use, so rendering never depends on fonts installed on
//! the host.

use std::{path::Path, sync::OnceLock};

use plotters::{
    coord::Shift,
    prelude::*,
    style::{register_font, FontStyle},
};

use crate::{error::OriError, kmer::KmerFrequency, scan::OriCandidate};

#[cfg(feature = "tracing")]
use tracing::{debug, info};

const KMER_CHART_SIZE: (u32, u32) = (1000, 500);
const ORI_CHART_SIZE: (u32, u32) = (1000, 300);
const BAR_COLOR: RGBColor = RGBColor(135, 206, 235);

const FONT_FAMILY: &str = "sans-serif";
const FONT_DATA: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

static FONT_REGISTERED: OnceLock<bool> = OnceLock::new();

/// Registers the embedded font as plotters' `sans-serif` family, once.
fn ensure_font(path: &Path) -> Result<(), OriError> {
    let registered = *FONT_REGISTERED.get_or_init(|| {
        let ok = register_font(FONT_FAMILY, FontStyle::Normal, FONT_DATA).is_ok();
        #[cfg(feature = "tracing")]
        debug!(ok, "Registered embedded chart font");
        ok
    });
    if registered {
        Ok(())
    } else {
        Err(render_error(path, &"embedded chart font could not be loaded"))
    }
}

/// Image format of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartFormat {
    /// Bitmap image; the encoder is picked from the extension (PNG, BMP, JPEG).
    Raster,
    /// SVG document.
    Vector,
}

impl ChartFormat {
    /// `.svg` selects [`ChartFormat::Vector`], anything else [`ChartFormat::Raster`].
    ///
    /// ```
    /// use orifinder::plot::ChartFormat;
    /// use std::path::Path;
    ///
    /// assert_eq!(ChartFormat::from_path(Path::new("ori.svg")), ChartFormat::Vector);
    /// assert_eq!(ChartFormat::from_path(Path::new("ori.png")), ChartFormat::Raster);
    /// ```
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => Self::Vector,
            _ => Self::Raster,
        }
    }
}

/// Renders a bar chart of k-mer frequencies in the order given.
///
/// Callers normally pass [`KmerTable::top`](crate::kmer::KmerTable::top).
///
/// # Errors
///
/// Returns [`OriError::NoDataToPlot`] if `top` is empty, or
/// [`OriError::Render`] if the chart cannot be drawn or saved.
pub fn render_kmer_chart(top: &[KmerFrequency], path: &Path) -> Result<(), OriError> {
    if top.is_empty() {
        return Err(OriError::NoDataToPlot {
            chart: "k-mer distribution",
        });
    }
    ensure_font(path)?;

    match ChartFormat::from_path(path) {
        ChartFormat::Raster => {
            let root = BitMapBackend::new(path, KMER_CHART_SIZE).into_drawing_area();
            draw_kmer_chart(&root, top)
                .and_then(|()| root.present())
                .map_err(|e| render_error(path, &e))?;
        }
        ChartFormat::Vector => {
            let root = SVGBackend::new(path, KMER_CHART_SIZE).into_drawing_area();
            draw_kmer_chart(&root, top)
                .and_then(|()| root.present())
                .map_err(|e| render_error(path, &e))?;
        }
    }

    #[cfg(feature = "tracing")]
    info!(path = %path.display(), bars = top.len(), "Saved k-mer distribution chart");

    Ok(())
}

/// Renders the ORI candidate as a marker on a `0..genome_len` axis.
///
/// # Errors
///
/// Returns [`OriError::NoDataToPlot`] if `genome_len` is zero, or
/// [`OriError::Render`] if the chart cannot be drawn or saved.
pub fn render_ori_chart(
    candidate: &OriCandidate,
    genome_len: usize,
    path: &Path,
) -> Result<(), OriError> {
    if genome_len == 0 {
        return Err(OriError::NoDataToPlot {
            chart: "ORI candidate",
        });
    }
    ensure_font(path)?;

    match ChartFormat::from_path(path) {
        ChartFormat::Raster => {
            let root = BitMapBackend::new(path, ORI_CHART_SIZE).into_drawing_area();
            draw_ori_chart(&root, candidate.position, genome_len)
                .and_then(|()| root.present())
                .map_err(|e| render_error(path, &e))?;
        }
        ChartFormat::Vector => {
            let root = SVGBackend::new(path, ORI_CHART_SIZE).into_drawing_area();
            draw_ori_chart(&root, candidate.position, genome_len)
                .and_then(|()| root.present())
                .map_err(|e| render_error(path, &e))?;
        }
    }

    #[cfg(feature = "tracing")]
    info!(path = %path.display(), position = candidate.position, "Saved ORI candidate chart");

    Ok(())
}

fn render_error(path: &Path, err: &dyn std::fmt::Display) -> OriError {
    OriError::Render {
        details: err.to_string(),
        path: path.to_path_buf(),
    }
}

fn draw_kmer_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    top: &[KmerFrequency],
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    #[allow(clippy::cast_possible_truncation)]
    let bars = top.len() as u32;
    let y_max = top.iter().map(|f| f.count).max().unwrap_or(0) + 1;

    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .caption(
            format!("Top {} Most Frequent k-mers", top.len()),
            (FONT_FAMILY, 24),
        )
        .x_label_area_size(70)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..bars).into_segmented(), 0u64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(top.len())
        .x_label_formatter(&|value: &SegmentValue<u32>| match value {
            SegmentValue::CenterOf(i) => top
                .get(*i as usize)
                .map(|f| f.kmer.clone())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .x_desc("K-mers")
        .y_desc("Frequency")
        .draw()?;

    chart.draw_series(top.iter().zip(0u32..).map(|(f, i)| {
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(i), 0),
                (SegmentValue::Exact(i + 1), f.count),
            ],
            BAR_COLOR.filled(),
        );
        bar.set_margin(0, 0, 4, 4);
        bar
    }))?;

    Ok(())
}

fn draw_ori_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    position: usize,
    genome_len: usize,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .caption("Detected ORI Region", (FONT_FAMILY, 22))
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0usize..genome_len, 0f64..2f64)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .y_labels(3)
        .x_desc("Genome Position (bp)")
        .y_desc("Detection Marker")
        .draw()?;

    chart
        .draw_series(std::iter::once(Circle::new(
            (position, 1.0),
            8,
            RED.filled(),
        )))?
        .label("Best ORI Candidate")
        .legend(|(x, y)| Circle::new((x, y), 5, RED.filled()));

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()?;

    Ok(())
}
