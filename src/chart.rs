use palette::{Hsl, IntoColor, Srgb};
use serde::Serialize;

use crate::analysis::DatasetProfile;
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Color ramp
// ---------------------------------------------------------------------------

/// How many leading records feed the trend chart.
pub const TREND_WINDOW: usize = 15;

/// Single hue shared by every series; lightness and saturation are
/// interpolated across the index range.
const RAMP_HUE: f32 = 210.0;

/// Fill and border color of one chart slice or series, as `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SliceColor {
    pub fill: String,
    pub border: String,
}

/// Deterministic colors for `n` categories: index `i` maps to
/// `hsl(210, 75 − 15·i/n, 35 + 40·i/n)`, the border to the same hue with
/// saturation +5 and lightness −12.  Same `(i, n)` → same color, always.
pub fn series_colors(n: usize) -> Vec<SliceColor> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let lightness = 35.0 + (i as f32 * 40.0 / n as f32);
            let saturation = 75.0 - (i as f32 * 15.0 / n as f32);
            SliceColor {
                fill: hsl_hex(RAMP_HUE, saturation, lightness),
                border: hsl_hex(RAMP_HUE, saturation + 5.0, lightness - 12.0),
            }
        })
        .collect()
}

/// Convert an HSL color (percent saturation/lightness) to `#rrggbb`.
fn hsl_hex(hue: f32, saturation: f32, lightness: f32) -> String {
    let hsl = Hsl::new(hue, saturation / 100.0, lightness / 100.0);
    let rgb: Srgb = hsl.into_color();
    format!(
        "#{:02x}{:02x}{:02x}",
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8
    )
}

// ---------------------------------------------------------------------------
// Chart data structures
// ---------------------------------------------------------------------------

/// Labels, values, and per-slice colors for a categorical chart.  The same
/// arrays back the bar, pie, and doughnut renderings of the distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryChart {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub fill: Vec<String>,
    pub border: Vec<String>,
}

/// One line of the trend chart: the raw values of a numeric column over the
/// leading records (missing value → 0, matching the renderer contract).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub name: String,
    pub values: Vec<f64>,
    pub color: String,
}

/// Multi-series line chart over the first [`TREND_WINDOW`] records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendChart {
    pub labels: Vec<String>,
    pub series: Vec<TrendSeries>,
}

/// Everything the chart renderer needs, already flattened.  No statistics
/// are computed here; values are selected from the profile and the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBundle {
    /// Type distribution, for bar/pie/doughnut charts.
    pub distribution: CategoryChart,
    /// Raw parameter trends over the leading records.
    pub trends: TrendChart,
    /// Cross-parameter averages.
    pub averages: CategoryChart,
}

impl ChartBundle {
    /// Project a computed profile into flat chart arrays.
    pub fn build(dataset: &Dataset, profile: &DatasetProfile) -> Self {
        ChartBundle {
            distribution: distribution_chart(profile),
            trends: trend_chart(dataset, profile),
            averages: averages_chart(profile),
        }
    }
}

fn category_chart(labels: Vec<String>, values: Vec<f64>) -> CategoryChart {
    let colors = series_colors(labels.len());
    let (fill, border) = colors.into_iter().map(|c| (c.fill, c.border)).unzip();
    CategoryChart {
        labels,
        values,
        fill,
        border,
    }
}

fn distribution_chart(profile: &DatasetProfile) -> CategoryChart {
    let labels: Vec<String> = profile.distribution.keys().cloned().collect();
    let values: Vec<f64> = profile.distribution.values().map(|&c| c as f64).collect();
    category_chart(labels, values)
}

fn averages_chart(profile: &DatasetProfile) -> CategoryChart {
    let labels: Vec<String> = profile.metrics.iter().map(|m| m.parameter.clone()).collect();
    let values: Vec<f64> = profile.metrics.iter().map(|m| m.average).collect();
    category_chart(labels, values)
}

fn trend_chart(dataset: &Dataset, profile: &DatasetProfile) -> TrendChart {
    let window = &dataset.records[..dataset.len().min(TREND_WINDOW)];

    let labels: Vec<String> = match &profile.roles {
        Some(roles) => window
            .iter()
            .map(|rec| rec.text(&roles.name_column))
            .collect(),
        None => (0..window.len()).map(|i| format!("record {i}")).collect(),
    };

    let colors = series_colors(profile.numeric_columns.len());
    let series = profile
        .numeric_columns
        .iter()
        .zip(colors)
        .map(|(column, color)| TrendSeries {
            name: column.clone(),
            values: window
                .iter()
                .map(|rec| rec.numeric(column).unwrap_or(0.0))
                .collect(),
            color: color.fill,
        })
        .collect();

    TrendChart { labels, series }
}
