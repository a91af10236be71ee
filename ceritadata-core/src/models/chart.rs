//! Chart types, configuration, and data.
//!
//! The backend stores `chart_config` and `chart_data` as opaque JSON blobs
//! shaped for the rendering library. On the client side these are typed:
//! [`DatasetStyle`] is a tagged union keyed by chart family (proportional
//! charts carry a slice palette, everything else a single stroke/fill
//! pair), and the blob shape only exists at the [`Dataset::to_payload`] /
//! [`ChartData::from_payload`] boundary.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::CoreError;

// ============================================================================
// Chart Type
// ============================================================================

/// Supported chart types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    /// Line chart, for trends over time.
    Line,
    /// Bar chart, horizontal comparison.
    Bar,
    /// Column chart, vertical comparison.
    Column,
    /// Pie chart, proportions.
    Pie,
    /// Area chart, trends with filled area.
    Area,
    /// Scatter plot, correlations.
    Scatter,
}

impl ChartType {
    /// Returns the display name for this chart type.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Line => "Line Chart",
            Self::Bar => "Bar Chart",
            Self::Column => "Column Chart",
            Self::Pie => "Pie Chart",
            Self::Area => "Area Chart",
            Self::Scatter => "Scatter Plot",
        }
    }

    /// Returns the wire name for this chart type (lowercase).
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Bar => "bar",
            Self::Column => "column",
            Self::Pie => "pie",
            Self::Area => "area",
            Self::Scatter => "scatter",
        }
    }

    /// Returns all chart types.
    pub fn all() -> &'static [ChartType] {
        &[
            Self::Line,
            Self::Bar,
            Self::Column,
            Self::Pie,
            Self::Area,
            Self::Scatter,
        ]
    }

    /// True for charts that show parts of a whole and color each slice
    /// individually.
    pub fn is_proportional(&self) -> bool {
        matches!(self, Self::Pie)
    }

    /// Parses a wire name.
    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|t| t.wire_name() == name)
    }
}

impl Default for ChartType {
    fn default() -> Self {
        Self::Line
    }
}

// ============================================================================
// Colors
// ============================================================================

/// Fixed palette for proportional charts, cycled by slice index.
pub const SLICE_PALETTE: [&str; 8] = [
    "#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#06b6d4", "#84cc16", "#f97316",
];

/// Stroke color shared by all non-proportional charts.
pub const STROKE_COLOR: &str = "#3b82f6";

/// Translucent fill used under line strokes.
pub const LINE_FILL: &str = "rgba(59, 130, 246, 0.1)";

/// Opaque fill used by bar/column/area/scatter charts.
pub const SOLID_FILL: &str = "rgba(59, 130, 246, 0.8)";

/// Slice border color for proportional charts.
pub const SLICE_BORDER: &str = "#ffffff";

// ============================================================================
// Dataset Style
// ============================================================================

/// Presentation style for a dataset, keyed by chart family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DatasetStyle {
    /// One background color per slice, cycling through [`SLICE_PALETTE`].
    Slices {
        /// Background color per slice index.
        background: Vec<String>,
        /// Border color drawn between slices.
        border: String,
        /// Border width in pixels.
        border_width: u32,
    },
    /// A single stroke/fill color pair.
    Stroke {
        /// Fill color under the stroke.
        background: String,
        /// Stroke color.
        border: String,
        /// Stroke width in pixels.
        border_width: u32,
        /// Whether the area under the stroke is filled.
        fill: bool,
    },
}

impl DatasetStyle {
    /// Derives the default style for a chart type.
    ///
    /// `previous_fill` carries the fill flag across a restyle so switching
    /// chart types back and forth only touches colors.
    pub fn for_chart_type(kind: ChartType, previous_fill: bool) -> Self {
        if kind.is_proportional() {
            Self::Slices {
                background: SLICE_PALETTE.iter().map(ToString::to_string).collect(),
                border: SLICE_BORDER.to_string(),
                border_width: 2,
            }
        } else {
            let background = if kind == ChartType::Line {
                LINE_FILL.to_string()
            } else {
                SOLID_FILL.to_string()
            };
            Self::Stroke {
                background,
                border: STROKE_COLOR.to_string(),
                border_width: 2,
                fill: previous_fill,
            }
        }
    }

    /// Returns the fill flag, if this style has one.
    pub fn fill(&self) -> bool {
        match self {
            Self::Slices { .. } => false,
            Self::Stroke { fill, .. } => *fill,
        }
    }
}

impl Default for DatasetStyle {
    fn default() -> Self {
        Self::for_chart_type(ChartType::Line, false)
    }
}

// ============================================================================
// Dataset
// ============================================================================

/// One data series, index-aligned with the chart labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Legend label.
    pub label: String,
    /// Numeric values, one per chart label.
    pub data: Vec<f64>,
    /// Presentation style.
    pub style: DatasetStyle,
}

impl Dataset {
    /// Creates an empty dataset with the default legend label and style.
    pub fn new() -> Self {
        Self {
            label: "Data".to_string(),
            data: Vec::new(),
            style: DatasetStyle::default(),
        }
    }

    /// Re-derives the style for a new chart type, keeping label and data.
    pub fn restyle_for(&mut self, kind: ChartType) {
        self.style = DatasetStyle::for_chart_type(kind, self.style.fill());
    }

    /// Resolves this dataset into the renderer-shaped JSON object.
    pub fn to_payload(&self) -> Value {
        match &self.style {
            DatasetStyle::Slices {
                background,
                border,
                border_width,
            } => json!({
                "label": self.label,
                "data": self.data,
                "backgroundColor": background,
                "borderColor": border,
                "borderWidth": border_width,
            }),
            DatasetStyle::Stroke {
                background,
                border,
                border_width,
                fill,
            } => json!({
                "label": self.label,
                "data": self.data,
                "backgroundColor": background,
                "borderColor": border,
                "borderWidth": border_width,
                "fill": fill,
            }),
        }
    }

    /// Parses a dataset from the renderer-shaped JSON object.
    ///
    /// The backend blob is not under our control, so parsing is lenient:
    /// missing colors fall back to defaults and non-numeric values become
    /// zero, matching what the renderer itself would do.
    pub fn from_payload(value: &Value) -> Self {
        let label = value
            .get("label")
            .and_then(Value::as_str)
            .unwrap_or("Data")
            .to_string();
        let data = value
            .get("data")
            .and_then(Value::as_array)
            .map(|vals| vals.iter().map(|v| v.as_f64().unwrap_or(0.0)).collect())
            .unwrap_or_default();
        let border_width = value
            .get("borderWidth")
            .and_then(Value::as_u64)
            .map_or(2, |w| u32::try_from(w).unwrap_or(2));

        let style = match value.get("backgroundColor") {
            Some(Value::Array(colors)) => DatasetStyle::Slices {
                background: colors
                    .iter()
                    .filter_map(Value::as_str)
                    .map(ToString::to_string)
                    .collect(),
                border: value
                    .get("borderColor")
                    .and_then(Value::as_str)
                    .unwrap_or(SLICE_BORDER)
                    .to_string(),
                border_width,
            },
            other => DatasetStyle::Stroke {
                background: other
                    .and_then(Value::as_str)
                    .unwrap_or(LINE_FILL)
                    .to_string(),
                border: value
                    .get("borderColor")
                    .and_then(Value::as_str)
                    .unwrap_or(STROKE_COLOR)
                    .to_string(),
                border_width,
                fill: value.get("fill").and_then(Value::as_bool).unwrap_or(false),
            },
        };

        Self { label, data, style }
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Chart Data
// ============================================================================

/// Ordered labels plus one or more datasets aligned to them by index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    /// X-axis labels (or slice names for proportional charts).
    pub labels: Vec<String>,
    /// Data series.
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    /// Creates chart data with empty labels and a single default dataset.
    pub fn new() -> Self {
        Self {
            labels: Vec::new(),
            datasets: vec![Dataset::new()],
        }
    }

    /// Returns the primary dataset, if any.
    pub fn primary(&self) -> Option<&Dataset> {
        self.datasets.first()
    }

    /// Returns the primary dataset mutably, creating it if absent.
    pub fn primary_mut(&mut self) -> &mut Dataset {
        if self.datasets.is_empty() {
            self.datasets.push(Dataset::new());
        }
        &mut self.datasets[0]
    }

    /// Resolves into the renderer-shaped JSON blob the backend stores.
    pub fn to_payload(&self) -> Value {
        json!({
            "labels": self.labels,
            "datasets": self.datasets.iter().map(Dataset::to_payload).collect::<Vec<_>>(),
        })
    }

    /// Parses the backend blob.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidData`] if the value is not an object.
    pub fn from_payload(value: &Value) -> Result<Self, CoreError> {
        let obj = value
            .as_object()
            .ok_or_else(|| CoreError::InvalidData("chart_data is not an object".to_string()))?;

        let labels = obj
            .get("labels")
            .and_then(Value::as_array)
            .map(|vals| {
                vals.iter()
                    .filter_map(Value::as_str)
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let datasets = obj
            .get("datasets")
            .and_then(Value::as_array)
            .map(|vals| vals.iter().map(Dataset::from_payload).collect())
            .unwrap_or_else(|| vec![Dataset::new()]);

        Ok(Self { labels, datasets })
    }
}

// ============================================================================
// Chart Config
// ============================================================================

/// Chart title plus render options, resolved per chart type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Title drawn above the chart. Empty means no title.
    #[serde(default)]
    pub title: String,
}

impl ChartConfig {
    /// Resolves into the renderer options blob for the given chart type.
    ///
    /// Proportional charts have no value axis, so the scales block is
    /// only emitted for cartesian types.
    pub fn to_payload(&self, kind: ChartType) -> Value {
        let mut options = json!({
            "responsive": true,
            "plugins": {
                "legend": { "position": "top" },
            },
        });
        if !kind.is_proportional() {
            options["scales"] = json!({ "y": { "beginAtZero": true } });
        }
        json!({
            "title": self.title,
            "options": options,
        })
    }

    /// Parses the backend blob, keeping only the title.
    pub fn from_payload(value: &Value) -> Self {
        Self {
            title: value
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_type_wire_names_round_trip() {
        for kind in ChartType::all() {
            assert_eq!(ChartType::from_wire_name(kind.wire_name()), Some(*kind));
        }
        assert_eq!(ChartType::from_wire_name("donut"), None);
    }

    #[test]
    fn only_pie_is_proportional() {
        assert!(ChartType::Pie.is_proportional());
        for kind in [
            ChartType::Line,
            ChartType::Bar,
            ChartType::Column,
            ChartType::Area,
            ChartType::Scatter,
        ] {
            assert!(!kind.is_proportional());
        }
    }

    #[test]
    fn pie_style_uses_full_palette() {
        let style = DatasetStyle::for_chart_type(ChartType::Pie, false);
        match style {
            DatasetStyle::Slices {
                background, border, ..
            } => {
                assert_eq!(background.len(), 8);
                assert_eq!(border, SLICE_BORDER);
            }
            DatasetStyle::Stroke { .. } => panic!("pie must use slice style"),
        }
    }

    #[test]
    fn line_fill_differs_from_bar_fill() {
        let line = DatasetStyle::for_chart_type(ChartType::Line, false);
        let bar = DatasetStyle::for_chart_type(ChartType::Bar, false);
        match (line, bar) {
            (
                DatasetStyle::Stroke {
                    background: line_bg, ..
                },
                DatasetStyle::Stroke {
                    background: bar_bg, ..
                },
            ) => {
                assert_eq!(line_bg, LINE_FILL);
                assert_eq!(bar_bg, SOLID_FILL);
            }
            _ => panic!("both must use stroke style"),
        }
    }

    #[test]
    fn only_line_gets_the_translucent_fill() {
        // Area shares the opaque fill with bar/column/scatter; the
        // stored payloads were written against exactly this split.
        for kind in [ChartType::Area, ChartType::Column, ChartType::Scatter] {
            match DatasetStyle::for_chart_type(kind, false) {
                DatasetStyle::Stroke { background, .. } => {
                    assert_eq!(background, SOLID_FILL, "{kind:?}");
                }
                DatasetStyle::Slices { .. } => panic!("{kind:?} must use stroke style"),
            }
        }
    }

    #[test]
    fn restyle_preserves_labels_and_data() {
        let mut chart = ChartData::new();
        chart.labels = vec!["2022".into(), "2023".into(), "2024".into()];
        chart.primary_mut().data = vec![5.5, 6.2, 5.8];
        let before_labels = chart.labels.clone();
        let before_data = chart.primary().unwrap().data.clone();

        chart.primary_mut().restyle_for(ChartType::Pie);
        chart.primary_mut().restyle_for(ChartType::Line);

        assert_eq!(chart.labels, before_labels);
        assert_eq!(chart.primary().unwrap().data, before_data);
        assert_eq!(chart.primary().unwrap().style, DatasetStyle::default());
    }

    #[test]
    fn payload_shape_matches_renderer() {
        let mut chart = ChartData::new();
        chart.labels = vec!["a".into(), "b".into()];
        chart.primary_mut().data = vec![1.0, 2.0];

        let payload = chart.to_payload();
        assert_eq!(payload["labels"][1], "b");
        assert_eq!(payload["datasets"][0]["borderColor"], STROKE_COLOR);
        assert_eq!(payload["datasets"][0]["fill"], false);

        let parsed = ChartData::from_payload(&payload).unwrap();
        assert_eq!(parsed, chart);
    }

    #[test]
    fn slice_payload_round_trips() {
        let mut chart = ChartData::new();
        chart.labels = vec!["x".into()];
        chart.primary_mut().data = vec![3.0];
        chart.primary_mut().restyle_for(ChartType::Pie);

        let payload = chart.to_payload();
        assert!(payload["datasets"][0]["backgroundColor"].is_array());
        assert!(payload["datasets"][0].get("fill").is_none());

        let parsed = ChartData::from_payload(&payload).unwrap();
        assert_eq!(parsed, chart);
    }

    #[test]
    fn config_payload_omits_scales_for_pie() {
        let config = ChartConfig {
            title: "TPT".to_string(),
        };
        let line = config.to_payload(ChartType::Line);
        assert_eq!(line["options"]["scales"]["y"]["beginAtZero"], true);

        let pie = config.to_payload(ChartType::Pie);
        assert!(pie["options"].get("scales").is_none());
        assert_eq!(pie["title"], "TPT");
    }

    #[test]
    fn lenient_parse_of_foreign_blob() {
        let blob = serde_json::json!({
            "labels": ["Jan", "Feb"],
            "datasets": [{ "data": [1, "x", 3] }],
        });
        let parsed = ChartData::from_payload(&blob).unwrap();
        let primary = parsed.primary().unwrap();
        assert_eq!(primary.label, "Data");
        assert_eq!(primary.data, vec![1.0, 0.0, 3.0]);
    }
}
