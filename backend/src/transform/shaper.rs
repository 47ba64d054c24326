//! Chart series shaping.
//!
//! Pure structural reshaping: every series cut from a [`Grid`] shares the
//! grid's row axis, including the synthetic grand-total line. No values are
//! computed here beyond presentation rounding.

use serde::Serialize;

use super::grouper::Grid;

/// Label of the grand-total overlay series.
pub const TOTAL_TITLES: &str = "Total Titles";

/// Stack group shared by the per-type bars of a stacked chart.
pub const TYPE_STACK: &str = "typeStack";

/// Y axis a series is drawn against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Axis {
    /// Counts / frequencies.
    #[serde(rename = "left-y")]
    Primary,
    /// Totals and other overlays.
    #[serde(rename = "right-y")]
    Secondary,
}

/// Rendering hint overriding the chart's default type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Render {
    Line,
}

/// A named data sequence aligned with a shared label axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Series<T> {
    pub label: String,
    pub data: Vec<T>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub render: Option<Render>,
    #[serde(rename = "yAxisID", skip_serializing_if = "Option::is_none")]
    pub axis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
}

impl<T> Series<T> {
    pub fn new(label: impl Into<String>, data: Vec<T>) -> Self {
        Self {
            label: label.into(),
            data,
            render: None,
            axis: None,
            stack: None,
            border_color: None,
            background_color: None,
            fill: None,
        }
    }

    pub fn on_axis(mut self, axis: Axis) -> Self {
        self.axis = Some(axis);
        self
    }

    pub fn stacked(mut self, group: impl Into<String>) -> Self {
        self.stack = Some(group.into());
        self
    }

    pub fn as_line(mut self) -> Self {
        self.render = Some(Render::Line);
        self
    }

    /// Solid colour for both outline and fill, with area fill disabled.
    pub fn solid(mut self, colour: impl Into<String>) -> Self {
        let colour = colour.into();
        self.border_color = Some(colour.clone());
        self.background_color = Some(colour);
        self.fill = Some(false);
        self
    }
}

/// One series per grid column, all on `axis` and optionally stacked.
pub fn grid_series<T: Clone>(grid: &Grid<T>, axis: Axis, stack: Option<&str>) -> Vec<Series<T>> {
    grid.columns
        .iter()
        .zip(&grid.values)
        .map(|(column, values)| {
            let series = Series::new(column.to_string(), values.clone()).on_axis(axis);
            match stack {
                Some(group) => series.stacked(group),
                None => series,
            }
        })
        .collect()
}

/// Grand-total overlay drawn as a line on the secondary axis.
pub fn total_line<T>(data: Vec<T>) -> Series<T> {
    Series::new(TOTAL_TITLES, data)
        .as_line()
        .on_axis(Axis::Secondary)
}

/// Round to two decimals for presentation.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn round_all(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    values.into_iter().map(round2).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Key;
    use serde_json::json;

    fn grid() -> Grid<u64> {
        Grid {
            rows: vec![Key::from("<12"), Key::from("12-24")],
            columns: vec![Key::from("OVA"), Key::from("TV")],
            values: vec![vec![0, 1], vec![1, 0]],
        }
    }

    #[test]
    fn test_series_share_row_axis() {
        let grid = grid();
        let mut series = grid_series(&grid, Axis::Primary, None);
        series.push(total_line(grid.row_totals()));

        assert_eq!(series.len(), 3);
        for s in &series {
            assert_eq!(s.data.len(), grid.rows.len());
        }
        assert_eq!(series[2].data, vec![1, 1]);
    }

    #[test]
    fn test_serialized_shape() {
        let grid = grid();
        let bars = grid_series(&grid, Axis::Primary, Some(TYPE_STACK));
        assert_eq!(
            serde_json::to_value(&bars[1]).unwrap(),
            json!({"label": "TV", "data": [1, 0], "yAxisID": "left-y", "stack": "typeStack"})
        );

        let total = total_line(vec![1u64, 1]).solid("black");
        assert_eq!(
            serde_json::to_value(&total).unwrap(),
            json!({
                "label": "Total Titles",
                "data": [1, 1],
                "type": "line",
                "yAxisID": "right-y",
                "borderColor": "black",
                "backgroundColor": "black",
                "fill": false
            })
        );
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(7.456), 7.46);
        assert_eq!(round2(7.0), 7.0);
        assert_eq!(round_all([1.234, 5.678]), vec![1.23, 5.68]);
    }
}
