use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::core::time_scale::parse_timestamp;
use crate::core::types::Extent;
use crate::error::{ChartError, ChartResult};

/// Point shape shared by every series of one chart instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesShape {
    Categorical,
    Grouped,
    Temporal,
    Bivariate,
    Samples,
}

/// Interpretation of the x value of temporal series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum XKind {
    /// Epoch milliseconds.
    Time,
    /// Plain numbers, typically point indices.
    Numeric,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDatum {
    pub label: String,
    pub value: f64,
}

impl CategoryDatum {
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// One row of a grouped table: a series label plus one value per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// Header row of category names followed by one row per series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupedTable {
    pub categories: Vec<String>,
    pub series: Vec<GroupedSeries>,
}

impl GroupedTable {
    #[must_use]
    pub fn new(categories: Vec<String>) -> Self {
        Self {
            categories,
            series: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_series(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.series.push(GroupedSeries {
            name: name.into(),
            values,
        });
        self
    }

    /// Value of series `series` at category `category`; missing cells read as zero.
    #[must_use]
    pub fn value(&self, series: usize, category: usize) -> f64 {
        self.series
            .get(series)
            .and_then(|row| row.values.get(category))
            .copied()
            .unwrap_or(0.0)
    }

    /// Per-category sums across all series.
    #[must_use]
    pub fn category_totals(&self) -> Vec<f64> {
        (0..self.categories.len())
            .map(|category| {
                (0..self.series.len())
                    .map(|series| self.value(series, category))
                    .sum()
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSeries<T> {
    pub name: Option<String>,
    pub data: Vec<T>,
}

impl<T> NamedSeries<T> {
    #[must_use]
    pub fn new(name: Option<String>, data: Vec<T>) -> Self {
        Self { name, data }
    }

    #[must_use]
    pub fn unnamed(data: Vec<T>) -> Self {
        Self::new(None, data)
    }

    #[must_use]
    pub fn named(name: impl Into<String>, data: Vec<T>) -> Self {
        Self::new(Some(name.into()), data)
    }
}

pub type TimeSeries = NamedSeries<DataPoint>;
pub type XySeries = NamedSeries<DataPoint>;
pub type SampleSeries = NamedSeries<f64>;

/// Raw series bound to a chart by `datum`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SeriesData {
    Categorical(Vec<CategoryDatum>),
    Grouped(GroupedTable),
    Temporal {
        x_kind: XKind,
        series: Vec<TimeSeries>,
    },
    Bivariate(Vec<XySeries>),
    Samples(Vec<SampleSeries>),
}

impl SeriesData {
    #[must_use]
    pub fn shape(&self) -> SeriesShape {
        match self {
            Self::Categorical(_) => SeriesShape::Categorical,
            Self::Grouped(_) => SeriesShape::Grouped,
            Self::Temporal { .. } => SeriesShape::Temporal,
            Self::Bivariate(_) => SeriesShape::Bivariate,
            Self::Samples(_) => SeriesShape::Samples,
        }
    }

    /// Restores the ordering invariant: temporal series are stably sorted by x.
    #[must_use]
    pub fn canonicalized(mut self) -> Self {
        if let Self::Temporal { series, .. } = &mut self {
            for one in series.iter_mut() {
                one.data.sort_by(|a, b| a.x.total_cmp(&b.x));
            }
        }
        self
    }

    /// Rejects non-finite values and ragged grouped rows.
    pub fn validate(&self) -> ChartResult<()> {
        let finite = |value: f64, what: &str| {
            if value.is_finite() {
                Ok(())
            } else {
                Err(ChartError::InvalidData(format!("{what} must be finite")))
            }
        };
        match self {
            Self::Categorical(data) => {
                for datum in data {
                    finite(datum.value, "category value")?;
                }
            }
            Self::Grouped(table) => {
                for row in &table.series {
                    if row.values.len() != table.categories.len() {
                        return Err(ChartError::InvalidData(format!(
                            "series `{}` has {} values for {} categories",
                            row.name,
                            row.values.len(),
                            table.categories.len()
                        )));
                    }
                    for &value in &row.values {
                        finite(value, "grouped value")?;
                    }
                }
            }
            Self::Temporal { series, .. } | Self::Bivariate(series) => {
                for point in series.iter().flat_map(|one| one.data.iter()) {
                    finite(point.x, "x value")?;
                    finite(point.y, "y value")?;
                }
            }
            Self::Samples(series) => {
                for &value in series.iter().flat_map(|one| one.data.iter()) {
                    finite(value, "sample value")?;
                }
            }
        }
        Ok(())
    }

    /// Series names shown by legends, in series order. Unnamed series yield `None`.
    #[must_use]
    pub fn series_names(&self) -> Vec<Option<String>> {
        match self {
            Self::Categorical(data) => data.iter().map(|d| Some(d.label.clone())).collect(),
            Self::Grouped(table) => table.series.iter().map(|s| Some(s.name.clone())).collect(),
            Self::Temporal { series, .. } | Self::Bivariate(series) => {
                series.iter().map(|s| s.name.clone()).collect()
            }
            Self::Samples(series) => series.iter().map(|s| s.name.clone()).collect(),
        }
    }

    /// Extent of every y-like value across all series.
    #[must_use]
    pub fn value_extent(&self) -> Extent {
        match self {
            Self::Categorical(data) => Extent::of(data.iter().map(|d| d.value)),
            Self::Grouped(table) => {
                Extent::of(table.series.iter().flat_map(|s| s.values.iter().copied()))
            }
            Self::Temporal { series, .. } | Self::Bivariate(series) => {
                Extent::of(series.iter().flat_map(|s| s.data.iter().map(|p| p.y)))
            }
            Self::Samples(series) => Extent::of(series.iter().flat_map(|s| s.data.iter().copied())),
        }
    }

    /// Extent of x values for point-shaped series.
    #[must_use]
    pub fn x_extent(&self) -> Extent {
        match self {
            Self::Temporal { series, .. } | Self::Bivariate(series) => {
                Extent::of(series.iter().flat_map(|s| s.data.iter().map(|p| p.x)))
            }
            _ => Extent::EMPTY,
        }
    }

    /// Parses a JSON-shaped payload into the point shape `shape`.
    pub fn from_json(shape: SeriesShape, value: &Value) -> ChartResult<Self> {
        let rows = value
            .as_array()
            .ok_or_else(|| ChartError::InvalidData("series payload must be an array".to_owned()))?;
        let data = match shape {
            SeriesShape::Categorical => Self::Categorical(parse_categorical(rows)?),
            SeriesShape::Grouped => Self::Grouped(parse_grouped(rows)?),
            SeriesShape::Temporal => parse_temporal(rows)?,
            SeriesShape::Bivariate => Self::Bivariate(parse_bivariate(rows)?),
            SeriesShape::Samples => Self::Samples(parse_samples(rows)?),
        };
        debug!(?shape, "parsed series payload");
        Ok(data)
    }
}

fn number(value: &Value, what: &str) -> ChartResult<f64> {
    match value {
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| ChartError::InvalidData(format!("{what} is not representable"))),
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| ChartError::InvalidData(format!("{what} `{text}` is not a number"))),
        other => Err(ChartError::InvalidData(format!(
            "{what} must be a number, got {other}"
        ))),
    }
}

fn label(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn pair(row: &Value) -> ChartResult<(&Value, &Value)> {
    match row.as_array().map(Vec::as_slice) {
        Some([first, second, ..]) => Ok((first, second)),
        _ => Err(ChartError::InvalidData(format!(
            "expected a `[x, y]` pair, got {row}"
        ))),
    }
}

fn parse_categorical(rows: &[Value]) -> ChartResult<Vec<CategoryDatum>> {
    rows.iter()
        .map(|row| {
            let (name, value) = pair(row)?;
            Ok(CategoryDatum::new(label(name), number(value, "category value")?))
        })
        .collect()
}

fn parse_grouped(rows: &[Value]) -> ChartResult<GroupedTable> {
    let Some((header, body)) = rows.split_first() else {
        return Ok(GroupedTable::default());
    };
    let header = header
        .as_array()
        .ok_or_else(|| ChartError::InvalidData("grouped header must be an array".to_owned()))?;
    let body_width = body
        .iter()
        .filter_map(Value::as_array)
        .map(|row| row.len().saturating_sub(1))
        .max()
        .unwrap_or(header.len());
    // A header one cell wider than the values carries a corner label.
    let skip = usize::from(header.len() > body_width);
    let mut table = GroupedTable::new(header.iter().skip(skip).map(label).collect());

    for row in body {
        let cells = row
            .as_array()
            .ok_or_else(|| ChartError::InvalidData("grouped row must be an array".to_owned()))?;
        let Some((name, values)) = cells.split_first() else {
            continue;
        };
        let values = values
            .iter()
            .map(|cell| number(cell, "grouped value"))
            .collect::<ChartResult<Vec<_>>>()?;
        table = table.with_series(label(name), values);
    }
    Ok(table)
}

fn parse_x(value: &Value) -> ChartResult<(XKind, f64)> {
    match value {
        Value::String(text) => {
            if let Some(ms) = parse_timestamp(text) {
                return Ok((XKind::Time, ms as f64));
            }
            Ok((XKind::Numeric, number(value, "x value")?))
        }
        other => Ok((XKind::Numeric, number(other, "x value")?)),
    }
}

fn parse_points(rows: &[Value], kind: &mut Option<XKind>) -> ChartResult<Vec<DataPoint>> {
    rows.iter()
        .map(|row| {
            let (x, y) = if let Some(object) = row.as_object() {
                let x = object
                    .get("x")
                    .ok_or_else(|| ChartError::InvalidData("point is missing `x`".to_owned()))?;
                let y = object
                    .get("y")
                    .ok_or_else(|| ChartError::InvalidData("point is missing `y`".to_owned()))?;
                (x, y)
            } else {
                pair(row)?
            };
            let (x_kind, x) = parse_x(x)?;
            match kind {
                Some(existing) if *existing != x_kind => {
                    return Err(ChartError::InvalidData(
                        "series mix date and numeric x values".to_owned(),
                    ));
                }
                Some(_) => {}
                None => *kind = Some(x_kind),
            }
            Ok(DataPoint::new(x, number(y, "y value")?))
        })
        .collect()
}

fn is_wrapped_series(rows: &[Value]) -> bool {
    rows.first()
        .and_then(Value::as_object)
        .is_some_and(|object| object.contains_key("data"))
}

fn wrapped_series(rows: &[Value]) -> ChartResult<Vec<(Option<String>, &[Value])>> {
    rows.iter()
        .map(|row| {
            let object = row.as_object().ok_or_else(|| {
                ChartError::InvalidData("series entry must be an object".to_owned())
            })?;
            let data = object
                .get("data")
                .and_then(Value::as_array)
                .ok_or_else(|| ChartError::InvalidData("series entry needs `data`".to_owned()))?;
            let name = object.get("name").map(label);
            Ok((name, data.as_slice()))
        })
        .collect()
}

fn parse_temporal(rows: &[Value]) -> ChartResult<SeriesData> {
    let mut kind = None;
    let series = if is_wrapped_series(rows) {
        wrapped_series(rows)?
            .into_iter()
            .map(|(name, data)| Ok(NamedSeries::new(name, parse_points(data, &mut kind)?)))
            .collect::<ChartResult<Vec<_>>>()?
    } else {
        vec![NamedSeries::unnamed(parse_points(rows, &mut kind)?)]
    };
    Ok(SeriesData::Temporal {
        x_kind: kind.unwrap_or(XKind::Numeric),
        series,
    })
}

fn parse_bivariate(rows: &[Value]) -> ChartResult<Vec<XySeries>> {
    let mut kind = None;
    if !is_wrapped_series(rows) {
        return Ok(vec![NamedSeries::unnamed(parse_points(rows, &mut kind)?)]);
    }
    wrapped_series(rows)?
        .into_iter()
        .map(|(name, data)| {
            let mut kind = None;
            Ok(NamedSeries::new(name, parse_points(data, &mut kind)?))
        })
        .collect()
}

fn parse_samples(rows: &[Value]) -> ChartResult<Vec<SampleSeries>> {
    if !is_wrapped_series(rows) {
        let values = rows
            .iter()
            .map(|cell| number(cell, "sample value"))
            .collect::<ChartResult<Vec<_>>>()?;
        return Ok(vec![NamedSeries::unnamed(values)]);
    }
    wrapped_series(rows)?
        .into_iter()
        .map(|(name, data)| {
            let values = data
                .iter()
                .map(|cell| number(cell, "sample value"))
                .collect::<ChartResult<Vec<_>>>()?;
            Ok(NamedSeries::new(name, values))
        })
        .collect()
}
