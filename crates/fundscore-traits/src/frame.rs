//! Conversion of polars `DataFrame`s into NAV and benchmark series.
//!
//! The data provider hands over tables; the engine works on typed series.
//! Expected schemas:
//!
//! - NAV: `date`, `unit_nav`, `accumulated_nav`
//! - benchmark: `date`, `close`
//!
//! `date` may be a polars `Date` column or a `YYYY-MM-DD` string column.
//! Rows with a null in any required column are skipped.

use polars::prelude::*;

use crate::{BenchmarkPoint, BenchmarkSeries, Date, FundscoreError, NavPoint, NavSeries, Result};

/// Days from 0001-01-01 (CE) to 1970-01-01, the polars `Date` epoch.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| FundscoreError::MissingColumn(name.to_string()))
}

fn date_values(df: &DataFrame) -> Result<Vec<Option<Date>>> {
    let series = column(df, "date")?.as_materialized_series();
    match series.dtype() {
        DataType::Date => Ok(series
            .date()?
            .into_iter()
            .map(|d: Option<i32>| {
                d.and_then(|d| Date::from_num_days_from_ce_opt(d + UNIX_EPOCH_DAYS_FROM_CE))
            })
            .collect()),
        DataType::String => series
            .str()?
            .into_iter()
            .map(|s: Option<&str>| match s {
                Some(s) => Date::parse_from_str(s.trim(), "%Y-%m-%d")
                    .map(Some)
                    .map_err(|_| FundscoreError::InvalidDate(s.to_string())),
                None => Ok(None),
            })
            .collect(),
        other => Err(FundscoreError::InvalidData(format!(
            "column 'date' has unsupported dtype {other}"
        ))),
    }
}

fn f64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let cast = column(df, name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(cast.f64()?.into_iter().collect())
}

impl TryFrom<&DataFrame> for NavSeries {
    type Error = FundscoreError;

    fn try_from(df: &DataFrame) -> Result<Self> {
        let dates = date_values(df)?;
        let unit = f64_values(df, "unit_nav")?;
        let accumulated = f64_values(df, "accumulated_nav")?;

        let points = dates
            .into_iter()
            .zip(unit)
            .zip(accumulated)
            .filter_map(|((date, unit), acc)| Some(NavPoint::new(date?, unit?, acc?)))
            .collect();

        Ok(Self::new(points))
    }
}

impl TryFrom<&DataFrame> for BenchmarkSeries {
    type Error = FundscoreError;

    fn try_from(df: &DataFrame) -> Result<Self> {
        let dates = date_values(df)?;
        let closes = f64_values(df, "close")?;

        let points = dates
            .into_iter()
            .zip(closes)
            .filter_map(|(date, close)| Some(BenchmarkPoint::new(date?, close?)))
            .collect();

        Ok(Self::new(points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_series_from_string_dates() {
        let df = df! {
            "date" => &["2024-01-03", "2024-01-02", "2024-01-04"],
            "unit_nav" => &[1.01, 1.00, 1.02],
            "accumulated_nav" => &[1.51, 1.50, 1.52],
        }
        .unwrap();

        let series = NavSeries::try_from(&df).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.first_date(), Date::from_ymd_opt(2024, 1, 2));
        assert_eq!(series.points()[0].accumulated_nav, 1.50);
    }

    #[test]
    fn test_nav_series_skips_null_rows() {
        let df = df! {
            "date" => &[Some("2024-01-02"), None, Some("2024-01-04")],
            "unit_nav" => &[Some(1.0), Some(1.1), None],
            "accumulated_nav" => &[Some(1.0), Some(1.1), Some(1.2)],
        }
        .unwrap();

        let series = NavSeries::try_from(&df).unwrap();
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_missing_column() {
        let df = df! {
            "date" => &["2024-01-02"],
            "unit_nav" => &[1.0],
        }
        .unwrap();

        let err = NavSeries::try_from(&df).unwrap_err();
        assert!(matches!(err, FundscoreError::MissingColumn(ref c) if c == "accumulated_nav"));
    }

    #[test]
    fn test_invalid_date() {
        let df = df! {
            "date" => &["2024/01/02"],
            "close" => &[3000.0],
        }
        .unwrap();

        let err = BenchmarkSeries::try_from(&df).unwrap_err();
        assert!(matches!(err, FundscoreError::InvalidDate(_)));
    }

    #[test]
    fn test_benchmark_from_integer_close() {
        let df = df! {
            "date" => &["2024-01-02", "2024-01-03"],
            "close" => &[3000i64, 3015],
        }
        .unwrap();

        let series = BenchmarkSeries::try_from(&df).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[1].close, 3015.0);
    }
}
