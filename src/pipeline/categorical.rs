//! Wide-to-long reshaping and counting of the categorical risk factors

use anyhow::Result;
use log::debug;
use polars::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

use super::error::PipelineError;
use super::loader::require_numeric_column;

/// Column that splits the population into facets.
pub const ID_COLUMN: &str = "cardio";

/// Categorical columns counted per facet.
pub const CATEGORICAL_COLUMNS: [&str; 6] =
    ["cholesterol", "gluc", "smoke", "alco", "active", "overweight"];

/// One observation of one categorical variable in long form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongRecord {
    pub cardio: i64,
    pub variable: String,
    pub value: i64,
}

/// Number of rows sharing a (cardio, variable, value) combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub cardio: i64,
    pub variable: String,
    pub value: i64,
    pub total: u64,
}

/// Read a column as integers, rejecting nulls.
fn integer_values(df: &DataFrame, name: &str) -> Result<Vec<i64>> {
    let column = require_numeric_column(df, name)?.cast(&DataType::Int64)?;
    column
        .i64()?
        .iter()
        .map(|v| {
            v.ok_or_else(|| {
                PipelineError::NullValue {
                    column: name.to_string(),
                }
                .into()
            })
        })
        .collect()
}

/// Unpivot `value_columns` into one record per row and column, keyed by `id_column`.
///
/// Records are emitted row by row, in the order of `value_columns`.
pub fn melt_categorical(
    df: &DataFrame,
    id_column: &str,
    value_columns: &[&str],
) -> Result<Vec<LongRecord>> {
    let ids = integer_values(df, id_column)?;
    let columns: Vec<(&str, Vec<i64>)> = value_columns
        .iter()
        .map(|name| integer_values(df, name).map(|values| (*name, values)))
        .collect::<Result<_>>()?;

    let mut records = Vec::with_capacity(ids.len() * columns.len());
    for (row, &cardio) in ids.iter().enumerate() {
        for (name, values) in &columns {
            records.push(LongRecord {
                cardio,
                variable: name.to_string(),
                value: values[row],
            });
        }
    }

    Ok(records)
}

/// Group long records by (cardio, variable, value) and count each group.
///
/// Output is sorted by cardio, then variable name, then value. Combinations
/// that never occur are not emitted.
pub fn count_categories(records: &[LongRecord]) -> Vec<CategoryCount> {
    let mut groups: BTreeMap<(i64, &str, i64), u64> = BTreeMap::new();
    for record in records {
        *groups
            .entry((record.cardio, record.variable.as_str(), record.value))
            .or_insert(0) += 1;
    }

    groups
        .into_iter()
        .map(|((cardio, variable, value), total)| CategoryCount {
            cardio,
            variable: variable.to_string(),
            value,
            total,
        })
        .collect()
}

/// Count the fixed categorical risk factors per `cardio` outcome.
pub fn aggregate_categorical(df: &DataFrame) -> Result<Vec<CategoryCount>> {
    let records = melt_categorical(df, ID_COLUMN, &CATEGORICAL_COLUMNS)?;
    let counts = count_categories(&records);
    debug!(
        "aggregated {} long records into {} groups",
        records.len(),
        counts.len()
    );
    Ok(counts)
}

/// Long-form table with columns `cardio`, `variable`, `value`, `total`.
pub fn category_counts_frame(counts: &[CategoryCount]) -> Result<DataFrame> {
    let cardio: Vec<i64> = counts.iter().map(|c| c.cardio).collect();
    let variable: Vec<&str> = counts.iter().map(|c| c.variable.as_str()).collect();
    let value: Vec<i64> = counts.iter().map(|c| c.value).collect();
    let total: Vec<u64> = counts.iter().map(|c| c.total).collect();

    Ok(df! {
        "cardio" => cardio,
        "variable" => variable,
        "value" => value,
        "total" => total,
    }?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(cardio: i64, variable: &str, value: i64) -> LongRecord {
        LongRecord {
            cardio,
            variable: variable.to_string(),
            value,
        }
    }

    #[test]
    fn test_count_categories_sorted_by_variable_name() {
        let records = vec![
            record(0, "smoke", 1),
            record(0, "alco", 0),
            record(0, "smoke", 1),
            record(1, "alco", 0),
        ];

        let counts = count_categories(&records);
        let keys: Vec<(i64, &str, i64, u64)> = counts
            .iter()
            .map(|c| (c.cardio, c.variable.as_str(), c.value, c.total))
            .collect();

        assert_eq!(
            keys,
            vec![(0, "alco", 0, 1), (0, "smoke", 1, 2), (1, "alco", 0, 1)]
        );
    }

    #[test]
    fn test_count_categories_empty() {
        assert!(count_categories(&[]).is_empty());
    }

    #[test]
    fn test_melt_rejects_nulls() {
        let df = df! {
            "cardio" => [0i64, 1],
            "smoke" => [Some(1i64), None],
        }
        .unwrap();
        let err = melt_categorical(&df, "cardio", &["smoke"]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<PipelineError>(),
            Some(&PipelineError::NullValue {
                column: "smoke".to_string()
            })
        );
    }

    #[test]
    fn test_category_counts_frame_shape() {
        let counts = vec![CategoryCount {
            cardio: 0,
            variable: "gluc".to_string(),
            value: 1,
            total: 4,
        }];
        let frame = category_counts_frame(&counts).unwrap();
        assert_eq!(frame.shape(), (1, 4));
        assert_eq!(
            frame.get_column_names(),
            &["cardio", "variable", "value", "total"]
        );
    }
}
