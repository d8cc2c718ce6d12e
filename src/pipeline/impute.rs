use tracing::{info, warn};

use crate::models::UNKNOWN;

/// A numeric column after missing entries were filled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImputedColumn<T> {
    pub values: Vec<T>,
    /// Value substituted for missing entries
    pub fill: T,
    /// Number of entries that were missing
    pub filled: usize,
}

/// Truncated arithmetic mean of the present values, or `None` when there are none
pub fn truncated_mean<T>(column: &[Option<T>]) -> Option<T>
where
    T: Copy + Into<i128> + TryFrom<i128>,
{
    let (sum, count) = column
        .iter()
        .flatten()
        .fold((0i128, 0i128), |(sum, count), &v| {
            let v: i128 = v.into();
            (sum + v, count + 1)
        });

    if count == 0 {
        return None;
    }
    // Integer division truncates toward zero
    T::try_from(sum / count).ok()
}

/// Replace every missing entry of a numeric column with the column mean.
///
/// A column without any value falls back to `T::default()` (zero).
pub fn impute_mean<T>(column_name: &str, column: &[Option<T>]) -> ImputedColumn<T>
where
    T: Copy + Default + std::fmt::Display + Into<i128> + TryFrom<i128>,
{
    let fill = match truncated_mean(column) {
        Some(mean) => mean,
        None => {
            if !column.is_empty() {
                warn!("Column {} has no values, filling with {}", column_name, T::default());
            }
            T::default()
        }
    };

    let filled = column.iter().filter(|v| v.is_none()).count();
    if filled > 0 {
        info!("Imputed {} missing {} values with {}", filled, column_name, fill);
    }

    ImputedColumn {
        values: column.iter().map(|v| v.unwrap_or(fill)).collect(),
        fill,
        filled,
    }
}

/// Blank text and the stringified-missing marker `nan` count as missing
pub fn is_missing_category(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan")
}

/// Trimmed categorical value, or `"Unknown"` when missing
pub fn fill_category(value: Option<&str>) -> String {
    match value {
        Some(v) if !is_missing_category(v) => v.trim().to_string(),
        _ => UNKNOWN.to_string(),
    }
}
