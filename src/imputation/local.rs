//! An imputator which fills gaps locally in time: cells are only filled from present cells of the
//! same column which are close enough in time, everything else is dropped.

use crate::errors::ImputeError;
use crate::imputation::fill::{
    FillOneSided, FillTwoSided, hold_left, keep, lerp_time, linear_between, relative_position,
};
use crate::imputation::{DATETIME_KEY, ImputationStats, Imputator, RecordTable, Value};
use chrono::{DateTime, TimeDelta, Utc};
use itertools::Itertools;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::ops::Range;

const DEFAULT_MAX_TIME_DIFF_SECS: f64 = 120.0;

fn default_max_time_diff_secs() -> f64 {
    DEFAULT_MAX_TIME_DIFF_SECS
}

/// Plain, serializable options for a `FillLocalImputator`. Custom fill closures cannot be
/// expressed here and have to be set with the builder methods instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImputatorOptions {
    /// Two timestamps are close if they differ by strictly less than this many seconds
    #[serde(default = "default_max_time_diff_secs")]
    pub max_time_diff_secs: f64,

    /// Blend numeric and timestamp values linearly between present cells instead of holding
    /// the left value
    #[serde(default)]
    pub interpolate_numeric: bool,
}

impl Default for ImputatorOptions {
    fn default() -> Self {
        Self {
            max_time_diff_secs: DEFAULT_MAX_TIME_DIFF_SECS,
            interpolate_numeric: false,
        }
    }
}

/// Imputator for chronologically ordered records with a `"datetime"` column.
///
/// A pass over a table does the following, in order:
///
/// 1. Columns without any present value are deleted (the timestamp column is always kept).
/// 2. Absent timestamps between two present timestamps which are close in time are filled by
///    affine interpolation in the row index.
/// 3. Rows still lacking a timestamp are deleted.
/// 4. Each remaining column is filled independently around its present cells. Gaps between two
///    present cells which are close in time use `fill_between`. Otherwise the cells close to the
///    earlier present cell use `fill_after` and the cells close to the later one use
///    `fill_before`; a cell close to both is filled from whichever is nearer in time, the earlier
///    one on a tie.
/// 5. Rows which still hold an absent cell are deleted.
///
/// Two timestamps are close if their absolute difference is strictly less than `max_time_diff`.
pub struct FillLocalImputator {
    fill_before: FillOneSided,
    fill_between: FillTwoSided,
    fill_after: FillOneSided,
    max_time_diff: TimeDelta,
}

impl Default for FillLocalImputator {
    fn default() -> Self {
        Self {
            fill_before: Box::new(keep),
            fill_between: Box::new(hold_left),
            fill_after: Box::new(keep),
            max_time_diff: TimeDelta::minutes(2),
        }
    }
}

impl FillLocalImputator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an imputator from serializable options, validating the time window.
    pub fn from_options(options: &ImputatorOptions) -> Result<Self, ImputeError> {
        let secs = options.max_time_diff_secs;
        if !secs.is_finite() || secs <= 0.0 {
            return Err(ImputeError::InvalidConfig(format!(
                "max_time_diff must be a positive number of seconds, got {}",
                secs
            )));
        }
        let window = TimeDelta::try_milliseconds((secs * 1000.0).round() as i64)
            .ok_or_else(|| {
                ImputeError::InvalidConfig(format!(
                    "max_time_diff of {} seconds is out of range",
                    secs
                ))
            })?;

        let imputator = Self::new().with_max_time_diff(window)?;
        if options.interpolate_numeric {
            Ok(imputator.with_fill_between(linear_between))
        } else {
            Ok(imputator)
        }
    }

    /// Set the function used for cells before a present cell. It receives the column name, the
    /// value of the later present cell and the relative position of the filled cell.
    pub fn with_fill_before<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &Value, f64) -> Value + Send + Sync + 'static,
    {
        self.fill_before = Box::new(f);
        self
    }

    /// Set the function used for cells between two present cells which are close in time. It
    /// receives the column name, the earlier and later values and the relative position.
    pub fn with_fill_between<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &Value, &Value, f64) -> Value + Send + Sync + 'static,
    {
        self.fill_between = Box::new(f);
        self
    }

    /// Set the function used for cells after a present cell. It receives the column name, the
    /// value of the earlier present cell and the relative position of the filled cell.
    pub fn with_fill_after<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &Value, f64) -> Value + Send + Sync + 'static,
    {
        self.fill_after = Box::new(f);
        self
    }

    /// Set the proximity window. Must be strictly positive.
    pub fn with_max_time_diff(mut self, max_time_diff: TimeDelta) -> Result<Self, ImputeError> {
        if max_time_diff <= TimeDelta::zero() {
            return Err(ImputeError::InvalidConfig(format!(
                "max_time_diff must be positive, got {}",
                max_time_diff
            )));
        }
        self.max_time_diff = max_time_diff;
        Ok(self)
    }

    pub fn max_time_diff(&self) -> TimeDelta {
        self.max_time_diff
    }

    fn is_close(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        (b - a).abs() < self.max_time_diff
    }

    /// Fill absent timestamps bounded by two close present timestamps. Returns the number of
    /// interpolated timestamps.
    fn repair_timestamps(&self, times: &mut [Option<DateTime<Utc>>]) -> usize {
        let mut repaired = 0;
        let mut last: Option<(usize, DateTime<Utc>)> = None;
        for i in 0..times.len() {
            let Some(t) = times[i] else {
                continue;
            };
            if let Some((j, tj)) = last {
                if i > j + 1 && self.is_close(tj, t) {
                    for (k, cell) in times.iter_mut().enumerate().take(i).skip(j + 1) {
                        let mu = (k - j) as f64 / (i - j) as f64;
                        *cell = Some(lerp_time(tj, t, mu));
                        repaired += 1;
                    }
                }
            }
            last = Some((i, t));
        }
        repaired
    }

    /// Fill the absent cells of one column around its present cells. Returns the number of
    /// written cells.
    fn fill_column(
        &self,
        name: &str,
        times: &[DateTime<Utc>],
        cells: &mut [Option<Value>],
    ) -> usize {
        let anchors = cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.clone().map(|v| (i, v)))
            .collect::<Vec<_>>();
        let (Some((first, first_value)), Some((last, last_value))) =
            (anchors.first().cloned(), anchors.last().cloned())
        else {
            return 0;
        };
        let mut n_filled = 0;

        // Leading gap, reaching back from the first present cell
        let start = (0..first)
            .rev()
            .take_while(|&i| self.is_close(times[i], times[first]))
            .last();
        if let Some(start) = start {
            n_filled += fill_span(cells, times, start..first, (start, first), |mu| {
                (self.fill_before)(name, &first_value, mu)
            });
        }

        for ((left, lv), (right, rv)) in anchors.iter().tuple_windows() {
            let (left, right) = (*left, *right);
            if right == left + 1 {
                continue;
            }

            if self.is_close(times[left], times[right]) {
                n_filled += fill_span(cells, times, left + 1..right, (left, right), |mu| {
                    (self.fill_between)(name, lv, rv, mu)
                });
                continue;
            }

            let (after, before) = self.split_far_gap(times, left, right);
            if let Some(end) = after.clone().last() {
                n_filled += fill_span(cells, times, after, (left, end), |mu| {
                    (self.fill_after)(name, lv, mu)
                });
            }
            if let Some(start) = before.clone().next() {
                n_filled += fill_span(cells, times, before, (start, right), |mu| {
                    (self.fill_before)(name, rv, mu)
                });
            }
        }

        // Trailing gap, reaching forward from the last present cell
        let end = (last + 1..cells.len())
            .take_while(|&i| self.is_close(times[last], times[i]))
            .last();
        if let Some(end) = end {
            n_filled += fill_span(cells, times, last + 1..end + 1, (last, end), |mu| {
                (self.fill_after)(name, &last_value, mu)
            });
        }

        trace!("Filled {} cells of column '{}'", n_filled, name);
        n_filled
    }

    /// For a gap between two present cells which are not close to each other, find the rows
    /// after `left` which are close to it and the rows before `right` which are close to it. A
    /// row close to both goes to the nearer one in time, and to `left` on a tie.
    fn split_far_gap(
        &self,
        times: &[DateTime<Utc>],
        left: usize,
        right: usize,
    ) -> (Range<usize>, Range<usize>) {
        let after_end = left
            + 1
            + (left + 1..right)
                .take_while(|&i| self.is_close(times[left], times[i]))
                .count();
        let before_start = right
            - (left + 1..right)
                .rev()
                .take_while(|&i| self.is_close(times[i], times[right]))
                .count();

        if after_end <= before_start {
            return (left + 1..after_end, before_start..right);
        }

        let split = (before_start..after_end)
            .find(|&i| (times[i] - times[left]).abs() > (times[right] - times[i]).abs())
            .unwrap_or(after_end);
        (left + 1..split, split..right)
    }
}

impl Imputator for FillLocalImputator {
    fn impute(&self, table: &mut RecordTable) -> Result<ImputationStats, ImputeError> {
        table
            .check_shape()
            .map_err(|e| ImputeError::InvalidInput(e.to_string()))?;
        let mut times = timestamps(table)?;

        let n_removed_cols = table.strip_cols_except(&[DATETIME_KEY]);

        let n_repaired = self.repair_timestamps(&mut times);
        let untimed = times.iter().positions(Option::is_none).collect::<Vec<_>>();
        let times = times.into_iter().flatten().collect::<Vec<_>>();
        let mut n_removed_rows = table.delete(&untimed);
        if let Some(column) = table.column_mut(DATETIME_KEY) {
            for (cell, t) in column.iter_mut().zip(times.iter()) {
                *cell = Some(Value::DateTime(*t));
            }
        }

        let mut n_filled_fields = 0;
        let keys = table.keys().to_vec();
        for key in keys.iter().filter(|k| k.as_str() != DATETIME_KEY) {
            if let Some(cells) = table.column_mut(key) {
                n_filled_fields += self.fill_column(key, &times, cells);
            }
        }

        let incomplete = table.incomplete_rows();
        n_removed_rows += table.delete(&incomplete);

        let stats = ImputationStats {
            n_removed_cols,
            n_removed_rows,
            n_filled_fields,
            n_rows: table.n_rows(),
            n_cols: table.n_cols(),
        };
        debug!("Imputation: repaired {} timestamps, {:?}", n_repaired, stats);
        Ok(stats)
    }
}

/// Extract the timestamp column, rejecting tables without one or with non-timestamp values in it.
fn timestamps(table: &RecordTable) -> Result<Vec<Option<DateTime<Utc>>>, ImputeError> {
    let column = table.column(DATETIME_KEY).ok_or_else(|| {
        ImputeError::InvalidInput(format!("Table has no '{}' column", DATETIME_KEY))
    })?;

    column
        .iter()
        .enumerate()
        .map(|(row, cell)| match cell {
            None => Ok(None),
            Some(Value::DateTime(t)) => Ok(Some(*t)),
            Some(other) => Err(ImputeError::InvalidInput(format!(
                "Row {} of '{}' holds {:?} instead of a timestamp",
                row, DATETIME_KEY, other
            ))),
        })
        .collect()
}

/// Write `fill(mu)` into every row of `rows`, where `mu` is the position of the row's timestamp
/// between the timestamps of the `bounds` rows.
fn fill_span<F>(
    cells: &mut [Option<Value>],
    times: &[DateTime<Utc>],
    rows: Range<usize>,
    bounds: (usize, usize),
    fill: F,
) -> usize
where
    F: Fn(f64) -> Value,
{
    let (t0, t1) = (times[bounds.0], times[bounds.1]);
    let mut n = 0;
    for i in rows {
        cells[i] = Some(fill(relative_position(times[i], t0, t1)));
        n += 1;
    }
    n
}
