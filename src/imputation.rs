//! Gap filling for chronologically ordered sensor records. A `RecordTable` holds one column per
//! measured field plus a mandatory `"datetime"` column, and an `Imputator` turns a table with
//! absent cells into one without them.

pub mod fill;
mod local;
mod table;
mod value;

pub use self::local::{FillLocalImputator, ImputatorOptions};
pub use self::table::{Axis, DATETIME_KEY, RecordTable};
pub use self::value::Value;

use crate::errors::ImputeError;
use serde::{Deserialize, Serialize};

/// Counts describing what an imputation pass did to a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImputationStats {
    /// Columns deleted because they held no values at all
    pub n_removed_cols: usize,

    /// Rows deleted, either for lacking a timestamp or for keeping an absent cell after filling
    pub n_removed_rows: usize,

    /// Number of non-timestamp cells written by the fill functions
    pub n_filled_fields: usize,

    /// Row count of the resulting table
    pub n_rows: usize,

    /// Column count of the resulting table
    pub n_cols: usize,
}

impl ImputationStats {
    /// Returns true if the pass removed and filled nothing.
    pub fn is_unchanged(&self) -> bool {
        self.n_removed_cols == 0 && self.n_removed_rows == 0 && self.n_filled_fields == 0
    }
}

/// Anything that can turn a table with absent cells into a complete one. The table is mutated in
/// place, so concurrent callers must each work on their own table.
pub trait Imputator {
    fn impute(&self, table: &mut RecordTable) -> Result<ImputationStats, ImputeError>;
}
