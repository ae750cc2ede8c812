//! This module contains the ordered, column oriented record table which the imputators operate
//! on. Each column is a sequence of optional cells, and all columns share the same row count.

use crate::Result;
use crate::imputation::Value;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Name of the mandatory timestamp column.
pub const DATETIME_KEY: &str = "datetime";

/// Selects whether `RecordTable::strip` acts on rows or on columns.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    Rows,
    Cols,
}

/// A mapping from field name to an equally long sequence of optional cells, with the column
/// order preserved as inserted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordTable {
    keys: Vec<String>,
    columns: Vec<Vec<Option<Value>>>,
}

impl RecordTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from named columns. All columns must have the same length and the names
    /// must be unique.
    ///
    /// # Arguments
    ///
    /// * `columns`: the (name, cells) pairs, in the order they should appear in the table
    ///
    /// returns: Result<RecordTable, Box<dyn Error, Global>>
    ///
    /// # Examples
    ///
    /// ```
    /// use sailpolar::{RecordTable, Value};
    /// let table = RecordTable::from_columns(vec![
    ///     ("x", vec![Some(Value::Float(1.0)), None]),
    ///     ("y", vec![None, Some(Value::Int(2))]),
    /// ]).unwrap();
    /// assert_eq!(table.n_rows(), 2);
    /// assert_eq!(table.n_cols(), 2);
    /// ```
    pub fn from_columns<K: Into<String>>(columns: Vec<(K, Vec<Option<Value>>)>) -> Result<Self> {
        let mut table = Self::new();
        for (key, values) in columns {
            table.insert_column(key, values)?;
        }
        Ok(table)
    }

    /// Number of rows, taken from the first column. A table without columns has no rows.
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.len())
    }

    pub fn n_cols(&self) -> usize {
        self.keys.len()
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn column(&self, key: &str) -> Option<&[Option<Value>]> {
        self.position(key).map(|i| self.columns[i].as_slice())
    }

    /// Mutable access to the cells of a column. The length of the column cannot be changed
    /// through this view.
    pub fn column_mut(&mut self, key: &str) -> Option<&mut [Option<Value>]> {
        self.position(key).map(|i| self.columns[i].as_mut_slice())
    }

    /// Get the present value at the given row of a column, if there is one.
    pub fn get(&self, key: &str, row: usize) -> Option<&Value> {
        self.column(key)?.get(row)?.as_ref()
    }

    /// Overwrite a single cell.
    pub fn set(&mut self, key: &str, row: usize, value: Option<Value>) -> Result<()> {
        let n_rows = self.n_rows();
        let column = self
            .column_mut(key)
            .ok_or_else(|| format!("No column named '{}'", key))?;
        let cell = column
            .get_mut(row)
            .ok_or_else(|| format!("Row {} is out of range for {} rows", row, n_rows))?;
        *cell = value;
        Ok(())
    }

    /// Insert a column at the end of the table, or replace the cells of an existing column with
    /// the same name. The new cells must match the row count of the table unless the table has
    /// no columns yet.
    pub fn insert_column<K: Into<String>>(
        &mut self,
        key: K,
        values: Vec<Option<Value>>,
    ) -> Result<()> {
        let key = key.into();
        let replacing = self.position(&key);
        let others = self.n_cols() - usize::from(replacing.is_some());
        if others > 0 && values.len() != self.n_rows() {
            return Err(Box::from(format!(
                "Column '{}' has {} rows but the table has {}",
                key,
                values.len(),
                self.n_rows()
            )));
        }

        match replacing {
            Some(i) => self.columns[i] = values,
            None => {
                self.keys.push(key);
                self.columns.push(values);
            }
        }
        Ok(())
    }

    /// Remove a column and return its cells.
    pub fn remove_column(&mut self, key: &str) -> Option<Vec<Option<Value>>> {
        let i = self.position(key)?;
        self.keys.remove(i);
        Some(self.columns.remove(i))
    }

    /// Remove every column (`Axis::Cols`) or every row (`Axis::Rows`) which holds no present
    /// value at all. Returns the number of removed columns or rows.
    pub fn strip(&mut self, axis: Axis) -> usize {
        match axis {
            Axis::Cols => self.strip_cols_except(&[]),
            Axis::Rows => {
                let empty = (0..self.n_rows())
                    .filter(|&row| self.columns.iter().all(|c| c[row].is_none()))
                    .collect::<Vec<_>>();
                self.delete(&empty)
            }
        }
    }

    /// Remove every column without any present value, except the named ones which are always
    /// kept. A table without rows keeps all of its columns. Returns the number of removed
    /// columns.
    pub fn strip_cols_except(&mut self, keep: &[&str]) -> usize {
        if self.n_rows() == 0 {
            return 0;
        }
        let before = self.n_cols();
        let (keys, columns): (Vec<_>, Vec<_>) = self
            .keys
            .drain(..)
            .zip(self.columns.drain(..))
            .filter(|(k, c)| keep.contains(&k.as_str()) || c.iter().any(Option::is_some))
            .unzip();
        self.keys = keys;
        self.columns = columns;
        before - self.n_cols()
    }

    /// Delete the rows at the given indices from every column. Duplicate and out of range
    /// indices are ignored. Returns the number of rows actually removed.
    pub fn delete(&mut self, rows: &[usize]) -> usize {
        let n_rows = self.n_rows();
        let doomed = rows
            .iter()
            .copied()
            .filter(|&r| r < n_rows)
            .collect::<HashSet<_>>();
        if doomed.is_empty() {
            return 0;
        }

        for column in self.columns.iter_mut() {
            let mut row = 0;
            column.retain(|_| {
                let keep = !doomed.contains(&row);
                row += 1;
                keep
            });
        }
        doomed.len()
    }

    /// Returns true if no cell of the table is absent.
    pub fn is_complete(&self) -> bool {
        self.columns.iter().flatten().all(Option::is_some)
    }

    /// Indices of the rows which hold at least one absent cell.
    pub fn incomplete_rows(&self) -> Vec<usize> {
        (0..self.n_rows())
            .filter(|&row| self.columns.iter().any(|c| c[row].is_none()))
            .collect()
    }

    /// Check the structural invariants of the table, which can be broken by deserializing a
    /// table from untrusted input: one cell sequence per key, equal column lengths, and unique
    /// keys.
    pub fn check_shape(&self) -> Result<()> {
        if self.keys.len() != self.columns.len() {
            return Err(Box::from(format!(
                "Table has {} keys but {} columns",
                self.keys.len(),
                self.columns.len()
            )));
        }

        if let Some(dup) = self.keys.iter().duplicates().next() {
            return Err(Box::from(format!("Column '{}' appears more than once", dup)));
        }

        let n_rows = self.n_rows();
        if let Some((key, column)) = self
            .keys
            .iter()
            .zip(self.columns.iter())
            .find(|(_, c)| c.len() != n_rows)
        {
            return Err(Box::from(format!(
                "Column '{}' has {} rows but the table has {}",
                key,
                column.len(),
                n_rows
            )));
        }

        Ok(())
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }
}
