//! `DataFrame` module for named column containers.
//!
//! Provides a minimal `DataFrame` so comparisons can reference columns by
//! label instead of passing raw slices. Heavy data wrangling belongs in a
//! real dataframe library.

use crate::error::{CotejarError, Result};

/// A minimal `DataFrame` with named `f64` columns.
///
/// This is a thin wrapper around `Vec<(String, Vec<f64>)>` with the
/// column-lookup surface the comparator needs.
///
/// # Examples
///
/// ```
/// use cotejar::data::DataFrame;
///
/// let columns = vec![
///     ("expect".to_string(), vec![1.0, 2.0, 3.0]),
///     ("got".to_string(), vec![1.0, 2.0, 3.1]),
/// ];
/// let df = DataFrame::new(columns).unwrap();
/// assert_eq!(df.shape(), (3, 2));
/// assert_eq!(df.column("got").unwrap()[2], 3.1);
/// ```
#[derive(Debug, Clone)]
pub struct DataFrame {
    columns: Vec<(String, Vec<f64>)>,
    n_rows: usize,
}

impl DataFrame {
    /// Creates a new `DataFrame` from named columns.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no columns, if columns have different
    /// lengths, if a column name is empty, or if names are duplicated.
    pub fn new(columns: Vec<(String, Vec<f64>)>) -> Result<Self> {
        if columns.is_empty() {
            return Err("DataFrame must have at least one column".into());
        }

        let n_rows = columns[0].1.len();

        for (name, col) in &columns {
            if col.len() != n_rows {
                return Err(CotejarError::dimension_mismatch(
                    "column len",
                    n_rows,
                    col.len(),
                ));
            }
            if name.is_empty() {
                return Err("Column names cannot be empty".into());
            }
        }

        let mut names: Vec<&str> = columns.iter().map(|(n, _)| n.as_str()).collect();
        names.sort_unstable();
        for i in 1..names.len() {
            if names[i] == names[i - 1] {
                return Err("Duplicate column names not allowed".into());
            }
        }

        Ok(Self { columns, n_rows })
    }

    /// Returns the shape as (`n_rows`, `n_cols`).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.columns.len())
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Returns the column names.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Returns a reference to a column by name.
    ///
    /// # Errors
    ///
    /// Returns `ColumnNotFound` if the column doesn't exist.
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
            .ok_or_else(|| CotejarError::ColumnNotFound {
                name: name.to_string(),
            })
    }

    /// Adds a new column to the `DataFrame`.
    ///
    /// # Errors
    ///
    /// Returns an error if the length doesn't match or the name already
    /// exists.
    pub fn add_column(&mut self, name: String, data: Vec<f64>) -> Result<()> {
        if data.len() != self.n_rows {
            return Err(CotejarError::dimension_mismatch(
                "column len",
                self.n_rows,
                data.len(),
            ));
        }
        if self.columns.iter().any(|(n, _)| *n == name) {
            return Err("Duplicate column names not allowed".into());
        }
        self.columns.push((name, data));
        Ok(())
    }
}
