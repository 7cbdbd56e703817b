use chrono::NaiveDate;
use std::collections::HashMap;

/// Date × station table of extracted rainfall values.
///
/// Rows keep insertion order and columns keep first-seen order. A cell with
/// no value is simply absent.
#[derive(Debug, Clone, Default)]
pub struct OutputTable {
    dates: Vec<NaiveDate>,
    row_index: HashMap<NaiveDate, usize>,
    columns: Vec<String>,
    column_index: HashMap<String, usize>,
    cells: HashMap<(usize, usize), f64>,
}

impl OutputTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty row for `date`. An existing row keeps its position.
    pub fn init_row(&mut self, date: NaiveDate) {
        if !self.row_index.contains_key(&date) {
            self.row_index.insert(date, self.dates.len());
            self.dates.push(date);
        }
    }

    /// Add an empty column for `name`. An existing column keeps its position.
    pub fn add_column(&mut self, name: &str) {
        if !self.column_index.contains_key(name) {
            self.column_index.insert(name.to_string(), self.columns.len());
            self.columns.push(name.to_string());
        }
    }

    /// Store a value, creating the column if needed and overwriting any
    /// earlier value in the cell. Returns `false` when `date` has no row.
    pub fn set(&mut self, date: NaiveDate, column: &str, value: f64) -> bool {
        let Some(&row) = self.row_index.get(&date) else {
            return false;
        };
        self.add_column(column);
        let col = self.column_index[column];
        self.cells.insert((row, col), value);
        true
    }

    pub fn get(&self, date: NaiveDate, column: &str) -> Option<f64> {
        let row = self.row_index.get(&date)?;
        let col = self.column_index.get(column)?;
        self.cells.get(&(*row, *col)).copied()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Cells of row `row` in column order.
    pub fn row_values(&self, row: usize) -> impl Iterator<Item = Option<f64>> + '_ {
        (0..self.columns.len()).map(move |col| self.cells.get(&(row, col)).copied())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Number of cells holding a value.
    pub fn filled_cells(&self) -> usize {
        self.cells.len()
    }
}
