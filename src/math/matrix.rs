use serde::{Serialize, Deserialize};

/// Dense row-major matrix of `f64`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Builds a matrix from nested rows.
    ///
    /// Returns `None` when the rows are ragged. An empty outer vector yields a
    /// `0 x 0` matrix.
    pub fn from_data(data: Vec<Vec<f64>>) -> Option<Matrix> {
        let rows = data.len();
        let cols = data.first().map_or(0, Vec::len);
        if data.iter().any(|row| row.len() != cols) {
            return None;
        }
        Some(Matrix { rows, cols, data })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row][col] = value;
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}
