//! Per-cell cost classification and its CSV loader.
//!
//! # CSV format
//!
//! One row per map row, no header, one integer code per cell:
//!
//! ```csv
//! 2,2,2,0
//! 2,1,1,0
//! 2,2,2,2
//! ```
//!
//! | Code | Class    |
//! |------|----------|
//! | `0`  | SOLID    |
//! | `1`  | ROAD     |
//! | `2`  | NORMAL   |
//!
//! Every row must have the same number of cells.

use std::io::Read;
use std::path::Path;

use crate::{SpatialError, SpatialResult};

// ── CostClass ─────────────────────────────────────────────────────────────────

/// Traversal class of one map cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum CostClass {
    /// Impassable.
    Solid = 0,
    Road = 1,
    #[default]
    Normal = 2,
}

impl CostClass {
    pub fn from_code(code: u8) -> Option<CostClass> {
        match code {
            0 => Some(CostClass::Solid),
            1 => Some(CostClass::Road),
            2 => Some(CostClass::Normal),
            _ => None,
        }
    }

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn is_solid(self) -> bool {
        self == CostClass::Solid
    }
}

// ── CostMap ───────────────────────────────────────────────────────────────────

/// Row-major grid of [`CostClass`] cells.
#[derive(Clone, Debug, PartialEq)]
pub struct CostMap {
    rows: usize,
    cols: usize,
    cells: Vec<CostClass>,
}

impl CostMap {
    /// A `rows × cols` map with every cell set to `fill`.
    pub fn new(rows: usize, cols: usize, fill: CostClass) -> Self {
        Self { rows, cols, cells: vec![fill; rows * cols] }
    }

    /// Build from nested rows.  All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<CostClass>>) -> SpatialResult<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (row, cells_in_row) in rows.iter().enumerate() {
            if cells_in_row.len() != cols {
                return Err(SpatialError::RaggedMap { row, expected: cols, got: cells_in_row.len() });
            }
            cells.extend_from_slice(cells_in_row);
        }
        Ok(Self { rows: rows.len(), cols, cells })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> CostClass {
        self.cells[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, class: CostClass) {
        self.cells[row * self.cols + col] = class;
    }

    /// Signed lookup; anything outside the map counts as SOLID.
    pub fn get_checked(&self, row: i64, col: i64) -> CostClass {
        if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.cols {
            CostClass::Solid
        } else {
            self.get(row as usize, col as usize)
        }
    }

    pub fn cells(&self) -> &[CostClass] {
        &self.cells
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Load a [`CostMap`] from a CSV file.
pub fn load_cost_map_csv(path: &Path) -> SpatialResult<CostMap> {
    let file = std::fs::File::open(path)?;
    load_cost_map_reader(file)
}

/// Like [`load_cost_map_csv`] but accepts any `Read` source.
pub fn load_cost_map_reader<R: Read>(reader: R) -> SpatialResult<CostMap> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        let parsed = record
            .iter()
            .enumerate()
            .map(|(col, field)| parse_cost(field, row, col))
            .collect::<SpatialResult<Vec<_>>>()?;
        rows.push(parsed);
    }

    let map = CostMap::from_rows(rows)?;
    log::debug!("loaded {}x{} cost map", map.rows(), map.cols());
    Ok(map)
}

fn parse_cost(field: &str, row: usize, col: usize) -> SpatialResult<CostClass> {
    field
        .parse::<u8>()
        .ok()
        .and_then(CostClass::from_code)
        .ok_or_else(|| SpatialError::InvalidCost { row, col, value: field.to_string() })
}
