//! Per-cell rain state.

use rand::Rng;

use crate::chars::BLANK;

/// Character, fade and bold grids plus the head row of every column.
///
/// All three grids are `rows x columns` and `drops` has one entry per
/// column; [`GridState::reset`] is the only way to change the shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    pub(crate) rows: usize,
    pub(crate) columns: usize,
    pub(crate) characters: Vec<Vec<char>>,
    pub(crate) fade: Vec<Vec<u8>>,
    pub(crate) bold: Vec<Vec<bool>>,
    /// Head row per column; may run a few rows past the bottom.
    pub(crate) drops: Vec<usize>,
}

impl GridState {
    /// Create a blank grid with randomly placed drops.
    pub fn new<R: Rng>(rows: usize, columns: usize, rng: &mut R) -> Self {
        let mut grid = Self {
            rows: 0,
            columns: 0,
            characters: Vec::new(),
            fade: Vec::new(),
            bold: Vec::new(),
            drops: Vec::new(),
        };
        grid.reset(rows, columns, rng);
        grid
    }

    /// Reallocate every grid for the given shape and reseed the drops.
    pub fn reset<R: Rng>(&mut self, rows: usize, columns: usize, rng: &mut R) {
        self.rows = rows;
        self.columns = columns;
        self.characters = vec![vec![BLANK; columns]; rows];
        self.fade = vec![vec![0; columns]; rows];
        self.bold = vec![vec![false; columns]; rows];
        self.drops = (0..columns)
            .map(|_| if rows == 0 { 0 } else { rng.random_range(0..rows) })
            .collect();
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn character(&self, row: usize, column: usize) -> char {
        self.characters[row][column]
    }

    pub fn fade_level(&self, row: usize, column: usize) -> u8 {
        self.fade[row][column]
    }

    pub fn is_bold(&self, row: usize, column: usize) -> bool {
        self.bold[row][column]
    }

    /// Current head row of a column.
    pub fn drop_row(&self, column: usize) -> usize {
        self.drops[column]
    }

    pub fn drop_rows(&self) -> &[usize] {
        &self.drops
    }

    /// Row-major view of the character grid.
    pub fn character_rows(&self) -> &[Vec<char>] {
        &self.characters
    }

    pub fn fade_rows(&self) -> &[Vec<u8>] {
        &self.fade
    }

    pub fn bold_rows(&self) -> &[Vec<bool>] {
        &self.bold
    }

    /// Number of bold cells in the whole grid.
    pub fn bold_count(&self) -> usize {
        self.bold.iter().flatten().filter(|&&bold| bold).count()
    }
}
