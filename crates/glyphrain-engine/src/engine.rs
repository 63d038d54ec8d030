//! Per-tick update rule for the falling drops.

use std::time::Duration;

use glyphrain_core::Settings;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::chars::shuffled_palette;
use crate::color::MAX_FADE;
use crate::grid::GridState;

/// Chance per column and tick that a drop restarts at the top early.
const EARLY_RESET_PROBABILITY: f64 = 0.02;

/// Rows a drop may run past the bottom before it is forced back up.
const MAX_OVERSHOOT: usize = 4;

/// Random bold flips per tick, in percent of the cell count.
const RANDOM_BOLD_PERCENT: usize = 2;

/// Random fade bumps per tick, in percent of the cell count.
const RANDOM_FADE_PERCENT: usize = 1;

/// Running counters kept across ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Ticks applied since the engine was created.
    pub ticks: u64,
    /// Drops sent back to the top by the random early reset.
    pub early_resets: u64,
    /// Drops sent back to the top after overshooting the bottom.
    pub forced_resets: u64,
}

/// Advances a [`GridState`] one frame at a time.
///
/// Owns the random source used for glyph sampling, drop resets, the random
/// bold/fade perturbations and frame timing jitter.
#[derive(Debug)]
pub struct RainEngine<R = StdRng> {
    rng: R,
    palette: Vec<char>,
    stats: TickStats,
}

impl RainEngine<StdRng> {
    /// Engine seeded from the operating system.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Engine with a reproducible random sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for RainEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RainEngine<R> {
    /// Build an engine around any random source. The palette is shuffled
    /// once here.
    pub fn with_rng(mut rng: R) -> Self {
        let palette = shuffled_palette(&mut rng);
        Self {
            rng,
            palette,
            stats: TickStats::default(),
        }
    }

    pub fn palette(&self) -> &[char] {
        &self.palette
    }

    pub fn stats(&self) -> TickStats {
        self.stats
    }

    /// Allocate a grid shaped like `settings`.
    pub fn new_grid(&mut self, settings: &Settings) -> GridState {
        let (rows, columns) = settings.grid_size();
        GridState::new(rows, columns, &mut self.rng)
    }

    /// Reallocate `grid` for a new shape.
    pub fn reset_grid(&mut self, grid: &mut GridState, rows: usize, columns: usize) {
        log::debug!("grid reset to {rows}x{columns}");
        grid.reset(rows, columns, &mut self.rng);
    }

    /// Apply one frame: move every drop, then scatter the random effects.
    pub fn tick(&mut self, grid: &mut GridState, settings: &Settings) {
        self.advance_drops(grid, settings);
        self.perturb(grid, settings);
        self.stats.ticks += 1;
    }

    /// Write the heads, age the trails and move every drop one row.
    pub(crate) fn advance_drops(&mut self, grid: &mut GridState, settings: &Settings) {
        let rows = grid.rows;
        for column in 0..grid.columns {
            let drop = grid.drops[column];
            if drop < rows {
                grid.characters[drop][column] = self.sample_glyph();
                grid.fade[drop][column] = 0;
                grid.bold[drop][column] = true;
            }

            for row in (0..rows).filter(|&row| row != drop) {
                if settings.fade_enabled {
                    let level = &mut grid.fade[row][column];
                    *level = (*level + 1).min(MAX_FADE);
                }
                grid.bold[row][column] = false;
            }

            grid.drops[column] = if self.rng.random_bool(EARLY_RESET_PROBABILITY) {
                self.stats.early_resets += 1;
                0
            } else if drop >= rows + self.rng.random_range(0..=MAX_OVERSHOOT) {
                self.stats.forced_resets += 1;
                0
            } else {
                drop + 1
            };
        }
    }

    /// Random bold flips and fade bumps across the whole grid.
    pub(crate) fn perturb(&mut self, grid: &mut GridState, settings: &Settings) {
        let cells = grid.rows * grid.columns;
        if cells == 0 {
            return;
        }

        if settings.random_bold_enabled {
            for _ in 0..cells * RANDOM_BOLD_PERCENT / 100 {
                let (row, column) = self.random_cell(grid);
                grid.bold[row][column] = !grid.bold[row][column];
            }
        }

        if settings.random_fade_enabled {
            for _ in 0..cells * RANDOM_FADE_PERCENT / 100 {
                let (row, column) = self.random_cell(grid);
                let level = &mut grid.fade[row][column];
                *level = (*level + 1).min(MAX_FADE);
            }
        }
    }

    /// Time to wait before the next frame.
    pub fn frame_delay(&mut self, settings: &Settings) -> Duration {
        let speed = settings.speed.max(0.0);
        let seconds = if settings.speed_variation_enabled {
            self.rng.random_range(speed * 0.5..=speed * 1.5)
        } else {
            speed
        };
        Duration::from_secs_f64(seconds)
    }

    fn sample_glyph(&mut self) -> char {
        self.palette[self.rng.random_range(0..self.palette.len())]
    }

    fn random_cell(&mut self, grid: &GridState) -> (usize, usize) {
        (
            self.rng.random_range(0..grid.rows),
            self.rng.random_range(0..grid.columns),
        )
    }
}
