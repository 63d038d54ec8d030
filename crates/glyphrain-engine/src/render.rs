//! Projection of the grid into styled terminal lines.

use glyphrain_core::Settings;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::color::{RAIN_GREEN, fade_color};
use crate::grid::GridState;

/// Style of a single cell.
pub fn cell_style(fade_level: u8, bold: bool, settings: &Settings) -> Style {
    let color = if settings.fade_enabled && fade_level > 0 {
        fade_color(fade_level)
    } else {
        RAIN_GREEN
    };
    let style = Style::new().fg(color);
    if settings.bold_enabled && bold {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

/// Render the grid row by row, one span per cell.
pub fn draw(grid: &GridState, settings: &Settings) -> Vec<Line<'static>> {
    grid.character_rows()
        .iter()
        .zip(grid.fade_rows())
        .zip(grid.bold_rows())
        .map(|((chars, fades), bolds)| {
            let spans: Vec<Span> = chars
                .iter()
                .zip(fades)
                .zip(bolds)
                .map(|((&ch, &fade), &bold)| {
                    Span::styled(ch.to_string(), cell_style(fade, bold, settings))
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RainEngine;
    use ratatui::style::Color;

    #[test]
    fn test_fade_ramp() {
        let settings = Settings::default();
        assert_eq!(cell_style(0, false, &settings).fg, Some(RAIN_GREEN));
        assert_eq!(cell_style(1, false, &settings).fg, Some(Color::LightGreen));
        assert_eq!(cell_style(2, false, &settings).fg, Some(Color::Rgb(0, 100, 0)));
        assert_eq!(cell_style(3, false, &settings).fg, Some(Color::DarkGray));
        assert_eq!(cell_style(4, false, &settings).fg, Some(Color::Black));
    }

    #[test]
    fn test_fade_disabled_uses_base_color() {
        let settings = Settings {
            fade_enabled: false,
            ..Default::default()
        };
        for level in 0..=4 {
            assert_eq!(cell_style(level, false, &settings).fg, Some(RAIN_GREEN));
        }
    }

    #[test]
    fn test_bold_requires_setting_and_cell() {
        let mut settings = Settings::default();
        assert!(
            cell_style(0, true, &settings)
                .add_modifier
                .contains(Modifier::BOLD)
        );
        assert!(
            !cell_style(0, false, &settings)
                .add_modifier
                .contains(Modifier::BOLD)
        );
        settings.bold_enabled = false;
        assert!(
            !cell_style(0, true, &settings)
                .add_modifier
                .contains(Modifier::BOLD)
        );
    }

    #[test]
    fn test_draw_shape_and_content() {
        let settings = Settings {
            rows: 10,
            columns: 20,
            ..Default::default()
        };
        let mut engine = RainEngine::seeded(3);
        let mut grid = engine.new_grid(&settings);
        engine.tick(&mut grid, &settings);
        let snapshot = grid.clone();

        let lines = draw(&grid, &settings);
        assert_eq!(grid, snapshot);
        assert_eq!(lines.len(), 10);
        for (row, line) in lines.iter().enumerate() {
            assert_eq!(line.spans.len(), 20);
            for (column, span) in line.spans.iter().enumerate() {
                assert_eq!(span.content, grid.character(row, column).to_string());
                assert_eq!(
                    span.style,
                    cell_style(
                        grid.fade_level(row, column),
                        grid.is_bold(row, column),
                        &settings
                    )
                );
            }
        }
    }
}
