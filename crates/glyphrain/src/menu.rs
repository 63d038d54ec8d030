//! Options menu shown while the rain is paused.
//!
//! Single-key commands edit the shared [`Settings`]; numeric fields open a
//! value prompt that is validated on Enter. The menu never touches the grid
//! itself, it reports what changed through [`MenuAction`] and the app
//! reallocates or saves as needed.

use crossterm::event::{KeyCode, KeyEvent};
use glyphrain_core::{SettingField, Settings, Toggle};
use glyphrain_engine::RAIN_GREEN;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::update::UpdateStatus;

/// Longest value a prompt accepts.
const MAX_INPUT_LEN: usize = 24;

const MENU_WIDTH: u16 = 76;

/// What the app must do after a key was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    None,
    /// Close the menu and continue the rain.
    Resume,
    Quit,
    /// Settings were modified; `regrid` when the grid shape changed.
    Changed { regrid: bool },
    ResetDefaults,
    CheckUpdates,
    ShowDebugInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum MenuMode {
    #[default]
    Commands,
    Prompt {
        field: SettingField,
        input: String,
    },
    Info(Vec<String>),
}

/// Menu state: current mode plus the last feedback message.
#[derive(Debug, Default)]
pub struct OptionsMenu {
    mode: MenuMode,
    message: Option<String>,
}

impl OptionsMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the command list. A pending message is kept.
    pub fn open(&mut self) {
        self.mode = MenuMode::Commands;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Field and partial input of the open prompt.
    pub fn prompt(&self) -> Option<(SettingField, &str)> {
        match &self.mode {
            MenuMode::Prompt { field, input } => Some((*field, input.as_str())),
            _ => None,
        }
    }

    /// Replace the command list with informational lines until the next key.
    pub fn show_info(&mut self, lines: Vec<String>) {
        self.mode = MenuMode::Info(lines);
    }

    /// Handle a key press, editing `settings` in place.
    pub fn handle_key(&mut self, key: KeyEvent, settings: &mut Settings) -> MenuAction {
        match self.mode {
            MenuMode::Commands => self.handle_command(key, settings),
            MenuMode::Prompt { .. } => self.handle_prompt(key, settings),
            MenuMode::Info(_) => {
                self.mode = MenuMode::Commands;
                MenuAction::None
            }
        }
    }

    fn handle_command(&mut self, key: KeyEvent, settings: &mut Settings) -> MenuAction {
        let KeyCode::Char(c) = key.code else {
            return match key.code {
                KeyCode::Enter | KeyCode::Esc => MenuAction::Resume,
                _ => MenuAction::None,
            };
        };

        if let Some(field) = SettingField::from_key(c) {
            self.mode = MenuMode::Prompt {
                field,
                input: String::new(),
            };
            self.message = None;
            return MenuAction::None;
        }

        if let Some(toggle) = Toggle::from_key(c) {
            let enabled = settings.toggle(toggle);
            self.message = Some(format!(
                "{} {}.",
                capitalize(toggle.label()),
                if enabled { "enabled" } else { "disabled" }
            ));
            return MenuAction::Changed { regrid: false };
        }

        match c {
            'q' => MenuAction::Quit,
            'h' => {
                self.message = Some("Press the key of a command to run it.".to_string());
                MenuAction::None
            }
            'u' => MenuAction::CheckUpdates,
            'i' => MenuAction::ShowDebugInfo,
            'x' => MenuAction::ResetDefaults,
            _ => {
                self.message = Some(format!("Unknown command '{c}'. Press h for help."));
                MenuAction::None
            }
        }
    }

    fn handle_prompt(&mut self, key: KeyEvent, settings: &mut Settings) -> MenuAction {
        let MenuMode::Prompt { field, input } = &mut self.mode else {
            return MenuAction::None;
        };
        let field = *field;

        match key.code {
            KeyCode::Esc => {
                self.mode = MenuMode::Commands;
                MenuAction::None
            }
            KeyCode::Enter => {
                let raw = std::mem::take(input);
                self.mode = MenuMode::Commands;
                if raw.trim().is_empty() {
                    return MenuAction::None;
                }
                match settings.apply(field, &raw) {
                    Ok(()) => {
                        self.message = Some(format!(
                            "{} updated: {}",
                            capitalize(field.label()),
                            settings.display_value(field)
                        ));
                        MenuAction::Changed {
                            regrid: field.resizes_grid(),
                        }
                    }
                    Err(e) => {
                        self.message = Some(format!("Rejected: {e}."));
                        MenuAction::None
                    }
                }
            }
            KeyCode::Backspace => {
                input.pop();
                MenuAction::None
            }
            KeyCode::Char(c) if !c.is_control() && input.len() < MAX_INPUT_LEN => {
                input.push(c);
                MenuAction::None
            }
            _ => MenuAction::None,
        }
    }

    /// Draw the menu as a popup over `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect, settings: &Settings, update: &UpdateStatus) {
        let accent = Style::new().fg(RAIN_GREEN);
        let (title, mut lines) = match &self.mode {
            MenuMode::Info(info) => (
                " debug info ",
                info.iter()
                    .map(|l| Line::from(l.clone()))
                    .collect::<Vec<_>>(),
            ),
            _ => (" glyphrain options ", help_lines(settings)),
        };

        lines.push(Line::default());
        match &self.mode {
            MenuMode::Info(_) => lines.push("Press any key to go back.".dark_gray().into()),
            MenuMode::Prompt { field, input } => {
                lines.push(Line::from(vec![
                    Span::raw(format!(
                        "New {} ({}, current: {}): ",
                        field.label(),
                        field.range_label(),
                        settings.display_value(*field)
                    )),
                    Span::styled(format!("{input}_"), accent.add_modifier(Modifier::BOLD)),
                ]));
                lines.push("Enter to apply, Esc to cancel.".dark_gray().into());
            }
            MenuMode::Commands => {
                lines.push(Line::from(update.message()).dark_gray());
                lines.push(Line::from(self.message.clone().unwrap_or_else(|| {
                    "Enter a command, or press Enter to return to the rain.".to_string()
                })));
            }
        }

        let height = (lines.len() as u16).saturating_add(2);
        let popup = centered(area, MENU_WIDTH, height);
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(Block::bordered().title(title).border_style(accent)),
            popup,
        );
    }
}

/// Command reference with the current value of every setting.
pub fn help_lines(settings: &Settings) -> Vec<Line<'static>> {
    let state = |on: bool| if on { "enabled" } else { "disabled" };
    let mut lines = vec![command_line('q', "Quit the program".to_string())];
    lines.extend(SettingField::ALL.into_iter().map(|field| {
        command_line(
            field.key(),
            format!(
                "Set {} ({}, current: {})",
                field.label(),
                field.range_label(),
                settings.display_value(field)
            ),
        )
    }));
    lines.extend(Toggle::ALL.into_iter().map(|toggle| {
        command_line(
            toggle.key(),
            format!(
                "Toggle {} ({})",
                toggle.label(),
                state(settings.is_enabled(toggle))
            ),
        )
    }));
    lines.push(command_line('h', "Display this help message".to_string()));
    lines.push(command_line(
        'u',
        format!(
            "Check for updates (current version: {})",
            env!("CARGO_PKG_VERSION")
        ),
    ));
    lines.push(command_line('i', "Show debug information".to_string()));
    lines.push(command_line('x', "Reset settings to defaults".to_string()));
    lines
}

fn command_line(key: char, text: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {key}"),
            Style::new().fg(RAIN_GREEN).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" - {text}")),
    ])
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    area
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
