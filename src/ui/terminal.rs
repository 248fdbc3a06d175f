//! ratatui front end on the alternate screen.

use std::collections::VecDeque;
use std::io::Stdout;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use super::{LoginField, LoginView, MenuView, PlaybackView, Screen, Ui};
use super::{legend_lines, menu_lines};
use crate::error::Result;

/// How many recent warnings stay on screen.
const MAX_WARNINGS: usize = 3;

pub struct TerminalUi {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    screen: Option<Screen>,
    pending: String,
    warnings: VecDeque<String>,
}

impl TerminalUi {
    /// Switch the terminal to raw mode and the alternate screen.
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            screen: None,
            pending: String::new(),
            warnings: VecDeque::new(),
        })
    }

    /// Give the terminal back in the state we found it.
    pub fn leave(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    fn redraw(&mut self) -> Result<()> {
        let Some(screen) = self.screen.as_ref() else {
            return Ok(());
        };
        let pending = self.pending.as_str();
        let warnings = &self.warnings;
        self.terminal
            .draw(|frame| draw(frame, screen, pending, warnings))?;
        Ok(())
    }
}

impl Ui for TerminalUi {
    fn show(&mut self, screen: Screen) -> Result<()> {
        self.screen = Some(screen);
        self.redraw()
    }

    fn echo(&mut self, pending: &str) -> Result<()> {
        if self.pending != pending {
            self.pending = pending.to_string();
        }
        self.redraw()
    }

    fn warn(&mut self, message: &str) {
        tracing::warn!("{}", message);
        if self.warnings.len() == MAX_WARNINGS {
            self.warnings.pop_front();
        }
        self.warnings.push_back(message.to_string());
    }
}

fn block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

fn lines(text: Vec<String>) -> Vec<Line<'static>> {
    text.into_iter().map(Line::from).collect()
}

/// Render `screen` plus the warnings strip and the `>>` prompt.
fn draw(frame: &mut Frame, screen: &Screen, pending: &str, warnings: &VecDeque<String>) {
    let warn_height = if warnings.is_empty() {
        0
    } else {
        warnings.len() as u16 + 2
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(warn_height),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let prompt_title = match screen {
        Screen::Login(login) => {
            draw_login(frame, login, chunks[0]);
            match login.field {
                LoginField::Email => " Email ",
                LoginField::Password => " Password ",
            }
        }
        Screen::Menu(menu) => {
            draw_menu(frame, menu, chunks[0]);
            " select "
        }
        Screen::Playback(view) => {
            draw_playback(frame, view, chunks[0]);
            if view.paused { " PAUSED " } else { " command " }
        }
    };

    if !warnings.is_empty() {
        let text: Vec<Line> = warnings
            .iter()
            .map(|w| Line::from(format!("Warning: {w}")))
            .collect();
        let par = Paragraph::new(text)
            .yellow()
            .block(block(" warnings "))
            .wrap(Wrap { trim: true });
        frame.render_widget(par, chunks[1]);
    }

    let shown = match screen {
        Screen::Login(LoginView {
            field: LoginField::Password,
            ..
        }) => "*".repeat(pending.chars().count()),
        _ => pending.to_string(),
    };
    let prompt = Paragraph::new(format!(">> {shown}")).block(block(prompt_title));
    frame.render_widget(prompt, chunks[2]);
}

fn draw_login(frame: &mut Frame, login: &LoginView, area: Rect) {
    let mut text = vec![Line::from("Sign in to the catalog"), Line::from("")];
    if login.field == LoginField::Password {
        text.push(Line::from(format!("Email: {}", login.email)));
    }
    let par = Paragraph::new(text).block(block(" gpmctl "));
    frame.render_widget(par, area);
}

fn draw_menu(frame: &mut Frame, menu: &MenuView, area: Rect) {
    let mut text = lines(menu_lines(menu));
    text.push(Line::from(""));
    text.push(Line::from(menu.prompt()).add_modifier(Modifier::BOLD));
    let par = Paragraph::new(text)
        .block(block(" menu "))
        .wrap(Wrap { trim: false });
    frame.render_widget(par, area);
}

fn draw_playback(frame: &mut Frame, view: &PlaybackView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(4),
            Constraint::Min(1),
        ])
        .split(area);

    let info = Paragraph::new(lines(view.info_lines())).block(block(" track "));
    frame.render_widget(info, chunks[0]);

    let mut progress = Paragraph::new(lines(view.progress_lines())).block(block(" progress "));
    if view.paused {
        progress = progress.style(Style::default().add_modifier(Modifier::DIM));
    }
    frame.render_widget(progress, chunks[1]);

    let legend = Paragraph::new(lines(legend_lines()))
        .block(block(" Command List "))
        .wrap(Wrap { trim: true });
    frame.render_widget(legend, chunks[2]);
}
