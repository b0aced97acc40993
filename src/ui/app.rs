use std::mem;

use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::controller::Controller;
use crate::error::StoreError;
use crate::lookup::StudentLookup;
use crate::store::StudentStore;

use super::forms::{MessageDialog, RegisterField, RegisterForm};
use super::helpers::{centered_rect, key_hints};

/// Footer space reserved for key hints.
const FOOTER_HEIGHT: u16 = 2;

/// Fine-grained modes layered over whichever window is showing.
enum Mode {
    Normal,
    Message(MessageDialog),
}

/// Central application state: the registration form (main window), the
/// student view (child window), and the controller both talk to.
pub struct App<S: StudentStore> {
    controller: Controller<S>,
    form: RegisterForm,
    lookup: StudentLookup,
    mode: Mode,
}

impl<S: StudentStore> App<S> {
    pub fn new(controller: Controller<S>) -> Self {
        Self {
            controller,
            form: RegisterForm::default(),
            lookup: StudentLookup::new(),
            mode: Mode::Normal,
        }
    }

    /// Dispatch one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Message(dialog) => self.handle_message(code, dialog),
            Mode::Normal if self.lookup.is_open() => self.handle_student_view(code),
            Mode::Normal => self.handle_register_form(code, &mut exit),
        };

        exit
    }

    /// Open the student view. Ignored while a dialog is up or the view is
    /// already showing.
    pub(crate) fn handle_ctrl_l(&mut self) {
        if !matches!(self.mode, Mode::Normal) || self.lookup.is_open() {
            return;
        }

        if let Err(err) = self.lookup.open(&self.controller) {
            self.mode = Mode::Message(MessageDialog::error(err.to_string()));
        }
    }

    /// Release the store. Called once when the event loop ends.
    pub fn shutdown(&mut self) -> Result<(), StoreError> {
        self.lookup.close();
        self.controller.close()
    }

    fn handle_message(&mut self, code: KeyCode, dialog: MessageDialog) -> Mode {
        match code {
            KeyCode::Enter | KeyCode::Esc => Mode::Normal,
            _ => Mode::Message(dialog),
        }
    }

    fn handle_register_form(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Esc => *exit = true,
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.previous_field(),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Enter => return self.submit_form(),
            KeyCode::Char(ch) => {
                self.form.push_char(ch);
            }
            _ => {}
        }
        Mode::Normal
    }

    fn handle_student_view(&mut self, code: KeyCode) -> Mode {
        match code {
            KeyCode::Esc => self.lookup.close(),
            KeyCode::Up => self.lookup.move_selection(-1),
            KeyCode::Down => self.lookup.move_selection(1),
            KeyCode::PageUp => self.lookup.move_selection(-5),
            KeyCode::PageDown => self.lookup.move_selection(5),
            KeyCode::Home => self.lookup.move_selection(isize::MIN / 2),
            KeyCode::End => self.lookup.move_selection(isize::MAX / 2),
            KeyCode::Enter => {
                if let Err(err) = self.lookup.select_current(&self.controller) {
                    return Mode::Message(MessageDialog::error(err.to_string()));
                }
            }
            _ => {}
        }
        Mode::Normal
    }

    fn submit_form(&mut self) -> Mode {
        let form = &self.form;
        match self
            .controller
            .register(&form.enrollment, &form.name, &form.score1, &form.score2)
        {
            Ok(_) => {
                self.form.clear();
                Mode::Message(MessageDialog::info("Student registered successfully."))
            }
            Err(err) => Mode::Message(MessageDialog::error(err.to_string())),
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        self.draw_register_form(frame, content_area);

        if self.lookup.is_open() {
            self.draw_student_view(frame, content_area);
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        if let Mode::Message(dialog) = &self.mode {
            self.draw_message(frame, area, dialog);
        }
    }

    fn draw_register_form(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Student Registration")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let lines: Vec<Line> = RegisterField::ALL
            .iter()
            .map(|&field| self.form.build_line(field))
            .collect();
        let paragraph = Paragraph::new(lines);
        frame.render_widget(paragraph, inner);

        if matches!(self.mode, Mode::Normal) && !self.lookup.is_open() {
            let field = self.form.active;
            let prefix = format!("{}: ", field.label()).len() as u16;
            let cursor_x = inner.x + prefix + self.form.value_len(field) as u16;
            let cursor_y = inner.y + field.row();
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }

    /// Child window: enrollment list on the left, selected record on the right.
    fn draw_student_view(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(70, 70, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Registered Students")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(16), Constraint::Min(0)])
            .split(inner);

        let list_block = Block::default()
            .title("Enrollment")
            .borders(Borders::RIGHT);
        let ids = self.lookup.ids();
        if ids.is_empty() {
            let message = Paragraph::new("No students yet.")
                .block(list_block)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(message, columns[0]);
        } else {
            let items: Vec<ListItem> = ids
                .iter()
                .map(|id| ListItem::new(id.to_string()))
                .collect();
            let list = List::new(items)
                .block(list_block)
                .highlight_style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("> ");
            let mut state = ListState::default();
            state.select(Some(self.lookup.selected_index()));
            frame.render_stateful_widget(list, columns[0], &mut state);
        }

        let details: Vec<Line> = match self.lookup.displayed() {
            Some(student) => student
                .display_lines()
                .into_iter()
                .map(Line::from)
                .collect(),
            None => vec![Line::from(Span::styled(
                "Select an enrollment and press Enter.",
                Style::default().fg(Color::Gray),
            ))],
        };
        let paragraph = Paragraph::new(details)
            .block(Block::default().title("Student"))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, columns[1]);
    }

    fn draw_message(&self, frame: &mut Frame, area: Rect, dialog: &MessageDialog) {
        let popup_area = centered_rect(50, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(dialog.kind.title())
            .borders(Borders::ALL)
            .border_style(dialog.kind.style());
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(dialog.text.clone()),
            Line::from(""),
            Line::from(Span::styled(
                "Press Enter or Esc to close.",
                Style::default().fg(Color::Gray),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);
        frame.render_widget(Paragraph::new(self.footer_instructions()), inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        match &self.mode {
            Mode::Message(_) => key_hints(&[("Enter/Esc", "Close")]),
            Mode::Normal if self.lookup.is_open() => key_hints(&[
                ("↑↓", "Navigate"),
                ("Enter", "Show"),
                ("Esc", "Back"),
            ]),
            Mode::Normal => key_hints(&[
                ("Tab", "Next Field"),
                ("Enter", "Register"),
                ("Ctrl+L", "View Students"),
                ("Esc", "Quit"),
            ]),
        }
    }
}
