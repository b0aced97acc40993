use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Text typed into the registration form. Values are kept raw; all parsing
/// happens in the controller.
#[derive(Default, Clone)]
pub(crate) struct RegisterForm {
    pub(crate) enrollment: String,
    pub(crate) name: String,
    pub(crate) score1: String,
    pub(crate) score2: String,
    pub(crate) active: RegisterField,
}

/// Fields available within the registration form, in display order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum RegisterField {
    #[default]
    Enrollment,
    Name,
    Score1,
    Score2,
}

impl RegisterField {
    pub(crate) const ALL: [RegisterField; 4] = [
        RegisterField::Enrollment,
        RegisterField::Name,
        RegisterField::Score1,
        RegisterField::Score2,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            RegisterField::Enrollment => "Enrollment",
            RegisterField::Name => "Name",
            RegisterField::Score1 => "Score 1",
            RegisterField::Score2 => "Score 2",
        }
    }

    /// Row offset inside the form block.
    pub(crate) fn row(self) -> u16 {
        match self {
            RegisterField::Enrollment => 0,
            RegisterField::Name => 1,
            RegisterField::Score1 => 2,
            RegisterField::Score2 => 3,
        }
    }

    fn next(self) -> Self {
        match self {
            RegisterField::Enrollment => RegisterField::Name,
            RegisterField::Name => RegisterField::Score1,
            RegisterField::Score1 => RegisterField::Score2,
            RegisterField::Score2 => RegisterField::Enrollment,
        }
    }

    fn previous(self) -> Self {
        match self {
            RegisterField::Enrollment => RegisterField::Score2,
            RegisterField::Name => RegisterField::Enrollment,
            RegisterField::Score1 => RegisterField::Name,
            RegisterField::Score2 => RegisterField::Score1,
        }
    }
}

impl RegisterForm {
    pub(crate) fn next_field(&mut self) {
        self.active = self.active.next();
    }

    pub(crate) fn previous_field(&mut self) {
        self.active = self.active.previous();
    }

    /// Append a character to the active field. Control characters are the
    /// only thing refused here; numeric checks belong to the controller.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.value_mut(self.active).push(ch);
        true
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        self.value_mut(self.active).pop();
    }

    /// Wipe every field and return focus to the first one.
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn value(&self, field: RegisterField) -> &str {
        match field {
            RegisterField::Enrollment => &self.enrollment,
            RegisterField::Name => &self.name,
            RegisterField::Score1 => &self.score1,
            RegisterField::Score2 => &self.score2,
        }
    }

    fn value_mut(&mut self, field: RegisterField) -> &mut String {
        match field {
            RegisterField::Enrollment => &mut self.enrollment,
            RegisterField::Name => &mut self.name,
            RegisterField::Score1 => &mut self.score1,
            RegisterField::Score2 => &mut self.score2,
        }
    }

    /// Return the character count for the requested field.
    pub(crate) fn value_len(&self, field: RegisterField) -> usize {
        self.value(field).chars().count()
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: RegisterField) -> Line<'static> {
        let value = self.value(field);
        let is_active = self.active == field;

        let display = if value.is_empty() && !is_active {
            "<required>".to_string()
        } else {
            value.to_string()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ])
    }
}

/// Severity of a message dialog.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum MessageKind {
    Info,
    Error,
}

impl MessageKind {
    pub(crate) fn title(self) -> &'static str {
        match self {
            MessageKind::Info => "Success",
            MessageKind::Error => "Error",
        }
    }

    pub(crate) fn style(self) -> Style {
        match self {
            MessageKind::Info => Style::default().fg(Color::Green),
            MessageKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Modal message shown until the user dismisses it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MessageDialog {
    pub(crate) kind: MessageKind,
    pub(crate) text: String,
}

impl MessageDialog {
    pub(crate) fn info(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Info,
            text: text.into(),
        }
    }

    pub(crate) fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }
}
