//! State machine behind the "view students" window. It knows nothing about
//! terminals or key events: the UI calls `open`, `select`, and `close`, and
//! renders whatever state comes back.

use std::mem;

use crate::controller::Controller;
use crate::error::RegistryError;
use crate::models::Student;
use crate::store::StudentStore;

/// Where the view currently stands.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LookupState {
    #[default]
    Closed,
    Populated { ids: Vec<i64> },
    Displaying { ids: Vec<i64>, student: Student },
}

/// Selection list plus the record currently on display.
#[derive(Debug, Default)]
pub struct StudentLookup {
    state: LookupState,
    selected: usize,
}

impl StudentLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LookupState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, LookupState::Closed)
    }

    /// Load the enrollment ids. Opening always starts over, whatever the
    /// previous state was.
    pub fn open<S: StudentStore>(
        &mut self,
        controller: &Controller<S>,
    ) -> Result<(), RegistryError> {
        let ids = controller.list_for_selection()?;
        self.state = LookupState::Populated { ids };
        self.selected = 0;
        Ok(())
    }

    /// Look up `id` and display it, replacing any earlier record. On failure
    /// the current state is left untouched.
    pub fn select<S: StudentStore>(
        &mut self,
        controller: &Controller<S>,
        id: i64,
    ) -> Result<(), RegistryError> {
        if !self.is_open() {
            return Err(RegistryError::ViewClosed);
        }

        let student = controller.lookup(id)?;
        if let Some(position) = self.ids().iter().position(|&candidate| candidate == id) {
            self.selected = position;
        }
        let ids = match mem::take(&mut self.state) {
            LookupState::Populated { ids } | LookupState::Displaying { ids, .. } => ids,
            LookupState::Closed => Vec::new(),
        };
        self.state = LookupState::Displaying { ids, student };
        Ok(())
    }

    /// Select whichever id the cursor points at. Does nothing on an empty
    /// list.
    pub fn select_current<S: StudentStore>(
        &mut self,
        controller: &Controller<S>,
    ) -> Result<(), RegistryError> {
        match self.selected_id() {
            Some(id) => self.select(controller, id),
            None => Ok(()),
        }
    }

    pub fn close(&mut self) {
        self.state = LookupState::Closed;
        self.selected = 0;
    }

    pub fn ids(&self) -> &[i64] {
        match &self.state {
            LookupState::Closed => &[],
            LookupState::Populated { ids } | LookupState::Displaying { ids, .. } => ids,
        }
    }

    pub fn displayed(&self) -> Option<&Student> {
        match &self.state {
            LookupState::Displaying { student, .. } => Some(student),
            _ => None,
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.ids().get(self.selected).copied()
    }

    /// Move the cursor, clamping at both ends of the list.
    pub fn move_selection(&mut self, offset: isize) {
        let len = self.ids().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let current = self.selected as isize;
        let max_index = (len - 1) as isize;
        self.selected = (current + offset).clamp(0, max_index) as usize;
    }
}
