//! Ratatui front-end: a registration form as the main window and a student
//! view layered over it as the child window. Message dialogs report the
//! outcome of every action.

mod app;
mod forms;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
