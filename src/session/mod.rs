//! Interactive navigation and cleanup session.

mod app;
mod command;
mod cursor;

pub use app::{Session, SessionStats};
pub use command::Command;
pub use cursor::Cursor;
