//! UI layer for desktop GUI: the users table and its edit form.

pub mod app;

pub use app::DesktopGuiApp;
