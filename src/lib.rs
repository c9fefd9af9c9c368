pub mod binding;
pub mod calendar;
pub mod config;
pub mod date;
pub mod error;
pub mod events;
pub mod grid;
pub mod handle;
pub mod ui;

pub use binding::CalendarProps;
pub use calendar::{Calendar, Target};
pub use handle::CalendarHandle;
