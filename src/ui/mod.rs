//! Terminal rendering.
//!
//! Each view module exposes a `render(frame, app, area)` function; the
//! shared chrome (header, tabs, status bar, modals) lives in [`common`].

pub mod clock;
pub mod common;
pub mod live;
pub mod longterm;
pub mod theme;
pub mod widgets;

pub use clock::ClockDisplay;
pub use theme::Theme;
