//! Terminal event handling: keyboard shortcuts, period selection, focus
//! transitions, and mouse clicks on the tab row.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tracing::{debug, info};

use crate::app::{App, View};
use crate::data::Period;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Modifiers that mean a key press belongs to the terminal or OS, not us.
const RESERVED_MODIFIERS: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SUPER)
    .union(KeyModifiers::META);

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Ctrl/alt/meta chords collide with terminal and OS shortcuts; leave
    // them alone entirely.
    if key.modifiers.intersects(RESERVED_MODIFIERS) {
        return;
    }

    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Same for the overlay-launch instructions
    if app.show_overlay_hint {
        app.show_overlay_hint = false;
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),

        // View switching
        KeyCode::Tab => app.next_view(),
        KeyCode::BackTab => app.prev_view(),
        KeyCode::Char('1') => app.set_view(View::Live),
        KeyCode::Char('2') => app.set_view(View::LongTerm),

        // Period selection: direct keys, or left/right cycling on the
        // long-term view. Exactly one period is active at a time.
        KeyCode::Char('d') => app.set_period(Period::Day),
        KeyCode::Char('w') => app.set_period(Period::Week),
        KeyCode::Char('m') => app.set_period(Period::Month),
        KeyCode::Left | KeyCode::Char('h') => {
            if app.current_view == View::LongTerm {
                app.set_period(app.period.prev());
            } else {
                app.prev_view();
            }
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if app.current_view == View::LongTerm {
                app.set_period(app.period.next());
            } else {
                app.next_view();
            }
        }

        // Force an immediate metrics refresh
        KeyCode::Char('r') => app.force_refresh(),

        // Show how to launch the external overlay tool
        KeyCode::Char('o') => app.show_overlay_instructions(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Go back / close
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        _ => {}
    }
}

/// Handle a terminal focus transition.
///
/// Losing focus changes nothing; the short-term loop keeps polling.
/// Regaining focus forces one immediate resync to clear any staleness
/// accumulated while the terminal was backgrounded.
pub fn handle_focus_event(app: &mut App, gained: bool) {
    if gained {
        info!("terminal focus regained; forcing short-term resync");
        app.resync_short_term();
    } else {
        debug!("terminal focus lost; polling continues");
    }
}

/// Width of one view tab cell in the tab row, matching the rendering in
/// [`crate::ui::common::render_tabs`].
const VIEW_TAB_WIDTH: u16 = 13;

/// Resolve a click on the tab row into a view or period selection.
///
/// The leftmost cells are the view tabs; the period tabs sit to their
/// right and are only meaningful on the long-term view.
pub fn tab_hit(column: u16) -> Option<TabHit> {
    match column / VIEW_TAB_WIDTH {
        0 => Some(TabHit::View(View::Live)),
        1 => Some(TabHit::View(View::LongTerm)),
        _ => {
            let offset = column - 2 * VIEW_TAB_WIDTH;
            // Period labels: " d:Day | w:Week | m:Month ", 8 cells each
            // including the divider.
            match offset / 8 {
                0 => Some(TabHit::Period(Period::Day)),
                1 => Some(TabHit::Period(Period::Week)),
                2 => Some(TabHit::Period(Period::Month)),
                _ => None,
            }
        }
    }
}

/// A resolved tab-row click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabHit {
    View(View),
    Period(Period),
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, tabs_row: u16) {
    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
        if mouse.row == tabs_row {
            match tab_hit(mouse.column) {
                Some(TabHit::View(view)) => app.set_view(view),
                Some(TabHit::Period(period)) => app.set_period(period),
                None => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartRegistry;
    use crate::sync::{LongTermCommand, ShortTermCommand, SyncHandle};
    use crossterm::event::KeyEventKind;
    use tokio::sync::mpsc;

    fn test_app() -> (
        App,
        mpsc::UnboundedReceiver<ShortTermCommand>,
        mpsc::UnboundedReceiver<LongTermCommand>,
    ) {
        let (sync, short_rx, long_rx) = SyncHandle::channel();
        let app = App::new(
            ChartRegistry::with_all_charts(),
            sync,
            Period::Day,
            50,
            true,
            "fake".into(),
        );
        (app, short_rx, long_rx)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn key_with(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    #[test]
    fn test_period_keys_select_exactly_one_period() {
        let (mut app, _short_rx, mut long_rx) = test_app();

        handle_key_event(&mut app, key(KeyCode::Char('w')));
        assert_eq!(app.period, Period::Week);
        assert!(matches!(
            long_rx.try_recv(),
            Ok(LongTermCommand::Run(Some(Period::Week)))
        ));

        handle_key_event(&mut app, key(KeyCode::Char('m')));
        assert_eq!(app.period, Period::Month);
    }

    #[test]
    fn test_modified_keys_are_ignored() {
        let (mut app, _short_rx, mut long_rx) = test_app();

        handle_key_event(
            &mut app,
            key_with(KeyCode::Char('w'), KeyModifiers::CONTROL),
        );
        assert_eq!(app.period, Period::Day);
        assert!(long_rx.try_recv().is_err());

        handle_key_event(&mut app, key_with(KeyCode::Char('r'), KeyModifiers::ALT));
        assert!(app.get_status_message().is_none());
    }

    #[test]
    fn test_refresh_key_forces_both_loops() {
        let (mut app, mut short_rx, mut long_rx) = test_app();

        handle_key_event(&mut app, key(KeyCode::Char('r')));
        assert!(matches!(short_rx.try_recv(), Ok(ShortTermCommand::Refresh)));
        assert!(matches!(long_rx.try_recv(), Ok(LongTermCommand::Run(None))));
    }

    #[test]
    fn test_focus_regained_forces_short_term_resync() {
        let (mut app, mut short_rx, _long_rx) = test_app();

        handle_focus_event(&mut app, false);
        assert!(short_rx.try_recv().is_err());

        handle_focus_event(&mut app, true);
        assert!(matches!(short_rx.try_recv(), Ok(ShortTermCommand::Refresh)));
    }

    #[test]
    fn test_overlay_key_shows_instructions_only() {
        let (mut app, mut short_rx, mut long_rx) = test_app();

        handle_key_event(&mut app, key(KeyCode::Char('o')));
        assert!(app.show_overlay_hint);
        // Signalling intent does not touch the polling loops.
        assert!(short_rx.try_recv().is_err());
        assert!(long_rx.try_recv().is_err());

        // Any key dismisses the instructions.
        handle_key_event(&mut app, key(KeyCode::Char('x')));
        assert!(!app.show_overlay_hint);
    }

    #[test]
    fn test_tab_hits_resolve_views_then_periods() {
        assert_eq!(tab_hit(0), Some(TabHit::View(View::Live)));
        assert_eq!(tab_hit(14), Some(TabHit::View(View::LongTerm)));
        assert_eq!(tab_hit(27), Some(TabHit::Period(Period::Day)));
        assert_eq!(tab_hit(35), Some(TabHit::Period(Period::Week)));
        assert_eq!(tab_hit(43), Some(TabHit::Period(Period::Month)));
        assert_eq!(tab_hit(60), None);
    }

    #[test]
    fn test_left_right_cycles_period_on_long_term_view() {
        let (mut app, _short_rx, _long_rx) = test_app();
        app.set_view(View::LongTerm);

        handle_key_event(&mut app, key(KeyCode::Right));
        assert_eq!(app.period, Period::Week);
        handle_key_event(&mut app, key(KeyCode::Left));
        assert_eq!(app.period, Period::Day);
    }
}
