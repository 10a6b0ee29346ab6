use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_main_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Tab | KeyCode::Right => app.focus_next(),
        KeyCode::BackTab | KeyCode::Left => app.focus_prev(),
        KeyCode::Enter => app.activate_focused(),
        KeyCode::Char('r') => app.trigger_random(),
        KeyCode::Char('p') => app.trigger_pulse(),
        KeyCode::Char('s') => app.trigger_shuffle(),
        KeyCode::Char('c') => app.switch_catalog(),
        KeyCode::PageUp | KeyCode::Up => app.scroll_grid_up(),
        KeyCode::PageDown | KeyCode::Down => app.scroll_grid_down(),
        KeyCode::Esc => app.status_message.clear(),
        KeyCode::Char('q') => {
            app.running = false;
        }
        _ => {}
    }
}
