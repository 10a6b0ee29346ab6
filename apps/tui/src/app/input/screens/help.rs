use crate::app::state::App;
use crossterm::event::KeyCode;

/// `?` opens and closes the help popup; Esc closes it too while open.
/// Returns true when the key was consumed.
pub fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('?') => {
            app.show_help = !app.show_help;
            true
        }
        KeyCode::Esc if app.show_help => {
            app.show_help = false;
            true
        }
        _ => false,
    }
}

/// Space pauses and resumes the ambient decorations.
pub fn handle_animation_toggle(app: &mut App, key: KeyCode) -> bool {
    if key == KeyCode::Char(' ') {
        app.animation_paused = !app.animation_paused;
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::{handle_animation_toggle, handle_help_toggle};
    use crate::app::state::App;
    use crossterm::event::KeyCode;

    #[test]
    fn question_mark_toggles_help() {
        let mut app = App::new();
        assert!(handle_help_toggle(&mut app, KeyCode::Char('?')));
        assert!(app.show_help);
        assert!(handle_help_toggle(&mut app, KeyCode::Char('?')));
        assert!(!app.show_help);
    }

    #[test]
    fn escape_only_closes_an_open_popup() {
        let mut app = App::new();
        assert!(!handle_help_toggle(&mut app, KeyCode::Esc));

        app.show_help = true;
        assert!(handle_help_toggle(&mut app, KeyCode::Esc));
        assert!(!app.show_help);
    }

    #[test]
    fn space_pauses_the_decorations() {
        let mut app = App::new();
        assert!(handle_animation_toggle(&mut app, KeyCode::Char(' ')));
        assert!(app.animation_paused);
    }
}
