use crate::app::state::App;
use crossterm::event::KeyCode;

mod help;
mod main;

pub fn dispatch_input(app: &mut App, key: KeyCode) {
    if app.show_help {
        help::handle_help_toggle(app, key);
        return;
    }

    if help::handle_help_toggle(app, key) {
        return;
    }

    if help::handle_animation_toggle(app, key) {
        return;
    }

    main::handle_main_input(app, key);
}
