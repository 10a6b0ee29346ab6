use crate::app::state::{App, Control, LoadState};
use crate::ui::widgets::cards::render_cards;
use crate::ui::widgets::hero::render_hero;
use crate::ui::widgets::popup::centered_rect;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use throbber_widgets_tui::{Throbber, WhichUse};

pub fn render_main(app: &App, f: &mut Frame<'_>) {
    let main_layout = build_main_layout(app, f);

    if app.show_help {
        render_help_popup(f, main_layout[0]);
        return;
    }

    render_title_section(app, f, main_layout[0]);
    render_hero(app, f, main_layout[1]);
    render_controls(app, f, main_layout[2]);
    render_cards(app, f, main_layout[3]);
    render_status_section(app, f, main_layout[4]);
    render_shortcuts(f, main_layout[5]);
}

fn build_main_layout(app: &App, f: &Frame<'_>) -> Vec<Rect> {
    if app.show_help {
        return Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(100)])
            .split(f.area().inner(Margin::new(2, 1)))
            .to_vec();
    }

    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title area
            Constraint::Length(9), // Hero panel
            Constraint::Length(3), // Controls bar
            Constraint::Min(7),    // Card grid
            Constraint::Length(3), // Status area
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(2, 1)))
        .to_vec()
}

fn render_title_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let title_block = Block::default()
        .title("== Catalog Cards ==")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    f.render_widget(title_block, area);

    let title_inner = area.inner(Margin::new(1, 1));
    let title_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(title_inner);

    let beacon = beacon_char(app.animation_counter);
    let title_paragraph = Paragraph::new(Text::from(vec![TextLine::from(vec![
        Span::styled(
            format!("{beacon} "),
            Style::default().fg(Color::LightCyan),
        ),
        Span::styled(
            "Catalog Cards ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            app.actions.kind.label(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ])]))
    .alignment(Alignment::Left);
    f.render_widget(title_paragraph, title_chunks[0]);

    let updated_line = app.last_loaded_at.map_or_else(
        || TextLine::from(Span::styled("Not loaded yet", Style::default().fg(Color::Gray))),
        |at| {
            TextLine::from(vec![
                Span::styled("Updated ", Style::default().fg(Color::Gray)),
                Span::styled(
                    at.format("%H:%M:%S").to_string(),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("  {} items", app.catalog.len()),
                    Style::default().fg(Color::Gray),
                ),
            ])
        },
    );
    let updated_paragraph = Paragraph::new(Text::from(updated_line)).alignment(Alignment::Right);
    f.render_widget(updated_paragraph, title_chunks[1]);
}

fn beacon_char(animation_counter: f64) -> &'static str {
    // Slow two-phase blink driven by the ambient counter.
    if (animation_counter % (2.0 * std::f64::consts::PI)) < std::f64::consts::PI {
        "●"
    } else {
        "○"
    }
}

fn render_controls(app: &App, f: &mut Frame<'_>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    for (index, control) in Control::ALL.iter().enumerate() {
        let glow = &app.glows[index];
        let focused = index == app.focus_index;
        let scale = glow.spring.value();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(button_border(scale, focused));

        let marker = if focused { "▸ " } else { "  " };
        let label_style = if focused {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let paragraph = Paragraph::new(TextLine::from(Span::styled(
            format!("{marker}{}", control.label()),
            label_style,
        )))
        .alignment(Alignment::Center)
        .block(block);

        f.render_widget(paragraph, chunks[index]);
    }
}

/// Border emphasis for one control button, scaled by its glow spring.
fn button_border(scale: f64, focused: bool) -> Style {
    if scale >= 1.05 {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if focused || scale >= 1.01 {
        Style::default().fg(Color::LightYellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn render_status_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let status_block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let inner = status_block.inner(area);
    f.render_widget(status_block, area);

    if app.load_state == LoadState::Loading {
        let label = if app.status_message.is_empty() {
            "Loading..."
        } else {
            app.status_message.as_str()
        };

        let throbber = Throbber::default()
            .label(label)
            .style(Style::default().fg(Color::Cyan))
            .throbber_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
            .use_type(WhichUse::Spin);

        if let Ok(mut state) = app.throbber.lock() {
            f.render_stateful_widget(throbber, inner, &mut *state);
        }
        return;
    }

    let status_text = if app.status_message.is_empty() {
        Text::from(Span::styled(
            if app.animation_paused {
                "Animation paused"
            } else {
                ""
            },
            Style::default().fg(Color::Gray),
        ))
    } else {
        let style = if app.status_message.starts_with("Error") {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };

        Text::from(Span::styled(&app.status_message, style))
    };

    let status_paragraph = Paragraph::new(status_text).wrap(Wrap { trim: true });
    f.render_widget(status_paragraph, inner);
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let shortcuts = shortcuts_line();
    let shortcuts_paragraph = Paragraph::new(shortcuts).alignment(Alignment::Center);
    f.render_widget(shortcuts_paragraph, area);
}

fn key_span(key: &'static str) -> Span<'static> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
}

fn hint_span(hint: &'static str) -> Span<'static> {
    Span::styled(hint, Style::default().fg(Color::Gray))
}

fn shortcuts_line() -> TextLine<'static> {
    TextLine::from(vec![
        key_span("?"),
        hint_span(": Help | "),
        key_span("Space"),
        hint_span(": Pause | "),
        key_span("Tab"),
        hint_span(": Focus | "),
        key_span("Enter"),
        hint_span(": Activate | "),
        key_span("r"),
        hint_span(": Random | "),
        key_span("p"),
        hint_span(": Pulse | "),
        key_span("s"),
        hint_span(": Shuffle | "),
        key_span("c"),
        hint_span(": Catalog | "),
        key_span("PgUp/PgDn"),
        hint_span(": Scroll | "),
        key_span("q"),
        hint_span(": Quit"),
    ])
}

fn render_help_popup(f: &mut Frame<'_>, area: Rect) {
    let popup_area = centered_rect(80, 80, area);
    f.render_widget(Clear, popup_area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let help_text = build_help_lines();

    let help_paragraph = Paragraph::new(Text::from(help_text))
        .block(help_block)
        .wrap(Wrap { trim: true });

    f.render_widget(help_paragraph, popup_area);

    let hint = Paragraph::new(Text::from(TextLine::from(vec![Span::styled(
        "Press ? or Esc to close",
        Style::default().fg(Color::Gray),
    )])))
    .alignment(Alignment::Center);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(2),
        width: popup_area.width,
        height: 1,
    };

    f.render_widget(hint, hint_area);
}

fn build_help_lines() -> Vec<TextLine<'static>> {
    let mut lines = vec![
        TextLine::from(vec![Span::styled(
            "Catalog Cards",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )]),
        TextLine::from(""),
        TextLine::from(
            "Browses a remote catalog as a grid of cards, with a featured item that can be re-rolled and animated.",
        ),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "Keyboard Shortcuts:",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        TextLine::from(vec![
            key_span("  ?"),
            Span::styled(" - Toggle this help popup", Style::default()),
        ]),
        TextLine::from(vec![
            key_span("  Space"),
            Span::styled(" - Pause/resume the ambient animations", Style::default()),
        ]),
        TextLine::from(vec![
            key_span("  Tab / Shift-Tab"),
            Span::styled(" - Move focus between the buttons", Style::default()),
        ]),
        TextLine::from(vec![
            key_span("  Enter"),
            Span::styled(" - Activate the focused button", Style::default()),
        ]),
        TextLine::from(vec![
            key_span("  r"),
            Span::styled(" - Feature a random item (with a bounce)", Style::default()),
        ]),
        TextLine::from(vec![
            key_span("  p"),
            Span::styled(" - Pulse the featured panel", Style::default()),
        ]),
        TextLine::from(vec![
            key_span("  s"),
            Span::styled(
                " - Wiggle the grid and reload at a random offset",
                Style::default(),
            ),
        ]),
        TextLine::from(vec![
            key_span("  c"),
            Span::styled(" - Switch between the catalogs", Style::default()),
        ]),
        TextLine::from(vec![
            key_span("  PgUp / PgDn"),
            Span::styled(" - Scroll the card grid", Style::default()),
        ]),
        TextLine::from(vec![
            key_span("  q"),
            Span::styled(" - Quit application", Style::default()),
        ]),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "Catalogs:",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        TextLine::from("  films - A public film catalog; one card per film with director, year and score"),
        TextLine::from("  creatures - A public creature catalog; cards carry a numeric id and sprite link"),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "CLI Options:",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
    ];

    let help_text = crate::cli::CliArgs::help_text();
    for line in help_text.lines() {
        if line.starts_with("Usage") || line.starts_with("Options") || line.trim().is_empty() {
            continue;
        }
        lines.push(TextLine::from(line.to_string()));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::{beacon_char, button_border};
    use ratatui::style::{Color, Modifier, Style};

    #[test]
    fn beacon_blinks_with_the_counter() {
        assert_eq!(beacon_char(0.5), "●");
        assert_eq!(beacon_char(4.0), "○");
    }

    #[test]
    fn button_border_tracks_glow_and_focus() {
        assert_eq!(
            button_border(1.0, false),
            Style::default().fg(Color::DarkGray)
        );
        assert_eq!(
            button_border(1.0, true),
            Style::default().fg(Color::LightYellow)
        );
        assert_eq!(
            button_border(1.07, true),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        );
    }
}
