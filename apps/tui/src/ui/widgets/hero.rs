use crate::app::state::App;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

/// Renders the featured-item panel. The entrance springs drive a vertical
/// offset and a fade; the shared scale channel (bounce or pulse) drives the
/// border glow.
pub fn render_hero(app: &App, f: &mut Frame<'_>, area: Rect) {
    let offset = app.hero_motion.offset.value();
    #[allow(clippy::cast_possible_truncation)]
    let dy = offset.round() as i16;

    let target = offset_rect(area, dy);
    if target.height < 2 {
        return;
    }

    let fade = app.hero_motion.fade.value();
    let scale = app.hero_motion.current_scale();

    let block = Block::default()
        .title(" Featured ")
        .title_style(glow_border(scale))
        .borders(Borders::ALL)
        .border_style(glow_border(scale));

    let text = app.hero.as_ref().map_or_else(
        || {
            Text::from(TextLine::from(Span::styled(
                "Nothing selected yet. Press r once the catalog is loaded.",
                Style::default().fg(Color::Gray),
            )))
        },
        |item| {
            let mut lines = vec![TextLine::from(Span::styled(
                item.title.clone(),
                fade_style(fade).add_modifier(Modifier::BOLD),
            ))];

            if !item.meta.is_empty() {
                lines.push(TextLine::from(Span::styled(
                    item.meta.clone(),
                    fade_style(fade),
                )));
            }

            if !item.description.is_empty() {
                lines.push(TextLine::from(""));
                lines.push(TextLine::from(Span::styled(
                    item.description.clone(),
                    fade_style(fade),
                )));
            }

            if let Some(url) = &item.image_url {
                lines.push(TextLine::from(Span::styled(
                    url.clone(),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::DIM),
                )));
            }

            Text::from(lines)
        },
    );

    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, target);
}

/// Shifts a slot vertically by `dy` rows and clips the result against the
/// slot itself. Negative offsets clip from the top, which is what the
/// entrance slide-in plays through.
pub fn offset_rect(area: Rect, dy: i16) -> Rect {
    if dy >= 0 {
        let dy = u16::try_from(dy).unwrap_or(0).min(area.height);
        Rect {
            x: area.x,
            y: area.y + dy,
            width: area.width,
            height: area.height - dy,
        }
    } else {
        let dy = dy.unsigned_abs().min(area.height);
        Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: area.height - dy,
        }
    }
}

/// Maps the 0..1 fade channel onto terminal-representable text emphasis.
pub fn fade_style(fade: f64) -> Style {
    if fade < 0.35 {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    } else if fade < 0.7 {
        Style::default().fg(Color::Gray).add_modifier(Modifier::DIM)
    } else if fade < 0.95 {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::White)
    }
}

/// Maps the scale channel onto border emphasis; anything meaningfully above
/// rest reads as a glow.
pub fn glow_border(scale: f64) -> Style {
    if scale >= 1.025 {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if scale >= 1.01 {
        Style::default().fg(Color::LightYellow)
    } else {
        Style::default().fg(Color::Cyan)
    }
}

#[cfg(test)]
mod tests {
    use super::{fade_style, glow_border, offset_rect};
    use ratatui::layout::Rect;
    use ratatui::style::{Color, Modifier, Style};

    #[test]
    fn zero_offset_keeps_the_slot() {
        let slot = Rect::new(2, 5, 40, 9);
        assert_eq!(offset_rect(slot, 0), slot);
    }

    #[test]
    fn negative_offset_clips_from_the_top() {
        let slot = Rect::new(2, 5, 40, 9);
        let shifted = offset_rect(slot, -4);

        assert_eq!(shifted.y, 5);
        assert_eq!(shifted.height, 5);
    }

    #[test]
    fn positive_offset_moves_down_and_clips_the_bottom() {
        let slot = Rect::new(2, 5, 40, 9);
        let shifted = offset_rect(slot, 3);

        assert_eq!(shifted.y, 8);
        assert_eq!(shifted.height, 6);
    }

    #[test]
    fn overlarge_offset_collapses_to_nothing() {
        let slot = Rect::new(0, 0, 40, 9);
        assert_eq!(offset_rect(slot, -20).height, 0);
        assert_eq!(offset_rect(slot, 20).height, 0);
    }

    #[test]
    fn fade_brightens_in_stages() {
        assert_eq!(
            fade_style(0.0),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM)
        );
        assert_eq!(
            fade_style(0.5),
            Style::default().fg(Color::Gray).add_modifier(Modifier::DIM)
        );
        assert_eq!(fade_style(0.8), Style::default().fg(Color::Gray));
        assert_eq!(fade_style(1.0), Style::default().fg(Color::White));
    }

    #[test]
    fn glow_kicks_in_above_rest_scale() {
        assert_eq!(glow_border(1.0), Style::default().fg(Color::Cyan));
        assert_eq!(glow_border(1.015), Style::default().fg(Color::LightYellow));
        assert_eq!(
            glow_border(1.03),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        );
    }
}
