use color_eyre::Result;
use crossterm::event::{self, Event};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use tokio::sync::mpsc;

use crate::app::{handle_input, App, LoadState};
use crate::ui;

/// Run the application in headless mode (no UI): one load, printed, done.
pub async fn run_headless(app: &mut App, json: bool) -> Result<()> {
    app.initialize()?;

    let items = app
        .actions
        .load_once()
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Catalog load failed: {e}"))?;

    if json {
        let rendered = serde_json::to_string_pretty(&items)?;
        println!("{rendered}");
        return Ok(());
    }

    println!("\nCatalog Items ({})", app.actions.kind.label());
    println!("=================");
    for item in &items {
        if item.meta.is_empty() {
            println!("- {}", item.title);
        } else {
            println!("- {} | {}", item.title, item.meta);
        }
    }
    println!("\n{} items total", items.len());

    Ok(())
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    // Load outcomes arrive over this channel from spawned fetch tasks.
    let (tx, mut rx) = mpsc::unbounded_channel();

    // Kick off the initial load; the UI stays responsive while it is in
    // flight.
    app.load_state = LoadState::Loading;
    app.status_message = format!("Loading the {} catalog...", app.actions.kind.as_str());
    app.actions.spawn_load(&tx, app.actions.offset, None);

    loop {
        // Update animations
        app.update();

        // Apply any finished loads, in arrival order. A slower earlier fetch
        // that lands after a faster later one overwrites it; there is no
        // cancellation token.
        while let Ok(outcome) = rx.try_recv() {
            app.apply_load(outcome);
        }

        // Input handlers request reloads; the fetch is spawned from here so
        // the handlers stay synchronous.
        if let Some(request) = app.pending_reload.take() {
            app.load_state = LoadState::Loading;
            app.actions.spawn_load(&tx, request.offset, request.delay);
        }

        // Draw the UI with better error context
        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        // Handle events with improved error context
        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    // Force a redraw after resize
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        // Non-fatal redraw error
                    }
                }
                Ok(Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_))
                | Err(_) => {
                    // Ignore non-key events for now
                }
            }
        }
    }
    Ok(())
}
