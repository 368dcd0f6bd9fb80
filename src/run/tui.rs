use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io;

use crate::config::Variant;
use crate::db::Database;
use crate::ui::app::{App, InputMode};
use crate::ui::commands;
use crate::ui::render::visible_list_rows;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(db: &Database, variant: Variant) -> Result<()> {
    let mut app = App::new(variant);
    app.reload(db);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, db);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!("TUI exited with error: {e:?}");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    db: &Database,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            handle_key(key, app, db);
        }
    }
    Ok(())
}

fn draw(f: &mut Frame, app: &mut App) {
    app.visible_rows = visible_list_rows(f.area(), app);
    crate::ui::render::render(f, app);
}

pub(crate) fn handle_key(key: event::KeyEvent, app: &mut App, db: &Database) {
    if app.show_help {
        app.show_help = false;
        return;
    }
    match app.input_mode {
        InputMode::Normal => handle_normal_input(key, app, db),
        InputMode::Editing => handle_editing_input(key, app),
        InputMode::Command => handle_command_input(key, app, db),
        InputMode::Confirm => handle_confirm_input(key, app, db),
    }
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, db: &Database) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_up(app);
            }
        }
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Tab => {
            app.input_mode = InputMode::Editing;
        }
        KeyCode::BackTab => {
            app.focus_prev();
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Char('i') | KeyCode::Char('e') => {
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('g') => scroll_to_top(&mut app.transaction_index, &mut app.transaction_scroll),
        KeyCode::Char('G') => scroll_to_bottom(
            &mut app.transaction_index,
            &mut app.transaction_scroll,
            app.transactions.len(),
            app.visible_rows,
        ),
        KeyCode::Enter => app.load_selected(),
        KeyCode::Char('a') => app.add_transaction(db),
        KeyCode::Char('u') => app.update_transaction(db),
        KeyCode::Char('D') | KeyCode::Delete => {
            if app.form.id.trim().is_empty() {
                if let Some(id) = app.selected_transaction().map(|t| t.id) {
                    app.request_delete(&id.to_string());
                    return;
                }
            }
            app.request_delete("");
        }
        KeyCode::Char('n') => {
            app.form.clear();
            app.set_status("Form cleared");
        }
        KeyCode::Char('c') => app.toggle_chart(),
        KeyCode::Char('r') => commands::handle_command("refresh", app, db),
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        _ => {}
    }
}

fn handle_editing_input(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Tab | KeyCode::Down => app.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.focus_prev(),
        KeyCode::Enter | KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.form.value_mut(app.focus).pop();
        }
        KeyCode::Char(c) => {
            app.form.value_mut(app.focus).push(c);
        }
        _ => {}
    }
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, db: &Database) {
    match key.code {
        KeyCode::Enter => {
            let input = std::mem::take(&mut app.command_input);
            app.input_mode = InputMode::Normal;
            commands::handle_command(&input, app, db);
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, db: &Database) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_pending(db),
        _ => app.cancel_pending(),
    }
}

fn handle_move_down(app: &mut App) {
    scroll_down(
        &mut app.transaction_index,
        &mut app.transaction_scroll,
        app.transactions.len(),
        app.visible_rows,
    );
}

fn handle_move_up(app: &mut App) {
    scroll_up(&mut app.transaction_index, &mut app.transaction_scroll);
}
