use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::DefaultTerminal;

use crate::project::ProjectContext;
use crate::state::{AppState, LogEvent, TILT_STEP};
use crate::ui;

/// Redraw and simulation period.
const FRAME: Duration = Duration::from_millis(16);

pub async fn run(seed: u64, size: (f32, f32), ctx: ProjectContext) -> anyhow::Result<()> {
    let mut state = AppState::new(&ctx.config, size, seed);
    if let Some(path) = &ctx.config_path {
        state.log.push(LogEvent::Info(format!("Config {}", path.display())));
    }

    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut state);
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, state: &mut AppState) -> anyhow::Result<()> {
    let mut last = Instant::now();
    while !state.should_quit {
        terminal.draw(|frame| ui::render(frame, state))?;

        let timeout = FRAME.saturating_sub(last.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                handle_key(state, key);
            }
        }

        let now = Instant::now();
        if now.duration_since(last) >= FRAME {
            state.tick(now.duration_since(last).as_secs_f64() * 1000.0);
            last = now;
        }
    }
    Ok(())
}

pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.should_quit = true,
        // phone top tilted away from the user: things slide up the screen
        KeyCode::Up => state.nudge_tilt(-TILT_STEP, 0.0),
        KeyCode::Down => state.nudge_tilt(TILT_STEP, 0.0),
        KeyCode::Left => state.nudge_tilt(0.0, -TILT_STEP),
        KeyCode::Right => state.nudge_tilt(0.0, TILT_STEP),
        KeyCode::Char('r') => state.reset_tilt(),
        KeyCode::Char(' ') => state.paused = !state.paused,
        KeyCode::Char('c') => state.log.clear(),
        KeyCode::Tab => state.active_tab = state.active_tab.next(),
        KeyCode::PageUp => state.log.scroll_up(10),
        KeyCode::PageDown => state.log.scroll_down(10),
        _ => {}
    }
}
