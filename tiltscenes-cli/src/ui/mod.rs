pub mod dashboard;
pub mod log_panel;

use ratatui::prelude::*;
use ratatui::widgets::Tabs;

use crate::state::{AppState, Tab};

pub fn render(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(frame.area());

    let titles: Vec<&str> = Tab::ALL.iter().map(|t| t.label()).collect();
    let tabs = Tabs::new(titles)
        .select(state.active_tab.index())
        .highlight_style(Style::default().bold().fg(Color::Cyan));
    frame.render_widget(tabs, chunks[0]);

    match state.active_tab {
        Tab::Scenes => dashboard::render(frame, state, chunks[1]),
        Tab::Handoffs => {
            let title = format!(" Log ({} hand-offs shown) ", state.log.handoff_count());
            log_panel::render(frame, &state.log, chunks[1], &title)
        }
    }
}
