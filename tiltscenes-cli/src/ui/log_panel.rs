use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::state::{EventLog, LogEvent};

/// Scrollable event log, newest at the bottom. Follows the tail while
/// `auto_scroll` is on.
pub fn render(frame: &mut Frame, log: &EventLog, area: Rect, title: &str) {
    let visible = area.height.saturating_sub(2) as usize;
    let end = (log.scroll_offset + 1).min(log.len());
    let start = end.saturating_sub(visible);

    if log.is_empty() {
        let widget = Paragraph::new(Line::styled("No events yet", Style::default().fg(Color::DarkGray)))
            .block(Block::default().borders(Borders::ALL).title(title.to_string()));
        frame.render_widget(widget, area);
        return;
    }

    let lines: Vec<Line> = log
        .entries()
        .skip(start)
        .take(end - start)
        .map(|entry| {
            let style = match entry.event {
                LogEvent::Info(_) => Style::default(),
                LogEvent::Handoff(_) => Style::default().fg(Color::Green),
                LogEvent::Tilt { .. } => Style::default().fg(Color::Yellow),
            };
            Line::from(vec![
                Span::styled(
                    entry.timestamp.format("%H:%M:%S ").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(entry.text(), style),
            ])
        })
        .collect();

    let scroll_hint = if log.auto_scroll { "" } else { " [paused scroll] " };
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title.to_string())
            .title_bottom(scroll_hint)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(widget, area);
}
