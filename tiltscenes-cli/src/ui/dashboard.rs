use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use tiltscenes_web::SceneSlot;

use crate::state::AppState;

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(38), Constraint::Min(0)])
        .split(area);

    render_scenes(frame, state, chunks[0]);
    render_routes(frame, state, chunks[1]);
}

fn render_scenes(frame: &mut Frame, state: &AppState, area: Rect) {
    let stage = &state.stage;
    let kinds = ["bubbles", "cubes", "bubbles"];
    let mut lines = vec![
        Line::styled("Stage", Style::default().bold().fg(Color::Cyan)),
        Line::raw(""),
    ];
    for (slot, kind) in SceneSlot::ALL.into_iter().zip(kinds) {
        let scene = stage.scene(slot);
        lines.push(Line::from(vec![
            Span::styled(format!("{:<8}", slot.label()), Style::default().bold()),
            Span::raw(format!(
                " {:>3} {kind:<7} {}x{}",
                scene.object_count(),
                scene.width(),
                scene.height()
            )),
        ]));
    }

    let cubes = stage.cubes();
    let gravity = cubes.gravity();
    let tilt = if state.tilt_active {
        format!("beta {:.0} gamma {:.0}", state.tilt.beta, state.tilt.gamma)
    } else {
        "none".to_string()
    };
    lines.extend([
        Line::raw(""),
        Line::from(format!("Total    {:>3}", stage.population())),
        Line::from(format!("Tilt     {tilt}")),
        Line::from(format!("Gravity  {:.2}, {:.2} x {:.0}", gravity.x, gravity.y, cubes.gravity_scale())),
        Line::from(format!("Time     {:.1}s  frame {}", stage.ctx.time.elapsed / 1000.0, stage.ctx.time.frame)),
        Line::from(format!("Seed     {}", state.seed)),
        Line::raw(""),
        Line::raw("[arrows] Tilt  [r] Reset tilt"),
        Line::raw("[space] Pause  [Tab] Switch view"),
        Line::raw("[c] Clear log  [q] Quit"),
    ]);
    if state.paused {
        lines.push(Line::styled("PAUSED", Style::default().bold().fg(Color::Yellow)));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Scenes ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(widget, area);
}

fn render_routes(frame: &mut Frame, state: &AppState, area: Rect) {
    let log = state.stage.log();
    let rows = log.counts().map(|(route, count)| {
        Row::new(vec![
            Cell::from(route.label()),
            Cell::from(count.to_string()).style(if count > 0 {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            }),
        ])
    });
    let table = Table::new(rows, [Constraint::Min(28), Constraint::Length(8)])
        .header(Row::new(vec!["Route", "Count"]).style(Style::default().bold()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Hand-offs ({}) ", log.total()))
                .border_style(Style::default().fg(Color::Cyan)),
        );
    frame.render_widget(table, area);
}
