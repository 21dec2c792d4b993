//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, Gauge, Paragraph};

use super::runtime::App;
use super::style;
use crate::io::export::percentile_label;
use crate::sim::types::HourlyLoad;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(10),   // chart
            Constraint::Length(3), // progress
            Constraint::Length(5), // status panel
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_chart(frame, app, chunks[1]);
    render_progress(frame, app, chunks[2]);
    render_status(frame, app, chunks[3]);
    render_footer(frame, chunks[4]);
}

/// Header bar: scenario name, month being filled, speed, run state.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let (state_icon, state_label) = if app.is_finished() {
        ("■", "DONE")
    } else if app.paused {
        ("‖", "PAUSED")
    } else {
        ("▶", "RUNNING")
    };

    let filling = app
        .filling_month()
        .map_or_else(|| "-".to_string(), |m| m.to_string());

    let header = Line::from(vec![
        Span::styled(
            " LOAD-SIM ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            &app.preset_name,
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " │ filling {} │ {}ms │ {} {} ",
            filling,
            app.tick_interval_ms(),
            state_icon,
            state_label,
        )),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

fn points(load: &HourlyLoad) -> Vec<(f64, f64)> {
    load.iter()
        .enumerate()
        .map(|(h, &kw)| (f64::from(h as u32), f64::from(kw)))
        .collect()
}

/// Hourly mean and percentile load of the viewed month.
fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let view = app.view();
    let (mean_data, pct_data) = view
        .as_ref()
        .map_or_else(|| (Vec::new(), Vec::new()), |v| (points(&v.mean), points(&v.percentile)));

    let y_bounds = style::auto_bounds_y(&mean_data, &pct_data);
    let pct_name = format!("P{}", percentile_label(app.percentile()));

    let datasets = vec![
        Dataset::default()
            .name("Mean")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(style::MEAN_COLOR))
            .data(&mean_data),
        Dataset::default()
            .name(pct_name)
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(style::PERCENTILE_COLOR))
            .data(&pct_data),
    ];

    let title = format!(
        " {} system load ({} trials) ",
        app.view_month,
        view.as_ref().map_or(0, |v| v.trials)
    );

    let chart = Chart::new(datasets)
        .block(Block::default().title(title).borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .title("hour")
                .bounds([0.0, 23.0])
                .labels(vec!["0".to_string(), "12".to_string(), "23".to_string()]),
        )
        .y_axis(
            Axis::default()
                .title("kW")
                .bounds(y_bounds)
                .labels(vec![
                    format!("{:.1}", y_bounds[0]),
                    format!("{:.1}", y_bounds[1]),
                ]),
        );

    frame.render_widget(chart, area);
}

/// Trials completed across the whole year.
fn render_progress(frame: &mut Frame, app: &App, area: Rect) {
    let done = app.completed_trials();
    let total = app.total_trials().max(1);
    let ratio = done as f64 / total as f64;

    let gauge = Gauge::default()
        .block(Block::default().title(" Trials ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(style::progress_color(app.is_finished())))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!("{done}/{total}"));
    frame.render_widget(gauge, area);
}

/// Daily energy box statistics for the viewed month.
fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let lines = if let Some(v) = app.view() {
        let b = &v.daily_kwh;
        vec![
            Line::from(format!(
                "  daily kWh  min={:>7.2}  q1={:>7.2}  median={:>7.2}  q3={:>7.2}  max={:>7.2}",
                b.min, b.q1, b.median, b.q3, b.max,
            )),
            Line::from(format!(
                "  mean={:>7.2} kWh/day  iqr={:>7.2}  expected={:>7.2} kWh/day",
                b.mean,
                b.iqr(),
                app.expected_daily_kwh(),
            )),
            Line::from(format!(
                "  peak mean={:>6.2} kW  peak P{}={:>6.2} kW",
                v.mean.iter().copied().fold(0.0, f32::max),
                percentile_label(app.percentile()),
                v.percentile.iter().copied().fold(0.0, f32::max),
            )),
        ]
    } else {
        vec![Line::from(format!(
            "  Waiting for first {} trial...",
            app.view_month
        ))]
    };

    let block = Block::default().title(" Daily energy ").borders(Borders::ALL);
    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q:Quit  Space:Pause  +/-:Speed  ←/→:Month  1/2/3:Preset  r:Restart",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
