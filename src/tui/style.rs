//! Color constants and auto-scaling helpers for the TUI.

use ratatui::style::Color;

/// Running mean load line color.
pub const MEAN_COLOR: Color = Color::Cyan;
/// Running percentile load line color.
pub const PERCENTILE_COLOR: Color = Color::Yellow;
/// Progress gauge color while trials are running.
pub const PROGRESS_RUNNING: Color = Color::Blue;
/// Progress gauge color once every month is complete.
pub const PROGRESS_DONE: Color = Color::Green;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;

/// Returns the progress gauge color.
pub fn progress_color(finished: bool) -> Color {
    if finished {
        PROGRESS_DONE
    } else {
        PROGRESS_RUNNING
    }
}

/// Computes Y-axis bounds from chart data points with 10% headroom.
///
/// Load is never negative, so the lower bound is pinned at zero.
pub fn auto_bounds_y(mean: &[(f64, f64)], upper: &[(f64, f64)]) -> [f64; 2] {
    let max = mean
        .iter()
        .chain(upper.iter())
        .map(|&(_, y)| y)
        .fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() || max <= 0.0 {
        return [0.0, 1.0];
    }
    [0.0, max * 1.1]
}
