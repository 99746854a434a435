//! Plain-text rendering of views and alerts for the terminal.

use std::fmt::Write as _;

use stacksim_core::ValueSign;

use crate::status::{Alert, AlertSeverity, Feedback, StatusKind};
use crate::view::{CellRow, GaugeBand, StackView};

const GAUGE_WIDTH: usize = 25;
const CELL_WIDTH: usize = 20;

const RESET: &str = "\x1b[0m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";

/// Renders [`StackView`]s as text, optionally with ANSI colours.
#[derive(Debug, Clone, Copy)]
pub struct TextRenderer {
    color: bool,
}

impl TextRenderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn render(&self, view: &StackView) -> String {
        let mut out = String::new();

        // Capacity gauge
        let filled = (view.gauge.fraction * GAUGE_WIDTH as f64).round() as usize;
        let bar = format!(
            "[{}{}]",
            "#".repeat(filled),
            ".".repeat(GAUGE_WIDTH - filled.min(GAUGE_WIDTH))
        );
        let band_color = match view.gauge.band {
            GaugeBand::Normal => GREEN,
            GaugeBand::Elevated => YELLOW,
            GaugeBand::Critical => RED,
        };
        let _ = writeln!(out, "  {}", view.gauge.label());
        let _ = writeln!(
            out,
            "  {} {:>3.0}% {}",
            self.paint(&bar, band_color),
            view.gauge.fraction * 100.0,
            band_name(view.gauge.band)
        );
        out.push('\n');

        // Column of cells
        let border = format!("+{}+", "-".repeat(CELL_WIDTH));
        let _ = writeln!(out, "       {border}");
        for row in &view.rows {
            match row {
                CellRow::Live {
                    index,
                    value,
                    sign,
                    is_top,
                } => {
                    let cell = format!("{:^width$}", value.to_string(), width = CELL_WIDTH);
                    let marker = if *is_top {
                        self.paint(" ← TOP", BOLD)
                    } else {
                        String::new()
                    };
                    let _ = writeln!(
                        out,
                        "  {:>4} |{}|{}",
                        format!("[{index}]"),
                        self.paint(&cell, sign_color(*sign)),
                        marker
                    );
                }
                CellRow::Empty => {
                    let cell = format!("{:^width$}", "---  (empty)", width = CELL_WIDTH);
                    let _ = writeln!(out, "       |{}|", self.paint(&cell, DIM));
                }
            }
            let _ = writeln!(out, "       {border}");
        }
        out.push('\n');

        // Info panel
        let _ = writeln!(out, "  Maximum Size: {}", view.info.maximum_size);
        let _ = writeln!(out, "  Current Size: {}", view.info.current_size);
        let _ = writeln!(out, "  Is Empty: {}", yes_no(view.info.is_empty));
        let _ = writeln!(out, "  Is Full: {}", yes_no(view.info.is_full));
        out.push('\n');

        // Controls
        let controls = [
            ("push", view.controls.push_enabled),
            ("pop", view.controls.pop_enabled),
            ("peek", view.controls.peek_enabled),
            ("size", true),
            ("is-empty", true),
            ("clear", true),
        ]
        .iter()
        .map(|(name, enabled)| {
            if *enabled {
                name.to_string()
            } else {
                self.paint(&format!("({name})"), DIM)
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
        let _ = writeln!(out, "  Commands: {controls}");

        // Status bar
        let _ = writeln!(out, "  Status: {}", self.feedback(&view.status));
        match &view.last_operation {
            Some(last) => {
                let _ = writeln!(out, "  Last Operation: {}", self.feedback(last));
            }
            None => {
                let _ = writeln!(out, "  Last Operation:");
            }
        }

        out
    }

    /// A status line with its category tag, e.g. `[ok] Pushed: 10`.
    pub fn feedback(&self, feedback: &Feedback) -> String {
        let (tag, color) = match feedback.kind {
            StatusKind::Success => ("[ok]", GREEN),
            StatusKind::Info => ("[info]", BLUE),
            StatusKind::Warning => ("[warn]", YELLOW),
            StatusKind::Error => ("[error]", RED),
        };
        self.paint(&format!("{tag} {}", feedback.message), color)
    }

    pub fn alert(&self, alert: &Alert) -> String {
        let (label, color) = match alert.severity {
            AlertSeverity::Warning => ("Warning", YELLOW),
            AlertSeverity::Error => ("Error", RED),
        };
        let heading = format!("{label}: {}", alert.title);
        let width = heading.chars().count().max(alert.message.chars().count()) + 2;
        let line = "─".repeat(width);

        let mut out = String::new();
        let _ = writeln!(out, "  ┌{line}┐");
        let _ = writeln!(
            out,
            "  │ {} │",
            self.paint(&format!("{heading:<w$}", w = width - 2), color)
        );
        let _ = writeln!(out, "  │ {:<w$} │", alert.message, w = width - 2);
        let _ = writeln!(out, "  └{line}┘");
        out
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.color {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

fn sign_color(sign: ValueSign) -> &'static str {
    match sign {
        ValueSign::Positive => GREEN,
        ValueSign::Negative => RED,
        ValueSign::Zero => BLUE,
    }
}

fn band_name(band: GaugeBand) -> &'static str {
    match band {
        GaugeBand::Normal => "",
        GaugeBand::Elevated => "(filling up)",
        GaugeBand::Critical => "(nearly full)",
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}
