// Renderer module - formatting and colour helpers shared by the layout

use crate::engine_core::transaction::format_amount;
use crate::engine_core::{RiskLevel, Severity, TransactionStatus};
use crate::stream::StreamStatus;
use ratatui::style::Color;

/// Format a rupee amount for display (`₹25,000`)
pub fn format_rupees(amount: u64) -> String {
    format!("₹{}", format_amount(amount))
}

pub fn risk_color(score: u8) -> Color {
    match RiskLevel::from_score(score) {
        RiskLevel::Low => Color::Green,
        RiskLevel::Medium => Color::Yellow,
        RiskLevel::High => Color::Red,
    }
}

pub fn status_color(status: TransactionStatus) -> Color {
    match status {
        TransactionStatus::Approved => Color::Green,
        TransactionStatus::Blocked => Color::Red,
    }
}

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Critical => Color::LightRed,
        Severity::High => Color::Red,
    }
}

pub fn stream_status_label(status: StreamStatus) -> (&'static str, Color) {
    match status {
        StreamStatus::Idle => ("Idle", Color::Gray),
        StreamStatus::Running => ("Live", Color::Green),
        StreamStatus::Paused => ("Paused", Color::Yellow),
    }
}

/// Text bar proportional to a 0-100 score
pub fn risk_bar(score: u8, width: usize) -> String {
    let filled = (usize::from(score.min(100)) * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
