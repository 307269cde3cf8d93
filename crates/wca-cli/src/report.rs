//! Terminal rendering for analysis reports and chat transcripts

use colored::*;
use wca_core::{AccessibilityReport, ChatSession, ReadabilityLevel, Role, WCAG_AA_NORMAL_TEXT};

fn verdict(pass: bool) -> ColoredString {
    if pass {
        "✓ pass".green().bold()
    } else {
        "✗ fail".red().bold()
    }
}

fn level_label(level: ReadabilityLevel) -> ColoredString {
    match level {
        ReadabilityLevel::Easy => level.as_str().green(),
        ReadabilityLevel::Moderate => level.as_str().yellow(),
        ReadabilityLevel::Difficult => level.as_str().red(),
    }
}

/// Render a report as aligned, colored lines
pub fn render_report(report: &AccessibilityReport) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "{} {} on {} ({} text)",
        "Colors:".bold(),
        report.foreground,
        report.background,
        report.text_type
    ));
    lines.push(format!(
        "  {:<16}{:>8}  {} (AA needs {}:1)",
        "Contrast ratio",
        format!("{:.2}:1", report.contrast.ratio),
        verdict(report.contrast.passes_aa),
        WCAG_AA_NORMAL_TEXT
    ));
    if report.contrast.passes_aaa {
        lines.push(format!("  {:<16}{:>8}  {}", "", "", "also meets AAA (7:1)".dimmed()));
    } else if !report.contrast.passes_aa && report.contrast.passes_aa_large {
        lines.push(format!("  {:<16}{:>8}  {}", "", "", "acceptable for large text only (3:1)".dimmed()));
    }
    lines.push(format!(
        "  {:<16}{:>8}  {}",
        "Font size",
        format!("{}px", report.font_size.size_px),
        verdict(report.font_size.accessible)
    ));
    lines.push(format!(
        "  {:<16}{:>8}  {}",
        "Readability",
        format!("{:.2}", report.readability.score),
        level_label(report.readability.level)
    ));
    lines.push(format!("  {:<16}{:>8}", "Sentences", report.stats.sentences));
    lines.push(format!("  {:<16}{:>8}", "Words", report.stats.words));

    let summary = if report.passes() {
        "✅ Meets the contrast and font size checks".green()
    } else {
        "⚠️  Needs improvement".yellow()
    };
    lines.push(String::new());
    lines.push(summary.to_string());

    lines.join("\n")
}

/// Render the visible conversation, one message per block
pub fn render_transcript(session: &ChatSession) -> String {
    if session.is_empty() {
        return "(no messages yet)".dimmed().to_string();
    }

    session
        .transcript()
        .iter()
        .map(|message| {
            let label = match message.role {
                Role::User => "you".cyan().bold(),
                Role::Assistant => "assistant".green().bold(),
                Role::System => "system".dimmed(),
            };
            format!("{}> {}", label, message.content)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
