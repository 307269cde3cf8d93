//! CLI interface for the WCA accessibility tools

mod assistant;
mod report;
mod ui;


pub use assistant::{WcagAssistant, WCAG_SYSTEM_PROMPT};
pub use report::{render_report, render_transcript};
pub use ui::{display_banner, handle_input_with_history, print_help};

// Re-export core types
pub use wca_core::{Error, Result};
