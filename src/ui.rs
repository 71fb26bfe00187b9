//! Terminal output: a spinner while the model works and colored outcomes.

use std::path::Path;
use std::time::Duration;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use careerwise::workflow::{RunRecord, WorkflowFailure};

/// Spinner shown for the duration of one workflow run.
pub struct RunProgress {
    pb: ProgressBar,
    green: Style,
    red: Style,
    yellow: Style,
}

impl RunProgress {
    pub fn start(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self {
            pb,
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            yellow: Style::new().yellow(),
        }
    }

    pub fn succeed(&self, message: &str) {
        self.pb.finish_and_clear();
        eprintln!("  {} {message}", self.green.apply_to("✓"));
    }

    /// Clears the spinner and explains the failure in user terms.
    pub fn fail(&self, failure: &WorkflowFailure) {
        self.pb.finish_and_clear();
        eprintln!("  {} {}", self.red.apply_to("✗"), failure.user_message());
        if failure.is_misconfiguration() {
            eprintln!(
                "  {} This looks like a configuration problem: check GEMINI_API_KEY or api_key in careerwise.toml.",
                self.yellow.apply_to("!")
            );
        } else if failure.is_retryable() {
            eprintln!(
                "  {} This is usually temporary. Running the same command again may succeed.",
                self.yellow.apply_to("↻")
            );
        }
    }

    pub fn saved(&self, path: &Path) {
        eprintln!("  {} Saved {}", self.green.apply_to("↓"), path.display());
    }

    pub fn print_record<S: Serialize>(&self, record: &RunRecord<S>) {
        eprintln!();
        eprintln!("{}", self.yellow.apply_to("─── Run Record ───"));
        eprintln!(
            "{}",
            serde_json::to_string_pretty(record).unwrap_or_default()
        );
    }
}

pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {err:#}", Style::new().red().bold().apply_to("error:"));
}
