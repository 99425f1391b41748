use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;

/// Spinner shown while a TMDB lookup is running.
///
/// Without a terminal (or in quiet/JSON mode) progress goes to the log instead.
pub struct LookupSpinner {
    spinner: Option<ProgressBar>,
}

impl LookupSpinner {
    pub fn start(title: &str, enabled: bool) -> Self {
        let message = format!("Fetching TMDB details for '{}'...", title);
        if !(enabled && is_interactive()) {
            tracing::info!(operation = "lookup", title = %title, "Fetching TMDB details");
            return Self { spinner: None };
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(80));
        Self { spinner: Some(spinner) }
    }

    pub fn finish(self) {
        if let Some(spinner) = self.spinner {
            spinner.finish_and_clear();
        }
    }
}

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}
