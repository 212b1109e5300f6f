//! Progress bar display for builds

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Progress display for the per-bundle steps of a build
///
/// Draws to stderr only when it is a terminal.
pub struct BuildProgress {
    pb: ProgressBar,
}

impl BuildProgress {
    /// Create a progress bar for `total` bundles
    pub fn new(total: u64) -> Self {
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let pb = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr());
        pb.set_style(style);

        Self { pb }
    }

    /// A progress bar that never draws
    pub fn hidden() -> Self {
        Self {
            pb: ProgressBar::hidden(),
        }
    }

    /// Show the bundle currently being processed and count it
    pub fn step(&self, bundle_name: &str) {
        // Truncate long names for display
        let display = if bundle_name.len() > 50 {
            let tail: String = bundle_name
                .chars()
                .rev()
                .take(47)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            format!("...{tail}")
        } else {
            bundle_name.to_string()
        };
        self.pb.set_message(display);
        self.pb.inc(1);
    }

    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.pb.abandon();
    }

    #[cfg(test)]
    fn position(&self) -> u64 {
        self.pb.position()
    }
}
