//! Display helpers shared by the build report and the query command.

use console::Style;

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count as a human-readable size
///
/// Uses binary multiples and at most two decimals, trailing zeros dropped:
/// `1536` becomes `1.5 KB`, `1024` becomes `1 KB`.
#[allow(clippy::cast_precision_loss)]
pub fn format_file_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut order = 0;

    while size >= 1024.0 && order < SIZE_UNITS.len() - 1 {
        order += 1;
        size /= 1024.0;
    }

    let formatted = format!("{size:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", SIZE_UNITS[order])
}

/// Style for field labels
pub fn label() -> Style {
    Style::new().bold()
}

/// Style for bundle names
pub fn bundle_name() -> Style {
    Style::new().cyan().bold()
}

/// Style for secondary details (hashes, sizes)
pub fn dim() -> Style {
    Style::new().dim()
}
