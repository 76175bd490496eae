/// Format a byte count as a decimal-megabyte display string ("2.00 MB"),
/// matching the file summary shown next to a selected scan.
pub fn format_file_size(bytes: usize) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_file_size_two_megabytes() {
        assert_eq!(format_file_size(2 * 1024 * 1024), "2.00 MB");
    }

    #[test]
    fn format_file_size_fractional() {
        assert_eq!(format_file_size(1536 * 1024), "1.50 MB");
        assert_eq!(format_file_size(0), "0.00 MB");
    }
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
