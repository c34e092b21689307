/*!
 * Utility functions for the exporter
 */

/// Marker that hides a directory entry from scans
pub const HIDDEN_PREFIX: char = '.';

/// Check whether an entry name is hidden
pub fn is_hidden(name: &str) -> bool {
    name.starts_with(HIDDEN_PREFIX)
}

/// Substring after the last `.` of a file name, if any
pub fn extension_of(file_name: &str) -> Option<&str> {
    file_name.rsplit_once('.').map(|(_, ext)| ext)
}

/// Fence language tag for a file name; empty when it has no extension
pub fn language_tag(file_name: &str) -> &str {
    extension_of(file_name).unwrap_or("")
}

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
