use chrono::{DateTime, Utc};

/// Card label used across the note list, e.g. "Created on Monday, June 3".
pub fn format_created_on(created_at: DateTime<Utc>) -> String {
    created_at.format("Created on %A, %B %-d").to_string()
}

/// Elapsed recording time as `mm:ss`.
pub fn format_clock(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

pub fn format_file_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;
    if bytes < KIB {
        format!("{} B", bytes)
    } else if bytes < MIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    }
}
