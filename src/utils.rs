use crate::FetchError;
use std::time::Duration;
use url::Url;

/// Reject URLs the transport could never fetch before touching the network.
pub fn validate_url(url: &str) -> Result<Url, FetchError> {
    if url.is_empty() {
        return Err(FetchError::EmptyUrl);
    }

    let parsed = Url::parse(url)?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::InvalidUrl(format!(
            "unsupported scheme '{other}' in {url}"
        ))),
    }
}

pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    let millis = duration.subsec_millis();

    if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else if seconds > 0 {
        format!("{}.{:03}s", seconds, millis)
    } else if millis > 0 {
        format!("{millis}ms")
    } else {
        format!("{}µs", duration.as_micros())
    }
}

pub fn format_bytes(bytes: usize) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}
