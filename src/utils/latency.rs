//! Latency parsing utilities.
//!
//! Link weights are propagation delays in whole milliseconds. GML files and
//! configs may spell them as "5ms", "5" or "1s".

use crate::topology::Weight;

/// Parse a latency string (e.g. "5ms", "1s", "12") to milliseconds
///
/// Supported formats:
/// - Raw milliseconds: "12"
/// - Milliseconds: "12ms", "12msec", "12msecs"
/// - Seconds: "1s", "1sec", "1secs"
///
/// # Examples
/// ```
/// use torus_routes::utils::latency::parse_latency_ms;
///
/// assert_eq!(parse_latency_ms("5ms"), Ok(5));
/// assert_eq!(parse_latency_ms("2s"), Ok(2000));
/// assert_eq!(parse_latency_ms("12"), Ok(12));
/// assert!(parse_latency_ms("fast").is_err());
/// ```
pub fn parse_latency_ms(latency: &str) -> Result<Weight, String> {
    let latency = latency.trim().trim_matches('"');
    let (number, unit) = split_number(latency);
    if number.is_empty() {
        return Err(format!("Invalid latency format: {}", latency));
    }
    let value: Weight = number
        .parse()
        .map_err(|_| format!("Invalid latency value: {}", latency))?;

    let factor: Weight = match unit.trim() {
        "" | "ms" | "msec" | "msecs" => 1,
        "s" | "sec" | "secs" => 1000,
        other => return Err(format!("Unknown latency unit '{}' in {}", other, latency)),
    };
    value
        .checked_mul(factor)
        .ok_or_else(|| format!("Latency out of range: {}", latency))
}

/// Split at the first non-digit character
fn split_number(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}
