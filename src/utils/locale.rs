// src/utils/locale.rs

use chrono::{DateTime, Datelike, TimeZone, Timelike};

const SV_MONTHS: [&str; 12] = [
    "jan.", "feb.", "mars", "apr.", "maj", "juni", "juli", "aug.", "sep.", "okt.", "nov.", "dec.",
];

/// Formats a timestamp the way a Swedish (`sv-SE`) browser prints a short
/// date with time, e.g. `19 okt. 2026 14:05`.
pub fn format_sv_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
    format!(
        "{} {} {} {:02}:{:02}",
        at.day(),
        SV_MONTHS[at.month0() as usize],
        at.year(),
        at.hour(),
        at.minute()
    )
}
