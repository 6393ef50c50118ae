//! Display values derived from a check result.

use crate::validate::ValidEvent;

/// How many characters of check output the one-line summary keeps.
pub const SUMMARY_MAX_LENGTH: usize = 100;

/// Display form of a check status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPresentation {
    /// Severity color tag, also the basename of the card's stripe image.
    pub color: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub status: u32,
}

impl StatusPresentation {
    /// Maps a status code to its display form. Total over all codes: anything
    /// outside 0..=2 takes the unknown arm.
    pub fn for_status(status: u32) -> Self {
        match status {
            0 => Self {
                color: "success",
                label: "Resolved",
                icon: "✅",
                status,
            },
            1 => Self {
                color: "warning",
                label: "Warning",
                icon: "⚠️",
                status,
            },
            2 => Self {
                color: "danger",
                label: "Critical",
                icon: "🚨",
                status,
            },
            _ => Self {
                color: "unknown",
                label: "Unknown",
                icon: "⁉️",
                status,
            },
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.status == 0
    }
}

/// "RESOLVED" for a passing check, "ALERT" for everything else.
pub fn formatted_event_action(event: &ValidEvent<'_>) -> &'static str {
    if event.check.status == 0 {
        "RESOLVED"
    } else {
        "ALERT"
    }
}

/// `{entity}/{check}` identifier used in summaries.
pub fn event_key(event: &ValidEvent<'_>) -> String {
    format!("{}/{}", event.entity.name, event.check.name)
}

/// Strips every trailing `\n` and `\r` character. Idempotent.
pub fn chomp(s: &str) -> &str {
    s.trim_end_matches(['\n', '\r'])
}

/// One-line `{event_key}:{output}` summary of the check output.
///
/// The output is chomped, then truncated to `max_length` characters with a
/// literal `"..."` suffix when the original untrimmed output ran longer than
/// `max_length` characters.
pub fn event_summary(event: &ValidEvent<'_>, max_length: usize) -> String {
    let trimmed = chomp(&event.check.output);
    let output = if event.check.output.chars().count() > max_length {
        let truncated: String = trimmed.chars().take(max_length).collect();
        format!("{truncated}...")
    } else {
        trimmed.to_string()
    };
    format!("{}:{}", event_key(event), output)
}

/// `{action} - {summary}` headline used as the card's fallback text.
pub fn formatted_message(event: &ValidEvent<'_>) -> String {
    format!(
        "{} - {}",
        formatted_event_action(event),
        event_summary(event, SUMMARY_MAX_LENGTH)
    )
}

/// Collapses every whitespace run to a single space.
///
/// Applied to template text before values are substituted, never to event
/// data.
pub fn minify_whitespace(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_whitespace = false;
    for c in input.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push(' ');
            }
            in_whitespace = true;
        } else {
            out.push(c);
            in_whitespace = false;
        }
    }
    out
}
