use time::OffsetDateTime;

/// Build the `started-by` identifier for a launch submitted at `at`.
///
/// Format: `{prefix}-{unix_seconds}`. Two launches in the same second share an id.
pub fn started_by_at(prefix: &str, at: OffsetDateTime) -> String {
    format!("{prefix}-{}", at.unix_timestamp())
}

/// [`started_by_at`] for the current wall-clock second.
pub fn make_started_by(prefix: &str) -> String {
    started_by_at(prefix, OffsetDateTime::now_utc())
}
