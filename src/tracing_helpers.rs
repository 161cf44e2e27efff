//! Span constructors for the `tracing` feature.
//!
//! The executor and connection paths enter one span per store call. SQL text
//! is truncated before it is recorded so prepared statements with long
//! VALUES lists do not flood span fields.

use tracing::Span;

const MAX_RECORDED_SQL: usize = 120;

fn truncated(sql: &str) -> &str {
    match sql.char_indices().nth(MAX_RECORDED_SQL) {
        Some((idx, _)) => &sql[..idx],
        None => sql,
    }
}

/// Span covering a single statement execution.
pub fn statement_span(sql: &str) -> Span {
    tracing::debug_span!("db_statement", sql = %truncated(sql))
}

/// Span covering connection establishment.
pub fn connect_span() -> Span {
    tracing::debug_span!("db_connect")
}

/// Install a process-wide subscriber that prints spans and events.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_target(false).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_short_sql_unchanged() {
        assert_eq!(truncated("SELECT 1"), "SELECT 1");
    }

    #[test]
    fn test_truncated_caps_long_sql() {
        let long = "x".repeat(500);
        assert_eq!(truncated(&long).len(), MAX_RECORDED_SQL);
    }

    #[test]
    fn test_spans_construct() {
        let _ = statement_span("SELECT * FROM post WHERE id = $1");
        let _ = connect_span();
    }
}
