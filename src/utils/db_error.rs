//! Database error classification helpers.

/// Constraint name declared in the `url_mappings` migration.
const SHORT_ID_CONSTRAINT: &str = "url_mappings_short_id_key";

/// Column reference SQLite reports in `UNIQUE constraint failed: ...` messages.
const SHORT_ID_COLUMN: &str = "url_mappings.short_id";

/// Returns true if the error is a unique violation on `url_mappings.short_id`.
///
/// SQLite does not report constraint names, so the error message is checked
/// as well.
pub fn is_unique_violation_on_short_id(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    db_err.constraint() == Some(SHORT_ID_CONSTRAINT) || db_err.message().contains(SHORT_ID_COLUMN)
}
