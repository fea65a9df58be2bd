//! Database error classification.

/// Name of the unique constraint on `links.short_id`.
pub const SHORT_ID_CONSTRAINT: &str = "links_short_id_key";

/// Returns true if `e` is a unique violation on the short ID constraint.
pub fn is_unique_violation_on_short_id(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(SHORT_ID_CONSTRAINT))
}
