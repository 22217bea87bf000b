use diesel::result::{DatabaseErrorKind, Error};

// The database's unique constraints are the real uniqueness enforcement;
// pre-insert existence checks are advisory only. Every insert path maps
// this error to a conflict response instead of a 500.
pub fn is_unique_violation(err: &Error) -> bool {
    matches!(
        err,
        Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

pub fn is_foreign_key_violation(err: &Error) -> bool {
    matches!(
        err,
        Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)
    )
}
