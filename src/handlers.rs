use sea_orm::DbErr;

pub mod accounts;
pub mod health;
pub mod inventory;
pub mod kitchen_tickets;
pub mod locations;
pub mod menu_items;
pub mod orders;
pub mod payments;
pub mod profiles;
pub mod qr_tokens;
pub mod restaurants;
pub mod sales;
pub mod screen_displays;
pub mod tables;

/// Whether a database error is a constraint failure (unique index or foreign
/// key) rather than an operational one. Backends report these through
/// different `DbErr` variants (SQLite on execute, Postgres on the
/// INSERT .. RETURNING query), so the rendered message is matched instead of
/// the variant.
pub(crate) fn is_constraint_violation(db_error: &DbErr) -> bool {
    let message = db_error.to_string().to_lowercase();
    message.contains("unique") || message.contains("constraint") || message.contains("foreign key")
}

#[cfg(test)]
mod tests {
    use super::is_constraint_violation;
    use sea_orm::{DbErr, RuntimeErr};

    #[test]
    fn constraint_failures_are_detected_on_any_variant() {
        let exec = DbErr::Exec(RuntimeErr::Internal(
            "UNIQUE constraint failed: accounts.username".to_string(),
        ));
        assert!(is_constraint_violation(&exec));

        // Postgres reports the violation on the insert query itself.
        let query = DbErr::Query(RuntimeErr::Internal(
            "duplicate key value violates unique constraint \"accounts_username_key\"".to_string(),
        ));
        assert!(is_constraint_violation(&query));

        let fk = DbErr::Exec(RuntimeErr::Internal(
            "FOREIGN KEY constraint failed".to_string(),
        ));
        assert!(is_constraint_violation(&fk));
    }

    #[test]
    fn operational_errors_are_not_constraint_failures() {
        let conn = DbErr::Conn(RuntimeErr::Internal("connection refused".to_string()));
        assert!(!is_constraint_violation(&conn));
    }
}
