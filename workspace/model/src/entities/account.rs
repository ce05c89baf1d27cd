use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The primary role of a staff member.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum Role {
    #[sea_orm(string_value = "Manager")]
    Manager,
    #[sea_orm(string_value = "Server")]
    Server,
    #[sea_orm(string_value = "Cook")]
    Cook,
    #[sea_orm(string_value = "Cashier")]
    Cashier,
    /// Default role for staff without a specific assignment.
    #[sea_orm(string_value = "Staff")]
    Staff,
}

/// A staff account: identity, role and the access flags derived from it.
///
/// The `is_elevated` flag is never written directly by clients; the account
/// handlers recompute it through [`crate::access::derive_elevated_access`]
/// on every create and update.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    /// Used for login and notifications.
    #[sea_orm(unique)]
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Role,
    /// Grants entry to the back-office panel. Derived from the role unless
    /// the account is a superuser.
    pub is_elevated: bool,
    pub is_superuser: bool,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    // Each account has at most one profile.
    #[sea_orm(has_one = "super::profile::Entity")]
    Profile,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Display name derived from the name fields, falling back to the
    /// username when both are empty.
    pub fn full_name(&self) -> String {
        let full = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        );
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_falls_back_to_username() {
        let account = Model {
            id: 1,
            username: "jdoe".to_string(),
            email: "jdoe@example.com".to_string(),
            first_name: None,
            last_name: None,
            role: Role::Staff,
            is_elevated: false,
            is_superuser: false,
            is_active: true,
        };
        assert_eq!(account.full_name(), "jdoe");

        let named = Model {
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
            ..account
        };
        assert_eq!(named.full_name(), "Jane Doe");
    }
}
