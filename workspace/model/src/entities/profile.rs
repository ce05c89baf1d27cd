use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::account::Role;

/// Daily attendance state tracked on the profile.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum AttendanceStatus {
    #[sea_orm(string_value = "Present")]
    Present,
    #[sea_orm(string_value = "Absent")]
    Absent,
    #[sea_orm(string_value = "Late")]
    Late,
    #[sea_orm(string_value = "OnLeave")]
    OnLeave,
}

/// Staff-management profile, one per account.
///
/// The role is denormalized from the account so shift rosters can be read
/// without the join; the account remains the authority for access decisions.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub account_id: i32,
    pub display_name: String,
    pub email: Option<String>,
    pub role: Role,
    pub shift_start: Option<Time>,
    pub shift_end: Option<Time>,
    pub attendance_date: Option<Date>,
    pub attendance_status: AttendanceStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountId",
        to = "super::account::Column::Id"
    )]
    Account,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
