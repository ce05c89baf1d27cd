use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Seating state of a table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum TableStatus {
    #[sea_orm(string_value = "Free")]
    Free,
    #[sea_orm(string_value = "Occupied")]
    Occupied,
    #[sea_orm(string_value = "Reserved")]
    Reserved,
}

/// A table within a restaurant. The table number is unique per restaurant.
/// By convention a table carries at most one open order at a time; history
/// is kept, so the database allows many orders per table over time.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tables")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub restaurant_id: i32,
    pub table_number: i32,
    pub capacity: i32,
    pub status: TableStatus,
    /// Optional floor-plan position for the UI, e.g. `{"x": 100, "y": 50}`.
    pub coordinates: Option<Json>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::restaurant::Entity",
        from = "Column::RestaurantId",
        to = "super::restaurant::Column::Id"
    )]
    Restaurant,
    #[sea_orm(has_many = "super::order::Entity")]
    Order,
    #[sea_orm(has_many = "super::qr_token::Entity")]
    QrToken,
}

impl Related<super::restaurant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Restaurant.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
