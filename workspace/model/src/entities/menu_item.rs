use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Menu section an item is listed under.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum Category {
    #[sea_orm(string_value = "Appetizer")]
    Appetizer,
    #[sea_orm(string_value = "Main")]
    Main,
    #[sea_orm(string_value = "Dessert")]
    Dessert,
    #[sea_orm(string_value = "Beverage")]
    Beverage,
    #[sea_orm(string_value = "Side")]
    Side,
}

/// An orderable item on a restaurant's menu, like "Cheeseburger".
/// Names are unique within a restaurant.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "menu_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub restaurant_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: Category,
    pub base_price: Decimal,
    /// Whether the item is currently available to order.
    pub is_active: bool,
    /// Estimated preparation time; drives kitchen ticket due times.
    pub prep_minutes: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::restaurant::Entity",
        from = "Column::RestaurantId",
        to = "super::restaurant::Column::Id"
    )]
    Restaurant,
    #[sea_orm(has_many = "super::menu_variant::Entity")]
    MenuVariant,
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItem,
}

impl Related<super::restaurant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Restaurant.def()
    }
}

impl Related<super::menu_variant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuVariant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
