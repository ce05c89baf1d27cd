use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum OrderItemStatus {
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Completed")]
    Completed,
    #[sea_orm(string_value = "Cancelled")]
    Cancelled,
}

/// A line within an order, e.g. 2x Cheeseburger (Large).
/// Menu item and variant links are protected so priced history survives
/// menu edits; owns at most one kitchen ticket.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub order_id: i32,
    pub menu_item_id: i32,
    pub variant_id: Option<i32>,
    pub quantity: i32,
    /// Customer notes, e.g. "no onions".
    pub notes: Option<String>,
    pub status: OrderItemStatus,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id"
    )]
    Order,
    #[sea_orm(
        belongs_to = "super::menu_item::Entity",
        from = "Column::MenuItemId",
        to = "super::menu_item::Column::Id"
    )]
    MenuItem,
    #[sea_orm(
        belongs_to = "super::menu_variant::Entity",
        from = "Column::VariantId",
        to = "super::menu_variant::Column::Id"
    )]
    MenuVariant,
    #[sea_orm(has_one = "super::kitchen_ticket::Entity")]
    KitchenTicket,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::menu_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuItem.def()
    }
}

impl Related<super::menu_variant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuVariant.def()
    }
}

impl Related<super::kitchen_ticket::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::KitchenTicket.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Price of one unit of this line: base price plus the variant modifier.
pub fn unit_price(base_price: Decimal, price_modifier: Option<Decimal>) -> Decimal {
    base_price + price_modifier.unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_price_adds_the_variant_modifier() {
        let base = Decimal::new(999, 2); // 9.99
        assert_eq!(unit_price(base, None), Decimal::new(999, 2));
        assert_eq!(
            unit_price(base, Some(Decimal::new(150, 2))),
            Decimal::new(1149, 2)
        );
    }
}
