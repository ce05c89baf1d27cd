use sea_orm::entity::prelude::*;

/// Stock level for an ingredient or finished good at one restaurant.
/// Names are unique per restaurant.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "inventory_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub restaurant_id: i32,
    pub name: String,
    pub quantity: Decimal,
    /// e.g. "kg", "L", "units", "boxes".
    pub unit: String,
    pub low_stock_threshold: Decimal,
    pub last_updated: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::restaurant::Entity",
        from = "Column::RestaurantId",
        to = "super::restaurant::Column::Id"
    )]
    Restaurant,
}

impl Related<super::restaurant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Restaurant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.low_stock_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn low_stock_compares_against_the_threshold() {
        let item = Model {
            id: 1,
            restaurant_id: 1,
            name: "Flour".to_string(),
            quantity: Decimal::new(2500, 3), // 2.500
            unit: "kg".to_string(),
            low_stock_threshold: Decimal::new(5000, 3), // 5.000
            last_updated: Utc::now(),
        };
        assert!(item.is_low_stock());

        let restocked = Model {
            quantity: Decimal::new(12000, 3),
            ..item
        };
        assert!(!restocked.is_low_stock());
    }
}
