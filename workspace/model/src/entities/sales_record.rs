use sea_orm::entity::prelude::*;
use chrono::NaiveDate;

/// Aggregate sales for one restaurant on one day, written by the reporting
/// flow. The month label is derived from the date at the write boundary so
/// records can be grouped without date arithmetic.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sales_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub restaurant_id: i32,
    pub date: Date,
    /// Always `month_label(date)`; never taken from the client.
    pub month: String,
    pub amount: Decimal,
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

/// Human-readable month grouping key, e.g. "July 2026".
pub fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_label_formats_month_name_and_year() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 14).unwrap();
        assert_eq!(month_label(date), "July 2026");

        let january = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(month_label(january), "January 2025");
    }
}
