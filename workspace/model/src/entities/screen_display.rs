use sea_orm::entity::prelude::*;

/// A physical screen (kitchen display or customer-facing) and the content
/// pushed to it. Standalone; no relations.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "screen_displays")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// What the screen currently shows.
    pub content: Json,
    /// Rendering configuration (layout, rotation, theme).
    pub config: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
