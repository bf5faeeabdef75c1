use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "registrants")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub email: String,
    pub full_name: String,
    pub phone_number: String,

    // Interest tags (JSON array of strings from the configured catalog)
    pub interests: String,

    pub created_at: i64,

    // Last modification timestamp
    pub updated_at: i64,
}

impl Model {
    /// Decode the persisted interest tags.
    ///
    /// The store only ever writes a JSON array of strings, so a decode
    /// failure collapses to an empty list rather than an error.
    pub fn interest_tags(&self) -> Vec<String> {
        serde_json::from_str(&self.interests).unwrap_or_default()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
