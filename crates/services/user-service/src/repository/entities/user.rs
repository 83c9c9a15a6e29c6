//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::StoredUser;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub age: Option<i64>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain record
impl From<Model> for StoredUser {
    fn from(model: Model) -> Self {
        StoredUser {
            id: model.id,
            name: model.name,
            email: model.email,
            age: model.age,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
