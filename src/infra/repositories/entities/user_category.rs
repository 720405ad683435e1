//! User category database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::UserCategory;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub alias: String,
    pub title: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for UserCategory {
    fn from(model: Model) -> Self {
        UserCategory {
            alias: model.alias,
            title: model.title,
        }
    }
}
