//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::User;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub first_name: String,
    pub name_prefix: Option<String>,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone_number: Option<String>,
    pub address: String,
    pub zip_code: String,
    pub city: String,
    /// Alias into the user_categories table
    pub account_type: String,
    pub activated: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            first_name: model.first_name,
            name_prefix: model.name_prefix,
            last_name: model.last_name,
            email: model.email,
            phone_number: model.phone_number,
            address: model.address,
            zip_code: model.zip_code,
            city: model.city,
            account_type: model.account_type,
            activated: model.activated,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
