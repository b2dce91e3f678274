use sea_orm::entity::prelude::*;

/// Account record. `role` holds the lowercase role name.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub shelter_name: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub is_approved: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::pets::Entity")]
    Pets,
    #[sea_orm(has_many = "super::adoption_requests::Entity")]
    AdoptionRequests,
}

impl Related<super::pets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pets.def()
    }
}

impl Related<super::adoption_requests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdoptionRequests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
