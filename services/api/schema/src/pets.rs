use sea_orm::entity::prelude::*;

/// Pet listed by a shelter. `status` holds `available` or `adopted`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "pets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub shelter_id: i32,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age: i32,
    pub description: String,
    pub location: String,
    pub photo_url: Option<String>,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ShelterId",
        to = "super::users::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Shelter,
    #[sea_orm(has_many = "super::adoption_requests::Entity")]
    AdoptionRequests,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shelter.def()
    }
}

impl Related<super::adoption_requests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdoptionRequests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
