use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdoptionRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdoptionRequests::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AdoptionRequests::PetId).integer().not_null())
                    .col(
                        ColumnDef::new(AdoptionRequests::AdopterId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdoptionRequests::Message)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(AdoptionRequests::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(AdoptionRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(AdoptionRequests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AdoptionRequests::Table, AdoptionRequests::PetId)
                            .to(Pets::Table, Pets::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AdoptionRequests::Table, AdoptionRequests::AdopterId)
                            .to(Users::Table, Users::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(AdoptionRequests::Table)
                    .col(AdoptionRequests::PetId)
                    .name("idx_adoption_requests_pet_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(AdoptionRequests::Table)
                    .col(AdoptionRequests::AdopterId)
                    .name("idx_adoption_requests_adopter_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdoptionRequests::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum AdoptionRequests {
    Table,
    Id,
    PetId,
    AdopterId,
    Message,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Pets {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
