use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Pets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Pets::ShelterId).integer().not_null())
                    .col(ColumnDef::new(Pets::Name).string_len(120).not_null())
                    .col(ColumnDef::new(Pets::Species).string_len(80).not_null())
                    .col(
                        ColumnDef::new(Pets::Breed)
                            .string_len(120)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Pets::Age).integer().not_null())
                    .col(ColumnDef::new(Pets::Description).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Pets::Location)
                            .string_len(120)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Pets::PhotoUrl).string_len(255).null())
                    .col(
                        ColumnDef::new(Pets::Status)
                            .string_len(20)
                            .not_null()
                            .default("available"),
                    )
                    .col(
                        ColumnDef::new(Pets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Pets::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Pets::Table, Pets::ShelterId)
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
                    .table(Pets::Table)
                    .col(Pets::ShelterId)
                    .name("idx_pets_shelter_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Pets::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Pets {
    Table,
    Id,
    ShelterId,
    Name,
    Species,
    Breed,
    Age,
    Description,
    Location,
    PhotoUrl,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
