use sea_orm_migration::prelude::*;

/// Creates the `mobile` table for phone listings.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Mobile {
    Table,
    Id,
    SellerId,
    Brand,
    Model,
    Storage,
    Color,
    Condition,
    Price,
    Description,
    Images,
    IsNew,
    Status,
    Location,
    Specifications,
    Accessories,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}

#[async_trait::async_trait]
#[allow(clippy::too_many_lines)]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Mobile::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Mobile::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Mobile::SellerId).string_len(255).not_null())
                    .col(ColumnDef::new(Mobile::Brand).string_len(100).not_null())
                    .col(ColumnDef::new(Mobile::Model).string_len(150).not_null())
                    .col(ColumnDef::new(Mobile::Storage).string_len(20).null())
                    .col(ColumnDef::new(Mobile::Color).string_len(50).null())
                    .col(ColumnDef::new(Mobile::Condition).string_len(20).not_null())
                    .col(ColumnDef::new(Mobile::Price).decimal_len(10, 2).not_null())
                    .col(ColumnDef::new(Mobile::Description).text().null())
                    .col(ColumnDef::new(Mobile::Images).json().not_null())
                    .col(
                        ColumnDef::new(Mobile::IsNew)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Mobile::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Mobile::Location).string_len(100).null())
                    .col(ColumnDef::new(Mobile::Specifications).json().not_null())
                    .col(ColumnDef::new(Mobile::Accessories).json().not_null())
                    .col(
                        ColumnDef::new(Mobile::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Mobile::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_mobile_seller_id")
                            .from(Mobile::Table, Mobile::SellerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Browse queries filter on status, profile pages on seller
        manager
            .create_index(
                Index::create()
                    .name("idx_mobile_status")
                    .table(Mobile::Table)
                    .col(Mobile::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_mobile_seller_id")
                    .table(Mobile::Table)
                    .col(Mobile::SellerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Mobile::Table).to_owned())
            .await
    }
}
