use sea_orm_migration::prelude::*;

/// Creates the `order` table for listing purchases.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Order {
    Table,
    Id,
    BuyerId,
    SellerId,
    MobileId,
    Amount,
    Status,
    PaymentMethod,
    PaymentStatus,
    ShippingAddress,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Mobile {
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
                    .table(Order::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Order::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Order::BuyerId).string_len(255).not_null())
                    .col(ColumnDef::new(Order::SellerId).string_len(255).not_null())
                    .col(ColumnDef::new(Order::MobileId).integer().not_null())
                    .col(ColumnDef::new(Order::Amount).decimal_len(10, 2).not_null())
                    .col(
                        ColumnDef::new(Order::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Order::PaymentMethod).string_len(20).null())
                    .col(
                        ColumnDef::new(Order::PaymentStatus)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Order::ShippingAddress).json().null())
                    .col(
                        ColumnDef::new(Order::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Order::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_buyer_id")
                            .from(Order::Table, Order::BuyerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_seller_id")
                            .from(Order::Table, Order::SellerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    // Listings with order history cannot be hard-deleted
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_mobile_id")
                            .from(Order::Table, Order::MobileId)
                            .to(Mobile::Table, Mobile::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_order_buyer_id")
                    .table(Order::Table)
                    .col(Order::BuyerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_order_seller_id")
                    .table(Order::Table)
                    .col(Order::SellerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Order::Table).to_owned())
            .await
    }
}
