use sea_orm_migration::prelude::*;

/// Creates the `recharge_transaction` table for prepaid top-ups.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum RechargeTransaction {
    Table,
    Id,
    UserId,
    MobileNumber,
    Operator,
    PlanType,
    Amount,
    PlanDetails,
    TransactionId,
    Status,
    PaymentMethod,
    CreatedAt,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RechargeTransaction::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RechargeTransaction::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RechargeTransaction::UserId)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RechargeTransaction::MobileNumber)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RechargeTransaction::Operator)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RechargeTransaction::PlanType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RechargeTransaction::Amount)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(RechargeTransaction::PlanDetails).json().null())
                    .col(
                        ColumnDef::new(RechargeTransaction::TransactionId)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(RechargeTransaction::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(RechargeTransaction::PaymentMethod)
                            .string_len(20)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RechargeTransaction::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recharge_transaction_user_id")
                            .from(RechargeTransaction::Table, RechargeTransaction::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_recharge_transaction_user_id")
                    .table(RechargeTransaction::Table)
                    .col(RechargeTransaction::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RechargeTransaction::Table).to_owned())
            .await
    }
}
