use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Bookings::Table)
                    .add_column_if_not_exists(ColumnDef::new(Bookings::PaymentStatus).string_len(50).null())
                    .add_column_if_not_exists(ColumnDef::new(Bookings::RazorpayOrderId).string_len(100).null())
                    .add_column_if_not_exists(ColumnDef::new(Bookings::RazorpayPaymentId).string_len(100).null())
                    .add_column_if_not_exists(ColumnDef::new(Bookings::RazorpaySignature).string_len(200).null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        // No rollback: `up` skips columns that already exist, so dropping them
        // here could remove booking data this migration never added.
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Bookings {
    Table,
    PaymentStatus,
    RazorpayOrderId,
    RazorpayPaymentId,
    RazorpaySignature,
}
