mod enum_labels;
mod m20251226_000001_rename_vertical_package_labels;
mod m20251226_000002_add_booking_payment_columns;

pub use enum_labels::{enum_labels, EnumLabel};
pub use m20251226_000001_rename_vertical_package_labels::{
    backfill, BackfillOutcome, RenamedEnum, RENAMED_ENUMS,
};
pub use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251226_000001_rename_vertical_package_labels::Migration),
            Box::new(m20251226_000002_add_booking_payment_columns::Migration),
        ]
    }
}
