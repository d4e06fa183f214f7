use sea_orm_migration::prelude::extension::postgres::TypeAlterStatement;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;
use tracing::{info, warn};

use crate::enum_labels::enum_labels;

/// A Postgres enum type whose labels get renamed, and the column that stores it.
pub struct RenamedEnum {
    pub type_name: &'static str,
    pub table: &'static str,
    pub column: &'static str,
    /// `(old, new)` label pairs, applied in order.
    pub renames: &'static [(&'static str, &'static str)],
}

pub const RENAMED_ENUMS: [RenamedEnum; 2] = [
    RenamedEnum {
        type_name: "creatorvertical",
        table: "creator_profiles",
        column: "vertical",
        renames: &[("learn", "resolve"), ("fun", "connect")],
    },
    RenamedEnum {
        type_name: "packagetype",
        table: "service_packages",
        column: "package_type",
        renames: &[
            ("consultation", "resolution"),
            ("shoutout", "greeting"),
            ("tier", "membership"),
        ],
    },
];

/// Rows a single backfill `UPDATE` touched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackfillOutcome {
    pub table: &'static str,
    pub old: &'static str,
    pub new: &'static str,
    pub rows_affected: u64,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for renamed in &RENAMED_ENUMS {
            for (old, new) in renamed.renames {
                rename_value(manager, renamed.type_name, old, new).await?;
            }
        }

        let type_names: Vec<&str> = RENAMED_ENUMS.iter().map(|r| r.type_name).collect();
        for label in enum_labels(manager.get_connection(), &type_names).await? {
            info!(type_name = %label.type_name, label = %label.label, "enum label");
        }

        backfill(manager.get_connection()).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for renamed in &RENAMED_ENUMS {
            for (old, new) in renamed.renames {
                rename_value(manager, renamed.type_name, new, old).await?;
            }
        }

        Ok(())
    }
}

/// Point rows still holding an old label at the new one.
///
/// Renaming a label already relabels every row that used it, so right after
/// the renames every outcome is normally zero. The column is compared as text
/// because the old label is no longer a valid value of the type.
pub async fn backfill<C: ConnectionTrait>(db: &C) -> Result<Vec<BackfillOutcome>, DbErr> {
    let mut outcomes = Vec::new();

    for renamed in &RENAMED_ENUMS {
        for &(old, new) in renamed.renames {
            let stmt = backfill_statement(renamed, old, new);
            let result = db.execute(db.get_database_backend().build(&stmt)).await?;

            let rows_affected = result.rows_affected();
            match rows_affected {
                0 => info!(table = renamed.table, old, new, "backfill matched no rows"),
                rows => warn!(table = renamed.table, old, new, rows, "backfill updated rows"),
            }

            outcomes.push(BackfillOutcome {
                table: renamed.table,
                old,
                new,
                rows_affected,
            });
        }
    }

    Ok(outcomes)
}

async fn rename_value(
    manager: &SchemaManager<'_>,
    type_name: &str,
    from: &str,
    to: &str,
) -> Result<(), DbErr> {
    manager
        .alter_type(
            TypeAlterStatement::new()
                .name(Alias::new(type_name))
                .rename_value(Alias::new(from), Alias::new(to)),
        )
        .await
}

fn backfill_statement(renamed: &RenamedEnum, old: &str, new: &str) -> UpdateStatement {
    Query::update()
        .table(Alias::new(renamed.table))
        .value(
            Alias::new(renamed.column),
            Expr::val(new).as_enum(Alias::new(renamed.type_name)),
        )
        .and_where(
            Expr::expr(Expr::col(Alias::new(renamed.column)).cast_as(Alias::new("text"))).eq(old),
        )
        .to_owned()
}
