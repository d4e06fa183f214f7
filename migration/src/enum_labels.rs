use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

/// One label of a Postgres enum type, as stored in `pg_enum`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumLabel {
    pub type_name: String,
    pub label: String,
}

/// Read every label of the given enum types, ordered by type name and then
/// by the labels' declared sort order.
pub async fn enum_labels<C: ConnectionTrait>(
    db: &C,
    type_names: &[&str],
) -> Result<Vec<EnumLabel>, DbErr> {
    if type_names.is_empty() {
        return Ok(Vec::new());
    }

    let rows = db
        .query_all(db.get_database_backend().build(&labels_query(type_names)))
        .await?;

    rows.iter()
        .map(|row| -> Result<EnumLabel, DbErr> {
            Ok(EnumLabel {
                type_name: row.try_get("", "type_name")?,
                label: row.try_get("", "label")?,
            })
        })
        .collect()
}

pub(crate) fn labels_query(type_names: &[&str]) -> SelectStatement {
    Query::select()
        .expr_as(
            Expr::col((PgType::Table, PgType::Typname)).cast_as(Alias::new("text")),
            Alias::new("type_name"),
        )
        .expr_as(
            Expr::col((PgEnum::Table, PgEnum::Enumlabel)).cast_as(Alias::new("text")),
            Alias::new("label"),
        )
        .from(PgType::Table)
        .inner_join(
            PgEnum::Table,
            Expr::col((PgEnum::Table, PgEnum::Enumtypid)).equals((PgType::Table, PgType::Oid)),
        )
        .and_where(Expr::col((PgType::Table, PgType::Typname)).is_in(type_names.iter().copied()))
        .order_by((PgType::Table, PgType::Typname), Order::Asc)
        .order_by((PgEnum::Table, PgEnum::Enumsortorder), Order::Asc)
        .to_owned()
}

#[derive(DeriveIden)]
enum PgType {
    Table,
    Oid,
    Typname,
}

#[derive(DeriveIden)]
enum PgEnum {
    Table,
    Enumtypid,
    Enumlabel,
    Enumsortorder,
}
