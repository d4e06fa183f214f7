use crate::error::Result;
use sea_orm::prelude::Uuid;
use sea_orm::{ConnectionTrait, FromQueryResult, Statement};
use std::io::Write;

const AUDIT_QUERY: &str = "\
SELECT u.id, u.email, u.phone, u.full_name, u.role::text AS role, \
       cp.display_name, cp.slug, cp.niche, cp.vertical::text AS vertical, \
       cp.verification_status::text AS verification_status \
FROM users u \
LEFT JOIN creator_profiles cp ON cp.user_id = u.id \
ORDER BY u.created_at, u.id";

const RULE: &str = "--------------------------------------------------";

#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct AuditedUser {
    pub id: Uuid,
    pub email: String,
    pub phone: Option<String>,
    pub full_name: String,
    pub role: String,
    pub display_name: Option<String>,
    pub slug: Option<String>,
    pub niche: Option<String>,
    pub vertical: Option<String>,
    pub verification_status: Option<String>,
}

impl AuditedUser {
    pub fn is_creator(&self) -> bool {
        self.role.eq_ignore_ascii_case("creator")
    }

    fn has_profile(&self) -> bool {
        self.display_name.is_some() || self.slug.is_some()
    }
}

#[derive(Debug, Default)]
pub struct AuditReport {
    pub users: Vec<AuditedUser>,
}

impl AuditReport {
    pub fn creator_count(&self) -> usize {
        self.users.iter().filter(|u| u.is_creator()).count()
    }

    pub fn write_to(&self, out: &mut impl Write) -> std::io::Result<()> {
        writeln!(out, "Total users: {}", self.users.len())?;
        writeln!(out, "{RULE}")?;
        writeln!(out, "Total Creators: {}", self.creator_count())?;

        for user in &self.users {
            writeln!(out, "ID: {}", user.id)?;
            writeln!(out, "Email: {}", user.email)?;
            writeln!(out, "Phone: {}", display_opt(&user.phone))?;
            writeln!(out, "Full Name: {}", user.full_name)?;
            writeln!(out, "Role: {}", user.role)?;

            if user.has_profile() {
                writeln!(out, "  --- Creator Profile ---")?;
                writeln!(out, "  Display Name: {}", display_opt(&user.display_name))?;
                writeln!(out, "  Slug: {}", display_opt(&user.slug))?;
                writeln!(out, "  Niche: {}", display_opt(&user.niche))?;
                writeln!(out, "  Vertical: {}", display_opt(&user.vertical))?;
                writeln!(out, "  Status: {}", display_opt(&user.verification_status))?;
            }

            writeln!(out, "{RULE}")?;
        }

        Ok(())
    }
}

fn display_opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("None")
}

pub async fn audit_users<C: ConnectionTrait>(db: &C) -> Result<AuditReport> {
    let users = AuditedUser::find_by_statement(Statement::from_string(
        db.get_database_backend(),
        AUDIT_QUERY,
    ))
    .all(db)
    .await?;

    Ok(AuditReport { users })
}
