use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::schema::SCHEMA;
use super::{SiteReader, Store};
use crate::error::{Error, Result};
use crate::types::*;

const SITE_COLUMNS: &str = "id, subdomain, display_name, template_id, status, owner_id, plan, niche,
     published_content, draft_content,
     legacy_business_name, legacy_tagline, legacy_about,
     legacy_services, legacy_color, legacy_logo_url,
     created_at, updated_at";

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens a private in-memory database, mainly for tests.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Mutex::new(Connection::open_in_memory()?),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Handle SQLite's default datetime format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            tracing::error!("Invalid datetime in database: '{}' - {}", s, e);
            Utc::now()
        })
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn parse_status(s: &str) -> LifecycleStatus {
    LifecycleStatus::parse(s).unwrap_or_else(|| {
        tracing::warn!("Unknown site status in database: '{}', treating as pending", s);
        LifecycleStatus::Pending
    })
}

fn to_json_column<T: Serialize>(value: Option<&T>) -> Result<Option<String>> {
    value
        .map(serde_json::to_string)
        .transpose()
        .map_err(Error::from)
}

/// Reads a JSON column. A value that no longer decodes is logged and read as
/// absent so the rest of the row stays usable.
fn json_column<T: DeserializeOwned>(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<T>> {
    let Some(raw) = row.get::<_, Option<String>>(idx)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            let name = row.as_ref().column_name(idx).unwrap_or("?");
            tracing::warn!("Unreadable {name} in database, ignoring: {e}");
            Ok(None)
        }
    }
}

fn row_to_tenant(row: &Row<'_>) -> rusqlite::Result<Tenant> {
    Ok(Tenant {
        id: row.get(0)?,
        identifier: row.get(1)?,
        display_name: row.get(2)?,
        template_id: row.get(3)?,
        status: parse_status(&row.get::<_, String>(4)?),
        owner_id: row.get(5)?,
        plan: row.get(6)?,
        niche: row.get(7)?,
        published_content: json_column(row, 8)?,
        draft_content: json_column(row, 9)?,
        legacy: LegacyFields {
            business_name: row.get(10)?,
            tagline: row.get(11)?,
            about: row.get(12)?,
            services: json_column(row, 13)?,
            color: row.get(14)?,
            logo_url: row.get(15)?,
        },
        created_at: parse_datetime(&row.get::<_, String>(16)?),
        updated_at: parse_datetime(&row.get::<_, String>(17)?),
    })
}

fn row_to_token(row: &Row<'_>) -> rusqlite::Result<Token> {
    Ok(Token {
        id: row.get(0)?,
        token_hash: row.get(1)?,
        token_lookup: row.get(2)?,
        is_admin: row.get(3)?,
        created_at: parse_datetime(&row.get::<_, String>(4)?),
        expires_at: row.get::<_, Option<String>>(5)?.map(|s| parse_datetime(&s)),
        last_used_at: row.get::<_, Option<String>>(6)?.map(|s| parse_datetime(&s)),
    })
}

impl SiteReader for SqliteStore {
    fn find_site_by_subdomain(&self, subdomain: &str) -> Result<Option<Tenant>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {SITE_COLUMNS} FROM sites WHERE subdomain = ?1"),
            params![subdomain],
            row_to_tenant,
        )
        .optional()
        .map_err(Error::from)
    }
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    // Site operations

    fn create_site(&self, site: &Tenant) -> Result<()> {
        let published = to_json_column(site.published_content.as_ref())?;
        let draft = to_json_column(site.draft_content.as_ref())?;
        let legacy_services = to_json_column(site.legacy.services.as_ref())?;

        let result = self.conn().execute(
            &format!(
                "INSERT INTO sites ({SITE_COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9,
                         ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)"
            ),
            params![
                site.id,
                site.identifier,
                site.display_name,
                site.template_id,
                site.status.as_str(),
                site.owner_id,
                site.plan,
                site.niche,
                published,
                draft,
                site.legacy.business_name,
                site.legacy.tagline,
                site.legacy.about,
                legacy_services,
                site.legacy.color,
                site.legacy.logo_url,
                format_datetime(&site.created_at),
                format_datetime(&site.updated_at),
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(Error::AlreadyExists)
            }
            Err(e) => Err(Error::from(e)),
        }
    }

    fn get_site(&self, id: &str) -> Result<Option<Tenant>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {SITE_COLUMNS} FROM sites WHERE id = ?1"),
            params![id],
            row_to_tenant,
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_sites(&self, cursor: &str, limit: i32) -> Result<Vec<Tenant>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {SITE_COLUMNS} FROM sites WHERE subdomain > ?1 ORDER BY subdomain LIMIT ?2"
        ))?;

        let rows = stmt.query_map(params![cursor, limit], row_to_tenant)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn update_site_status(&self, id: &str, status: LifecycleStatus) -> Result<()> {
        let rows = self.conn().execute(
            "UPDATE sites SET status = ?1, updated_at = ?2 WHERE id = ?3",
            params![status.as_str(), format_datetime(&Utc::now()), id],
        )?;

        if rows == 0 {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    fn update_site_draft(&self, id: &str, draft: &ContentPayload) -> Result<()> {
        let draft = serde_json::to_string(draft)?;
        let rows = self.conn().execute(
            "UPDATE sites SET draft_content = ?1, updated_at = ?2 WHERE id = ?3",
            params![draft, format_datetime(&Utc::now()), id],
        )?;

        if rows == 0 {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    fn publish_site_draft(&self, id: &str) -> Result<ContentPayload> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let draft: Option<String> = tx
            .query_row(
                "SELECT draft_content FROM sites WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?
            .ok_or(Error::NotFound)?;

        let draft =
            draft.ok_or_else(|| Error::BadRequest("Site has no draft content".to_string()))?;
        let payload: ContentPayload = serde_json::from_str(&draft)?;

        tx.execute(
            "UPDATE sites SET published_content = ?1, updated_at = ?2 WHERE id = ?3",
            params![draft, format_datetime(&Utc::now()), id],
        )?;

        tx.commit()?;
        Ok(payload)
    }

    fn delete_site(&self, id: &str) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM sites WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    // Token operations

    fn create_token(&self, token: &Token) -> Result<()> {
        let result = self.conn().execute(
            "INSERT INTO tokens (id, token_hash, token_lookup, is_admin, created_at, expires_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                token.id,
                token.token_hash,
                token.token_lookup,
                token.is_admin,
                format_datetime(&token.created_at),
                token.expires_at.as_ref().map(format_datetime),
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(Error::TokenLookupCollision)
            }
            Err(e) => Err(Error::from(e)),
        }
    }

    fn get_token_by_lookup(&self, lookup: &str) -> Result<Option<Token>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, token_hash, token_lookup, is_admin, created_at, expires_at, last_used_at
             FROM tokens WHERE token_lookup = ?1",
            params![lookup],
            row_to_token,
        )
        .optional()
        .map_err(Error::from)
    }

    fn update_token_last_used(&self, id: &str) -> Result<()> {
        self.conn().execute(
            "UPDATE tokens SET last_used_at = ?1 WHERE id = ?2",
            params![format_datetime(&Utc::now()), id],
        )?;
        Ok(())
    }

    fn has_admin_token(&self) -> Result<bool> {
        let conn = self.conn();
        let count: i32 = conn.query_row(
            "SELECT COUNT(*) FROM tokens WHERE is_admin = 1",
            [],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn close(&self) -> Result<()> {
        self.conn()
            .query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_| Ok(()))?;
        Ok(())
    }
}
