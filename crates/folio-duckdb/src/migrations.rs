//! Ordered schema migrations.
//!
//! Each step is applied at most once (tracked in `_migrations`) and is also
//! individually idempotent-checked against `information_schema`, so a step
//! interrupted between "apply" and "record" recovers cleanly on the next
//! boot.

use anyhow::Result;
use duckdb::Connection;
use tracing::info;

pub struct Migration {
    pub id: &'static str,
    pub apply: fn(&Connection) -> Result<()>,
}

/// The full ordered migration list. Append only; never reorder or edit a
/// shipped step.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        id: "m001_stats_table",
        apply: m001_stats_table,
    },
    Migration {
        id: "m002_project_media_columns",
        apply: m002_project_media_columns,
    },
];

/// Apply all unapplied migrations, in order, recording each in `_migrations`.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    for migration in MIGRATIONS {
        let applied: i64 = conn
            .prepare("SELECT COUNT(*) FROM _migrations WHERE id = ?1")?
            .query_row(duckdb::params![migration.id], |row| row.get(0))?;
        if applied > 0 {
            continue;
        }
        (migration.apply)(conn)?;
        conn.execute(
            "INSERT INTO _migrations (id) VALUES (?1)",
            duckdb::params![migration.id],
        )?;
        info!(migration = migration.id, "Applied schema migration");
    }
    Ok(())
}

/// Headline site figures (value/label pairs for the public hero section).
fn m001_stats_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
CREATE SEQUENCE IF NOT EXISTS stats_id_seq;
CREATE TABLE IF NOT EXISTS stats (
    id              BIGINT PRIMARY KEY DEFAULT nextval('stats_id_seq'),
    key             VARCHAR NOT NULL,
    value           VARCHAR NOT NULL,
    label           VARCHAR NOT NULL,
    color           VARCHAR NOT NULL DEFAULT 'blue',
    display_order   INTEGER NOT NULL DEFAULT 0,
    created_at      TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at      TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);
CREATE INDEX IF NOT EXISTS idx_stats_display_order ON stats(display_order);
"#,
    )?;
    Ok(())
}

/// Media-service asset handle and the skills-tag column on projects.
fn m002_project_media_columns(conn: &Connection) -> Result<()> {
    if !column_exists(conn, "projects", "image_public_id")? {
        conn.execute_batch("ALTER TABLE projects ADD COLUMN image_public_id VARCHAR;")?;
    }
    if !column_exists(conn, "projects", "technical_skills")? {
        conn.execute_batch("ALTER TABLE projects ADD COLUMN technical_skills VARCHAR;")?;
    }
    Ok(())
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let count: i64 = conn
        .prepare(
            "SELECT COUNT(*) FROM information_schema.columns \
             WHERE table_name = ?1 AND column_name = ?2",
        )?
        .query_row(duckdb::params![table, column], |row| row.get(0))?;
    Ok(count > 0)
}
