/// DuckDB initialization SQL.
///
/// Executed once at database open time via `Connection::execute_batch`.
/// All statements use `IF NOT EXISTS` so they are safe to re-run on every
/// startup (idempotent). Later, versioned schema changes go through the
/// ordered list in [`crate::migrations`]; never ad-hoc ALTERs here.
///
/// `memory_limit` is passed at runtime from `Config.duckdb_memory_limit`
/// (env `FOLIO_DUCKDB_MEMORY`, default `"512MB"`). A portfolio site's
/// analytics volume is tiny; the limit mostly caps DuckDB's default
/// grab of 80% of system RAM.
///
/// Integer ids come from per-table sequences; DuckDB has no AUTOINCREMENT.
pub fn init_sql(memory_limit: &str) -> String {
    format!(
        r#"SET memory_limit = '{memory_limit}';
SET threads = 2;

-- ===========================================
-- SKILLS
-- ===========================================
CREATE SEQUENCE IF NOT EXISTS skills_id_seq;
CREATE TABLE IF NOT EXISTS skills (
    id              BIGINT PRIMARY KEY DEFAULT nextval('skills_id_seq'),
    name            VARCHAR NOT NULL,
    category        VARCHAR NOT NULL,
    proficiency     INTEGER NOT NULL DEFAULT 3,    -- 1..5 self-assessed level
    icon            VARCHAR,
    description     VARCHAR,
    created_at      TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at      TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);

-- ===========================================
-- PROJECTS
-- ===========================================
-- image_public_id and technical_skills arrived later; they are added by
-- migration m002_project_media_columns, not declared here.
CREATE SEQUENCE IF NOT EXISTS projects_id_seq;
CREATE TABLE IF NOT EXISTS projects (
    id              BIGINT PRIMARY KEY DEFAULT nextval('projects_id_seq'),
    title           VARCHAR NOT NULL,
    description     VARCHAR NOT NULL,
    long_description VARCHAR NOT NULL DEFAULT '',
    image_url       VARCHAR NOT NULL DEFAULT '',
    live_url        VARCHAR NOT NULL DEFAULT '',
    github_url      VARCHAR NOT NULL DEFAULT '',
    technologies    VARCHAR NOT NULL DEFAULT '',
    category        VARCHAR NOT NULL,
    featured        INTEGER NOT NULL DEFAULT 0,    -- stored flag 0/1
    created_at      TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at      TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);

-- ===========================================
-- WORK EXPERIENCE
-- ===========================================
CREATE SEQUENCE IF NOT EXISTS experience_id_seq;
CREATE TABLE IF NOT EXISTS experience (
    id              BIGINT PRIMARY KEY DEFAULT nextval('experience_id_seq'),
    company         VARCHAR NOT NULL,
    position        VARCHAR NOT NULL,
    description     VARCHAR NOT NULL,
    start_date      VARCHAR NOT NULL,              -- 'YYYY-MM'
    end_date        VARCHAR,                       -- NULL while current
    current         INTEGER NOT NULL DEFAULT 0,    -- stored flag 0/1
    technologies    VARCHAR,
    achievements    VARCHAR,
    created_at      TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at      TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);

-- ===========================================
-- CONTACT MESSAGES
-- ===========================================
CREATE SEQUENCE IF NOT EXISTS contact_messages_id_seq;
CREATE TABLE IF NOT EXISTS contact_messages (
    id              BIGINT PRIMARY KEY DEFAULT nextval('contact_messages_id_seq'),
    name            VARCHAR NOT NULL,
    email           VARCHAR NOT NULL,
    subject         VARCHAR NOT NULL,
    message         VARCHAR NOT NULL,
    read            INTEGER NOT NULL DEFAULT 0,    -- stored flag 0/1
    created_at      TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at      TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);

-- ===========================================
-- ABOUT CONTENT (one row per named section)
-- ===========================================
CREATE SEQUENCE IF NOT EXISTS about_content_id_seq;
CREATE TABLE IF NOT EXISTS about_content (
    id              BIGINT PRIMARY KEY DEFAULT nextval('about_content_id_seq'),
    section         VARCHAR NOT NULL UNIQUE,
    title           VARCHAR,
    content         VARCHAR NOT NULL,
    created_at      TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at      TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);

-- ===========================================
-- PAGE VIEWS (append-only event rows)
-- ===========================================
CREATE SEQUENCE IF NOT EXISTS page_views_id_seq;
CREATE TABLE IF NOT EXISTS page_views (
    id              BIGINT PRIMARY KEY DEFAULT nextval('page_views_id_seq'),
    page_path       VARCHAR NOT NULL,
    visitor_id      VARCHAR NOT NULL,
    session_id      VARCHAR NOT NULL,
    user_agent      VARCHAR,
    referrer        VARCHAR,
    ip_address      VARCHAR,
    created_at      TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);

-- Primary query pattern: date-windowed counts
CREATE INDEX IF NOT EXISTS idx_page_views_created
    ON page_views(created_at DESC);
-- Top-pages rollup
CREATE INDEX IF NOT EXISTS idx_page_views_path
    ON page_views(page_path);
-- Per-visitor history
CREATE INDEX IF NOT EXISTS idx_page_views_visitor
    ON page_views(visitor_id, created_at);

-- ===========================================
-- VISITORS (one row per durable client identity)
-- ===========================================
CREATE TABLE IF NOT EXISTS visitors (
    visitor_id      VARCHAR PRIMARY KEY,           -- client-generated opaque token
    first_visit     TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    last_visit      TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    total_visits    BIGINT NOT NULL DEFAULT 1,
    total_page_views BIGINT NOT NULL DEFAULT 1,
    country         VARCHAR,
    city            VARCHAR,
    device_type     VARCHAR,                       -- 'desktop' | 'mobile' | 'tablet'
    browser         VARCHAR,
    os              VARCHAR
);

-- Recent-visitors listing and windowed activity counts
CREATE INDEX IF NOT EXISTS idx_visitors_last_visit
    ON visitors(last_visit DESC);

-- ===========================================
-- ENGAGEMENT METRICS (append-only event rows)
-- ===========================================
CREATE SEQUENCE IF NOT EXISTS engagement_metrics_id_seq;
CREATE TABLE IF NOT EXISTS engagement_metrics (
    id              BIGINT PRIMARY KEY DEFAULT nextval('engagement_metrics_id_seq'),
    visitor_id      VARCHAR NOT NULL,
    session_id      VARCHAR NOT NULL,
    page_path       VARCHAR NOT NULL,
    time_on_page    BIGINT NOT NULL DEFAULT 0,     -- whole seconds
    scroll_depth    DOUBLE NOT NULL DEFAULT 0,     -- 0..1 fraction
    interactions    BIGINT NOT NULL DEFAULT 0,
    exit_page       INTEGER NOT NULL DEFAULT 0,    -- stored flag 0/1
    created_at      TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_engagement_visitor
    ON engagement_metrics(visitor_id, created_at);
"#
    )
}

/// Migrations tracking table SQL.
///
/// Run before the schema init so [`crate::migrations::run_migrations`] can
/// record which numbered steps have been applied; restarts skip them.
pub const MIGRATIONS_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS _migrations (
    id          VARCHAR PRIMARY KEY,
    applied_at  TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);
"#;
