//! CRUD query layer for the portfolio content entities.
//!
//! Conventions, uniform across entities:
//! - `list_*` returns all rows in the entity's fixed sort order;
//! - `create_*` inserts and returns the new sequence id (`RETURNING id`);
//! - `update_*` replaces every mutable field, bumps `updated_at`, and
//!   reports whether a row matched;
//! - `delete_*` reports whether a row matched.
//!
//! Timestamps are read back as VARCHAR casts; wire booleans are stored
//! through [`crate::codec`].

use anyhow::Result;

use folio_core::content::{
    AboutSection, AboutSectionInput, CategoryCount, ContactMessage, ContactMessageInput,
    Experience, ExperienceInput, Project, ProjectCounts, ProjectInput, SiteStat, SiteStatInput,
    Skill, SkillInput,
};

use crate::codec::flag_from_bool;
use crate::DuckDbBackend;

// ---------------------------------------------------------------------------
// Skills
// ---------------------------------------------------------------------------

impl DuckDbBackend {
    pub async fn list_skills(&self) -> Result<Vec<Skill>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT id, name, category, proficiency, icon, description, \
                    CAST(created_at AS VARCHAR), CAST(updated_at AS VARCHAR) \
             FROM skills ORDER BY category, proficiency DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Skill {
                id: row.get(0)?,
                name: row.get(1)?,
                category: row.get(2)?,
                proficiency: row.get(3)?,
                icon: row.get(4)?,
                description: row.get(5)?,
                created_at: row.get(6)?,
                updated_at: row.get(7)?,
            })
        })?;

        let mut skills = Vec::new();
        for row in rows {
            skills.push(row?);
        }
        Ok(skills)
    }

    pub async fn create_skill(&self, input: &SkillInput) -> Result<i64> {
        let conn = self.conn.lock().await;
        let id: i64 = conn
            .prepare(
                "INSERT INTO skills (name, category, proficiency, icon, description) \
                 VALUES (?1, ?2, ?3, ?4, ?5) RETURNING id",
            )?
            .query_row(
                duckdb::params![
                    input.name,
                    input.category,
                    input.proficiency.unwrap_or(3),
                    input.icon,
                    input.description,
                ],
                |row| row.get(0),
            )?;
        Ok(id)
    }

    pub async fn update_skill(&self, id: i64, input: &SkillInput) -> Result<bool> {
        let conn = self.conn.lock().await;
        let changed = conn.execute(
            "UPDATE skills \
             SET name = ?1, category = ?2, proficiency = ?3, icon = ?4, description = ?5, \
                 updated_at = CURRENT_TIMESTAMP \
             WHERE id = ?6",
            duckdb::params![
                input.name,
                input.category,
                input.proficiency.unwrap_or(3),
                input.icon,
                input.description,
                id,
            ],
        )?;
        Ok(changed > 0)
    }

    pub async fn delete_skill(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().await;
        let changed = conn.execute("DELETE FROM skills WHERE id = ?1", duckdb::params![id])?;
        Ok(changed > 0)
    }
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

const PROJECT_COLUMNS: &str = "id, title, description, long_description, image_url, \
     image_public_id, live_url, github_url, technologies, technical_skills, category, \
     featured, CAST(created_at AS VARCHAR), CAST(updated_at AS VARCHAR)";

fn project_from_row(row: &duckdb::Row<'_>) -> duckdb::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        long_description: row.get(3)?,
        image_url: row.get(4)?,
        image_public_id: row.get(5)?,
        live_url: row.get(6)?,
        github_url: row.get(7)?,
        technologies: row.get(8)?,
        technical_skills: row.get(9)?,
        category: row.get(10)?,
        featured: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}

impl DuckDbBackend {
    /// Featured projects first, newest first within each group.
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let conn = self.conn.lock().await;
        let sql = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY featured DESC, created_at DESC"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| project_from_row(row))?;

        let mut projects = Vec::new();
        for row in rows {
            projects.push(row?);
        }
        Ok(projects)
    }

    pub async fn create_project(&self, input: &ProjectInput) -> Result<i64> {
        let conn = self.conn.lock().await;
        let id: i64 = conn
            .prepare(
                "INSERT INTO projects \
                     (title, description, long_description, image_url, image_public_id, \
                      live_url, github_url, technologies, technical_skills, category, featured) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11) RETURNING id",
            )?
            .query_row(
                duckdb::params![
                    input.title,
                    input.description,
                    input.long_description.clone().unwrap_or_default(),
                    input.image_url.clone().unwrap_or_default(),
                    input.image_public_id.clone().unwrap_or_default(),
                    input.live_url.clone().unwrap_or_default(),
                    input.github_url.clone().unwrap_or_default(),
                    input.technologies.clone().unwrap_or_default(),
                    input.technical_skills.clone().unwrap_or_default(),
                    input.category,
                    flag_from_bool(input.featured),
                ],
                |row| row.get(0),
            )?;
        Ok(id)
    }

    pub async fn update_project(&self, id: i64, input: &ProjectInput) -> Result<bool> {
        let conn = self.conn.lock().await;
        let changed = conn.execute(
            "UPDATE projects \
             SET title = ?1, description = ?2, long_description = ?3, image_url = ?4, \
                 image_public_id = ?5, live_url = ?6, github_url = ?7, technologies = ?8, \
                 technical_skills = ?9, category = ?10, featured = ?11, \
                 updated_at = CURRENT_TIMESTAMP \
             WHERE id = ?12",
            duckdb::params![
                input.title,
                input.description,
                input.long_description.clone().unwrap_or_default(),
                input.image_url.clone().unwrap_or_default(),
                input.image_public_id.clone().unwrap_or_default(),
                input.live_url.clone().unwrap_or_default(),
                input.github_url.clone().unwrap_or_default(),
                input.technologies.clone().unwrap_or_default(),
                input.technical_skills.clone().unwrap_or_default(),
                input.category,
                flag_from_bool(input.featured),
                id,
            ],
        )?;
        Ok(changed > 0)
    }

    pub async fn delete_project(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().await;
        let changed = conn.execute("DELETE FROM projects WHERE id = ?1", duckdb::params![id])?;
        Ok(changed > 0)
    }

    /// Totals for the public project counter.
    pub async fn project_counts(&self) -> Result<ProjectCounts> {
        let conn = self.conn.lock().await;

        let total: i64 = conn
            .prepare("SELECT COUNT(*) FROM projects")?
            .query_row([], |row| row.get(0))?;
        let featured: i64 = conn
            .prepare("SELECT COUNT(*) FROM projects WHERE featured = 1")?
            .query_row([], |row| row.get(0))?;

        let mut stmt = conn.prepare(
            "SELECT category, COUNT(*) AS count \
             FROM projects GROUP BY category ORDER BY count DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(CategoryCount {
                category: row.get(0)?,
                count: row.get(1)?,
            })
        })?;

        let mut categories = Vec::new();
        for row in rows {
            categories.push(row?);
        }

        Ok(ProjectCounts {
            total,
            featured,
            categories,
        })
    }
}

// ---------------------------------------------------------------------------
// Experience
// ---------------------------------------------------------------------------

impl DuckDbBackend {
    /// Most recent role first ('YYYY-MM' sorts chronologically as text).
    pub async fn list_experience(&self) -> Result<Vec<Experience>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT id, company, position, description, start_date, end_date, current, \
                    technologies, achievements, \
                    CAST(created_at AS VARCHAR), CAST(updated_at AS VARCHAR) \
             FROM experience ORDER BY start_date DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Experience {
                id: row.get(0)?,
                company: row.get(1)?,
                position: row.get(2)?,
                description: row.get(3)?,
                start_date: row.get(4)?,
                end_date: row.get(5)?,
                current: row.get(6)?,
                technologies: row.get(7)?,
                achievements: row.get(8)?,
                created_at: row.get(9)?,
                updated_at: row.get(10)?,
            })
        })?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    pub async fn create_experience(&self, input: &ExperienceInput) -> Result<i64> {
        let conn = self.conn.lock().await;
        let id: i64 = conn
            .prepare(
                "INSERT INTO experience \
                     (company, position, description, start_date, end_date, current, \
                      technologies, achievements) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) RETURNING id",
            )?
            .query_row(
                duckdb::params![
                    input.company,
                    input.position,
                    input.description,
                    input.start_date,
                    input.end_date,
                    flag_from_bool(input.current),
                    input.technologies,
                    input.achievements,
                ],
                |row| row.get(0),
            )?;
        Ok(id)
    }

    pub async fn update_experience(&self, id: i64, input: &ExperienceInput) -> Result<bool> {
        let conn = self.conn.lock().await;
        let changed = conn.execute(
            "UPDATE experience \
             SET company = ?1, position = ?2, description = ?3, start_date = ?4, \
                 end_date = ?5, current = ?6, technologies = ?7, achievements = ?8, \
                 updated_at = CURRENT_TIMESTAMP \
             WHERE id = ?9",
            duckdb::params![
                input.company,
                input.position,
                input.description,
                input.start_date,
                input.end_date,
                flag_from_bool(input.current),
                input.technologies,
                input.achievements,
                id,
            ],
        )?;
        Ok(changed > 0)
    }

    pub async fn delete_experience(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().await;
        let changed = conn.execute("DELETE FROM experience WHERE id = ?1", duckdb::params![id])?;
        Ok(changed > 0)
    }
}

// ---------------------------------------------------------------------------
// About content
// ---------------------------------------------------------------------------

impl DuckDbBackend {
    pub async fn list_about_sections(&self) -> Result<Vec<AboutSection>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT id, section, title, content, \
                    CAST(created_at AS VARCHAR), CAST(updated_at AS VARCHAR) \
             FROM about_content ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(AboutSection {
                id: row.get(0)?,
                section: row.get(1)?,
                title: row.get(2)?,
                content: row.get(3)?,
                created_at: row.get(4)?,
                updated_at: row.get(5)?,
            })
        })?;

        let mut sections = Vec::new();
        for row in rows {
            sections.push(row?);
        }
        Ok(sections)
    }

    /// Update-if-present, insert-if-absent, keyed by the unique `section`
    /// name.
    pub async fn upsert_about_section(&self, input: &AboutSectionInput) -> Result<()> {
        let conn = self.conn.lock().await;
        let existing: i64 = conn
            .prepare("SELECT COUNT(*) FROM about_content WHERE section = ?1")?
            .query_row(duckdb::params![input.section], |row| row.get(0))?;

        if existing > 0 {
            conn.execute(
                "UPDATE about_content \
                 SET title = ?1, content = ?2, updated_at = CURRENT_TIMESTAMP \
                 WHERE section = ?3",
                duckdb::params![input.title, input.content, input.section],
            )?;
        } else {
            conn.execute(
                "INSERT INTO about_content (section, title, content) VALUES (?1, ?2, ?3)",
                duckdb::params![input.section, input.title, input.content],
            )?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Site stats
// ---------------------------------------------------------------------------

impl DuckDbBackend {
    pub async fn list_site_stats(&self) -> Result<Vec<SiteStat>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT id, key, value, label, color, display_order, \
                    CAST(created_at AS VARCHAR), CAST(updated_at AS VARCHAR) \
             FROM stats ORDER BY display_order ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(SiteStat {
                id: row.get(0)?,
                key: row.get(1)?,
                value: row.get(2)?,
                label: row.get(3)?,
                color: row.get(4)?,
                display_order: row.get(5)?,
                created_at: row.get(6)?,
                updated_at: row.get(7)?,
            })
        })?;

        let mut stats = Vec::new();
        for row in rows {
            stats.push(row?);
        }
        Ok(stats)
    }

    pub async fn create_site_stat(&self, input: &SiteStatInput) -> Result<i64> {
        let conn = self.conn.lock().await;
        let id: i64 = conn
            .prepare(
                "INSERT INTO stats (key, value, label, color, display_order) \
                 VALUES (?1, ?2, ?3, ?4, ?5) RETURNING id",
            )?
            .query_row(
                duckdb::params![
                    input.key,
                    input.value,
                    input.label,
                    input.color.clone().unwrap_or_else(|| "blue".to_string()),
                    input.display_order.unwrap_or(0),
                ],
                |row| row.get(0),
            )?;
        Ok(id)
    }

    pub async fn update_site_stat(&self, id: i64, input: &SiteStatInput) -> Result<bool> {
        let conn = self.conn.lock().await;
        let changed = conn.execute(
            "UPDATE stats \
             SET key = ?1, value = ?2, label = ?3, color = ?4, display_order = ?5, \
                 updated_at = CURRENT_TIMESTAMP \
             WHERE id = ?6",
            duckdb::params![
                input.key,
                input.value,
                input.label,
                input.color.clone().unwrap_or_else(|| "blue".to_string()),
                input.display_order.unwrap_or(0),
                id,
            ],
        )?;
        Ok(changed > 0)
    }

    pub async fn delete_site_stat(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().await;
        let changed = conn.execute("DELETE FROM stats WHERE id = ?1", duckdb::params![id])?;
        Ok(changed > 0)
    }
}

// ---------------------------------------------------------------------------
// Contact messages
// ---------------------------------------------------------------------------

impl DuckDbBackend {
    /// Newest message first.
    pub async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT id, name, email, subject, message, read, \
                    CAST(created_at AS VARCHAR), CAST(updated_at AS VARCHAR) \
             FROM contact_messages ORDER BY created_at DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(ContactMessage {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                subject: row.get(3)?,
                message: row.get(4)?,
                read: row.get(5)?,
                created_at: row.get(6)?,
                updated_at: row.get(7)?,
            })
        })?;

        let mut messages = Vec::new();
        for row in rows {
            messages.push(row?);
        }
        Ok(messages)
    }

    pub async fn create_contact_message(&self, input: &ContactMessageInput) -> Result<i64> {
        let conn = self.conn.lock().await;
        let id: i64 = conn
            .prepare(
                "INSERT INTO contact_messages (name, email, subject, message) \
                 VALUES (?1, ?2, ?3, ?4) RETURNING id",
            )?
            .query_row(
                duckdb::params![input.name, input.email, input.subject, input.message],
                |row| row.get(0),
            )?;
        Ok(id)
    }

    /// The read flag is the message's only mutable field.
    pub async fn set_contact_message_read(&self, id: i64, read: bool) -> Result<bool> {
        let conn = self.conn.lock().await;
        let changed = conn.execute(
            "UPDATE contact_messages \
             SET read = ?1, updated_at = CURRENT_TIMESTAMP \
             WHERE id = ?2",
            duckdb::params![flag_from_bool(read), id],
        )?;
        Ok(changed > 0)
    }

    pub async fn delete_contact_message(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().await;
        let changed = conn.execute(
            "DELETE FROM contact_messages WHERE id = ?1",
            duckdb::params![id],
        )?;
        Ok(changed > 0)
    }
}
