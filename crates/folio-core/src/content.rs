//! Content entity rows and per-endpoint request types.
//!
//! Row structs mirror the stored columns exactly; stored booleans surface as
//! the INTEGER 0/1 flags they are persisted as (the boolean ↔ flag
//! conversion lives in the store's codec, not here). Request types take real
//! booleans on the wire.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct Skill {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub proficiency: i64,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillInput {
    pub name: String,
    pub category: String,
    pub proficiency: Option<i64>,
    pub icon: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub long_description: String,
    pub image_url: String,
    /// Media-service asset handle; NULL on rows created before the column
    /// migration.
    pub image_public_id: Option<String>,
    pub live_url: String,
    pub github_url: String,
    pub technologies: String,
    pub technical_skills: Option<String>,
    pub category: String,
    /// Stored flag: 1 = featured, 0 = not.
    pub featured: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectInput {
    pub title: String,
    pub description: String,
    pub long_description: Option<String>,
    pub image_url: Option<String>,
    pub image_public_id: Option<String>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub technologies: Option<String>,
    pub technical_skills: Option<String>,
    pub category: String,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

/// Public project counter: totals plus a per-category breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectCounts {
    pub total: i64,
    pub featured: i64,
    pub categories: Vec<CategoryCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Experience {
    pub id: i64,
    pub company: String,
    pub position: String,
    pub description: String,
    /// `YYYY-MM` strings; ordering relies on the lexicographic = chronological
    /// property of the format.
    pub start_date: String,
    pub end_date: Option<String>,
    /// Stored flag: 1 = current position.
    pub current: i64,
    pub technologies: Option<String>,
    pub achievements: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExperienceInput {
    pub company: String,
    pub position: String,
    pub description: String,
    pub start_date: String,
    pub end_date: Option<String>,
    #[serde(default)]
    pub current: bool,
    pub technologies: Option<String>,
    pub achievements: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AboutSection {
    pub id: i64,
    pub section: String,
    pub title: Option<String>,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AboutSectionInput {
    pub section: String,
    pub title: Option<String>,
    pub content: String,
}

/// A headline figure on the public site (e.g. "6+ projects shipped").
#[derive(Debug, Clone, Serialize)]
pub struct SiteStat {
    pub id: i64,
    pub key: String,
    pub value: String,
    pub label: String,
    pub color: String,
    pub display_order: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteStatInput {
    pub key: String,
    pub value: String,
    pub label: String,
    pub color: Option<String>,
    pub display_order: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// Stored flag: 1 = read by the admin.
    pub read: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactMessageInput {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// PUT /api/contact/{id} body; the read flag is the only mutable field.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReadFlagUpdate {
    pub read: bool,
}
