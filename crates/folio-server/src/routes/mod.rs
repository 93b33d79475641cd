pub mod about;
pub mod analytics;
pub mod contact;
pub mod experience;
pub mod health;
pub mod projects;
pub mod site_stats;
pub mod skills;
pub mod track;
