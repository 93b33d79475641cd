//! Read-side rollups for the analytics dashboard.
//!
//! Everything is recomputed from the raw event rows on every call; there is
//! no cached aggregate state, so results always reflect the latest committed
//! writes.

use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate, Utc};
use duckdb::Connection;

use folio_core::analytics::{
    AnalyticsSnapshot, EngagementAverages, RecentVisitor, TopPage, WindowCounts,
};

use crate::DuckDbBackend;

impl DuckDbBackend {
    /// Compute the full dashboard snapshot.
    ///
    /// Windowed visitor counts are keyed on `last_visit` (visitors *active*
    /// in the window, not first seen in it); observed behaviour, keep it.
    /// Engagement averages are global, unwindowed.
    pub async fn analytics_snapshot(&self) -> Result<AnalyticsSnapshot> {
        let conn = self.conn.lock().await;

        let today = Utc::now().date_naive();
        let week_start = today - Duration::days(7);
        let month_start = today.with_day(1).unwrap_or(today);

        let total = WindowCounts {
            page_views: count_scalar(&conn, "SELECT COUNT(*) FROM page_views", [])?,
            visitors: count_scalar(&conn, "SELECT COUNT(*) FROM visitors", [])?,
        };

        let snapshot = AnalyticsSnapshot {
            total,
            today: window_counts(&conn, today)?,
            week: window_counts(&conn, week_start)?,
            month: window_counts(&conn, month_start)?,
            engagement: engagement_averages(&conn)?,
            top_pages: top_pages(&conn)?,
            recent_visitors: recent_visitors(&conn)?,
        };

        Ok(snapshot)
    }
}

/// Page views by `created_at`, visitors by `last_visit`, both from the UTC
/// midnight of `start` onward. Boundary math is done in Rust and passed as a
/// date string; DuckDB casts it against the TIMESTAMP columns.
fn window_counts(conn: &Connection, start: NaiveDate) -> Result<WindowCounts> {
    let start_str = start.format("%Y-%m-%d").to_string();
    Ok(WindowCounts {
        page_views: count_scalar(
            conn,
            "SELECT COUNT(*) FROM page_views WHERE created_at >= ?1",
            duckdb::params![start_str],
        )?,
        visitors: count_scalar(
            conn,
            "SELECT COUNT(*) FROM visitors WHERE last_visit >= ?1",
            duckdb::params![start_str],
        )?,
    })
}

fn count_scalar<P: duckdb::Params>(conn: &Connection, sql: &str, params: P) -> Result<i64> {
    let mut stmt = conn.prepare(sql)?;
    let count: i64 = stmt.query_row(params, |row| row.get(0))?;
    Ok(count)
}

fn engagement_averages(conn: &Connection) -> Result<EngagementAverages> {
    let mut stmt = conn.prepare(
        "SELECT COALESCE(AVG(time_on_page), 0), \
                COALESCE(AVG(scroll_depth), 0), \
                COALESCE(AVG(interactions), 0) \
         FROM engagement_metrics",
    )?;
    let (time, scroll, interactions): (f64, f64, f64) =
        stmt.query_row([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?;

    Ok(EngagementAverages {
        avg_time_on_page: time.round() as i64,
        // Stored fraction scaled to a whole percentage.
        avg_scroll_depth: (scroll * 100.0).round() as i64,
        avg_interactions: interactions.round() as i64,
    })
}

fn top_pages(conn: &Connection) -> Result<Vec<TopPage>> {
    let mut stmt = conn.prepare(
        "SELECT page_path, COUNT(*) AS views \
         FROM page_views \
         GROUP BY page_path \
         ORDER BY views DESC \
         LIMIT 5",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(TopPage {
            page_path: row.get(0)?,
            views: row.get(1)?,
        })
    })?;

    let mut pages = Vec::new();
    for row in rows {
        pages.push(row?);
    }
    Ok(pages)
}

fn recent_visitors(conn: &Connection) -> Result<Vec<RecentVisitor>> {
    let mut stmt = conn.prepare(
        "SELECT visitor_id, CAST(last_visit AS VARCHAR), total_visits, total_page_views \
         FROM visitors \
         ORDER BY last_visit DESC \
         LIMIT 10",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(RecentVisitor {
            visitor_id: row.get(0)?,
            last_visit: row.get(1)?,
            total_visits: row.get(2)?,
            total_page_views: row.get(3)?,
        })
    })?;

    let mut visitors = Vec::new();
    for row in rows {
        visitors.push(row?);
    }
    Ok(visitors)
}
