//! Analytics write path: append-only event rows plus the visitor upsert.

use anyhow::Result;

use folio_core::event::{EngagementData, PageViewRecord};

use crate::codec::flag_from_bool;
use crate::DuckDbBackend;

impl DuckDbBackend {
    /// Record one page view.
    ///
    /// The event append and the visitor upsert run in one transaction so a
    /// page view never lands without its counter bump. The upsert is a
    /// single atomic `ON CONFLICT` statement; never a read followed by a
    /// write, so two simultaneous submissions for the same visitor cannot
    /// lose an increment.
    ///
    /// Upsert contract: `first_visit` is written once and never touched
    /// again; `last_visit` only moves forward (`GREATEST`); both counters
    /// advance by exactly 1; enrichment fields keep their previous value
    /// when the new request carries none.
    pub async fn record_page_view(&self, record: &PageViewRecord) -> Result<()> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO page_views (page_path, visitor_id, session_id, user_agent, referrer, ip_address) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            duckdb::params![
                record.page_path,
                record.visitor_id,
                record.session_id,
                record.user_agent,
                record.referrer,
                record.ip_address,
            ],
        )?;

        tx.execute(
            "INSERT INTO visitors \
                 (visitor_id, first_visit, last_visit, total_visits, total_page_views, \
                  country, city, device_type, browser, os) \
             VALUES (?1, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP, 1, 1, ?2, ?3, ?4, ?5, ?6) \
             ON CONFLICT (visitor_id) DO UPDATE SET \
                 last_visit = GREATEST(visitors.last_visit, EXCLUDED.last_visit), \
                 total_visits = visitors.total_visits + 1, \
                 total_page_views = visitors.total_page_views + 1, \
                 country = COALESCE(EXCLUDED.country, visitors.country), \
                 city = COALESCE(EXCLUDED.city, visitors.city), \
                 device_type = COALESCE(EXCLUDED.device_type, visitors.device_type), \
                 browser = COALESCE(EXCLUDED.browser, visitors.browser), \
                 os = COALESCE(EXCLUDED.os, visitors.os)",
            duckdb::params![
                record.visitor_id,
                record.profile.country,
                record.profile.city,
                record.profile.device_type,
                record.profile.browser,
                record.profile.os,
            ],
        )?;

        tx.commit()?;
        Ok(())
    }

    /// Append one engagement flush verbatim. No visitor-side effects.
    pub async fn record_engagement(&self, data: &EngagementData) -> Result<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO engagement_metrics \
                 (visitor_id, session_id, page_path, time_on_page, scroll_depth, interactions, exit_page) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            duckdb::params![
                data.visitor_id,
                data.session_id,
                data.page_path,
                i64::from(data.time_on_page),
                data.scroll_depth,
                i64::from(data.interactions),
                flag_from_bool(data.exit_page),
            ],
        )?;
        Ok(())
    }
}
