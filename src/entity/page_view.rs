//! Page-view entity model for Sea-ORM database interaction.

use sea_orm::entity::prelude::*;

/// One completed dwell interval on a tracked page.
///
/// A row is appended by the page-transition tracker each time a visitor
/// crosses a tracked boundary with complete bookkeeping in their session.
/// Rows are never read back or updated by this service.
///
/// # Database Schema
///
/// | Column       | Type                  | Description                          |
/// |--------------|-----------------------|--------------------------------------|
/// | id           | INTEGER (Primary Key) | Synthetic row id (SQLite rowid)      |
/// | session_id   | INTEGER               | Visitor id held in the session       |
/// | page         | TEXT                  | Label of the page being left         |
/// | time_spent   | REAL                  | Dwell time on that page, in seconds  |
/// | start_time   | TIMESTAMP             | When the visitor entered that page   |
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "PageView")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// The visitor id the session carried when the row was written.
    pub session_id: i32,

    /// Human-readable page label, `"HomePage"` or `"LearnMore"` — the page
    /// the visitor was *leaving*, not the one just served.
    #[sea_orm(column_type = "Text")]
    pub page: String,

    /// Seconds elapsed between entering the labeled page and crossing the
    /// next tracked boundary.
    pub time_spent: f64,

    /// Timestamp of entry to the labeled page.
    pub start_time: TimeDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
