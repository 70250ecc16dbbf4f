//! Database entity models for the tracking tables.
//!
//! This module contains the Sea-ORM entity definitions for the two
//! append-only tables the tracker writes to. Both tables must exist before
//! the server takes traffic; the optional `migration` feature can create
//! them, but the server itself never does.

/// Entity for the `PageView` table: one row per completed dwell interval.
pub mod page_view;

/// Entity for the `Button` table: one row per tracked button click.
pub mod button;
