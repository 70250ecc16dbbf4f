//! Schema setup for the tracking tables.
//!
//! The server never runs migrations itself — the `PageView` and `Button`
//! tables are expected to pre-exist. This module exists so tests (and fresh
//! local setups) can provision them; it is gated behind the `migration`
//! feature, which is on by default.

pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_tracking_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    // Override the name of the migration table to avoid conflicts
    fn migration_table_name() -> sea_orm::DynIden {
        Alias::new("pagetrack_migrations").into_iden()
    }

    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(
            m20250601_000001_create_tracking_tables::Migration,
        )]
    }
}
