//! Button-click entity model for Sea-ORM database interaction.

use sea_orm::entity::prelude::*;

/// One tracked button click.
///
/// Appended by the `/log_binary` handler; the `button` column always holds
/// `1` (the flag exists so the schema reads as "clicked or not" in the
/// analytics queries that live outside this service).
///
/// # Database Schema
///
/// | Column       | Type                  | Description                     |
/// |--------------|-----------------------|---------------------------------|
/// | id           | INTEGER (Primary Key) | Synthetic row id (SQLite rowid) |
/// | session_id   | INTEGER               | Visitor id held in the session  |
/// | button       | INTEGER               | Fixed `1`, "clicked"            |
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "Button")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub session_id: i32,
    pub button: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
