//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{calculations, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Changeset for profile edits.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserProfileUpdate<'a> {
    pub username: &'a str,
    pub email: &'a str,
}

/// Row struct for reading from the calculations table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = calculations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CalculationRow {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub a: f64,
    pub b: f64,
    pub calculation_type: String,
    pub result: f64,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating calculation records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = calculations)]
pub(crate) struct NewCalculationRow<'a> {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub a: f64,
    pub b: f64,
    pub calculation_type: &'a str,
    pub result: f64,
    pub created_at: DateTime<Utc>,
}

/// Changeset applied when operands are edited.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = calculations)]
pub(crate) struct CalculationUpdate<'a> {
    pub a: f64,
    pub b: f64,
    pub calculation_type: &'a str,
    pub result: f64,
}
