//! Lending transaction model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::book::BookShort;

/// Transaction model from database
///
/// A row is created when a book is issued and closed exactly once by setting
/// `returned_date`. An open loan has `returned_date = NULL`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Transaction {
    pub id: i32,
    pub book_id: i32,
    pub member_id: i32,
    pub issued_date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub returned_date: Option<DateTime<Utc>>,
}

/// Transaction with book details for member history listings
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TransactionDetails {
    pub id: i32,
    pub book: BookShort,
    pub issued_date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub returned_date: Option<DateTime<Utc>>,
    pub is_overdue: bool,
}
