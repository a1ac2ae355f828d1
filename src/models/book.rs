//! Book (catalog) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// Book model from database
///
/// `stock` counts copies on the shelf; it only goes down when a book is
/// issued. `deleted` is a soft-delete marker consulted by listings, never by
/// the lending rules.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub stock: i32,
    pub deleted: bool,
}

/// Abbreviated book for embedding in transaction listings
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookShort {
    pub id: i32,
    pub title: String,
    pub author: String,
}

/// Create book request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub stock: i32,
}

/// Update book request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBook {
    pub title: String,
    pub author: String,
    pub stock: i32,
    #[serde(default)]
    pub deleted: bool,
}

/// Book list query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct BookQuery {
    /// Include soft-deleted books
    pub include_deleted: Option<bool>,
    /// Search in title
    pub title: Option<String>,
    /// Search by author
    pub author: Option<String>,
}
