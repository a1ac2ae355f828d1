//! Member model and related types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Member model from database
///
/// `debt` only grows inside this server (late fees on return); repayment is
/// handled by editing the member record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Member {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub debt: Decimal,
}

/// Create member request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMember {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub debt: Decimal,
}

/// Update member request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateMember {
    pub name: String,
    pub email: String,
    pub debt: Decimal,
}
