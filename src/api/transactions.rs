//! Lending endpoints
//!
//! Issue and return go through the lending rules engine; its outcomes are
//! mapped to status codes here, with the outcome message in the body.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::transaction::Transaction,
    services::lending::{IssueOutcome, ReturnOutcome},
};

/// Issue request
#[derive(Deserialize, ToSchema)]
pub struct IssueRequest {
    /// Member ID
    pub member_id: i32,
    /// Book ID
    pub book_id: i32,
}

/// Issue response
#[derive(Serialize, ToSchema)]
pub struct IssueResponse {
    /// Status message
    pub message: String,
    /// Created transaction ID, present when the issue succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<i32>,
    /// Due date of the new loan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

/// Return response
#[derive(Serialize, ToSchema)]
pub struct ReturnResponse {
    /// Status message
    pub message: String,
    /// Return timestamp, present when the return succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returned_date: Option<DateTime<Utc>>,
    /// Late fee charged, absent when the loan came back on time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub late_fee: Option<Decimal>,
}

/// Get transaction by ID
#[utoipa::path(
    get,
    path = "/transactions/{id}",
    tag = "lending",
    params(
        ("id" = i32, Path, description = "Transaction ID")
    ),
    responses(
        (status = 200, description = "Transaction details", body = Transaction),
        (status = 404, description = "Transaction not found")
    )
)]
pub async fn get_transaction(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Transaction>> {
    let transaction = state.services.lending.get_transaction(id).await?;
    Ok(Json(transaction))
}

/// Issue a book to a member
#[utoipa::path(
    post,
    path = "/transactions",
    tag = "lending",
    request_body = IssueRequest,
    responses(
        (status = 201, description = "Book issued", body = IssueResponse),
        (status = 404, description = "Book or member not found", body = IssueResponse),
        (status = 409, description = "Out of stock", body = IssueResponse),
        (status = 422, description = "Member over the debt ceiling", body = IssueResponse)
    )
)]
pub async fn issue_book(
    State(state): State<crate::AppState>,
    Json(request): Json<IssueRequest>,
) -> AppResult<(StatusCode, Json<IssueResponse>)> {
    let outcome = state
        .services
        .lending
        .issue(request.member_id, request.book_id)
        .await?;

    let message = outcome.message();
    let (status, transaction_id, due_date) = match outcome {
        IssueOutcome::Issued {
            transaction_id,
            due_date,
        } => (StatusCode::CREATED, Some(transaction_id), Some(due_date)),
        IssueOutcome::OutOfStock => (StatusCode::CONFLICT, None, None),
        IssueOutcome::DebtCeilingExceeded => (StatusCode::UNPROCESSABLE_ENTITY, None, None),
        IssueOutcome::MemberNotFound | IssueOutcome::BookNotFound => {
            (StatusCode::NOT_FOUND, None, None)
        }
    };

    Ok((
        status,
        Json(IssueResponse {
            message,
            transaction_id,
            due_date,
        }),
    ))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/transactions/{id}/return",
    tag = "lending",
    params(
        ("id" = i32, Path, description = "Transaction ID")
    ),
    responses(
        (status = 200, description = "Book returned", body = ReturnResponse),
        (status = 404, description = "Transaction or book not found", body = ReturnResponse),
        (status = 409, description = "Already returned", body = ReturnResponse)
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<(StatusCode, Json<ReturnResponse>)> {
    let outcome = state.services.lending.return_book(id).await?;

    let message = outcome.message();
    let (status, returned_date, late_fee) = match outcome {
        ReturnOutcome::Returned {
            returned_date,
            late_fee,
        } => (StatusCode::OK, Some(returned_date), late_fee),
        ReturnOutcome::AlreadyReturned => (StatusCode::CONFLICT, None, None),
        ReturnOutcome::TransactionNotFound | ReturnOutcome::BookNotFound => {
            (StatusCode::NOT_FOUND, None, None)
        }
    };

    Ok((
        status,
        Json(ReturnResponse {
            message,
            returned_date,
            late_fee,
        }),
    ))
}
