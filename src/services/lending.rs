//! Lending rules engine
//!
//! All stock, debt-ceiling, and late-fee rules live here. Persistence goes
//! through the [`LendingStore`] port so the rules can be exercised against an
//! in-memory store in tests; in production the port is backed by
//! [`Repository`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::{
    config::LendingConfig,
    error::{AppError, AppResult},
    models::{Book, Member, Transaction},
    repository::Repository,
};

/// Persistence port for the lending rules engine.
///
/// `issue` and `close` are each one atomic unit of work: stock decrement plus
/// transaction insert, and return stamp plus debt charge, commit or roll back
/// together.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LendingStore: Send + Sync {
    async fn find_book(&self, id: i32) -> AppResult<Option<Book>>;

    async fn find_member(&self, id: i32) -> AppResult<Option<Member>>;

    async fn find_transaction(&self, id: i32) -> AppResult<Option<Transaction>>;

    /// Returns the new transaction id, or `None` when stock ran out.
    async fn issue(
        &self,
        member_id: i32,
        book_id: i32,
        issued_date: DateTime<Utc>,
        due_date: DateTime<Utc>,
    ) -> AppResult<Option<i32>>;

    /// Returns `false` when the transaction was already closed.
    async fn close(
        &self,
        transaction_id: i32,
        returned_date: DateTime<Utc>,
        late_fee: Decimal,
    ) -> AppResult<bool>;
}

#[async_trait]
impl LendingStore for Repository {
    async fn find_book(&self, id: i32) -> AppResult<Option<Book>> {
        self.books.find_by_id(id).await
    }

    async fn find_member(&self, id: i32) -> AppResult<Option<Member>> {
        self.members.find_by_id(id).await
    }

    async fn find_transaction(&self, id: i32) -> AppResult<Option<Transaction>> {
        self.transactions.find_by_id(id).await
    }

    async fn issue(
        &self,
        member_id: i32,
        book_id: i32,
        issued_date: DateTime<Utc>,
        due_date: DateTime<Utc>,
    ) -> AppResult<Option<i32>> {
        self.transactions
            .issue(member_id, book_id, issued_date, due_date)
            .await
    }

    async fn close(
        &self,
        transaction_id: i32,
        returned_date: DateTime<Utc>,
        late_fee: Decimal,
    ) -> AppResult<bool> {
        self.transactions
            .close(transaction_id, returned_date, late_fee)
            .await
    }
}

/// Lending policy applied by the rules engine
#[derive(Debug, Clone)]
pub struct LendingPolicy {
    pub debt_ceiling: Decimal,
    pub late_fee_per_day: Decimal,
    pub loan_period: Duration,
}

impl From<&LendingConfig> for LendingPolicy {
    fn from(config: &LendingConfig) -> Self {
        Self {
            debt_ceiling: config.debt_ceiling,
            late_fee_per_day: config.late_fee_per_day,
            loan_period: Duration::days(config.loan_period_days),
        }
    }
}

/// Result of an issue request.
///
/// Every variant is an expected, user-facing outcome; infrastructure
/// failures surface as [`crate::error::AppError`] instead.
#[derive(Debug, Clone, PartialEq)]
pub enum IssueOutcome {
    Issued {
        transaction_id: i32,
        due_date: DateTime<Utc>,
    },
    OutOfStock,
    DebtCeilingExceeded,
    MemberNotFound,
    BookNotFound,
}

impl IssueOutcome {
    /// Human-readable status line shown to staff
    pub fn message(&self) -> String {
        match self {
            IssueOutcome::Issued { .. } => "Issued successfully".to_string(),
            IssueOutcome::OutOfStock => "Out of stock".to_string(),
            IssueOutcome::DebtCeilingExceeded => {
                "Member has outstanding debt exceeding the ceiling".to_string()
            }
            IssueOutcome::MemberNotFound => "Member not found".to_string(),
            IssueOutcome::BookNotFound => "Book not found".to_string(),
        }
    }
}

/// Result of a return request
#[derive(Debug, Clone, PartialEq)]
pub enum ReturnOutcome {
    Returned {
        returned_date: DateTime<Utc>,
        late_fee: Option<Decimal>,
    },
    AlreadyReturned,
    BookNotFound,
    TransactionNotFound,
}

impl ReturnOutcome {
    /// Human-readable status line shown to staff
    pub fn message(&self) -> String {
        match self {
            ReturnOutcome::Returned {
                late_fee: Some(fee),
                ..
            } => format!("Book returned successfully with late fees of {}", fee),
            ReturnOutcome::Returned { .. } => "Book returned successfully".to_string(),
            ReturnOutcome::AlreadyReturned => "Book already returned".to_string(),
            ReturnOutcome::BookNotFound => "Book not found".to_string(),
            ReturnOutcome::TransactionNotFound => "Transaction not found".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct LendingService {
    store: Arc<dyn LendingStore>,
    policy: LendingPolicy,
}

impl LendingService {
    pub fn new(store: Arc<dyn LendingStore>, policy: LendingPolicy) -> Self {
        Self { store, policy }
    }

    /// Get transaction by ID
    pub async fn get_transaction(&self, id: i32) -> AppResult<Transaction> {
        self.store
            .find_transaction(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Transaction with id {} not found", id)))
    }

    /// Issue a book to a member.
    ///
    /// Preconditions are checked in order and each one short-circuits with
    /// its own outcome: book exists, member exists, stock available, member
    /// debt within the ceiling.
    pub async fn issue(&self, member_id: i32, book_id: i32) -> AppResult<IssueOutcome> {
        let Some(book) = self.store.find_book(book_id).await? else {
            return Ok(IssueOutcome::BookNotFound);
        };
        let Some(member) = self.store.find_member(member_id).await? else {
            return Ok(IssueOutcome::MemberNotFound);
        };
        if book.stock <= 0 {
            return Ok(IssueOutcome::OutOfStock);
        }
        if member.debt > self.policy.debt_ceiling {
            return Ok(IssueOutcome::DebtCeilingExceeded);
        }

        let issued_date = Utc::now();
        let due_date = issued_date + self.policy.loan_period;

        // The store re-checks stock inside its transaction; losing the race
        // on the last copy reports the same outcome as seeing zero stock up
        // front.
        match self
            .store
            .issue(member_id, book_id, issued_date, due_date)
            .await?
        {
            Some(transaction_id) => {
                tracing::info!(member_id, book_id, transaction_id, "book issued");
                Ok(IssueOutcome::Issued {
                    transaction_id,
                    due_date,
                })
            }
            None => Ok(IssueOutcome::OutOfStock),
        }
    }

    /// Return a borrowed book, assessing a late fee when past due.
    pub async fn return_book(&self, transaction_id: i32) -> AppResult<ReturnOutcome> {
        let Some(transaction) = self.store.find_transaction(transaction_id).await? else {
            return Ok(ReturnOutcome::TransactionNotFound);
        };
        // Referential integrity makes a dangling book_id impossible through
        // this server; kept as a guard against manual row edits.
        if self.store.find_book(transaction.book_id).await?.is_none() {
            return Ok(ReturnOutcome::BookNotFound);
        }
        if transaction.returned_date.is_some() {
            return Ok(ReturnOutcome::AlreadyReturned);
        }

        let returned_date = Utc::now();
        let late_fee = self.late_fee(&transaction, returned_date);

        if !self
            .store
            .close(transaction_id, returned_date, late_fee.unwrap_or_default())
            .await?
        {
            // A concurrent request closed it first.
            return Ok(ReturnOutcome::AlreadyReturned);
        }

        if let Some(fee) = late_fee {
            tracing::info!(
                transaction_id,
                member_id = transaction.member_id,
                %fee,
                "late fee charged"
            );
        }

        Ok(ReturnOutcome::Returned {
            returned_date,
            late_fee,
        })
    }

    /// Fee owed for a return at `returned_date`; `None` when the loan has no
    /// due date or came back on time. Partial days do not count as late.
    fn late_fee(&self, transaction: &Transaction, returned_date: DateTime<Utc>) -> Option<Decimal> {
        let due_date = transaction.due_date?;
        let days_late = (returned_date - due_date).num_days();
        if days_late <= 0 {
            return None;
        }
        Some(Decimal::from(days_late) * self.policy.late_fee_per_day)
    }
}
