//! Transactions repository for database operations
//!
//! The two lending writes are each a single SQL transaction: a stock
//! decrement is never visible without its transaction row, and a return
//! stamp is never visible without its late-fee charge.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres, Row};

use crate::{
    error::AppResult,
    models::{
        book::BookShort,
        transaction::{Transaction, TransactionDetails},
    },
};

#[derive(Clone)]
pub struct TransactionsRepository {
    pool: Pool<Postgres>,
}

impl TransactionsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get transaction by ID, absence is not an error
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Transaction>> {
        let transaction =
            sqlx::query_as::<_, Transaction>("SELECT * FROM transactions WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(transaction)
    }

    /// Get transactions for a member, open loans first
    pub async fn get_member_transactions(
        &self,
        member_id: i32,
    ) -> AppResult<Vec<TransactionDetails>> {
        let rows = sqlx::query(
            r#"
            SELECT t.id, t.issued_date, t.due_date, t.returned_date,
                   b.id as book_id, b.title, b.author
            FROM transactions t
            JOIN books b ON t.book_id = b.id
            WHERE t.member_id = $1
            ORDER BY t.returned_date IS NOT NULL, t.issued_date
            "#,
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;

        let now = Utc::now();

        let mut result = Vec::new();
        for row in rows {
            let due_date: Option<DateTime<Utc>> = row.get("due_date");
            let returned_date: Option<DateTime<Utc>> = row.get("returned_date");

            result.push(TransactionDetails {
                id: row.get("id"),
                book: BookShort {
                    id: row.get("book_id"),
                    title: row.get("title"),
                    author: row.get("author"),
                },
                issued_date: row.get("issued_date"),
                due_date,
                returned_date,
                is_overdue: returned_date.is_none()
                    && due_date.map(|d| d < now).unwrap_or(false),
            });
        }

        Ok(result)
    }

    /// Atomically take one copy off the book's stock and create the
    /// transaction row. Returns the new transaction id, or `None` when the
    /// book had no stock left at commit time.
    pub async fn issue(
        &self,
        member_id: i32,
        book_id: i32,
        issued_date: DateTime<Utc>,
        due_date: DateTime<Utc>,
    ) -> AppResult<Option<i32>> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query("UPDATE books SET stock = stock - 1 WHERE id = $1 AND stock > 0")
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let transaction_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO transactions (book_id, member_id, issued_date, due_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(book_id)
        .bind(member_id)
        .bind(issued_date)
        .bind(due_date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(transaction_id))
    }

    /// Atomically stamp the return date and charge the late fee, if any, to
    /// the borrowing member. Returns `false` when the transaction was
    /// already closed; the stamp is never overwritten.
    pub async fn close(
        &self,
        transaction_id: i32,
        returned_date: DateTime<Utc>,
        late_fee: Decimal,
    ) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;

        let member_id: Option<i32> = sqlx::query_scalar(
            r#"
            UPDATE transactions SET returned_date = $2
            WHERE id = $1 AND returned_date IS NULL
            RETURNING member_id
            "#,
        )
        .bind(transaction_id)
        .bind(returned_date)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(member_id) = member_id else {
            tx.rollback().await?;
            return Ok(false);
        };

        if !late_fee.is_zero() {
            sqlx::query("UPDATE members SET debt = debt + $2 WHERE id = $1")
                .bind(member_id)
                .bind(late_fee)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(true)
    }
}
