//! Member management service

use crate::{
    error::{AppError, AppResult},
    models::member::{CreateMember, Member, UpdateMember},
    models::transaction::TransactionDetails,
    repository::Repository,
};

#[derive(Clone)]
pub struct MembersService {
    repository: Repository,
}

impl MembersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all members
    pub async fn list_members(&self) -> AppResult<Vec<Member>> {
        self.repository.members.list().await
    }

    /// Get member by ID
    pub async fn get_member(&self, id: i32) -> AppResult<Member> {
        self.repository.members.get_by_id(id).await
    }

    /// Create a new member
    pub async fn create_member(&self, member: CreateMember) -> AppResult<Member> {
        if self.repository.members.email_exists(&member.email, None).await? {
            return Err(AppError::Conflict(
                "A member with this email already exists".to_string(),
            ));
        }
        self.repository.members.create(&member).await
    }

    /// Update an existing member
    pub async fn update_member(&self, id: i32, member: UpdateMember) -> AppResult<Member> {
        if self
            .repository
            .members
            .email_exists(&member.email, Some(id))
            .await?
        {
            return Err(AppError::Conflict(
                "A member with this email already exists".to_string(),
            ));
        }
        self.repository.members.update(id, &member).await
    }

    /// Delete a member
    pub async fn delete_member(&self, id: i32) -> AppResult<()> {
        self.repository.members.delete(id).await
    }

    /// Get lending history for a member
    pub async fn get_member_transactions(&self, id: i32) -> AppResult<Vec<TransactionDetails>> {
        // Verify member exists
        self.repository.members.get_by_id(id).await?;
        self.repository.transactions.get_member_transactions(id).await
    }
}
