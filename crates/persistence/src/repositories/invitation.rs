//! Invitation repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{InvitationEntity, MembershipEntity};
use crate::metrics::QueryTimer;
use crate::repositories::GroupRepository;
use domain::CoordinationError;

/// Repository for single-use group invitations.
#[derive(Clone)]
pub struct InvitationRepository {
    pool: PgPool,
}

impl InvitationRepository {
    /// Creates a new InvitationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new unredeemed invitation for a group.
    pub async fn create(
        &self,
        group_id: Uuid,
        created_by: Uuid,
    ) -> Result<InvitationEntity, CoordinationError> {
        let timer = QueryTimer::new("create_invitation");
        let result = sqlx::query_as::<_, InvitationEntity>(
            r#"
            INSERT INTO group_invitations (group_id, created_by)
            VALUES ($1, $2)
            RETURNING id, group_id, invited, membership_id, created_by, created_at
            "#,
        )
        .bind(group_id)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }

    /// Find an invitation by ID.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<InvitationEntity>, CoordinationError> {
        let timer = QueryTimer::new("find_invitation_by_id");
        let result = sqlx::query_as::<_, InvitationEntity>(
            r#"
            SELECT id, group_id, invited, membership_id, created_by, created_at
            FROM group_invitations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }

    /// Redeem an invitation for a user.
    ///
    /// One transaction covering all three writes: membership insert,
    /// membership back-reference, and the single-use flag. The invitation
    /// row is locked first so two concurrent redeems serialize and exactly
    /// one succeeds.
    pub async fn redeem(
        &self,
        invitation_id: Uuid,
        user_id: Uuid,
    ) -> Result<(InvitationEntity, MembershipEntity), CoordinationError> {
        let timer = QueryTimer::new("redeem_invitation");
        let mut tx = self.pool.begin().await?;

        let invitation = sqlx::query_as::<_, InvitationEntity>(
            r#"
            SELECT id, group_id, invited, membership_id, created_by, created_at
            FROM group_invitations
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(invitation_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(CoordinationError::InvitationNotFound)?;

        if invitation.invited {
            return Err(CoordinationError::InvitationAlreadyUsed);
        }

        let user_exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)
            "#,
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;
        if !user_exists {
            return Err(CoordinationError::UserNotFound);
        }

        let already_member = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM group_memberships WHERE group_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(invitation.group_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;
        if already_member {
            return Err(CoordinationError::AlreadyMember);
        }

        let membership = GroupRepository::join(&mut tx, invitation.group_id, user_id, false).await?;

        let invitation = sqlx::query_as::<_, InvitationEntity>(
            r#"
            UPDATE group_invitations
            SET invited = true, membership_id = $2
            WHERE id = $1
            RETURNING id, group_id, invited, membership_id, created_by, created_at
            "#,
        )
        .bind(invitation_id)
        .bind(membership.id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok((invitation, membership))
    }
}
