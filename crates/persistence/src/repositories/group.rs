//! Group repository for database operations.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::entities::{GroupEntity, GroupWithCountEntity, MembershipEntity};
use crate::metrics::QueryTimer;
use crate::repositories::is_unique_violation;
use domain::CoordinationError;

/// Repository for group and membership database operations.
#[derive(Clone)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    /// Creates a new GroupRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new group and seat the creator as leader.
    ///
    /// Both writes commit together; a group can never exist without its
    /// founding leader membership.
    pub async fn create_group(
        &self,
        name: &str,
        slug: &str,
        description: Option<&str>,
        created_by: Uuid,
    ) -> Result<(GroupEntity, MembershipEntity), CoordinationError> {
        let timer = QueryTimer::new("create_group");
        let mut tx = self.pool.begin().await?;

        let group = sqlx::query_as::<_, GroupEntity>(
            r#"
            INSERT INTO groups (name, slug, description, created_by)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, slug, description, created_by, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(slug)
        .bind(description)
        .bind(created_by)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                CoordinationError::SlugTaken
            } else {
                e.into()
            }
        })?;

        let membership = Self::join(&mut tx, group.id, created_by, true).await?;

        tx.commit().await?;
        timer.record();
        Ok((group, membership))
    }

    /// Insert a membership row on an open transaction.
    ///
    /// Used at group creation (leader seat) and invitation redemption
    /// (member seat), so both callers share one uniqueness treatment.
    pub async fn join(
        tx: &mut Transaction<'_, Postgres>,
        group_id: Uuid,
        user_id: Uuid,
        is_leader: bool,
    ) -> Result<MembershipEntity, CoordinationError> {
        sqlx::query_as::<_, MembershipEntity>(
            r#"
            INSERT INTO group_memberships (group_id, user_id, is_leader)
            VALUES ($1, $2, $3)
            RETURNING id, group_id, user_id, is_leader, joined_at
            "#,
        )
        .bind(group_id)
        .bind(user_id)
        .bind(is_leader)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                CoordinationError::AlreadyMember
            } else {
                e.into()
            }
        })
    }

    /// Find a group by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<GroupEntity>, CoordinationError> {
        let timer = QueryTimer::new("find_group_by_id");
        let result = sqlx::query_as::<_, GroupEntity>(
            r#"
            SELECT id, name, slug, description, created_by, created_at, updated_at
            FROM groups
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }

    /// Find a group by ID with its member count.
    pub async fn find_with_member_count(
        &self,
        id: Uuid,
    ) -> Result<Option<GroupWithCountEntity>, CoordinationError> {
        let timer = QueryTimer::new("find_group_with_member_count");
        let result = sqlx::query_as::<_, GroupWithCountEntity>(
            r#"
            SELECT
                g.id, g.name, g.slug, g.description, g.created_at,
                (SELECT COUNT(*) FROM group_memberships WHERE group_id = g.id) as member_count
            FROM groups g
            WHERE g.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }

    /// Fetch the membership row for a (group, user) pair.
    pub async fn get_membership(
        &self,
        group_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<MembershipEntity>, CoordinationError> {
        let timer = QueryTimer::new("get_membership");
        let result = sqlx::query_as::<_, MembershipEntity>(
            r#"
            SELECT id, group_id, user_id, is_leader, joined_at
            FROM group_memberships
            WHERE group_id = $1 AND user_id = $2
            "#,
        )
        .bind(group_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        timer.record();
        Ok(result)
    }

    /// Whether the user holds a membership in the group.
    pub async fn is_member(
        &self,
        group_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, CoordinationError> {
        Ok(self.get_membership(group_id, user_id).await?.is_some())
    }

    /// Whether the user is a leader of the group.
    ///
    /// Defined only over existing members: a user with no membership row
    /// yields `NotMemberOfGroup` rather than `false`, so callers can tell
    /// "not a member" apart from "member but not leader".
    pub async fn is_leader(
        &self,
        group_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, CoordinationError> {
        let membership = self
            .get_membership(group_id, user_id)
            .await?
            .ok_or(CoordinationError::NotMemberOfGroup)?;
        Ok(membership.is_leader)
    }
}
