//! Team repository for database operations.

use anyhow::Result;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, QueryTrait,
};
use uuid::Uuid;

use crate::entities::{team, team_member, user};

/// Repository for team-related database operations.
pub struct TeamRepository;

impl TeamRepository {
    /// Get a single team by id.
    pub async fn get_by_id<C>(conn: &C, id: &Uuid) -> Result<Option<team::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(team::Entity::find()
            .filter(team::Column::Id.eq(*id))
            .one(conn)
            .await?)
    }

    /// Get one page of teams plus the total page count.
    ///
    /// `page` is zero-based.
    pub async fn get_page<C>(conn: &C, page: u64, per_page: u64) -> Result<(Vec<team::Model>, u64)>
    where
        C: ConnectionTrait,
    {
        let paginator = team::Entity::find()
            .order_by_asc(team::Column::CreatedAt)
            .paginate(conn, per_page.max(1));
        let pages = paginator.num_pages().await?;
        let rows = paginator.fetch_page(page).await?;
        Ok((rows, pages))
    }

    /// Get the first team led by a user, if any.
    pub async fn get_led_by<C>(conn: &C, user_id: &Uuid) -> Result<Option<team::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(team::Entity::find()
            .filter(team::Column::TeamLeadId.eq(*user_id))
            .one(conn)
            .await?)
    }

    /// Get a team's members via the join table.
    pub async fn get_members<C>(conn: &C, team_id: &Uuid) -> Result<Vec<user::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(user::Entity::find()
            .filter(
                user::Column::Id.in_subquery(
                    team_member::Entity::find()
                        .filter(team_member::Column::TeamId.eq(*team_id))
                        .select_only()
                        .column(team_member::Column::UserId)
                        .into_query(),
                ),
            )
            .order_by_asc(user::Column::LastName)
            .all(conn)
            .await?)
    }

    /// Attach a member to a team.
    pub async fn add_member<C>(conn: &C, team_id: &Uuid, user_id: &Uuid) -> Result<()>
    where
        C: ConnectionTrait,
    {
        let row = team_member::ActiveModel {
            team_id: ActiveValue::Set(*team_id),
            user_id: ActiveValue::Set(*user_id),
        };
        team_member::Entity::insert(row).exec(conn).await?;
        Ok(())
    }

    /// Detach all members from a team.
    pub async fn clear_members<C>(conn: &C, team_id: &Uuid) -> Result<()>
    where
        C: ConnectionTrait,
    {
        team_member::Entity::delete_many()
            .filter(team_member::Column::TeamId.eq(*team_id))
            .exec(conn)
            .await?;
        Ok(())
    }

    /// Insert a team into the database.
    pub async fn insert<C>(conn: &C, team: team::ActiveModel) -> Result<team::Model>
    where
        C: ConnectionTrait,
    {
        use sea_orm::ActiveModelTrait;
        Ok(team.insert(conn).await?)
    }

    /// Update a team in the database.
    pub async fn update<C>(conn: &C, team: team::ActiveModel) -> Result<team::Model>
    where
        C: ConnectionTrait,
    {
        use sea_orm::ActiveModelTrait;
        Ok(team.update(conn).await?)
    }

    /// Delete a team from the database.
    pub async fn delete<C>(conn: &C, team: team::Model) -> Result<()>
    where
        C: ConnectionTrait,
    {
        use sea_orm::ModelTrait;
        team.delete(conn).await?;
        Ok(())
    }
}
