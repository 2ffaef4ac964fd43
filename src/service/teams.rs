//! Team operations.

use anyhow::Result;
use sea_orm::{ActiveValue::Set, TransactionTrait};
use uuid::Uuid;

use crate::constants::{
    MSG_CREATE_TEAM_FAILED, MSG_DELETE_TEAM_FAILED, MSG_EMPTY_TEAM_NAME, MSG_TEAM_HAS_PROJECTS,
    MSG_TEAM_LEAD_NOT_FOUND, MSG_TEAM_MEMBER_NOT_FOUND, MSG_TEAM_NOT_FOUND,
    MSG_UPDATE_TEAM_FAILED,
};
use crate::entities::{team, user};
use crate::repositories::{ProjectRepository, TeamRepository, UserRepository};
use crate::service::{invalid, not_found, ActionResult, AppService, ServiceError};
use crate::utils::datetime;

/// Input for creating a team.
#[derive(Clone, Debug)]
pub struct NewTeam {
    pub team_name: String,
    pub description: Option<String>,
    pub team_lead: Uuid,
    pub members: Vec<Uuid>,
}

/// Field updates for a team; `None` leaves a field unchanged. Providing
/// `members` replaces the whole membership list.
#[derive(Clone, Debug, Default)]
pub struct TeamUpdate {
    pub team_name: Option<String>,
    pub description: Option<String>,
    pub members: Option<Vec<Uuid>>,
}

/// A team together with its lead and members.
#[derive(Clone, Debug)]
pub struct TeamDetail {
    pub team: team::Model,
    pub team_lead: user::Model,
    pub members: Vec<user::Model>,
}

/// One page of teams with membership resolved.
#[derive(Clone, Debug)]
pub struct TeamPage {
    pub teams: Vec<TeamDetail>,
    pub total_pages: u64,
}

impl AppService {
    /// Create a team with a lead and an initial member list.
    pub async fn create_team(&self, input: NewTeam) -> ActionResult {
        match self.create_team_inner(input).await {
            Ok(id) => ActionResult::created("Team created successfully.", id),
            Err(err) => Self::failure("create team", MSG_CREATE_TEAM_FAILED, err),
        }
    }

    async fn create_team_inner(&self, input: NewTeam) -> Result<Uuid, ServiceError> {
        if input.team_name.trim().is_empty() {
            return Err(invalid(MSG_EMPTY_TEAM_NAME));
        }

        let storage = self.storage().lock().await;
        let txn = storage.conn.begin().await?;

        UserRepository::get_by_id(&txn, &input.team_lead)
            .await?
            .ok_or_else(|| not_found(MSG_TEAM_LEAD_NOT_FOUND))?;

        let created = TeamRepository::insert(
            &txn,
            team::ActiveModel {
                id: Set(Uuid::new_v4()),
                team_name: Set(input.team_name.trim().to_string()),
                description: Set(input.description),
                team_lead_id: Set(input.team_lead),
                created_at: Set(datetime::now_rfc3339()),
            },
        )
        .await?;

        for member_id in &input.members {
            UserRepository::get_by_id(&txn, member_id)
                .await?
                .ok_or_else(|| not_found(MSG_TEAM_MEMBER_NOT_FOUND))?;
            TeamRepository::add_member(&txn, &created.id, member_id).await?;
        }

        txn.commit().await?;
        Ok(created.id)
    }

    /// Update a team's fields and optionally replace its membership.
    pub async fn update_team(&self, team_id: Uuid, update: TeamUpdate) -> ActionResult {
        match self.update_team_inner(team_id, update).await {
            Ok(()) => ActionResult::ok("Team updated successfully."),
            Err(err) => Self::failure("update team", MSG_UPDATE_TEAM_FAILED, err),
        }
    }

    async fn update_team_inner(&self, team_id: Uuid, update: TeamUpdate) -> Result<(), ServiceError> {
        if let Some(name) = &update.team_name {
            if name.trim().is_empty() {
                return Err(invalid(MSG_EMPTY_TEAM_NAME));
            }
        }

        let storage = self.storage().lock().await;
        let txn = storage.conn.begin().await?;

        let team = TeamRepository::get_by_id(&txn, &team_id)
            .await?
            .ok_or_else(|| not_found(MSG_TEAM_NOT_FOUND))?;

        let mut active: team::ActiveModel = team.into();
        if let Some(name) = update.team_name {
            active.team_name = Set(name.trim().to_string());
        }
        if let Some(description) = update.description {
            active.description = Set(Some(description));
        }
        TeamRepository::update(&txn, active).await?;

        if let Some(members) = update.members {
            TeamRepository::clear_members(&txn, &team_id).await?;
            for member_id in &members {
                UserRepository::get_by_id(&txn, member_id)
                    .await?
                    .ok_or_else(|| not_found(MSG_TEAM_MEMBER_NOT_FOUND))?;
                TeamRepository::add_member(&txn, &team_id, member_id).await?;
            }
        }

        txn.commit().await?;
        Ok(())
    }

    /// Delete a team and its membership rows. Refused while any project
    /// still belongs to the team.
    pub async fn delete_team(&self, team_id: Uuid) -> ActionResult {
        match self.delete_team_inner(team_id).await {
            Ok(name) => ActionResult::ok(format!("Team '{name}' deleted successfully.")),
            Err(err) => Self::failure("delete team", MSG_DELETE_TEAM_FAILED, err),
        }
    }

    async fn delete_team_inner(&self, team_id: Uuid) -> Result<String, ServiceError> {
        let storage = self.storage().lock().await;
        let txn = storage.conn.begin().await?;

        let team = TeamRepository::get_by_id(&txn, &team_id)
            .await?
            .ok_or_else(|| not_found(MSG_TEAM_NOT_FOUND))?;

        let projects = ProjectRepository::count_for_team(&txn, &team_id).await?;
        if projects > 0 {
            return Err(invalid(MSG_TEAM_HAS_PROJECTS));
        }

        let name = team.team_name.clone();
        TeamRepository::clear_members(&txn, &team_id).await?;
        TeamRepository::delete(&txn, team).await?;

        txn.commit().await?;
        Ok(name)
    }

    /// Get a team with its lead and members.
    pub async fn fetch_team(&self, team_id: Uuid) -> Result<TeamDetail, ServiceError> {
        let storage = self.storage().lock().await;
        let team = TeamRepository::get_by_id(&storage.conn, &team_id)
            .await?
            .ok_or_else(|| not_found(MSG_TEAM_NOT_FOUND))?;
        let team_lead = UserRepository::get_by_id(&storage.conn, &team.team_lead_id)
            .await?
            .ok_or_else(|| not_found(MSG_TEAM_LEAD_NOT_FOUND))?;
        let members = TeamRepository::get_members(&storage.conn, &team_id).await?;
        Ok(TeamDetail {
            team,
            team_lead,
            members,
        })
    }

    /// Get one page of teams with membership resolved. `page` is 1-based.
    pub async fn fetch_teams(&self, page: u64, per_page: u64) -> Result<TeamPage, ServiceError> {
        let storage = self.storage().lock().await;
        let (teams, total_pages) =
            TeamRepository::get_page(&storage.conn, page.saturating_sub(1), per_page).await?;

        let mut details = Vec::with_capacity(teams.len());
        for team in teams {
            let team_lead = UserRepository::get_by_id(&storage.conn, &team.team_lead_id)
                .await?
                .ok_or_else(|| not_found(MSG_TEAM_LEAD_NOT_FOUND))?;
            let members = TeamRepository::get_members(&storage.conn, &team.id).await?;
            details.push(TeamDetail {
                team,
                team_lead,
                members,
            });
        }

        Ok(TeamPage {
            teams: details,
            total_pages,
        })
    }
}
