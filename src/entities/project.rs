use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A project owned by a team.
///
/// `total_tasks` and `completed_tasks` are aggregate counters maintained
/// by the service layer; no other code path writes them. A task counts as
/// completed when it has at least one subtask and all of them are done.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub due_date: Option<String>,
    pub budget: Option<String>,
    pub priority: String,
    pub team_id: Uuid,
    pub user_id: Uuid,
    pub total_tasks: i32,
    pub completed_tasks: i32,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::task::Entity")]
    Tasks,
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamId",
        to = "super::team::Column::Id"
    )]
    Team,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    Client,
}

impl Related<super::task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tasks.def()
    }
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
