//! Team CRUD and membership management.

mod common;

use common::{seed_team, seed_user, service};
use uuid::Uuid;
use venturist::service::projects::NewProject;
use venturist::service::teams::{NewTeam, TeamUpdate};

#[tokio::test]
async fn create_team_with_members() {
    let (svc, _storage) = service().await;
    let lead = seed_user(&svc, "lead@example.com").await;
    let member = seed_user(&svc, "member@example.com").await;

    let result = svc
        .create_team(NewTeam {
            team_name: "Platform".to_string(),
            description: Some("Infra and tooling".to_string()),
            team_lead: lead,
            members: vec![member],
        })
        .await;
    assert!(result.success);

    let detail = svc.fetch_team(result.id.unwrap()).await.unwrap();
    assert_eq!(detail.team.team_name, "Platform");
    assert_eq!(detail.team_lead.id, lead);
    assert_eq!(detail.members.len(), 1);
    assert_eq!(detail.members[0].id, member);
}

#[tokio::test]
async fn create_team_requires_existing_lead() {
    let (svc, _storage) = service().await;

    let result = svc
        .create_team(NewTeam {
            team_name: "Ghosts".to_string(),
            description: None,
            team_lead: Uuid::new_v4(),
            members: vec![],
        })
        .await;
    assert!(!result.success);
    assert_eq!(result.message, "Team lead not found.");
}

#[tokio::test]
async fn unknown_member_rolls_back_creation() {
    let (svc, _storage) = service().await;
    let lead = seed_user(&svc, "lead@example.com").await;

    let result = svc
        .create_team(NewTeam {
            team_name: "Partial".to_string(),
            description: None,
            team_lead: lead,
            members: vec![Uuid::new_v4()],
        })
        .await;
    assert!(!result.success);
    assert_eq!(result.message, "Team member not found.");

    // The transaction rolled back; no team page contains it.
    let page = svc.fetch_teams(1, 10).await.unwrap();
    assert!(page.teams.is_empty());
}

#[tokio::test]
async fn update_replaces_membership() {
    let (svc, _storage) = service().await;
    let lead = seed_user(&svc, "lead@example.com").await;
    let a = seed_user(&svc, "a@example.com").await;
    let b = seed_user(&svc, "b@example.com").await;
    let team = seed_team(&svc, lead).await;

    let result = svc
        .update_team(
            team,
            TeamUpdate {
                team_name: Some("Renamed".to_string()),
                members: Some(vec![a, b]),
                ..Default::default()
            },
        )
        .await;
    assert!(result.success);

    let detail = svc.fetch_team(team).await.unwrap();
    assert_eq!(detail.team.team_name, "Renamed");
    let mut ids: Vec<_> = detail.members.iter().map(|m| m.id).collect();
    ids.sort();
    let mut expected = vec![a, b];
    expected.sort();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn team_with_projects_cannot_be_deleted() {
    let (svc, _storage) = service().await;
    let lead = seed_user(&svc, "lead@example.com").await;
    let team = seed_team(&svc, lead).await;

    let project = svc
        .create_project(NewProject {
            title: "Apollo".to_string(),
            due_date: None,
            budget: None,
            priority: "High".to_string(),
            team_id: team,
        })
        .await;
    assert!(project.success);

    let result = svc.delete_team(team).await;
    assert!(!result.success);
    assert!(result.message.contains("projects"));
    assert!(svc.fetch_team(team).await.is_ok());
}

#[tokio::test]
async fn delete_empty_team() {
    let (svc, _storage) = service().await;
    let lead = seed_user(&svc, "lead@example.com").await;
    let team = seed_team(&svc, lead).await;

    let result = svc.delete_team(team).await;
    assert!(result.success);
    assert!(svc.fetch_team(team).await.is_err());
}

#[tokio::test]
async fn fetch_teams_paginates_with_details() {
    let (svc, _storage) = service().await;
    let lead = seed_user(&svc, "lead@example.com").await;
    for i in 0..3 {
        let result = svc
            .create_team(NewTeam {
                team_name: format!("Team {i}"),
                description: None,
                team_lead: lead,
                members: vec![lead],
            })
            .await;
        assert!(result.success);
    }

    let page = svc.fetch_teams(1, 2).await.unwrap();
    assert_eq!(page.teams.len(), 2);
    assert_eq!(page.total_pages, 2);
    for detail in &page.teams {
        assert_eq!(detail.team_lead.id, lead);
        assert_eq!(detail.members.len(), 1);
    }
}
