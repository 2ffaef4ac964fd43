//! Task table filtering, sorting and pagination.

mod common;

use common::{seed_project, seed_task, service};
use sea_orm::Order;
use venturist::filter::{TaskFilter, TaskQuery, TaskSort};
use venturist::service::tasks::NewTask;

async fn seed_board() -> (venturist::service::AppService, uuid::Uuid, uuid::Uuid) {
    let (svc, _storage) = service().await;
    let (project, user) = seed_project(&svc).await;

    let specs = [
        ("Write proposal", "High", "In Progress", "2026-09-01"),
        ("Review budget", "Low", "Done", "2026-09-10"),
        ("Draft report", "Medium", "In Progress", "2026-10-01"),
        ("Plan review", "High", "Backlog", "2026-11-05"),
    ];
    for (title, priority, status, due) in specs {
        let result = svc
            .create_task(
                project,
                NewTask {
                    title: title.to_string(),
                    description: None,
                    due_date: Some(due.to_string()),
                    priority: priority.to_string(),
                    status: status.to_string(),
                    assigned_to: user,
                },
            )
            .await;
        assert!(result.success, "{}", result.message);
    }
    (svc, project, user)
}

#[tokio::test]
async fn title_filter_matches_substring() {
    let (svc, project, _) = seed_board().await;

    let query = TaskQuery {
        filters: vec![TaskFilter::TitleContains("review".to_string())],
        ..Default::default()
    };
    let (rows, _) = svc.fetch_tasks(project, &query).await.unwrap();
    let titles: Vec<_> = rows.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles.len(), 2);
    assert!(titles.contains(&"Review budget"));
    assert!(titles.contains(&"Plan review"));
}

#[tokio::test]
async fn filters_compose_as_conjunction() {
    let (svc, project, user) = seed_board().await;

    let query = TaskQuery {
        filters: vec![
            TaskFilter::PriorityOneOf(vec!["High".to_string()]),
            TaskFilter::StatusOneOf(vec!["In Progress".to_string()]),
            TaskFilter::AssignedTo(user),
        ],
        ..Default::default()
    };
    let (rows, _) = svc.fetch_tasks(project, &query).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Write proposal");
}

#[tokio::test]
async fn due_date_range_filter() {
    let (svc, project, _) = seed_board().await;

    let query = TaskQuery {
        filters: vec![TaskFilter::DueBetween {
            start: "2026-09-01".to_string(),
            end: "2026-09-30".to_string(),
        }],
        ..Default::default()
    };
    let (rows, _) = svc.fetch_tasks(project, &query).await.unwrap();
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn sorting_by_due_date_descending() {
    let (svc, project, _) = seed_board().await;

    let query = TaskQuery {
        sort: TaskSort::DueDate,
        order: Order::Desc,
        ..Default::default()
    };
    let (rows, _) = svc.fetch_tasks(project, &query).await.unwrap();
    assert_eq!(rows[0].title, "Plan review");
    assert_eq!(rows[3].title, "Write proposal");
}

#[tokio::test]
async fn pagination_reports_total_pages() {
    let (svc, project, _) = seed_board().await;

    let query = TaskQuery {
        sort: TaskSort::Title,
        per_page: 3,
        ..Default::default()
    };
    let (first, pages) = svc.fetch_tasks(project, &query).await.unwrap();
    assert_eq!(first.len(), 3);
    assert_eq!(pages, 2);

    let query = TaskQuery {
        sort: TaskSort::Title,
        page: 2,
        per_page: 3,
        ..Default::default()
    };
    let (second, _) = svc.fetch_tasks(project, &query).await.unwrap();
    assert_eq!(second.len(), 1);
}

#[tokio::test]
async fn no_filters_returns_everything() {
    let (svc, project, _) = seed_board().await;

    let (rows, pages) = svc
        .fetch_tasks(project, &TaskQuery::default())
        .await
        .unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(pages, 1);
}

#[tokio::test]
async fn other_projects_tasks_are_excluded() {
    let (svc, project, user) = seed_board().await;

    // A second project with its own task.
    let team = svc.fetch_project(project).await.unwrap().team_id;
    let other = svc
        .create_project(venturist::service::projects::NewProject {
            title: "Gemini".to_string(),
            due_date: None,
            budget: None,
            priority: "Low".to_string(),
            team_id: team,
        })
        .await
        .id
        .unwrap();
    seed_task(&svc, other, user, "Elsewhere").await;

    let (rows, _) = svc
        .fetch_tasks(project, &TaskQuery::default())
        .await
        .unwrap();
    assert!(rows.iter().all(|t| t.project_id == project));
    assert_eq!(rows.len(), 4);
}
