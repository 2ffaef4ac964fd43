//! Typed filter predicates for task queries.
//!
//! Dashboard tables filter, sort and paginate tasks. Instead of building
//! predicates ad hoc per field, the accepted filters form a closed set of
//! variants compiled to a single SeaORM [`Condition`] by one dispatcher.

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, Condition, Order};
use uuid::Uuid;

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::entities::task;

/// One filter predicate over the task table.
#[derive(Clone, Debug)]
pub enum TaskFilter {
    /// Case-insensitive substring match on the title.
    TitleContains(String),
    /// Status is one of the given values.
    StatusOneOf(Vec<String>),
    /// Priority is one of the given values.
    PriorityOneOf(Vec<String>),
    /// Due date falls within `[start, end]` (inclusive, `%Y-%m-%d`).
    DueBetween { start: String, end: String },
    /// Task is assigned to the given user.
    AssignedTo(Uuid),
}

impl TaskFilter {
    fn to_condition(&self) -> Condition {
        match self {
            TaskFilter::TitleContains(text) => {
                Condition::all().add(Expr::col(task::Column::Title).like(format!("%{text}%")))
            }
            TaskFilter::StatusOneOf(values) => {
                Condition::all().add(task::Column::Status.is_in(values.clone()))
            }
            TaskFilter::PriorityOneOf(values) => {
                Condition::all().add(task::Column::Priority.is_in(values.clone()))
            }
            TaskFilter::DueBetween { start, end } => {
                Condition::all().add(task::Column::DueDate.between(start.clone(), end.clone()))
            }
            TaskFilter::AssignedTo(user_id) => {
                Condition::all().add(task::Column::AssignedTo.eq(*user_id))
            }
        }
    }
}

/// Column a task listing can be sorted by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TaskSort {
    DueDate,
    Priority,
    Title,
    #[default]
    CreatedAt,
}

impl TaskSort {
    pub fn column(&self) -> task::Column {
        match self {
            TaskSort::DueDate => task::Column::DueDate,
            TaskSort::Priority => task::Column::Priority,
            TaskSort::Title => task::Column::Title,
            TaskSort::CreatedAt => task::Column::CreatedAt,
        }
    }
}

/// A complete table query: filters, sort key and pagination.
///
/// `page` is 1-based; out-of-range page sizes are clamped.
#[derive(Clone, Debug)]
pub struct TaskQuery {
    pub filters: Vec<TaskFilter>,
    pub sort: TaskSort,
    pub order: Order,
    pub page: u64,
    pub per_page: u64,
}

impl Default for TaskQuery {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            sort: TaskSort::default(),
            order: Order::Asc,
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TaskQuery {
    /// Combine all filters into one conjunction. No filters means an
    /// empty condition that matches every row.
    pub fn condition(&self) -> Condition {
        self.filters
            .iter()
            .fold(Condition::all(), |acc, f| acc.add(f.to_condition()))
    }

    /// Page size clamped into `[1, MAX_PAGE_SIZE]`.
    pub fn page_size(&self) -> u64 {
        self.per_page.clamp(1, MAX_PAGE_SIZE)
    }

    /// Zero-based page index for the paginator.
    pub fn page_index(&self) -> u64 {
        self.page.saturating_sub(1)
    }
}
