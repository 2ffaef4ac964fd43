pub mod note;
pub mod project;
pub mod subtask;
pub mod task;
pub mod team;
pub mod team_member;
pub mod user;

pub use note::Entity as Note;
pub use project::Entity as Project;
pub use subtask::Entity as Subtask;
pub use task::Entity as Task;
pub use team::Entity as Team;
pub use team_member::Entity as TeamMember;
pub use user::Entity as User;
