pub use super::assignments::Entity as Assignments;
pub use super::audit_log::Entity as AuditLog;
pub use super::class_users::Entity as ClassUsers;
pub use super::classes::Entity as Classes;
pub use super::grades::Entity as Grades;
pub use super::submissions::Entity as Submissions;
