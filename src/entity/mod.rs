pub mod prelude;

pub mod assignments;
pub mod audit_log;
pub mod class_users;
pub mod classes;
pub mod grades;
pub mod submissions;
