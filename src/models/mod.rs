pub mod assignments;
pub mod audit;
pub mod class_users;
pub mod classes;
pub mod common;
pub mod grades;
pub mod submissions;

pub use common::error_code::ErrorCode;
pub use common::response::ApiResponse;
