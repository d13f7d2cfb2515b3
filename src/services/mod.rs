pub mod assignments;
pub mod audit;
pub mod deadline;
pub mod grades;
pub mod submissions;

pub use assignments::AssignmentService;
pub use audit::AuditRecorder;
pub use deadline::DeadlineService;
pub use grades::GradeService;
pub use submissions::SubmissionService;
