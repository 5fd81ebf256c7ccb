pub mod assessments;
pub mod auth;
pub mod files;
pub mod submissions;

pub use assessments::AssessmentService;
pub use auth::AuthService;
pub use files::FileService;
pub use submissions::SubmissionService;
