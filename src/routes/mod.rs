pub mod assessments;

pub mod auth;

pub mod files;

pub mod submissions;

pub use assessments::configure_assessments_routes;
pub use auth::configure_auth_routes;
pub use files::configure_file_routes;
pub use submissions::configure_submissions_routes;
