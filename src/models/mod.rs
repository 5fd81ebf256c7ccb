pub mod assessments;
pub mod auth;
pub mod common;
pub mod files;
pub mod submissions;
pub mod users;

pub use common::pagination::PaginationInfo;
pub use common::response::ApiResponse;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 应用启动时间（用于运行时长统计）
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码目录
///
/// 0 表示成功；1xxx 通用/认证，2xxx 测评，3xxx 提交与评分，4xxx 文件。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,
    RateLimitExceeded = 1006,

    AuthFailed = 1101,
    RegisterFailed = 1102,
    UserNameInvalid = 1103,
    UserEmailInvalid = 1104,
    UserNameAlreadyExists = 1105,
    UserEmailAlreadyExists = 1106,
    PasswordTooWeak = 1107,

    AssessmentNotFound = 2001,
    AssessmentPermissionDenied = 2002,
    CriteriaInvalid = 2003,

    SubmissionNotFound = 3001,
    SubmissionNotPending = 3002,
    SubmissionNotFailed = 3003,
    MissingAttachment = 3004,
    EvaluationFailed = 3005,

    FileNotFound = 4001,
    FileUploadFailed = 4002,
    FileTypeNotAllowed = 4003,
    FileSizeExceeded = 4004,
    MultifileUploadNotAllowed = 4005,
}
