use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::SubmissionStatus;

/// 创建提交请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct CreateSubmissionRequest {
    pub assessment_id: i64,
    pub content: String,
    /// 手写类测评必填：已上传附件的下载 token
    pub file_path: Option<String>,
    /// 代码类测评的编程语言
    pub language: Option<String>,
}

/// 触发评分请求（HTTP body 形式，与路径参数二选一）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct EvaluateRequest {
    /// 兼容旧版前端的 camelCase 字段名
    #[serde(alias = "submissionId")]
    pub submission_id: i64,
}

/// 提交列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub assessment_id: Option<i64>,
    pub user_id: Option<i64>,
    pub status: Option<SubmissionStatus>,
}
