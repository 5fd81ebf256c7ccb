use std::collections::HashMap;

use serde::Serialize;
use ts_rs::TS;

use crate::models::PaginationInfo;
use crate::models::submissions::entities::{Feedback, Submission, SubmissionStatus};

/// 提交者信息
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionCreator {
    pub id: i64,
    pub username: String,
    pub profile_name: Option<String>,
}

/// 提交关联的测评信息
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionAssessmentInfo {
    pub id: i64,
    pub title: String,
    pub assessment_type: String,
}

/// 提交详情响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionDetail {
    #[serde(flatten)]
    pub submission: Submission,
    pub assessment: Option<SubmissionAssessmentInfo>,
}

/// 提交列表项
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListItem {
    pub id: i64,
    pub assessment_id: i64,
    pub user_id: i64,
    pub creator: SubmissionCreator,
    pub status: SubmissionStatus,
    pub score: Option<i32>,
    pub retry_count: i32,
    pub created_at: String,
    pub updated_at: String,
}

/// 提交列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListResponse {
    pub items: Vec<SubmissionListItem>,
    pub pagination: PaginationInfo,
}

/// 评分完成响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct EvaluationResponse {
    pub submission_id: i64,
    pub status: SubmissionStatus,
    pub score: i32,
    pub criteria_scores: HashMap<String, i32>,
    pub feedback: Feedback,
}

/// 用户提交历史响应（无分页）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct UserSubmissionHistoryResponse {
    pub items: Vec<Submission>,
}
