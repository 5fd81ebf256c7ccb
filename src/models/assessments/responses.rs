use serde::Serialize;
use ts_rs::TS;

use crate::models::PaginationInfo;
use crate::models::assessments::entities::{Assessment, AssessmentType};

/// 测评创建者信息
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentCreator {
    pub id: i64,
    pub username: String,
    pub profile_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// 测评详情（含创建者）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentDetail {
    #[serde(flatten)]
    pub assessment: Assessment,
    pub creator: Option<AssessmentCreator>,
}

/// 测评列表项
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentListItem {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub assessment_type: AssessmentType,
    pub created_by: i64,
    pub created_at: String,
}

/// 测评列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentListResponse {
    pub items: Vec<AssessmentListItem>,
    pub pagination: PaginationInfo,
}
