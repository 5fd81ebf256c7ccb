use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::{AssessmentCriteria, AssessmentType};

/// 创建测评请求
///
/// criteria 可省略，省略时按类型填充默认评分维度。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct CreateAssessmentRequest {
    pub title: String,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub assessment_type: AssessmentType,
    pub criteria: Option<AssessmentCriteria>,
}

/// 测评列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    /// 按类型筛选
    pub assessment_type: Option<AssessmentType>,
    /// 按创建者筛选
    pub created_by: Option<i64>,
}
