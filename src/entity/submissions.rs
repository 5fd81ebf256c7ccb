//! 提交实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assessment_id: i64,
    pub user_id: i64,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub file_path: Option<String>,
    pub language: Option<String>,
    pub status: String,
    pub score: Option<i32>,
    /// 各维度得分（JSON map）
    #[sea_orm(column_type = "Text", nullable)]
    pub criteria_scores: Option<String>,
    /// 结构化反馈（JSON）
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub error_message: Option<String>,
    pub retry_count: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assessments::Entity",
        from = "Column::AssessmentId",
        to = "super::assessments::Column::Id"
    )]
    Assessment,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Creator,
}

impl Related<super::assessments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assessment.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_submission(self) -> crate::models::submissions::entities::Submission {
        use crate::models::submissions::entities::{Submission, SubmissionStatus};
        use chrono::{DateTime, Utc};

        // 损坏的 JSON 列按缺失处理，不让单条脏数据拖垮整个查询
        let criteria_scores = self
            .criteria_scores
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok());
        let feedback = self
            .feedback
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok());

        Submission {
            id: self.id,
            assessment_id: self.assessment_id,
            user_id: self.user_id,
            content: self.content,
            file_path: self.file_path,
            language: self.language,
            status: self
                .status
                .parse::<SubmissionStatus>()
                .unwrap_or(SubmissionStatus::Pending),
            score: self.score,
            criteria_scores,
            feedback,
            error_message: self.error_message,
            retry_count: self.retry_count,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
