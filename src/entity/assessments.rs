//! 测评实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assessments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub created_by: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub instructions: Option<String>,
    pub assessment_type: String,
    /// 评分标准配置（JSON 序列化的 AssessmentCriteria）
    #[sea_orm(column_type = "Text")]
    pub criteria: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id"
    )]
    Creator,
    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_assessment(
        self,
    ) -> crate::errors::Result<crate::models::assessments::entities::Assessment> {
        use crate::errors::GradeSmartError;
        use crate::models::assessments::entities::{Assessment, AssessmentType};
        use chrono::{DateTime, Utc};

        let assessment_type = self
            .assessment_type
            .parse::<AssessmentType>()
            .map_err(GradeSmartError::serialization)?;

        let criteria = serde_json::from_str(&self.criteria)?;

        Ok(Assessment {
            id: self.id,
            title: self.title,
            description: self.description,
            instructions: self.instructions,
            assessment_type,
            criteria,
            created_by: self.created_by,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        })
    }
}
