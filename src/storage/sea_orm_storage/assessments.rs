//! 测评存储操作

use super::SeaOrmStorage;
use crate::entity::assessments::{ActiveModel, Column, Entity as Assessments};
use crate::errors::{GradeSmartError, Result};
use crate::models::{
    PaginationInfo,
    assessments::{
        entities::Assessment,
        requests::{AssessmentListQuery, CreateAssessmentRequest},
        responses::{AssessmentListItem, AssessmentListResponse},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建测评
    ///
    /// 调用方（服务层）保证 criteria 已填充并归一化。
    pub async fn create_assessment_impl(
        &self,
        created_by: i64,
        req: CreateAssessmentRequest,
    ) -> Result<Assessment> {
        let criteria = req.criteria.ok_or_else(|| {
            GradeSmartError::validation("assessment criteria must be resolved before insert")
        })?;
        let criteria_json = serde_json::to_string(&criteria)?;

        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            created_by: Set(created_by),
            title: Set(req.title),
            description: Set(req.description),
            instructions: Set(req.instructions),
            assessment_type: Set(req.assessment_type.to_string()),
            criteria: Set(criteria_json),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| GradeSmartError::database_operation(format!("创建测评失败: {e}")))?;

        result.into_assessment()
    }

    /// 通过 ID 获取测评
    pub async fn get_assessment_by_id_impl(
        &self,
        assessment_id: i64,
    ) -> Result<Option<Assessment>> {
        let result = Assessments::find_by_id(assessment_id)
            .one(&self.db)
            .await
            .map_err(|e| GradeSmartError::database_operation(format!("查询测评失败: {e}")))?;

        result.map(|m| m.into_assessment()).transpose()
    }

    /// 列出测评（分页）
    pub async fn list_assessments_with_pagination_impl(
        &self,
        query: AssessmentListQuery,
    ) -> Result<AssessmentListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Assessments::find();

        // 类型筛选
        if let Some(assessment_type) = query.assessment_type {
            select = select.filter(Column::AssessmentType.eq(assessment_type.to_string()));
        }

        // 创建者筛选
        if let Some(created_by) = query.created_by {
            select = select.filter(Column::CreatedBy.eq(created_by));
        }

        // 排序
        select = select.order_by_desc(Column::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| GradeSmartError::database_operation(format!("查询测评总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| GradeSmartError::database_operation(format!("查询测评页数失败: {e}")))?;

        let assessments = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| GradeSmartError::database_operation(format!("查询测评列表失败: {e}")))?;

        let items = assessments
            .into_iter()
            .map(|m| {
                let assessment_type = m
                    .assessment_type
                    .parse()
                    .unwrap_or(crate::models::assessments::entities::AssessmentType::Text);
                AssessmentListItem {
                    id: m.id,
                    title: m.title,
                    description: m.description,
                    assessment_type,
                    created_by: m.created_by,
                    created_at: chrono::DateTime::from_timestamp(m.created_at, 0)
                        .map(|dt| dt.to_rfc3339())
                        .unwrap_or_default(),
                }
            })
            .collect();

        Ok(AssessmentListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 删除测评
    pub async fn delete_assessment_impl(&self, assessment_id: i64) -> Result<bool> {
        let result = Assessments::delete_by_id(assessment_id)
            .exec(&self.db)
            .await
            .map_err(|e| GradeSmartError::database_operation(format!("删除测评失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
