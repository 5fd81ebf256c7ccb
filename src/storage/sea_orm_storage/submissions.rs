//! 提交存储操作
//!
//! 状态迁移全部采用带状态前置条件的条件更新（`WHERE status = …`），
//! rows_affected 为 0 即表示并发竞争失败或状态不符。这是"单个提交
//! 同一时刻至多一个评分流程"的互斥保证。

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{GradeSmartError, Result};
use crate::models::{
    PaginationInfo,
    submissions::{
        entities::{Feedback, Submission, SubmissionStatus},
        requests::{CreateSubmissionRequest, SubmissionListQuery},
        responses::{SubmissionCreator, SubmissionListItem, SubmissionListResponse},
    },
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ExprTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建提交（初始状态 pending）
    pub async fn create_submission_impl(
        &self,
        user_id: i64,
        req: CreateSubmissionRequest,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            assessment_id: Set(req.assessment_id),
            user_id: Set(user_id),
            content: Set(req.content),
            file_path: Set(req.file_path),
            language: Set(req.language),
            status: Set(SubmissionStatus::Pending.to_string()),
            retry_count: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| GradeSmartError::database_operation(format!("创建提交失败: {e}")))?;

        Ok(result.into_submission())
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| GradeSmartError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 列出提交（分页）
    pub async fn list_submissions_with_pagination_impl(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let page = std::cmp::Ord::max(query.page.unwrap_or(1), 1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Submissions::find();

        // 测评筛选
        if let Some(assessment_id) = query.assessment_id {
            select = select.filter(Column::AssessmentId.eq(assessment_id));
        }

        // 提交者筛选
        if let Some(user_id) = query.user_id {
            select = select.filter(Column::UserId.eq(user_id));
        }

        // 状态筛选
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        // 排序
        select = select.order_by_desc(Column::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| GradeSmartError::database_operation(format!("查询提交总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| GradeSmartError::database_operation(format!("查询提交页数失败: {e}")))?;

        let submissions = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| GradeSmartError::database_operation(format!("查询提交列表失败: {e}")))?;

        // 批量查询用户信息
        let user_ids: Vec<i64> = submissions
            .iter()
            .map(|s| s.user_id)
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        let users = Users::find()
            .filter(UserColumn::Id.is_in(user_ids))
            .all(&self.db)
            .await
            .map_err(|e| GradeSmartError::database_operation(format!("查询用户信息失败: {e}")))?;

        let user_map: HashMap<i64, _> = users.into_iter().map(|u| (u.id, u)).collect();

        // 组装 SubmissionListItem
        let items = submissions
            .into_iter()
            .map(|s| {
                let creator = user_map.get(&s.user_id);
                SubmissionListItem {
                    id: s.id,
                    assessment_id: s.assessment_id,
                    user_id: s.user_id,
                    creator: SubmissionCreator {
                        id: creator.map(|u| u.id).unwrap_or(s.user_id),
                        username: creator
                            .map(|u| u.username.clone())
                            .unwrap_or_else(|| "未知用户".to_string()),
                        profile_name: creator.and_then(|u| u.profile_name.clone()),
                    },
                    status: s
                        .status
                        .parse()
                        .unwrap_or(SubmissionStatus::Pending),
                    score: s.score,
                    retry_count: s.retry_count,
                    created_at: chrono::DateTime::from_timestamp(s.created_at, 0)
                        .map(|dt| dt.to_rfc3339())
                        .unwrap_or_default(),
                    updated_at: chrono::DateTime::from_timestamp(s.updated_at, 0)
                        .map(|dt| dt.to_rfc3339())
                        .unwrap_or_default(),
                }
            })
            .collect();

        Ok(SubmissionListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 某用户对某测评的提交历史
    pub async fn list_user_submissions_impl(
        &self,
        assessment_id: i64,
        user_id: i64,
    ) -> Result<Vec<Submission>> {
        let results = Submissions::find()
            .filter(Column::AssessmentId.eq(assessment_id))
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| GradeSmartError::database_operation(format!("查询提交历史失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 某用户对某测评的最新提交
    pub async fn get_latest_submission_impl(
        &self,
        assessment_id: i64,
        user_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssessmentId.eq(assessment_id))
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .one(&self.db)
            .await
            .map_err(|e| GradeSmartError::database_operation(format!("查询最新提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// pending → grading 条件迁移
    ///
    /// 只有当前状态为 pending 的行会被更新；并发的第二个调用者
    /// rows_affected 为 0，即评分互斥锁获取失败。
    pub async fn try_begin_grading_impl(&self, submission_id: i64) -> Result<bool> {
        let result = Submissions::update_many()
            .col_expr(
                Column::Status,
                Expr::value(SubmissionStatus::Grading.to_string()),
            )
            .col_expr(
                Column::UpdatedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(submission_id))
            .filter(Column::Status.eq(SubmissionStatus::Pending.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| GradeSmartError::database_operation(format!("更新提交状态失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// grading → completed 条件迁移
    ///
    /// 状态、总分、各维度得分和反馈在同一条 UPDATE 内落库：读者要么
    /// 看到完整的 completed，要么什么都看不到。
    pub async fn complete_submission_impl(
        &self,
        submission_id: i64,
        score: i32,
        criteria_scores: &HashMap<String, i32>,
        feedback: &Feedback,
    ) -> Result<bool> {
        let criteria_scores_json = serde_json::to_string(criteria_scores)?;
        let feedback_json = serde_json::to_string(feedback)?;

        let result = Submissions::update_many()
            .col_expr(
                Column::Status,
                Expr::value(SubmissionStatus::Completed.to_string()),
            )
            .col_expr(Column::Score, Expr::value(score))
            .col_expr(Column::CriteriaScores, Expr::value(criteria_scores_json))
            .col_expr(Column::Feedback, Expr::value(feedback_json))
            .col_expr(Column::ErrorMessage, Expr::value(Option::<String>::None))
            .col_expr(
                Column::UpdatedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(submission_id))
            .filter(Column::Status.eq(SubmissionStatus::Grading.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| GradeSmartError::database_operation(format!("写入评分结果失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// grading → failed 条件迁移，记录原因并累加重试计数
    pub async fn fail_submission_impl(
        &self,
        submission_id: i64,
        error_message: &str,
    ) -> Result<bool> {
        let result = Submissions::update_many()
            .col_expr(
                Column::Status,
                Expr::value(SubmissionStatus::Failed.to_string()),
            )
            .col_expr(Column::ErrorMessage, Expr::value(error_message.to_string()))
            .col_expr(
                Column::RetryCount,
                Expr::col(Column::RetryCount).add(1),
            )
            .col_expr(
                Column::UpdatedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(submission_id))
            .filter(Column::Status.eq(SubmissionStatus::Grading.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| {
                GradeSmartError::database_operation(format!("标记提交失败状态失败: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }

    /// failed → pending 条件迁移（显式重试）
    pub async fn requeue_submission_impl(&self, submission_id: i64) -> Result<bool> {
        let result = Submissions::update_many()
            .col_expr(
                Column::Status,
                Expr::value(SubmissionStatus::Pending.to_string()),
            )
            .col_expr(
                Column::UpdatedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(submission_id))
            .filter(Column::Status.eq(SubmissionStatus::Failed.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| GradeSmartError::database_operation(format!("重置提交状态失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 回收卡死的 grading 提交
    ///
    /// 评分进程崩溃或超时会把提交永远留在 grading；把超过阈值未更新的
    /// 行统一置为 failed，使其可以被重试。
    pub async fn fail_stale_grading_impl(&self, older_than_secs: u64) -> Result<u64> {
        let cutoff = chrono::Utc::now().timestamp() - older_than_secs as i64;

        let result = Submissions::update_many()
            .col_expr(
                Column::Status,
                Expr::value(SubmissionStatus::Failed.to_string()),
            )
            .col_expr(
                Column::ErrorMessage,
                Expr::value(format!(
                    "evaluation timed out after {older_than_secs} seconds"
                )),
            )
            .col_expr(
                Column::RetryCount,
                Expr::col(Column::RetryCount).add(1),
            )
            .col_expr(
                Column::UpdatedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Status.eq(SubmissionStatus::Grading.to_string()))
            .filter(Column::UpdatedAt.lt(cutoff))
            .exec(&self.db)
            .await
            .map_err(|e| GradeSmartError::database_operation(format!("回收卡死提交失败: {e}")))?;

        Ok(result.rows_affected)
    }
}
