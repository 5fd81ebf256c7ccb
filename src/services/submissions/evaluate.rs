//! 提交生命周期控制器
//!
//! 负责 pending → grading → completed / failed 的状态推进：
//!
//! 1. `try_begin_grading` 的条件更新充当互斥锁，同一提交的并发评分
//!    请求只有一个能进入 grading，其余拿到冲突响应；
//! 2. 加载所属测评的评分标准，调用可插拔评分引擎得到各维度原始分；
//! 3. 权重聚合出总分，生成模板化反馈；
//! 4. 状态与评分数据在一条 UPDATE 内写入 completed；
//! 5. 任何一步失败都把提交置为 failed 并记录原因，不留下卡死的
//!    grading 行。

use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::SubmissionService;
use crate::errors::{GradeSmartError, Result};
use crate::evaluation::{self, feedback::build_feedback, scoring};
use crate::models::assessments::entities::Assessment;
use crate::models::submissions::entities::{Submission, SubmissionStatus};
use crate::models::submissions::responses::EvaluationResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub async fn evaluate_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 提交必须存在（不存在时不做任何状态变更）
    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "提交不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询提交失败: {e}"),
                )),
            );
        }
    };

    // 2. 获取评分互斥锁：pending → grading 条件更新
    //    并发的第二个调用者在这里拿到 false，不会重复评分
    match storage.try_begin_grading(submission_id).await {
        Ok(true) => {}
        Ok(false) => {
            let status = storage
                .get_submission_by_id(submission_id)
                .await
                .ok()
                .flatten()
                .map(|s| s.status)
                .unwrap_or(SubmissionStatus::Pending);
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotPending,
                format!("提交当前状态为 {status}，无法开始评分"),
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("更新提交状态失败: {e}"),
                )),
            );
        }
    }

    // 3. 此刻起提交处于 grading，任何失败都必须转入 failed
    match run_evaluation_pipeline(&storage, &submission).await {
        Ok(response) => {
            tracing::info!(
                "Submission {} evaluated: score {}",
                submission_id,
                response.score
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "评分完成")))
        }
        Err(e) => {
            tracing::error!("Evaluation failed for submission {}: {}", submission_id, e);

            if let Err(mark_err) = storage
                .fail_submission(submission_id, e.message())
                .await
            {
                // 标记失败也失败了，只能留给回收任务兜底
                tracing::error!(
                    "Failed to mark submission {} as failed: {}",
                    submission_id,
                    mark_err
                );
            }

            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::EvaluationFailed,
                    format!("评分失败: {}", e.message()),
                )),
            )
        }
    }
}

/// 评分流水线：引擎打分 → 权重聚合 → 反馈生成 → 原子落库
async fn run_evaluation_pipeline(
    storage: &Arc<dyn Storage>,
    submission: &Submission,
) -> Result<EvaluationResponse> {
    // 加载所属测评的评分标准
    let assessment: Assessment = storage
        .get_assessment_by_id(submission.assessment_id)
        .await?
        .ok_or_else(|| {
            GradeSmartError::not_found(format!(
                "assessment {} for submission {} does not exist",
                submission.assessment_id, submission.id
            ))
        })?;

    // 调用评分引擎
    let evaluator = evaluation::create_evaluator()?;
    let criteria_scores: HashMap<String, i32> = evaluator
        .evaluate(
            assessment.assessment_type,
            &submission.content,
            &assessment.criteria,
        )
        .await?;

    // 权重聚合
    let weights = scoring::normalize_weights(assessment.criteria.criteria_list())?;
    let score = scoring::weighted_score(&criteria_scores, &weights)?;

    // 按权重表顺序整理各维度得分，保证反馈文本稳定
    let ordered_scores: Vec<(String, i32)> = weights
        .iter()
        .map(|(name, _)| (name.clone(), criteria_scores[name]))
        .collect();
    let feedback = build_feedback(score, &ordered_scores, assessment.assessment_type);

    // grading → completed，状态与数据一次写入
    let completed = storage
        .complete_submission(submission.id, score, &criteria_scores, &feedback)
        .await?;

    if !completed {
        // 评分期间被回收任务标记为超时失败
        return Err(GradeSmartError::submission_state(format!(
            "submission {} left grading state during evaluation",
            submission.id
        )));
    }

    Ok(EvaluationResponse {
        submission_id: submission.id,
        status: SubmissionStatus::Completed,
        score,
        criteria_scores,
        feedback,
    })
}

/// 重试失败的评分：failed → pending 条件更新
///
/// 只负责把提交放回待评分队列，由调用方重新触发 evaluate。
pub async fn retry_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_submission_by_id(submission_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "提交不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询提交失败: {e}"),
                )),
            );
        }
    }

    match storage.requeue_submission(submission_id).await {
        Ok(true) => {
            tracing::info!("Submission {} requeued for evaluation", submission_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("提交已重新进入待评分队列")))
        }
        Ok(false) => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFailed,
            "只有评分失败的提交可以重试",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("重置提交状态失败: {e}"),
            )),
        ),
    }
}
