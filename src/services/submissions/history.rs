use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::submissions::responses::UserSubmissionHistoryResponse;
use crate::models::{ApiResponse, ErrorCode};

/// 某用户对某测评的提交历史
pub async fn list_user_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    assessment_id: i64,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_user_submissions(assessment_id, user_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserSubmissionHistoryResponse { items },
            "查询成功",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询提交历史失败: {e}"),
            )),
        ),
    }
}

/// 某用户对某测评的最新提交（轮询评分结果的入口）
pub async fn get_latest_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    assessment_id: i64,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_latest_submission(assessment_id, user_id).await {
        Ok(Some(submission)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "查询成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "尚无提交记录",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询最新提交失败: {e}"),
            )),
        ),
    }
}
