use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::middlewares::RequireJWT;
use crate::models::submissions::responses::{SubmissionAssessmentInfo, SubmissionDetail};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 获取当前用户信息
    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) => {
            // 权限验证：提交者本人、教师或管理员
            let is_teacher_or_admin = matches!(
                current_user.role,
                UserRole::Teacher | UserRole::Admin
            );
            if submission.user_id != current_user.id && !is_teacher_or_admin {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "没有查看该提交的权限",
                )));
            }

            // 附带所属测评的简要信息
            let assessment = match storage.get_assessment_by_id(submission.assessment_id).await {
                Ok(Some(assessment)) => Some(SubmissionAssessmentInfo {
                    id: assessment.id,
                    title: assessment.title,
                    assessment_type: assessment.assessment_type.to_string(),
                }),
                _ => None,
            };

            let detail = SubmissionDetail {
                submission,
                assessment,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "查询成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "提交不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询提交失败: {e}"),
            )),
        ),
    }
}
