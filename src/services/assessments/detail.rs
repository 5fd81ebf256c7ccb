use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssessmentService;
use crate::models::assessments::responses::{AssessmentCreator, AssessmentDetail};
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_assessment(
    service: &AssessmentService,
    request: &HttpRequest,
    assessment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_assessment_by_id(assessment_id).await {
        Ok(Some(assessment)) => {
            // 获取创建者信息
            let creator = match storage.get_user_by_id(assessment.created_by).await {
                Ok(Some(user)) => Some(AssessmentCreator {
                    id: user.id,
                    username: user.username,
                    profile_name: Some(user.profile.profile_name),
                    avatar_url: user.profile.avatar_url,
                }),
                _ => None,
            };

            let detail = AssessmentDetail {
                assessment,
                creator,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "查询成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssessmentNotFound,
            "测评不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询测评失败: {e}"),
            )),
        ),
    }
}
