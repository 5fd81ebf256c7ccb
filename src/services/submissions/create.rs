use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::assessments::entities::AssessmentType;
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    user_id: i64,
    req: CreateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 所属测评必须存在
    let assessment = match storage.get_assessment_by_id(req.assessment_id).await {
        Ok(Some(assessment)) => assessment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssessmentNotFound,
                "测评不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询测评失败: {e}"),
                )),
            );
        }
    };

    // 2. 按测评类型校验提交内容
    if assessment.assessment_type == AssessmentType::Handwriting {
        // 手写类必须带附件
        let Some(ref file_path) = req.file_path else {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::MissingAttachment,
                "missing required attachment",
            )));
        };

        // 附件必须真实存在且属于提交者本人
        match storage.get_file_by_token(file_path).await {
            Ok(Some(file)) => {
                if file.user_id != user_id {
                    return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                        ErrorCode::Forbidden,
                        "无权使用此附件",
                    )));
                }
            }
            Ok(None) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::FileNotFound,
                    format!("附件不存在: {file_path}"),
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询附件失败: {e}"),
                    )),
                );
            }
        }
    } else if req.content.trim().is_empty() {
        // 其它类型必须有非空内容
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "提交内容不能为空",
        )));
    }

    // 3. 创建提交，初始状态 pending
    match storage.create_submission(user_id, req).await {
        Ok(submission) => {
            tracing::info!(
                "Submission {} created by user {} for assessment {}",
                submission.id,
                user_id,
                submission.assessment_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(submission, "提交成功，等待评分")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建提交失败: {e}"),
            )),
        ),
    }
}
