use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssessmentService;
use crate::evaluation::scoring::normalize_criteria;
use crate::models::assessments::entities::{AssessmentCriteria, CriterionSpec};
use crate::models::assessments::requests::CreateAssessmentRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_assessment(
    service: &AssessmentService,
    request: &HttpRequest,
    created_by: i64,
    mut req: CreateAssessmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if req.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "测评标题不能为空",
        )));
    }

    // 未提供 criteria 时按类型填充默认维度
    let mut criteria = match req.criteria.take() {
        Some(criteria) => {
            // criteria 标签必须与声明的测评类型一致
            if criteria.assessment_type() != req.assessment_type {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::CriteriaInvalid,
                    format!(
                        "criteria 类型 '{}' 与测评类型 '{}' 不一致",
                        criteria.assessment_type(),
                        req.assessment_type
                    ),
                )));
            }
            criteria
        }
        None => default_criteria(&req),
    };

    // 启用维度的权重归一化到总和 100
    if let Err(e) = normalize_criteria(&mut criteria) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CriteriaInvalid,
            e.message().to_string(),
        )));
    }
    req.criteria = Some(criteria);

    match storage.create_assessment(created_by, req).await {
        Ok(assessment) => {
            tracing::info!(
                "Assessment {} created by user {} (type: {})",
                assessment.id,
                created_by,
                assessment.assessment_type
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(assessment, "测评创建成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建测评失败: {e}"),
            )),
        ),
    }
}

/// 按类型构造默认 criteria 配置
fn default_criteria(req: &CreateAssessmentRequest) -> AssessmentCriteria {
    use crate::models::assessments::entities::AssessmentType;

    let criteria_list: Vec<CriterionSpec> =
        AssessmentCriteria::default_criteria_list(req.assessment_type);

    match req.assessment_type {
        AssessmentType::Text => AssessmentCriteria::Text { criteria_list },
        AssessmentType::Code => AssessmentCriteria::Code {
            criteria_list,
            language: None,
        },
        AssessmentType::Handwriting => AssessmentCriteria::Handwriting { criteria_list },
        AssessmentType::Math => AssessmentCriteria::Math {
            criteria_list,
            equation: String::new(),
            solution: None,
            problem_type: crate::models::assessments::entities::MathProblemType::Algebra,
            difficulty: crate::models::assessments::entities::Difficulty::Medium,
        },
    }
}
