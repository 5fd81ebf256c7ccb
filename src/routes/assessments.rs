use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireJWT, RequireRole};
use crate::models::assessments::requests::{AssessmentListQuery, CreateAssessmentRequest};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::AssessmentService;

// 懒加载的全局 AssessmentService 实例
static ASSESSMENT_SERVICE: Lazy<AssessmentService> = Lazy::new(AssessmentService::new_lazy);

// 创建测评（仅教师/管理员）
pub async fn create_assessment(
    req: HttpRequest,
    body: web::Json<CreateAssessmentRequest>,
) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::extract_user_claims(&req) {
        Some(u) => u,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    ASSESSMENT_SERVICE
        .create_assessment(&req, user.id, body.into_inner())
        .await
}

// 列出测评
pub async fn list_assessments(
    req: HttpRequest,
    query: web::Query<AssessmentListQuery>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .list_assessments(&req, query.into_inner())
        .await
}

// 获取测评详情
pub async fn get_assessment(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .get_assessment(&req, path.into_inner())
        .await
}

// 删除测评
pub async fn delete_assessment(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    ASSESSMENT_SERVICE
        .delete_assessment(&req, path.into_inner(), user_id)
        .await
}

// 配置路由
pub fn configure_assessments_routes(cfg: &mut web::ServiceConfig) {
    // 读取接口：所有已认证用户
    cfg.service(
        web::scope("/api/v1/assessments")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_assessments))
            .route("/{id}", web::get().to(get_assessment)),
    );

    // 创作接口：仅教师/管理员（JWT 先验证，再做角色校验）
    cfg.service(
        web::scope("/api/v1/teacher/assessments")
            .wrap(RequireRole::new_any(UserRole::teacher_roles()))
            .wrap(middlewares::RequireJWT)
            .route("", web::post().to(create_assessment))
            .route("/{id}", web::delete().to(delete_assessment)),
    );
}
