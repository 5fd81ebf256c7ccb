use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit, RequireJWT};
use crate::models::submissions::requests::{
    CreateSubmissionRequest, EvaluateRequest, SubmissionListQuery,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::SubmissionService;

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// 列出提交
pub async fn list_submissions(
    req: HttpRequest,
    query: web::Query<SubmissionListQuery>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_submissions(&req, query.into_inner())
        .await
}

// 创建提交
pub async fn create_submission(
    req: HttpRequest,
    body: web::Json<CreateSubmissionRequest>,
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

    SUBMISSION_SERVICE
        .create_submission(&req, user.id, body.into_inner())
        .await
}

// 获取提交详情
pub async fn get_submission(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .get_submission(&req, path.into_inner())
        .await
}

// 触发评分
pub async fn evaluate_submission(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .evaluate_submission(&req, path.into_inner())
        .await
}

// 触发评分（body 形式，兼容外部评测触发器；submissionId 缺失时返回 400）
pub async fn evaluate_submission_by_body(
    req: HttpRequest,
    body: web::Json<EvaluateRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .evaluate_submission(&req, body.into_inner().submission_id)
        .await
}

// 重试失败的评分
pub async fn retry_submission(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .retry_submission(&req, path.into_inner())
        .await
}

// 获取我的最新提交
pub async fn get_my_latest_submission(
    req: HttpRequest,
    path: web::Path<i64>, // assessment_id
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

    SUBMISSION_SERVICE
        .get_latest_submission(&req, path.into_inner(), user_id)
        .await
}

// 获取我的提交历史
pub async fn list_my_submissions(
    req: HttpRequest,
    path: web::Path<i64>, // assessment_id
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

    SUBMISSION_SERVICE
        .list_user_submissions(&req, path.into_inner(), user_id)
        .await
}

// 配置路由
pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_submissions))
            .route("", web::post().to(create_submission))
            // 字面量路径须先于 /{id} 注册
            .service(
                web::resource("/evaluate")
                    .wrap(RateLimit::evaluate())
                    .route(web::post().to(evaluate_submission_by_body)),
            )
            .route("/{id}", web::get().to(get_submission))
            .service(
                web::resource("/{id}/evaluate")
                    .wrap(RateLimit::evaluate())
                    .route(web::post().to(evaluate_submission)),
            )
            .route("/{id}/retry", web::post().to(retry_submission)),
    );

    // 测评相关的提交路由
    cfg.service(
        web::scope("/api/v1/assessments/{assessment_id}/submissions")
            .wrap(middlewares::RequireJWT)
            .route("/my/latest", web::get().to(get_my_latest_submission))
            .route("/my", web::get().to(list_my_submissions)),
    );
}
