use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssessmentService;
use crate::models::assessments::requests::AssessmentListQuery;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_assessments(
    service: &AssessmentService,
    request: &HttpRequest,
    query: AssessmentListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_assessments_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询测评列表失败: {e}"),
            )),
        ),
    }
}
