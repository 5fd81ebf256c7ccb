pub mod create;
pub mod delete;
pub mod detail;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assessments::requests::{AssessmentListQuery, CreateAssessmentRequest};
use crate::storage::Storage;

pub struct AssessmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssessmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// 创建测评
    pub async fn create_assessment(
        &self,
        request: &HttpRequest,
        created_by: i64,
        req: CreateAssessmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assessment(self, request, created_by, req).await
    }

    /// 获取测评详情
    pub async fn get_assessment(
        &self,
        request: &HttpRequest,
        assessment_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_assessment(self, request, assessment_id).await
    }

    /// 列出测评
    pub async fn list_assessments(
        &self,
        request: &HttpRequest,
        query: AssessmentListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_assessments(self, request, query).await
    }

    /// 删除测评
    pub async fn delete_assessment(
        &self,
        request: &HttpRequest,
        assessment_id: i64,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_assessment(self, request, assessment_id, user_id).await
    }
}
