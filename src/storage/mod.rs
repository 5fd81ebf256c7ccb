use std::collections::HashMap;
use std::sync::Arc;

use crate::models::{
    assessments::{
        entities::Assessment,
        requests::{AssessmentListQuery, CreateAssessmentRequest},
        responses::AssessmentListResponse,
    },
    files::entities::File,
    submissions::{
        entities::{Feedback, Submission},
        requests::{CreateSubmissionRequest, SubmissionListQuery},
        responses::SubmissionListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateProfileRequest},
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 更新用户资料
    async fn update_profile(
        &self,
        id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Option<User>>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 测评管理方法
    // 创建测评（criteria 必须已归一化）
    async fn create_assessment(
        &self,
        created_by: i64,
        req: CreateAssessmentRequest,
    ) -> Result<Assessment>;
    // 通过ID获取测评
    async fn get_assessment_by_id(&self, assessment_id: i64) -> Result<Option<Assessment>>;
    // 列出测评
    async fn list_assessments_with_pagination(
        &self,
        query: AssessmentListQuery,
    ) -> Result<AssessmentListResponse>;
    // 删除测评
    async fn delete_assessment(&self, assessment_id: i64) -> Result<bool>;

    /// 提交管理方法
    // 创建提交（初始状态 pending）
    async fn create_submission(
        &self,
        user_id: i64,
        req: CreateSubmissionRequest,
    ) -> Result<Submission>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    // 列出提交（分页）
    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse>;
    // 某用户对某测评的提交历史
    async fn list_user_submissions(
        &self,
        assessment_id: i64,
        user_id: i64,
    ) -> Result<Vec<Submission>>;
    // 某用户对某测评的最新提交
    async fn get_latest_submission(
        &self,
        assessment_id: i64,
        user_id: i64,
    ) -> Result<Option<Submission>>;

    /// 提交状态迁移（条件更新，每个方法只在当前状态匹配时生效）
    // pending → grading；返回 false 表示已被并发调用者抢先或状态不符
    async fn try_begin_grading(&self, submission_id: i64) -> Result<bool>;
    // grading → completed，总分/各维度得分/反馈随状态一次写入
    async fn complete_submission(
        &self,
        submission_id: i64,
        score: i32,
        criteria_scores: &HashMap<String, i32>,
        feedback: &Feedback,
    ) -> Result<bool>;
    // grading → failed，记录失败原因并累加重试计数
    async fn fail_submission(&self, submission_id: i64, error_message: &str) -> Result<bool>;
    // failed → pending，显式重试
    async fn requeue_submission(&self, submission_id: i64) -> Result<bool>;
    // 将卡在 grading 超过阈值的提交置为 failed，返回处理数量
    async fn fail_stale_grading(&self, older_than_secs: u64) -> Result<u64>;

    /// 文件管理方法
    // 登记上传文件
    async fn upload_file(
        &self,
        download_token: &str,
        file_name: &str,
        file_size: &i64,
        file_type: &str,
        user_id: i64,
    ) -> Result<File>;
    // 通过下载 token 获取文件信息
    async fn get_file_by_token(&self, download_token: &str) -> Result<Option<File>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
