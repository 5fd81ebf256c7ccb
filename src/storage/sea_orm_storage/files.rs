//! 文件存储操作

use super::SeaOrmStorage;
use crate::entity::files::{ActiveModel, Entity as Files};
use crate::errors::{GradeSmartError, Result};
use crate::models::files::entities::File;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

impl SeaOrmStorage {
    /// 登记上传文件
    pub async fn upload_file_impl(
        &self,
        download_token: &str,
        file_name: &str,
        file_size: &i64,
        file_type: &str,
        user_id: i64,
    ) -> Result<File> {
        let model = ActiveModel {
            download_token: Set(download_token.to_string()),
            file_name: Set(file_name.to_string()),
            file_size: Set(*file_size),
            file_type: Set(file_type.to_string()),
            user_id: Set(user_id),
            uploaded_at: Set(chrono::Utc::now().timestamp()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| GradeSmartError::database_operation(format!("登记上传文件失败: {e}")))?;

        Ok(result.into_file())
    }

    /// 通过下载 token 获取文件信息
    pub async fn get_file_by_token_impl(&self, download_token: &str) -> Result<Option<File>> {
        let result = Files::find_by_id(download_token.to_string())
            .one(&self.db)
            .await
            .map_err(|e| GradeSmartError::database_operation(format!("查询文件失败: {e}")))?;

        Ok(result.map(|m| m.into_file()))
    }
}
