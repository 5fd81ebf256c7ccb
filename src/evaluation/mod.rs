//! 评分流水线
//!
//! - `scoring`: 权重归一化与加权总分聚合
//! - `feedback`: 确定性的模板化反馈生成
//! - `register`: 评分引擎插件注册表
//! - `engines`: 内置评分引擎（当前仅有模拟引擎）
//!
//! 评分引擎通过 [`Evaluator`] trait 接入：给定测评类型、提交内容与评分
//! 标准，返回各维度的原始得分。真实的 OCR / 代码沙箱 / 符号数学引擎
//! 以插件形式替换内置模拟引擎，无需改动提交生命周期控制器。

pub mod engines;
pub mod feedback;
pub mod register;
pub mod scoring;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::errors::{GradeSmartError, Result};
use crate::models::assessments::entities::{AssessmentCriteria, AssessmentType};

/// 评分引擎能力契约
///
/// 实现必须只依赖入参打分，不得产生副作用；生命周期控制器负责
/// 状态迁移与持久化。
#[async_trait]
pub trait Evaluator: Send + Sync {
    /// 对提交内容按启用的评分维度打分，返回 维度名 → 0-100 原始分。
    async fn evaluate(
        &self,
        assessment_type: AssessmentType,
        content: &str,
        criteria: &AssessmentCriteria,
    ) -> Result<HashMap<String, i32>>;
}

/// 按配置创建评分引擎实例
pub fn create_evaluator() -> Result<Arc<dyn Evaluator>> {
    let config = AppConfig::get();
    let engine = &config.evaluation.engine;

    match register::get_evaluator_plugin(engine) {
        Some(constructor) => {
            let evaluator = constructor()?;
            Ok(Arc::from(evaluator))
        }
        None => Err(GradeSmartError::evaluator_plugin_not_found(format!(
            "evaluator engine '{engine}' not found in registry"
        ))),
    }
}
