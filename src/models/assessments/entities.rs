use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 测评类型
//
// 类型在创建后不可变更：criteria 的结构由类型决定，改类型会使已有配置失效。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub enum AssessmentType {
    Text,        // 文本/作文
    Code,        // 代码
    Handwriting, // 手写（图片附件）
    Math,        // 数学
}

impl AssessmentType {
    pub const TEXT: &'static str = "text";
    pub const CODE: &'static str = "code";
    pub const HANDWRITING: &'static str = "handwriting";
    pub const MATH: &'static str = "math";
}

impl<'de> Deserialize<'de> for AssessmentType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            AssessmentType::TEXT => Ok(AssessmentType::Text),
            AssessmentType::CODE => Ok(AssessmentType::Code),
            AssessmentType::HANDWRITING => Ok(AssessmentType::Handwriting),
            AssessmentType::MATH => Ok(AssessmentType::Math),
            _ => Err(serde::de::Error::custom(format!(
                "无效的测评类型: '{s}'. 支持的类型: text, code, handwriting, math"
            ))),
        }
    }
}

impl std::fmt::Display for AssessmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssessmentType::Text => write!(f, "{}", AssessmentType::TEXT),
            AssessmentType::Code => write!(f, "{}", AssessmentType::CODE),
            AssessmentType::Handwriting => write!(f, "{}", AssessmentType::HANDWRITING),
            AssessmentType::Math => write!(f, "{}", AssessmentType::MATH),
        }
    }
}

impl std::str::FromStr for AssessmentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(AssessmentType::Text),
            "code" => Ok(AssessmentType::Code),
            "handwriting" => Ok(AssessmentType::Handwriting),
            "math" => Ok(AssessmentType::Math),
            _ => Err(format!("Invalid assessment type: {s}")),
        }
    }
}

/// 单条评分维度
///
/// weight 为 0-100 的百分比；未显式给权重时（全部为 0）按启用数量均分。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct CriterionSpec {
    pub name: String,
    #[serde(default)]
    pub weight: i32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl CriterionSpec {
    pub fn new(name: impl Into<String>, weight: i32) -> Self {
        Self {
            name: name.into(),
            weight,
            enabled: true,
        }
    }
}

/// 数学题型
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub enum MathProblemType {
    Algebra,
    Geometry,
    Calculus,
    Statistics,
}

/// 难度档位
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// 各测评类型的评分标准配置
///
/// 按类型标签化的强类型联合；JSON 中携带 `type` 标签，服务层校验标签与
/// assessments.assessment_type 列一致。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub enum AssessmentCriteria {
    Text {
        criteria_list: Vec<CriterionSpec>,
    },
    Code {
        criteria_list: Vec<CriterionSpec>,
        /// 限定的编程语言，为空表示不限
        language: Option<String>,
    },
    Handwriting {
        criteria_list: Vec<CriterionSpec>,
    },
    Math {
        criteria_list: Vec<CriterionSpec>,
        equation: String,
        /// 参考答案，供评分引擎比对
        solution: Option<String>,
        problem_type: MathProblemType,
        difficulty: Difficulty,
    },
}

impl AssessmentCriteria {
    /// 配置所属的测评类型
    pub fn assessment_type(&self) -> AssessmentType {
        match self {
            AssessmentCriteria::Text { .. } => AssessmentType::Text,
            AssessmentCriteria::Code { .. } => AssessmentType::Code,
            AssessmentCriteria::Handwriting { .. } => AssessmentType::Handwriting,
            AssessmentCriteria::Math { .. } => AssessmentType::Math,
        }
    }

    pub fn criteria_list(&self) -> &[CriterionSpec] {
        match self {
            AssessmentCriteria::Text { criteria_list }
            | AssessmentCriteria::Code { criteria_list, .. }
            | AssessmentCriteria::Handwriting { criteria_list }
            | AssessmentCriteria::Math { criteria_list, .. } => criteria_list,
        }
    }

    pub fn criteria_list_mut(&mut self) -> &mut Vec<CriterionSpec> {
        match self {
            AssessmentCriteria::Text { criteria_list }
            | AssessmentCriteria::Code { criteria_list, .. }
            | AssessmentCriteria::Handwriting { criteria_list }
            | AssessmentCriteria::Math { criteria_list, .. } => criteria_list,
        }
    }

    /// 各类型的默认评分维度
    pub fn default_criteria_list(assessment_type: AssessmentType) -> Vec<CriterionSpec> {
        match assessment_type {
            AssessmentType::Text => vec![
                CriterionSpec::new("content_relevance", 40),
                CriterionSpec::new("grammar", 20),
                CriterionSpec::new("structure", 20),
                CriterionSpec::new("originality", 20),
            ],
            AssessmentType::Code => vec![
                CriterionSpec::new("correctness", 50),
                CriterionSpec::new("efficiency", 20),
                CriterionSpec::new("output_match", 20),
                CriterionSpec::new("edge_cases", 10),
            ],
            AssessmentType::Handwriting => vec![
                CriterionSpec::new("ocr_accuracy", 30),
                CriterionSpec::new("content", 50),
                CriterionSpec::new("grammar", 20),
            ],
            AssessmentType::Math => vec![
                CriterionSpec::new("correctness", 60),
                CriterionSpec::new("steps", 20),
                CriterionSpec::new("formatting", 20),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct Assessment {
    // 唯一 ID
    pub id: i64,
    // 标题
    pub title: String,
    // 描述
    pub description: Option<String>,
    // 给学生的说明
    pub instructions: Option<String>,
    // 测评类型（创建后不可变）
    pub assessment_type: AssessmentType,
    // 评分标准配置
    pub criteria: AssessmentCriteria,
    // 创建者 ID
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_criteria_weights_sum_to_100() {
        for ty in [
            AssessmentType::Text,
            AssessmentType::Code,
            AssessmentType::Handwriting,
            AssessmentType::Math,
        ] {
            let total: i32 = AssessmentCriteria::default_criteria_list(ty)
                .iter()
                .map(|c| c.weight)
                .sum();
            assert_eq!(total, 100, "defaults for {ty} must total 100");
        }
    }

    #[test]
    fn test_criteria_tag_round_trip() {
        let criteria = AssessmentCriteria::Math {
            criteria_list: AssessmentCriteria::default_criteria_list(AssessmentType::Math),
            equation: "2x + 3 = 7".to_string(),
            solution: Some("x = 2".to_string()),
            problem_type: MathProblemType::Algebra,
            difficulty: Difficulty::Easy,
        };

        let json = serde_json::to_string(&criteria).unwrap();
        assert!(json.contains("\"type\":\"math\""));

        let back: AssessmentCriteria = serde_json::from_str(&json).unwrap();
        assert_eq!(back, criteria);
        assert_eq!(back.assessment_type(), AssessmentType::Math);
    }

    #[test]
    fn test_criterion_defaults_enabled() {
        let spec: CriterionSpec = serde_json::from_str(r#"{"name":"grammar"}"#).unwrap();
        assert!(spec.enabled);
        assert_eq!(spec.weight, 0);
    }
}
