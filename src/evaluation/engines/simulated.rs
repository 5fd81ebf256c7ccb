//! 模拟评分引擎
//!
//! 真实 AI 评分（OCR、代码沙箱、符号数学验证）接入前的占位实现。
//! 按维度名在固定区间内随机打分；数学类提交若答案与参考答案一致，
//! correctness 维度直接给满分。

use std::collections::HashMap;

use async_trait::async_trait;
use rand::Rng;
use tracing::debug;

use crate::declare_evaluator_plugin;
use crate::errors::Result;
use crate::evaluation::Evaluator;
use crate::models::assessments::entities::{AssessmentCriteria, AssessmentType};
use crate::models::submissions::entities::MathSolutionContent;

declare_evaluator_plugin!("simulated", SimulatedEvaluator);

pub struct SimulatedEvaluator;

impl SimulatedEvaluator {
    pub fn new() -> std::result::Result<Self, String> {
        Ok(Self)
    }

    /// 各已知维度的模拟分数区间（闭区间）
    fn score_range(criterion: &str) -> (i32, i32) {
        match criterion {
            "correctness" => (70, 100),
            "steps" => (60, 100),
            "formatting" => (80, 100),
            _ => (60, 100),
        }
    }

    /// 数学类提交：答案与参考答案做归一化比对
    fn math_solution_matches(content: &str, criteria: &AssessmentCriteria) -> bool {
        let AssessmentCriteria::Math {
            solution: Some(expected),
            ..
        } = criteria
        else {
            return false;
        };

        let Ok(parsed) = serde_json::from_str::<MathSolutionContent>(content) else {
            return false;
        };

        normalize_answer(&parsed.solution) == normalize_answer(expected)
    }
}

/// 去除空白并统一大小写，容忍 "x = 2" 与 "X=2" 这类书写差异
fn normalize_answer(answer: &str) -> String {
    answer
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

#[async_trait]
impl Evaluator for SimulatedEvaluator {
    async fn evaluate(
        &self,
        assessment_type: AssessmentType,
        content: &str,
        criteria: &AssessmentCriteria,
    ) -> Result<HashMap<String, i32>> {
        // 模拟模型推理耗时
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;

        let solution_matches = assessment_type == AssessmentType::Math
            && Self::math_solution_matches(content, criteria);

        let mut scores = HashMap::new();
        let mut rng = rand::rng();

        for spec in criteria.criteria_list().iter().filter(|c| c.enabled) {
            let score = if solution_matches && spec.name == "correctness" {
                100
            } else {
                let (low, high) = Self::score_range(&spec.name);
                rng.random_range(low..=high)
            };
            scores.insert(spec.name.clone(), score);
        }

        debug!(
            "Simulated evaluation produced {} criterion scores for type {}",
            scores.len(),
            assessment_type
        );

        Ok(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessments::entities::{Difficulty, MathProblemType};

    fn math_criteria(solution: Option<&str>) -> AssessmentCriteria {
        AssessmentCriteria::Math {
            criteria_list: AssessmentCriteria::default_criteria_list(AssessmentType::Math),
            equation: "2x + 3 = 7".to_string(),
            solution: solution.map(|s| s.to_string()),
            problem_type: MathProblemType::Algebra,
            difficulty: Difficulty::Easy,
        }
    }

    #[tokio::test]
    async fn test_scores_cover_enabled_criteria_and_range() {
        let evaluator = SimulatedEvaluator::new().unwrap();
        let criteria = math_criteria(None);
        let scores = evaluator
            .evaluate(AssessmentType::Math, r#"{"solution":"x=3"}"#, &criteria)
            .await
            .unwrap();

        assert_eq!(scores.len(), 3);
        for name in ["correctness", "steps", "formatting"] {
            let score = scores[name];
            assert!((0..=100).contains(&score), "{name} score out of range");
        }
    }

    #[tokio::test]
    async fn test_disabled_criteria_not_scored() {
        let evaluator = SimulatedEvaluator::new().unwrap();
        let mut criteria = math_criteria(None);
        criteria.criteria_list_mut()[1].enabled = false; // steps

        let scores = evaluator
            .evaluate(AssessmentType::Math, r#"{"solution":"x=3"}"#, &criteria)
            .await
            .unwrap();

        assert_eq!(scores.len(), 2);
        assert!(!scores.contains_key("steps"));
    }

    #[tokio::test]
    async fn test_matching_solution_maxes_correctness() {
        let evaluator = SimulatedEvaluator::new().unwrap();
        let criteria = math_criteria(Some("x = 2"));
        let scores = evaluator
            .evaluate(
                AssessmentType::Math,
                r#"{"solution":"X=2","work_steps":"subtract 3, divide by 2"}"#,
                &criteria,
            )
            .await
            .unwrap();

        assert_eq!(scores["correctness"], 100);
    }

    #[test]
    fn test_normalize_answer() {
        assert_eq!(normalize_answer("x = 2"), "x=2");
        assert_eq!(normalize_answer("X=2"), "x=2");
        assert_ne!(normalize_answer("x=2"), normalize_answer("x=3"));
    }
}
