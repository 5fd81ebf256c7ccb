//! 权重归一化与加权总分聚合

use std::collections::HashMap;

use crate::errors::{GradeSmartError, Result};
use crate::models::assessments::entities::{AssessmentCriteria, CriterionSpec};

/// 归一化评分权重
///
/// 仅启用的维度参与。全部权重为 0 视为未显式指定，按数量均分 100；
/// 显式权重之和不为 100 时按比例缩放。两种情况的取整误差都由最后
/// 一个维度吸收，保证总和恰好为 100。
pub fn normalize_weights(criteria: &[CriterionSpec]) -> Result<Vec<(String, i32)>> {
    let enabled: Vec<&CriterionSpec> = criteria.iter().filter(|c| c.enabled).collect();

    if enabled.is_empty() {
        return Err(GradeSmartError::validation(
            "at least one enabled criterion is required",
        ));
    }

    let mut seen = std::collections::HashSet::new();
    for spec in &enabled {
        if spec.name.trim().is_empty() {
            return Err(GradeSmartError::validation("criterion name must not be empty"));
        }
        if !seen.insert(spec.name.as_str()) {
            return Err(GradeSmartError::validation(format!(
                "duplicate criterion name: '{}'",
                spec.name
            )));
        }
        if spec.weight < 0 || spec.weight > 100 {
            return Err(GradeSmartError::validation(format!(
                "criterion '{}' weight {} is out of range [0, 100]",
                spec.name, spec.weight
            )));
        }
    }

    let total: i64 = enabled.iter().map(|c| c.weight as i64).sum();
    let count = enabled.len();

    let mut weights: Vec<(String, i32)> = if total == 0 {
        // 未显式指定权重：均分
        let base = (100 / count) as i32;
        enabled
            .iter()
            .map(|c| (c.name.clone(), base))
            .collect()
    } else {
        // 按比例缩放到 100
        enabled
            .iter()
            .map(|c| {
                let scaled = (c.weight as f64 * 100.0 / total as f64).round() as i32;
                (c.name.clone(), scaled)
            })
            .collect()
    };

    // 最后一项吸收取整误差
    let sum_except_last: i32 = weights[..count - 1].iter().map(|(_, w)| *w).sum();
    weights[count - 1].1 = 100 - sum_except_last;

    if weights[count - 1].1 < 0 {
        return Err(GradeSmartError::validation(
            "criterion weights are too skewed to normalize",
        ));
    }

    Ok(weights)
}

/// 按归一化权重计算加权总分
///
/// `round(Σ raw · weight / 100)`。权重表中的每个维度都必须有原始分，
/// 且原始分必须落在 [0, 100]。
pub fn weighted_score(
    criteria_scores: &HashMap<String, i32>,
    weights: &[(String, i32)],
) -> Result<i32> {
    let mut total = 0.0f64;

    for (name, weight) in weights {
        let raw = criteria_scores.get(name).ok_or_else(|| {
            GradeSmartError::validation(format!("missing score for criterion '{name}'"))
        })?;

        if *raw < 0 || *raw > 100 {
            return Err(GradeSmartError::validation(format!(
                "criterion '{name}' score {raw} is out of range [0, 100]"
            )));
        }

        total += *raw as f64 * *weight as f64 / 100.0;
    }

    Ok((total.round() as i32).clamp(0, 100))
}

/// 归一化测评配置中启用维度的权重（创建测评时调用）
///
/// 原地把启用项的权重改写为归一化结果，禁用项保持原样。
pub fn normalize_criteria(criteria: &mut AssessmentCriteria) -> Result<()> {
    let normalized = normalize_weights(criteria.criteria_list())?;
    let lookup: HashMap<&str, i32> = normalized.iter().map(|(n, w)| (n.as_str(), *w)).collect();

    for spec in criteria.criteria_list_mut().iter_mut() {
        if spec.enabled
            && let Some(weight) = lookup.get(spec.name.as_str())
        {
            spec.weight = *weight;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, weight: i32, enabled: bool) -> CriterionSpec {
        CriterionSpec {
            name: name.to_string(),
            weight,
            enabled,
        }
    }

    #[test]
    fn test_even_split_sums_to_100() {
        // 1 到 10 个维度，均分后总和必须恰好为 100
        for n in 1..=10 {
            let criteria: Vec<CriterionSpec> = (0..n)
                .map(|i| spec(&format!("c{i}"), 0, true))
                .collect();
            let weights = normalize_weights(&criteria).unwrap();
            let total: i32 = weights.iter().map(|(_, w)| *w).sum();
            assert_eq!(total, 100, "{n} criteria must sum to 100");
        }
    }

    #[test]
    fn test_three_way_split_absorbs_remainder() {
        let criteria = vec![spec("a", 0, true), spec("b", 0, true), spec("c", 0, true)];
        let weights = normalize_weights(&criteria).unwrap();
        assert_eq!(weights[0].1, 33);
        assert_eq!(weights[1].1, 33);
        assert_eq!(weights[2].1, 34);
    }

    #[test]
    fn test_explicit_weights_kept() {
        let criteria = vec![spec("correctness", 60, true), spec("steps", 20, true), spec("formatting", 20, true)];
        let weights = normalize_weights(&criteria).unwrap();
        assert_eq!(
            weights,
            vec![
                ("correctness".to_string(), 60),
                ("steps".to_string(), 20),
                ("formatting".to_string(), 20)
            ]
        );
    }

    #[test]
    fn test_disabled_criteria_excluded() {
        let criteria = vec![
            spec("a", 50, true),
            spec("b", 50, false),
            spec("c", 50, true),
        ];
        let weights = normalize_weights(&criteria).unwrap();
        assert_eq!(weights.len(), 2);
        let total: i32 = weights.iter().map(|(_, w)| *w).sum();
        assert_eq!(total, 100);
        assert!(!weights.iter().any(|(n, _)| n == "b"));
    }

    #[test]
    fn test_rescale_non_100_totals() {
        let criteria = vec![spec("a", 30, true), spec("b", 30, true)];
        let weights = normalize_weights(&criteria).unwrap();
        assert_eq!(weights[0].1, 50);
        assert_eq!(weights[1].1, 50);
    }

    #[test]
    fn test_rejects_empty_and_duplicates() {
        assert!(normalize_weights(&[]).is_err());
        assert!(normalize_weights(&[spec("a", 0, false)]).is_err());
        assert!(normalize_weights(&[spec("a", 50, true), spec("a", 50, true)]).is_err());
        assert!(normalize_weights(&[spec("", 50, true)]).is_err());
        assert!(normalize_weights(&[spec("a", -1, true)]).is_err());
        assert!(normalize_weights(&[spec("a", 101, true)]).is_err());
    }

    #[test]
    fn test_weighted_score_in_range() {
        let weights = vec![("a".to_string(), 60), ("b".to_string(), 40)];
        let mut scores = HashMap::new();
        scores.insert("a".to_string(), 0);
        scores.insert("b".to_string(), 0);
        assert_eq!(weighted_score(&scores, &weights).unwrap(), 0);

        scores.insert("a".to_string(), 100);
        scores.insert("b".to_string(), 100);
        assert_eq!(weighted_score(&scores, &weights).unwrap(), 100);
    }

    #[test]
    fn test_weighted_score_math_scenario() {
        // correctness 60 / steps 20 / formatting 20
        let weights = vec![
            ("correctness".to_string(), 60),
            ("steps".to_string(), 20),
            ("formatting".to_string(), 20),
        ];
        let mut scores = HashMap::new();
        scores.insert("correctness".to_string(), 90);
        scores.insert("steps".to_string(), 70);
        scores.insert("formatting".to_string(), 80);
        // round(90*0.6 + 70*0.2 + 80*0.2) = round(84) = 84
        assert_eq!(weighted_score(&scores, &weights).unwrap(), 84);
    }

    #[test]
    fn test_weighted_score_monotonic() {
        let weights = vec![("a".to_string(), 50), ("b".to_string(), 50)];
        let mut low = HashMap::new();
        low.insert("a".to_string(), 40);
        low.insert("b".to_string(), 60);

        let before = weighted_score(&low, &weights).unwrap();
        for bump in [41, 60, 85, 100] {
            let mut high = low.clone();
            high.insert("a".to_string(), bump);
            let after = weighted_score(&high, &weights).unwrap();
            assert!(after >= before, "raising a raw score must not lower the total");
        }
    }

    #[test]
    fn test_weighted_score_rejects_missing_and_out_of_range() {
        let weights = vec![("a".to_string(), 100)];
        let empty = HashMap::new();
        assert!(weighted_score(&empty, &weights).is_err());

        let mut bad = HashMap::new();
        bad.insert("a".to_string(), 101);
        assert!(weighted_score(&bad, &weights).is_err());
        bad.insert("a".to_string(), -1);
        assert!(weighted_score(&bad, &weights).is_err());
    }

    #[test]
    fn test_normalize_criteria_rewrites_enabled_weights() {
        let mut criteria = AssessmentCriteria::Text {
            criteria_list: vec![spec("a", 0, true), spec("b", 0, true), spec("c", 0, false)],
        };
        normalize_criteria(&mut criteria).unwrap();

        let list = criteria.criteria_list();
        assert_eq!(list[0].weight, 50);
        assert_eq!(list[1].weight, 50);
        // 禁用项不动
        assert_eq!(list[2].weight, 0);
    }
}
