//! 模板化反馈生成
//!
//! 反馈完全由 (总分, 各维度得分, 测评类型) 决定，相同输入必然产生
//! 相同输出。这里是未来接入真实反馈生成器的占位实现。

use crate::models::assessments::entities::AssessmentType;
use crate::models::submissions::entities::Feedback;

/// 总分档位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,        // > 80
    Good,             // 65 ..= 80
    NeedsImprovement, // < 65
}

pub fn score_band(overall: i32) -> ScoreBand {
    if overall > 80 {
        ScoreBand::Excellent
    } else if overall >= 65 {
        ScoreBand::Good
    } else {
        ScoreBand::NeedsImprovement
    }
}

fn subject_noun(assessment_type: AssessmentType) -> &'static str {
    match assessment_type {
        AssessmentType::Text => "essay",
        AssessmentType::Code => "code submission",
        AssessmentType::Handwriting => "handwritten work",
        AssessmentType::Math => "math problem",
    }
}

fn improvement_hint(assessment_type: AssessmentType) -> &'static str {
    match assessment_type {
        AssessmentType::Text => {
            "Revisit the structure and grammar, and keep the content focused on the prompt."
        }
        AssessmentType::Code => {
            "Review edge cases and verify your output against the expected results."
        }
        AssessmentType::Handwriting => {
            "Write more legibly and double-check the grammar of the transcribed text."
        }
        AssessmentType::Math => {
            "Consider showing more intermediate steps in your work to demonstrate your full understanding."
        }
    }
}

/// 组装结构化反馈
///
/// `criteria_scores` 需按权重表顺序传入，保证 details 的枚举顺序稳定。
pub fn build_feedback(
    overall: i32,
    criteria_scores: &[(String, i32)],
    assessment_type: AssessmentType,
) -> Feedback {
    let noun = subject_noun(assessment_type);

    let summary = match score_band(overall) {
        ScoreBand::Excellent => format!(
            "Scored {overall}%. Excellent work on this {noun}; the answer is mostly correct."
        ),
        ScoreBand::Good => format!(
            "Scored {overall}%. Good work on this {noun}; the answer is partially correct."
        ),
        ScoreBand::NeedsImprovement => {
            format!("Scored {overall}%. This {noun} needs improvement.")
        }
    };

    let listing = criteria_scores
        .iter()
        .map(|(name, score)| format!("{name}: {score}/100"))
        .collect::<Vec<_>>()
        .join("; ");
    let details = format!("Per-criterion results: {listing}.");

    let improvements = (overall < 80).then(|| improvement_hint(assessment_type).to_string());

    Feedback {
        summary,
        details,
        improvements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores() -> Vec<(String, i32)> {
        vec![
            ("correctness".to_string(), 90),
            ("steps".to_string(), 70),
            ("formatting".to_string(), 80),
        ]
    }

    #[test]
    fn test_bands() {
        assert_eq!(score_band(100), ScoreBand::Excellent);
        assert_eq!(score_band(81), ScoreBand::Excellent);
        assert_eq!(score_band(80), ScoreBand::Good);
        assert_eq!(score_band(65), ScoreBand::Good);
        assert_eq!(score_band(64), ScoreBand::NeedsImprovement);
        assert_eq!(score_band(0), ScoreBand::NeedsImprovement);
    }

    #[test]
    fn test_feedback_deterministic() {
        let a = build_feedback(84, &scores(), AssessmentType::Math);
        let b = build_feedback(84, &scores(), AssessmentType::Math);
        assert_eq!(a, b);
    }

    #[test]
    fn test_details_enumerate_in_order() {
        let feedback = build_feedback(84, &scores(), AssessmentType::Math);
        assert!(feedback.details.contains("correctness: 90/100"));
        assert!(feedback.details.contains("steps: 70/100"));
        assert!(feedback.details.contains("formatting: 80/100"));
        let correctness_pos = feedback.details.find("correctness").unwrap();
        let steps_pos = feedback.details.find("steps").unwrap();
        assert!(correctness_pos < steps_pos);
    }

    #[test]
    fn test_improvements_gated_below_80() {
        assert!(build_feedback(79, &scores(), AssessmentType::Math)
            .improvements
            .is_some());
        assert!(build_feedback(80, &scores(), AssessmentType::Math)
            .improvements
            .is_none());
        assert!(build_feedback(95, &scores(), AssessmentType::Code)
            .improvements
            .is_none());
    }

    #[test]
    fn test_summary_mentions_score_and_subject() {
        let feedback = build_feedback(42, &scores(), AssessmentType::Text);
        assert!(feedback.summary.contains("42%"));
        assert!(feedback.summary.contains("essay"));
        assert!(feedback.summary.contains("needs improvement"));
    }
}
