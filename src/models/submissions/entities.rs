use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 提交状态
//
// 状态机：pending → grading → completed，grading → failed，
// failed → pending（显式重试）。completed 为终态。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub enum SubmissionStatus {
    Pending,   // 待评分
    Grading,   // 评分中
    Completed, // 已完成
    Failed,    // 评分失败（可重试）
}

impl SubmissionStatus {
    pub const PENDING: &'static str = "pending";
    pub const GRADING: &'static str = "grading";
    pub const COMPLETED: &'static str = "completed";
    pub const FAILED: &'static str = "failed";

    /// 状态迁移是否合法
    pub fn can_transition_to(self, next: SubmissionStatus) -> bool {
        use SubmissionStatus::*;
        matches!(
            (self, next),
            (Pending, Grading) | (Grading, Completed) | (Grading, Failed) | (Failed, Pending)
        )
    }

    /// 是否为终态（completed 永不离开；failed 仅能通过显式重试离开）
    pub fn is_terminal(self) -> bool {
        matches!(self, SubmissionStatus::Completed | SubmissionStatus::Failed)
    }
}

impl<'de> Deserialize<'de> for SubmissionStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Pending => write!(f, "{}", SubmissionStatus::PENDING),
            SubmissionStatus::Grading => write!(f, "{}", SubmissionStatus::GRADING),
            SubmissionStatus::Completed => write!(f, "{}", SubmissionStatus::COMPLETED),
            SubmissionStatus::Failed => write!(f, "{}", SubmissionStatus::FAILED),
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(SubmissionStatus::Pending),
            "grading" => Ok(SubmissionStatus::Grading),
            "completed" => Ok(SubmissionStatus::Completed),
            "failed" => Ok(SubmissionStatus::Failed),
            _ => Err(format!("Invalid submission status: {s}")),
        }
    }
}

/// 结构化反馈
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Feedback {
    pub summary: String,
    pub details: String,
    pub improvements: Option<String>,
}

// 提交实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    pub id: i64,
    pub assessment_id: i64,
    pub user_id: i64,
    /// 自由格式内容：原始文本、代码，或数学类的 {solution, work_steps} JSON
    pub content: String,
    /// 手写类测评的附件下载 token
    pub file_path: Option<String>,
    /// 代码类测评的编程语言
    pub language: Option<String>,
    pub status: SubmissionStatus,
    /// 总分 0-100，仅 completed 状态存在
    pub score: Option<i32>,
    /// 各评分维度得分，仅 completed 状态存在
    pub criteria_scores: Option<HashMap<String, i32>>,
    pub feedback: Option<Feedback>,
    /// 最近一次评分失败的原因
    pub error_message: Option<String>,
    pub retry_count: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 数学类提交的结构化内容
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct MathSolutionContent {
    pub solution: String,
    #[serde(default)]
    pub work_steps: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_round_trip() {
        for s in ["pending", "grading", "completed", "failed"] {
            assert_eq!(SubmissionStatus::from_str(s).unwrap().to_string(), s);
        }
        assert!(SubmissionStatus::from_str("done").is_err());
    }

    #[test]
    fn test_legal_transitions() {
        use SubmissionStatus::*;
        assert!(Pending.can_transition_to(Grading));
        assert!(Grading.can_transition_to(Completed));
        assert!(Grading.can_transition_to(Failed));
        assert!(Failed.can_transition_to(Pending));
    }

    #[test]
    fn test_no_backward_or_skip_transitions() {
        use SubmissionStatus::*;
        // completed 是终态
        for next in [Pending, Grading, Completed, Failed] {
            assert!(!Completed.can_transition_to(next));
        }
        // 不允许跳过 grading 或回退
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Pending.can_transition_to(Failed));
        assert!(!Grading.can_transition_to(Pending));
        assert!(!Failed.can_transition_to(Grading));
    }

    #[test]
    fn test_terminal_states() {
        assert!(SubmissionStatus::Completed.is_terminal());
        assert!(SubmissionStatus::Failed.is_terminal());
        assert!(!SubmissionStatus::Pending.is_terminal());
        assert!(!SubmissionStatus::Grading.is_terminal());
    }

    #[test]
    fn test_math_content_parses() {
        let content: MathSolutionContent =
            serde_json::from_str(r#"{"solution":"x=1","work_steps":"move 3, divide by 2"}"#)
                .unwrap();
        assert_eq!(content.solution, "x=1");
        assert!(content.work_steps.is_some());
    }
}
