use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 提交状态
///
/// 状态机：awaiting_review -> under_review -> reviewed / revision_requested / approved。
/// approved 之后仍允许重新提交，开启谱系中的新版本。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/submission.ts")]
pub enum SubmissionStatus {
    AwaitingReview,
    UnderReview,
    RevisionRequested,
    Reviewed,
    Approved,
}

impl SubmissionStatus {
    pub const AWAITING_REVIEW: &'static str = "awaiting_review";
    pub const UNDER_REVIEW: &'static str = "under_review";
    pub const REVISION_REQUESTED: &'static str = "revision_requested";
    pub const REVIEWED: &'static str = "reviewed";
    pub const APPROVED: &'static str = "approved";
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
        let s = match self {
            SubmissionStatus::AwaitingReview => Self::AWAITING_REVIEW,
            SubmissionStatus::UnderReview => Self::UNDER_REVIEW,
            SubmissionStatus::RevisionRequested => Self::REVISION_REQUESTED,
            SubmissionStatus::Reviewed => Self::REVIEWED,
            SubmissionStatus::Approved => Self::APPROVED,
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::AWAITING_REVIEW => Ok(SubmissionStatus::AwaitingReview),
            Self::UNDER_REVIEW => Ok(SubmissionStatus::UnderReview),
            Self::REVISION_REQUESTED => Ok(SubmissionStatus::RevisionRequested),
            Self::REVIEWED => Ok(SubmissionStatus::Reviewed),
            Self::APPROVED => Ok(SubmissionStatus::Approved),
            _ => Err(format!(
                "无效的提交状态: '{s}'. 支持: awaiting_review, under_review, revision_requested, reviewed, approved"
            )),
        }
    }
}

/// 提交业务模型（谱系中的一个版本）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "bindings/submission.ts")]
pub struct Submission {
    pub id: i64,
    pub portfolio_id: i64,
    pub user_id: i64,
    pub version: i32,
    pub status: SubmissionStatus,
    pub is_current_version: bool,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub reviewed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub approved_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for s in [
            "awaiting_review",
            "under_review",
            "revision_requested",
            "reviewed",
            "approved",
        ] {
            let parsed: SubmissionStatus = s.parse().unwrap();
            assert_eq!(parsed.to_string(), s);
        }
    }

    #[test]
    fn test_invalid_status_rejected() {
        assert!("pending".parse::<SubmissionStatus>().is_err());
        assert!("".parse::<SubmissionStatus>().is_err());
    }
}
