use serde::Serialize;
use ts_rs::TS;

use super::entities::Submission;

/// 提交列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "bindings/submission.ts")]
pub struct SubmissionListResponse {
    pub items: Vec<Submission>,
    pub total: i64,
}

impl SubmissionListResponse {
    pub fn new(items: Vec<Submission>) -> Self {
        let total = items.len() as i64;
        Self { items, total }
    }
}
