pub mod admin;
pub mod detail;
pub mod list;
pub mod review;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::submissions::entities::SubmissionStatus;
use crate::models::submissions::requests::{ApproveWithScorecardRequest, CreateSubmissionRequest};
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// 提交作品集（新版本）
    pub async fn submit_portfolio(
        &self,
        request: &HttpRequest,
        user_id: i64,
        req: CreateSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_portfolio(self, request, user_id, req).await
    }

    /// 获取提交详情
    pub async fn get_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_submission(self, request, submission_id).await
    }

    /// 列出所有提交
    pub async fn list_submissions(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_submissions(self, request).await
    }

    /// 待审核队列（先提交先审核）
    pub async fn list_pending_submissions(
        &self,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_pending_submissions(self, request).await
    }

    /// 按状态列出提交
    pub async fn list_submissions_by_status(
        &self,
        request: &HttpRequest,
        status: String,
    ) -> ActixResult<HttpResponse> {
        list::list_submissions_by_status(self, request, status).await
    }

    /// 某作品集的版本历史
    pub async fn list_portfolio_history(
        &self,
        request: &HttpRequest,
        portfolio_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_portfolio_history(self, request, portfolio_id).await
    }

    /// 标记已审阅
    pub async fn mark_reviewed(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        review::mark_reviewed(self, request, submission_id).await
    }

    /// 标记已批准（要求已有评分卡）
    pub async fn mark_approved(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        review::mark_approved(self, request, submission_id).await
    }

    /// 批准并附带评分卡（单事务）
    pub async fn approve_with_scorecard(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        reviewer_id: i64,
        req: ApproveWithScorecardRequest,
    ) -> ActixResult<HttpResponse> {
        review::approve_with_scorecard(self, request, submission_id, reviewer_id, req).await
    }

    /// 管理员直接改状态
    pub async fn update_status(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        status: SubmissionStatus,
    ) -> ActixResult<HttpResponse> {
        admin::update_status(self, request, submission_id, status).await
    }

    /// 管理员删除提交
    pub async fn delete_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        admin::delete_submission(self, request, submission_id).await
    }
}
