pub mod create;
pub mod detail;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::scorecards::requests::{CreateScorecardRequest, UpdateScorecardRequest};
use crate::storage::Storage;

pub struct ScorecardService {
    storage: Option<Arc<dyn Storage>>,
}

impl ScorecardService {
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

    /// 创建评分卡
    pub async fn create_scorecard(
        &self,
        request: &HttpRequest,
        reviewer_id: i64,
        req: CreateScorecardRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_scorecard(self, request, reviewer_id, req).await
    }

    /// 更新评分卡（条目按 ID 对账）
    pub async fn update_scorecard(
        &self,
        request: &HttpRequest,
        scorecard_id: i64,
        req: UpdateScorecardRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_scorecard(self, request, scorecard_id, req).await
    }

    /// 获取评分卡详情
    pub async fn get_scorecard(
        &self,
        request: &HttpRequest,
        scorecard_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_scorecard(self, request, scorecard_id).await
    }

    /// 获取提交的评分卡
    pub async fn get_scorecard_by_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_scorecard_by_submission(self, request, submission_id).await
    }
}
