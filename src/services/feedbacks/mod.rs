pub mod detail;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::feedbacks::requests::UpdateFeedbackRequest;
use crate::storage::Storage;

pub struct FeedbackService {
    storage: Option<Arc<dyn Storage>>,
}

impl FeedbackService {
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

    /// 获取评语详情
    pub async fn get_feedback(
        &self,
        request: &HttpRequest,
        feedback_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_feedback(self, request, feedback_id).await
    }

    /// 获取提交的评语
    pub async fn get_feedback_by_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_feedback_by_submission(self, request, submission_id).await
    }

    /// 更新评语
    pub async fn update_feedback(
        &self,
        request: &HttpRequest,
        feedback_id: i64,
        req: UpdateFeedbackRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_feedback(self, request, feedback_id, req).await
    }
}
