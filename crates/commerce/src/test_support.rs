//! Scripted transport for adapter tests.

use crate::error::{ApiError, ApiResult};
use crate::transport::{ApiRequest, ApiResponse, Transport};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays canned responses in order and records every request.
pub(crate) struct MockTransport {
    responses: Mutex<VecDeque<ApiResult<ApiResponse>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub(crate) fn new(responses: Vec<ApiResult<ApiResponse>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::unexpected("no scripted response left")))
    }
}
