use std::sync::Arc;

use poem::Result as PoemResult;
use poem_openapi::{OpenApi, param::Query, payload::Json};

use crate::presentation::http::{
    endpoints::root::{ApiState, EndpointsTags},
    mappers::{map_record, map_retry_status},
    responses::{DeliveryLogRecordDto, RetryStatusDto},
};

#[derive(Clone)]
pub struct DeliveryEndpoints {
    state: Arc<ApiState>,
}

impl DeliveryEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl DeliveryEndpoints {
    /// Most recent successful deliveries, newest first.
    #[oai(path = "/delivery-log", method = "get", tag = EndpointsTags::Delivery)]
    pub async fn list_delivery_log(
        &self,
        limit: Query<Option<u32>>,
    ) -> PoemResult<Json<Vec<DeliveryLogRecordDto>>> {
        let records = self
            .state
            .list_delivery_log_usecase
            .execute(limit.0)
            .await
            .map_err(internal_error)?;

        Ok(Json(records.iter().map(map_record).collect()))
    }

    #[oai(path = "/retry-queue", method = "get", tag = EndpointsTags::Delivery)]
    pub async fn retry_queue(&self) -> Json<RetryStatusDto> {
        let status = self.state.get_retry_status_usecase.execute().await;
        Json(map_retry_status(&status))
    }
}

fn internal_error(err: anyhow::Error) -> poem::Error {
    poem::Error::from_string(
        err.to_string(),
        poem::http::StatusCode::INTERNAL_SERVER_ERROR,
    )
}
