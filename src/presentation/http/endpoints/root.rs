use std::sync::Arc;

use poem_openapi::{OpenApiService, Tags};

use crate::{
    application::{
        handlers::notification_dispatcher::NotificationDispatcher,
        services::{
            notifier::Notifier,
            retry::{RetryConfig, RetryCoordinator},
        },
        usecases::{
            get_retry_status::GetRetryStatusUseCase, list_delivery_log::ListDeliveryLogUseCase,
            relay_post::RelayPostUseCase, verify_subscription::VerifySubscriptionUseCase,
        },
    },
    domain::repositories::DeliveryLogRepository,
    presentation::http::endpoints::{
        delivery::DeliveryEndpoints, health::HealthEndpoints, webhook::WebhookEndpoints,
    },
};

pub struct RelaySettings {
    pub recipient_number: String,
    pub sender_number: Option<String>,
    pub verify_token: String,
    pub retry: RetryConfig,
}

#[derive(Clone)]
pub struct ApiState {
    pub relay_post_usecase: Arc<RelayPostUseCase>,
    pub verify_subscription_usecase: Arc<VerifySubscriptionUseCase>,
    pub list_delivery_log_usecase: Arc<ListDeliveryLogUseCase>,
    pub get_retry_status_usecase: Arc<GetRetryStatusUseCase>,
}

impl ApiState {
    pub fn new(
        notifier: Arc<dyn Notifier>,
        log_repo: Arc<dyn DeliveryLogRepository>,
        settings: RelaySettings,
    ) -> Self {
        let dispatcher = Arc::new(NotificationDispatcher::new(
            notifier,
            log_repo.clone(),
            settings.recipient_number,
            settings.sender_number,
        ));
        let retries = RetryCoordinator::new(dispatcher.clone(), settings.retry);

        Self {
            relay_post_usecase: Arc::new(RelayPostUseCase::new(dispatcher, retries.clone())),
            verify_subscription_usecase: Arc::new(VerifySubscriptionUseCase::new(
                settings.verify_token,
            )),
            list_delivery_log_usecase: Arc::new(ListDeliveryLogUseCase::new(log_repo)),
            get_retry_status_usecase: Arc::new(GetRetryStatusUseCase::new(retries)),
        }
    }
}

/// Enum of API sections (tags)
#[derive(Tags)]
pub enum EndpointsTags {
    Health,
    Webhook,
    Delivery,
}

pub type Api = (HealthEndpoints, WebhookEndpoints, DeliveryEndpoints);

pub fn build_api(state: ApiState) -> OpenApiService<Api, ()> {
    let state = Arc::new(state);
    OpenApiService::new(
        (
            HealthEndpoints,
            WebhookEndpoints::new(state.clone()),
            DeliveryEndpoints::new(state),
        ),
        "Facebook post relay",
        env!("CARGO_PKG_VERSION"),
    )
}
