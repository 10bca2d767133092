//! Webhook delivery of cancellation events.

use async_trait::async_trait;
use tracing::debug;

use remind_service::{CancellationPublisher, PublishError, RemindCancelledEvent};

/// Delivers cancellation events as JSON `POST`s to a configured URL.
pub struct WebhookPublisher {
    client: reqwest::Client,
    url: String,
}

impl WebhookPublisher {
    /// Build a publisher targeting `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// The target URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CancellationPublisher for WebhookPublisher {
    async fn publish_remind_cancelled(
        &self,
        event: &RemindCancelledEvent,
    ) -> Result<(), PublishError> {
        debug!(task_id = %event.task_id, url = %self.url, "posting remind cancelled event");

        let response = self
            .client
            .post(&self.url)
            .json(event)
            .send()
            .await
            .map_err(PublishError::new)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PublishError::new(format!(
                "webhook returned status {status}"
            )));
        }
        Ok(())
    }
}
