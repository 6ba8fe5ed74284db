//! Client facade: one method per API operation.
//!
//! Each method builds a path and arguments, delegates to the
//! [`Speaker`], and decodes the payload into its typed result object.
//! Errors from the dispatch layer propagate unchanged.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ClientError, ClientResult};
use crate::models::{
    MessageKind, Notification, NotificationFilters, NotificationList, SendEmailRequest,
    SendSmsRequest, SentNotification, Template, TemplateFilters, TemplateList, TemplatePreview,
    TemplatePreviewRequest,
};
use crate::speaker::{Speaker, escape_segment};

/// Client for the Notify API.
///
/// # Example
/// ```no_run
/// use notify_client::{Client, models::SendEmailRequest};
///
/// # async fn run() -> notify_client::ClientResult<()> {
/// let client = Client::from_api_key("my_team_key-...")?;
/// let sent = client
///     .send_email(&SendEmailRequest {
///         email_address: "ada@example.com".to_string(),
///         template_id: "f33517ff-2a88-4f6e-b855-c550268ce08a".to_string(),
///         ..Default::default()
///     })
///     .await?;
/// println!("queued as {}", sent.id);
/// # Ok(())
/// # }
/// ```
pub struct Client {
    speaker: Speaker,
}

impl Client {
    /// Creates a client from a service id and secret
    pub fn new(
        service_id: impl Into<String>,
        secret_token: impl Into<String>,
    ) -> ClientResult<Self> {
        Ok(Self {
            speaker: Speaker::new(service_id, secret_token)?,
        })
    }

    /// Creates a client from a combined API key
    /// (see [`Speaker::from_api_key`])
    pub fn from_api_key(api_key: &str) -> ClientResult<Self> {
        Ok(Self {
            speaker: Speaker::from_api_key(api_key)?,
        })
    }

    pub fn speaker(&self) -> &Speaker {
        &self.speaker
    }

    pub fn base_url(&self) -> &str {
        self.speaker.base_url()
    }

    /// Points the client at a different API endpoint, e.g. a staging
    /// target. Configure before issuing concurrent requests.
    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.speaker.set_base_url(base_url);
    }

    /// Sends an email
    pub async fn send_email(&self, request: &SendEmailRequest) -> ClientResult<SentNotification> {
        decode(self.speaker.post(MessageKind::Email, request).await?)
    }

    /// Sends an SMS
    pub async fn send_sms(&self, request: &SendSmsRequest) -> ClientResult<SentNotification> {
        decode(self.speaker.post(MessageKind::Sms, request).await?)
    }

    /// Fetches the delivery record of a single notification
    pub async fn get_notification(&self, id: &str) -> ClientResult<Notification> {
        decode(
            self.speaker
                .get(Some(id), &NotificationFilters::default())
                .await?,
        )
    }

    /// Lists notifications, newest first
    pub async fn get_notifications(
        &self,
        filters: &NotificationFilters,
    ) -> ClientResult<NotificationList> {
        decode(self.speaker.get(None, filters).await?)
    }

    /// Fetches the latest version of a template
    pub async fn get_template_by_id(&self, id: &str) -> ClientResult<Template> {
        let path = format!("/v2/template/{}", escape_segment(id));
        decode(self.speaker.get_with_url(&path, &[]).await?)
    }

    /// Fetches a specific version of a template
    pub async fn get_template_version(&self, id: &str, version: u32) -> ClientResult<Template> {
        let path = format!("/v2/template/{}/version/{}", escape_segment(id), version);
        decode(self.speaker.get_with_url(&path, &[]).await?)
    }

    /// Lists all templates, optionally restricted to one type
    pub async fn get_all_templates(&self, filters: &TemplateFilters) -> ClientResult<TemplateList> {
        decode(
            self.speaker
                .get_with_url("/v2/templates", &filters.to_query())
                .await?,
        )
    }

    /// Renders a template with the given personalisation without sending
    pub async fn generate_template_preview(
        &self,
        id: &str,
        request: &TemplatePreviewRequest,
    ) -> ClientResult<TemplatePreview> {
        let path = format!("/v2/template/{}/preview", escape_segment(id));
        decode(self.speaker.post_with_url(&path, request).await?)
    }
}

/// Decodes a dispatch payload into its result object.
fn decode<T: DeserializeOwned>(payload: Value) -> ClientResult<T> {
    serde_json::from_value(payload).map_err(|e| ClientError::Transport {
        message: format!("response payload did not match the expected shape: {e}"),
        source: Some(e.into()),
    })
}
