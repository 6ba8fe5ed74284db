//! Typed views over notification payloads.
//!
//! Request structs enumerate exactly the fields the API recognizes;
//! `None` fields are omitted from the serialized body or query string.
//! Response structs are read-only views decoded from the JSON payload:
//! unknown extra fields are ignored, and channel-dependent fields are
//! optional rather than validated.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Enums
// ============================================================================

/// Message channels that can be dispatched through the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Email,
    Sms,
}

impl MessageKind {
    pub fn as_path_segment(self) -> &'static str {
        match self {
            MessageKind::Email => "email",
            MessageKind::Sms => "sms",
        }
    }
}

// ============================================================================
// Request bodies
// ============================================================================

/// Body of a send-email request
#[derive(Debug, Clone, Serialize, Default)]
pub struct SendEmailRequest {
    pub email_address: String,
    pub template_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personalisation: Option<HashMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_reply_to_id: Option<String>,
}

/// Body of a send-SMS request
#[derive(Debug, Clone, Serialize, Default)]
pub struct SendSmsRequest {
    pub phone_number: String,
    pub template_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personalisation: Option<HashMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_sender_id: Option<String>,
}

// ============================================================================
// Listing filters
// ============================================================================

/// Filters for the notifications listing.
///
/// These are the only keys the endpoint recognizes; absent filters are
/// omitted from the query string rather than sent empty.
#[derive(Debug, Clone, Default)]
pub struct NotificationFilters {
    /// Restrict to one channel
    pub template_type: Option<MessageKind>,
    /// Delivery status, e.g. `sending`, `delivered`, `permanent-failure`.
    /// Passed through verbatim; the server owns the set of valid values.
    pub status: Option<String>,
    /// Caller-supplied reference attached at send time
    pub reference: Option<String>,
    /// Return notifications older than this notification id
    pub older_than: Option<String>,
}

impl NotificationFilters {
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(kind) = self.template_type {
            query.push(("template_type", kind.as_path_segment().to_string()));
        }
        if let Some(status) = &self.status {
            query.push(("status", status.clone()));
        }
        if let Some(reference) = &self.reference {
            query.push(("reference", reference.clone()));
        }
        if let Some(older_than) = &self.older_than {
            query.push(("older_than", older_than.clone()));
        }
        query
    }
}

// ============================================================================
// Response payloads
// ============================================================================

/// Reference to the template a message was rendered from, as embedded in
/// send and status responses
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateRef {
    pub id: String,
    #[serde(default)]
    pub version: Option<i64>,
    #[serde(default)]
    pub uri: Option<String>,
}

/// Response payload from a successful email or SMS send
#[derive(Debug, Clone, Deserialize)]
pub struct SentNotification {
    pub id: String,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    /// Rendered message content; its fields differ by channel (subject and
    /// from_email for email, from_number for SMS) so it is passed through
    /// undecoded
    #[serde(default)]
    pub content: Value,
    #[serde(default)]
    pub template: Option<TemplateRef>,
    #[serde(default)]
    pub scheduled_for: Option<String>,
}

/// A notification's delivery record
#[derive(Debug, Clone, Deserialize)]
pub struct Notification {
    pub id: String,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub line_1: Option<String>,
    #[serde(default)]
    pub line_2: Option<String>,
    #[serde(default)]
    pub line_3: Option<String>,
    #[serde(default)]
    pub line_4: Option<String>,
    #[serde(default)]
    pub line_5: Option<String>,
    #[serde(default)]
    pub line_6: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default, rename = "type")]
    pub notification_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub template: Option<TemplateRef>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sent_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by_name: Option<String>,
}

/// Pagination links returned alongside a listing
#[derive(Debug, Clone, Deserialize)]
pub struct PageLinks {
    #[serde(default)]
    pub current: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
}

/// One page of the notifications listing
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationList {
    pub notifications: Vec<Notification>,
    #[serde(default)]
    pub links: Option<PageLinks>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_send_email_request_omits_absent_options() {
        let request = SendEmailRequest {
            email_address: "ada@example.com".to_string(),
            template_id: "f33517ff-2a88-4f6e-b855-c550268ce08a".to_string(),
            ..Default::default()
        };
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body,
            json!({
                "email_address": "ada@example.com",
                "template_id": "f33517ff-2a88-4f6e-b855-c550268ce08a",
            })
        );
    }

    #[test]
    fn test_send_sms_request_serializes_personalisation() {
        let request = SendSmsRequest {
            phone_number: "+447700900123".to_string(),
            template_id: "f33517ff-2a88-4f6e-b855-c550268ce08a".to_string(),
            personalisation: Some(HashMap::from([("name".to_string(), json!("Ada"))])),
            reference: Some("ref1".to_string()),
            sms_sender_id: None,
        };
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["personalisation"]["name"], "Ada");
        assert_eq!(body["reference"], "ref1");
        assert!(body.get("sms_sender_id").is_none());
    }

    #[test]
    fn test_filters_to_query_omits_none() {
        let filters = NotificationFilters {
            template_type: Some(MessageKind::Email),
            status: Some("delivered".to_string()),
            ..Default::default()
        };

        assert_eq!(
            filters.to_query(),
            vec![
                ("template_type", "email".to_string()),
                ("status", "delivered".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_filters_produce_empty_query() {
        assert!(NotificationFilters::default().to_query().is_empty());
    }

    #[test]
    fn test_sent_notification_decodes_send_response() {
        let payload = json!({
            "id": "740e5834-3a29-46b4-9a6f-16142fde533a",
            "reference": "ref1",
            "uri": "https://api.notifications.service.gov.uk/v2/notifications/740e5834-3a29-46b4-9a6f-16142fde533a",
            "content": {
                "subject": "Licence renewal",
                "body": "Dear Ada, your licence expires soon",
                "from_email": "licensing@notifications.service.gov.uk"
            },
            "template": {
                "id": "f33517ff-2a88-4f6e-b855-c550268ce08a",
                "version": 1,
                "uri": "https://api.notifications.service.gov.uk/v2/template/f33517ff-2a88-4f6e-b855-c550268ce08a"
            }
        });

        let sent: SentNotification = serde_json::from_value(payload).unwrap();
        assert_eq!(sent.id, "740e5834-3a29-46b4-9a6f-16142fde533a");
        assert_eq!(sent.reference.as_deref(), Some("ref1"));
        assert_eq!(sent.content["subject"], "Licence renewal");
        assert_eq!(sent.template.unwrap().version, Some(1));
    }

    #[test]
    fn test_notification_tolerates_unknown_fields() {
        let payload = json!({
            "id": "740e5834-3a29-46b4-9a6f-16142fde533a",
            "type": "sms",
            "status": "delivered",
            "created_at": "2026-07-01T09:15:00.000000Z",
            "some_future_field": {"nested": true}
        });

        let notification: Notification = serde_json::from_value(payload).unwrap();
        assert_eq!(notification.notification_type.as_deref(), Some("sms"));
        assert_eq!(notification.status.as_deref(), Some("delivered"));
        assert!(notification.created_at.is_some());
        assert!(notification.email_address.is_none());
    }

    #[test]
    fn test_notification_list_decodes_links() {
        let payload = json!({
            "notifications": [
                {"id": "a", "type": "email"},
                {"id": "b", "type": "sms"}
            ],
            "links": {
                "current": "https://x.test/v2/notifications",
                "next": "https://x.test/v2/notifications?older_than=b"
            }
        });

        let list: NotificationList = serde_json::from_value(payload).unwrap();
        assert_eq!(list.notifications.len(), 2);
        let links = list.links.unwrap();
        assert!(links.next.unwrap().contains("older_than=b"));
    }
}
