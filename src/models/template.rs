//! Typed views over template payloads.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A message template at one version
#[derive(Debug, Clone, Deserialize)]
pub struct Template {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub template_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub version: Option<i64>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
}

/// The template listing
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateList {
    pub templates: Vec<Template>,
}

/// A template rendered with personalisation, without sending anything
#[derive(Debug, Clone, Deserialize)]
pub struct TemplatePreview {
    pub id: String,
    #[serde(default)]
    pub version: Option<i64>,
    #[serde(default, rename = "type")]
    pub template_type: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
}

/// Filter for the template listing
#[derive(Debug, Clone, Default)]
pub struct TemplateFilters {
    /// Restrict to one template type (`email`, `sms`, `letter`)
    pub template_type: Option<String>,
}

impl TemplateFilters {
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        match &self.template_type {
            Some(template_type) => vec![("type", template_type.clone())],
            None => Vec::new(),
        }
    }
}

/// Body of a template preview request
#[derive(Debug, Clone, Serialize, Default)]
pub struct TemplatePreviewRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personalisation: Option<HashMap<String, Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_template_decodes_full_payload() {
        let payload = json!({
            "id": "f33517ff-2a88-4f6e-b855-c550268ce08a",
            "name": "Licence renewal",
            "type": "email",
            "created_at": "2026-05-30T10:00:00.000000Z",
            "updated_at": "2026-06-12T14:30:00.000000Z",
            "created_by": "jo@example.gov.uk",
            "version": 3,
            "body": "Dear ((name)), your licence expires on ((date))",
            "subject": "Licence renewal"
        });

        let template: Template = serde_json::from_value(payload).unwrap();
        assert_eq!(template.id, "f33517ff-2a88-4f6e-b855-c550268ce08a");
        assert_eq!(template.version, Some(3));
        assert_eq!(template.template_type.as_deref(), Some("email"));
    }

    #[test]
    fn test_template_preview_decodes_rendered_body() {
        let payload = json!({
            "id": "f33517ff-2a88-4f6e-b855-c550268ce08a",
            "version": 3,
            "type": "email",
            "body": "Dear Ada, your licence expires on 2026-09-01",
            "subject": "Licence renewal",
            "html": "<p>Dear Ada, your licence expires on 2026-09-01</p>"
        });

        let preview: TemplatePreview = serde_json::from_value(payload).unwrap();
        assert_eq!(
            preview.body.as_deref(),
            Some("Dear Ada, your licence expires on 2026-09-01")
        );
        assert!(preview.html.is_some());
    }

    #[test]
    fn test_template_filters_serialize_as_type_key() {
        let filters = TemplateFilters {
            template_type: Some("sms".to_string()),
        };
        assert_eq!(filters.to_query(), vec![("type", "sms".to_string())]);
        assert!(TemplateFilters::default().to_query().is_empty());
    }

    #[test]
    fn test_preview_request_skips_absent_personalisation() {
        let body = serde_json::to_value(TemplatePreviewRequest::default()).unwrap();
        assert_eq!(body, json!({}));
    }
}
