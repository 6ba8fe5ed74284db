//! Request and response types for the API surface.

mod notification;
mod template;

pub use notification::{
    MessageKind, Notification, NotificationFilters, NotificationList, PageLinks,
    SendEmailRequest, SendSmsRequest, SentNotification, TemplateRef,
};
pub use template::{
    Template, TemplateFilters, TemplateList, TemplatePreview, TemplatePreviewRequest,
};
