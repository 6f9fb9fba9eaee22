//! Contact form email notification.
//!
//! Sends through an HTTP mail API (Resend-compatible JSON body). Delivery is
//! best-effort: callers log failures and carry on.

use std::time::Duration;
use serde::Serialize;
use singleton_macro::service;
use crate::config::MailConfig;
use crate::core::errors::AppError;
use crate::domain::entities::Contact;
use crate::utils::string_utils::escape_html;

pub const CONTACT_SUBJECT: &str = "Texas Elite Gutter Contact Form Submission";

/// Upper bound for one mail API call, connect included.
pub const MAIL_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MailMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

struct Mailer {
    config: Option<MailConfig>,
    client: reqwest::Client,
}

impl Mailer {
    fn new(config: Option<MailConfig>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                log::warn!("Mail client setup failed, using defaults: {}", e);
                reqwest::Client::new()
            });

        Self { config, client }
    }
}

impl Default for Mailer {
    fn default() -> Self {
        Self::new(MailConfig::from_env(), MAIL_TIMEOUT)
    }
}

#[service(name = "notification")]
pub struct NotificationService {
    mailer: Mailer,
}

impl NotificationService {
    pub fn with_config(config: Option<MailConfig>) -> Self {
        Self::with_timeout(config, MAIL_TIMEOUT)
    }

    pub fn with_timeout(config: Option<MailConfig>, timeout: Duration) -> Self {
        Self {
            mailer: Mailer::new(config, timeout),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.mailer.config.is_some()
    }

    /// Emails the site owner about a new contact request.
    ///
    /// Returns `Ok(false)` without sending when no mail API is configured.
    pub async fn notify_new_contact(&self, contact: &Contact) -> Result<bool, AppError> {
        let Some(config) = &self.mailer.config else {
            log::info!("Mail API not configured, skipping contact notification");
            return Ok(false);
        };

        let message = MailMessage {
            from: config.from.clone(),
            to: vec![config.notify_to.clone()],
            subject: CONTACT_SUBJECT.to_string(),
            html: contact_email_html(contact),
        };

        let mut request = self.mailer.client.post(&config.api_url).json(&message);
        if let Some(api_key) = &config.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Mail request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Mail API returned {}: {}",
                status, error_text
            )));
        }

        log::info!("📧 Contact notification sent for {}", contact.email);
        Ok(true)
    }
}

/// Every submitted value is HTML-escaped.
pub fn contact_email_html(contact: &Contact) -> String {
    format!(
        "<h1>New Contact Form Submission</h1>\
         <p><strong>Name:</strong> {}</p>\
         <p><strong>Email:</strong> {}</p>\
         <p><strong>Phone:</strong> {}</p>\
         <p><strong>Message:</strong></p>\
         <p>{}</p>",
        escape_html(&contact.name),
        escape_html(&contact.email),
        escape_html(&contact.phone),
        escape_html(&contact.message).replace('\n', "<br>"),
    )
}
