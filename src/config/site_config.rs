//! Public site address and the mail relay used for contact notifications.

use std::env;

pub struct SiteConfig;

impl SiteConfig {
    /// Canonical site origin without a trailing slash.
    pub fn url() -> String {
        env::var("SITE_URL")
            .ok()
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| "https://texaselitegutters.com".to_string())
    }
}

/// HTTP mail API (Resend-compatible `POST {from, to, subject, html}`).
///
/// Notifications are disabled unless `MAIL_API_URL` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct MailConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub from: String,
    pub notify_to: String,
}

impl MailConfig {
    pub fn from_env() -> Option<Self> {
        let api_url = env::var("MAIL_API_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())?;

        Some(Self {
            api_url,
            api_key: env::var("MAIL_API_KEY").ok().filter(|k| !k.is_empty()),
            from: env::var("MAIL_FROM")
                .unwrap_or_else(|_| "Texas Elite Gutters <onboarding@resend.dev>".to_string()),
            notify_to: env::var("CONTACT_NOTIFY_TO")
                .unwrap_or_else(|_| "texaselitegutter@gmail.com".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_url_default() {
        if env::var("SITE_URL").is_err() {
            assert_eq!(SiteConfig::url(), "https://texaselitegutters.com");
        }
        assert!(!SiteConfig::url().ends_with('/'));
    }

    #[test]
    fn test_mail_disabled_without_url() {
        if env::var("MAIL_API_URL").is_err() {
            assert!(MailConfig::from_env().is_none());
        }
    }
}
