//! Crawler documents for the marketing site.

use chrono::{DateTime, Utc};
use singleton_macro::service;
use crate::config::SiteConfig;
use crate::utils::string_utils::escape_html;
use crate::utils::time_utils::{from_chrono, to_iso_string};

/// Pages listed in the sitemap, in site navigation order.
pub const PUBLIC_PAGES: [&str; 6] = [
    "/",
    "/contact",
    "/faq",
    "/gutter-services",
    "/gutter-installation",
    "/exterior-services",
];

/// Never listed, always disallowed.
pub const PRIVATE_PATHS: [&str; 3] = ["/login", "/register", "/admin"];

const CHANGE_FREQUENCY: &str = "daily";
const PRIORITY: &str = "0.7";

/// Public origin without a trailing slash.
struct SiteUrl(String);

impl SiteUrl {
    fn new(url: impl Into<String>) -> Self {
        Self(url.into().trim_end_matches('/').to_string())
    }
}

impl Default for SiteUrl {
    fn default() -> Self {
        Self::new(SiteConfig::url())
    }
}

#[service(name = "site")]
pub struct SiteService {
    site_url: SiteUrl,
}

impl SiteService {
    pub fn with_url(site_url: impl Into<String>) -> Self {
        Self {
            site_url: SiteUrl::new(site_url),
        }
    }

    pub fn sitemap_xml(&self, now: DateTime<Utc>) -> String {
        let lastmod = to_iso_string(from_chrono(now));

        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
        );

        for page in PUBLIC_PAGES {
            let loc = if page == "/" {
                self.site_url.0.clone()
            } else {
                format!("{}{}", self.site_url.0, page)
            };

            xml.push_str("<url>");
            xml.push_str(&format!("<loc>{}</loc>", escape_html(&loc)));
            xml.push_str(&format!("<lastmod>{}</lastmod>", lastmod));
            xml.push_str(&format!("<changefreq>{}</changefreq>", CHANGE_FREQUENCY));
            xml.push_str(&format!("<priority>{}</priority>", PRIORITY));
            xml.push_str("</url>\n");
        }

        xml.push_str("</urlset>");
        xml
    }

    pub fn robots_txt(&self) -> String {
        let mut robots = String::from("# *\nUser-agent: *\nAllow: /\n");
        for path in PRIVATE_PATHS {
            robots.push_str(&format!("Disallow: {}\n", path));
        }
        robots.push_str(&format!("\n# Host\nHost: {}\n", self.site_url.0));
        robots.push_str(&format!("\n# Sitemaps\nSitemap: {}/sitemap.xml\n", self.site_url.0));
        robots
    }
}
