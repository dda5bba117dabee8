//! Site configuration. Every field has a built-in default so the site renders
//! without a config file; a JSON file may override any subset.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SiteError, SiteResult};
use crate::i18n::Language;
use crate::palette::Theme;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute origin, without a trailing slash.
    pub base_url: String,
    pub brand: String,
    pub legal_name: String,
    pub default_language: Language,
    pub default_theme: Theme,
    pub logo: String,
    pub founding_year: u16,
    pub locality: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub contact: ContactConfig,
    pub socials: Vec<SocialLink>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    pub phone_display: String,
    pub phone: String,
    pub email: String,
    pub telegram: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLink {
    pub network: String,
    pub url: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            phone_display: "+998 97 011 00 33".to_string(),
            phone: "+998970110033".to_string(),
            email: "groupshoshi@gmail.com".to_string(),
            telegram: "https://t.me/+998777943535".to_string(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        let social = |network: &str, url: &str| SocialLink {
            network: network.to_string(),
            url: url.to_string(),
        };
        Self {
            base_url: "https://www.shoshiy.uz".to_string(),
            brand: "ShoShiy".to_string(),
            legal_name: "ShoShiy Studio".to_string(),
            default_language: Language::Ru,
            default_theme: Theme::Dark,
            logo: "/shoshi-logo.png".to_string(),
            founding_year: 2019,
            locality: "Ташкент".to_string(),
            country: "UZ".to_string(),
            latitude: 41.2995,
            longitude: 69.2401,
            contact: ContactConfig::default(),
            socials: vec![
                social("github", "https://github.com/thehokim"),
                social("linkedin", "https://www.linkedin.com/in/shoshi-group-2483ab393/"),
                social("instagram", "https://www.instagram.com/shoshiy.group"),
                social("facebook", "https://www.facebook.com/share/1McChph6UR/"),
            ],
        }
    }
}

impl SiteConfig {
    pub fn from_json_str(s: &str) -> SiteResult<Self> {
        let cfg: SiteConfig =
            serde_json::from_str(s).map_err(|e| SiteError::config(format!("parse: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> SiteResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| SiteError::config(format!("read '{}': {e}", path.display())))?;
        let cfg = Self::from_json_str(&text)?;
        tracing::info!(path = %path.display(), base_url = %cfg.base_url, "loaded site config");
        Ok(cfg)
    }

    pub fn validate(&self) -> SiteResult<()> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(SiteError::config("base_url must not be empty"));
        }
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(SiteError::config(format!(
                "base_url must be an http(s) origin, got '{url}'"
            )));
        }
        if url.ends_with('/') {
            return Err(SiteError::config("base_url must not end with '/'"));
        }
        if self.brand.trim().is_empty() {
            return Err(SiteError::config("brand must not be empty"));
        }
        Ok(())
    }

    /// Absolute URL for a site-relative path or fragment.
    pub fn url(&self, path: &str) -> String {
        if path.is_empty() {
            self.base_url.clone()
        } else if path.starts_with('/') || path.starts_with('#') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        SiteConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = SiteConfig::from_json_str(
            r#"{ "base_url": "https://example.test", "default_language": "uz-cy" }"#,
        )
        .unwrap();
        assert_eq!(cfg.base_url, "https://example.test");
        assert_eq!(cfg.default_language, Language::UzCyrl);
        assert_eq!(cfg.default_theme, Theme::Dark);
        assert_eq!(cfg.contact, ContactConfig::default());
    }

    #[test]
    fn rejects_bad_base_urls() {
        for bad in ["", "ftp://x", "https://x/"] {
            let json = format!(r#"{{ "base_url": "{bad}" }}"#);
            let err = SiteConfig::from_json_str(&json).unwrap_err();
            assert!(err.to_string().contains("config error"), "{bad}: {err}");
        }
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(SiteConfig::from_json_str(r#"{ "colour": "red" }"#).is_err());
    }

    #[test]
    fn url_joins_paths_and_fragments() {
        let cfg = SiteConfig::default();
        assert_eq!(cfg.url(""), "https://www.shoshiy.uz");
        assert_eq!(cfg.url("/sitemap.xml"), "https://www.shoshiy.uz/sitemap.xml");
        assert_eq!(cfg.url("#nav_works"), "https://www.shoshiy.uz#nav_works");
        assert_eq!(cfg.url("robots.txt"), "https://www.shoshiy.uz/robots.txt");
    }
}
