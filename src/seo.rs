//! Search-engine metadata: robots policy, sitemap, JSON-LD blocks, head tags
//! and the web manifest.

use std::fmt::Write as _;
use std::time::SystemTime;

use serde_json::{json, Value};

use crate::config::SiteConfig;
use crate::content::{NAV_LINKS, SERVICES};
use crate::i18n::{translate, Language};
use crate::page::escape;

pub const DISALLOWED_PATHS: [&str; 2] = ["/api/", "/private/"];
pub const CRAWLERS: [&str; 3] = ["*", "Yandex", "Googlebot"];

pub fn robots_txt(config: &SiteConfig) -> String {
    let mut out = String::new();
    for agent in CRAWLERS {
        let _ = writeln!(out, "User-Agent: {agent}");
        let _ = writeln!(out, "Allow: /");
        for path in DISALLOWED_PATHS {
            let _ = writeln!(out, "Disallow: {path}");
        }
        out.push('\n');
    }
    let _ = writeln!(out, "Sitemap: {}", config.url("/sitemap.xml"));
    let _ = writeln!(out, "Host: {}", config.base_url);
    out
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeFrequency {
    Weekly,
    Monthly,
}

impl ChangeFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

pub fn sitemap_entries(config: &SiteConfig) -> Vec<SitemapEntry> {
    let entry = |fragment: &str, change_frequency, priority| SitemapEntry {
        loc: if fragment.is_empty() {
            config.base_url.clone()
        } else {
            config.url(&format!("/#{fragment}"))
        },
        change_frequency,
        priority,
    };
    vec![
        entry("", ChangeFrequency::Weekly, 1.0),
        entry("nav_works", ChangeFrequency::Weekly, 0.9),
        entry("nav_services", ChangeFrequency::Monthly, 0.8),
        entry("nav_about", ChangeFrequency::Monthly, 0.7),
        entry("nav_contact", ChangeFrequency::Monthly, 0.8),
    ]
}

pub fn sitemap_xml(config: &SiteConfig, lastmod: SystemTime) -> String {
    let lastmod = humantime::format_rfc3339_seconds(lastmod);
    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for e in sitemap_entries(config) {
        let _ = write!(
            out,
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{lastmod}</lastmod>\n    \
             <changefreq>{}</changefreq>\n    <priority>{:.1}</priority>\n  </url>\n",
            escape(&e.loc),
            e.change_frequency.as_str(),
            e.priority
        );
    }
    out.push_str("</urlset>\n");
    out
}

fn home_label(lang: Language) -> &'static str {
    match lang {
        Language::Ru => "Главная",
        Language::Uz => "Bosh sahifa",
        Language::UzCyrl => "Бош саҳифа",
    }
}

/// Structured data for the head: `Organization`, `ProfessionalService` and
/// `BreadcrumbList`.
pub fn json_ld(config: &SiteConfig) -> Vec<Value> {
    let lang = config.default_language;
    let logo = config.url(&config.logo);
    let contact = &config.contact;

    let organization = json!({
        "@context": "https://schema.org",
        "@type": "Organization",
        "name": config.legal_name,
        "alternateName": config.brand,
        "description": translate(lang, "hero_subtitle"),
        "url": config.base_url,
        "logo": logo,
        "image": logo,
        "address": {
            "@type": "PostalAddress",
            "addressLocality": config.locality,
            "addressRegion": config.locality,
            "addressCountry": config.country,
        },
        "contactPoint": {
            "@type": "ContactPoint",
            "telephone": contact.phone,
            "email": contact.email,
            "contactType": "Customer Service",
            "availableLanguage": ["Russian", "Uzbek", "English"],
            "areaServed": config.country,
        },
        "sameAs": [contact.telegram],
        "foundingDate": config.founding_year.to_string(),
        "slogan": translate(lang, "hero_title"),
    });

    let offers: Vec<Value> = SERVICES
        .iter()
        .take(4)
        .map(|s| {
            json!({
                "@type": "Offer",
                "itemOffered": {
                    "@type": "Service",
                    "name": translate(lang, s.title_key),
                    "description": translate(lang, s.description_key).trim_end_matches('.'),
                },
            })
        })
        .collect();

    let service = json!({
        "@context": "https://schema.org",
        "@type": "ProfessionalService",
        "name": config.legal_name,
        "image": logo,
        "url": config.base_url,
        "telephone": contact.phone,
        "email": contact.email,
        "address": {
            "@type": "PostalAddress",
            "addressLocality": config.locality,
            "addressCountry": config.country,
        },
        "geo": {
            "@type": "GeoCoordinates",
            "latitude": config.latitude.to_string(),
            "longitude": config.longitude.to_string(),
        },
        "priceRange": "$$",
        "openingHoursSpecification": {
            "@type": "OpeningHoursSpecification",
            "dayOfWeek": ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"],
            "opens": "09:00",
            "closes": "18:00",
        },
        "hasOfferCatalog": {
            "@type": "OfferCatalog",
            "name": translate(lang, "services_title"),
            "itemListElement": offers,
        },
    });

    let mut crumbs = vec![json!({
        "@type": "ListItem",
        "position": 1,
        "name": home_label(lang),
        "item": config.base_url,
    })];
    for (i, anchor) in NAV_LINKS.iter().enumerate() {
        crumbs.push(json!({
            "@type": "ListItem",
            "position": i + 2,
            "name": translate(lang, anchor),
            "item": format!("{}#{anchor}", config.base_url),
        }));
    }
    let breadcrumbs = json!({
        "@context": "https://schema.org",
        "@type": "BreadcrumbList",
        "itemListElement": crumbs,
    });

    vec![organization, service, breadcrumbs]
}

/// Title, description and social preview text for the document head.
#[derive(Clone, Debug, PartialEq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub keywords: Vec<&'static str>,
    pub og_title: String,
    pub og_description: String,
    pub og_locale: &'static str,
    pub og_alternate_locales: [&'static str; 2],
    pub twitter_title: String,
    pub twitter_description: String,
    pub image: String,
    pub canonical: String,
}

pub const KEYWORDS: [&str; 13] = [
    "разработка ПО Ташкент",
    "веб-разработка Узбекистан",
    "мобильные приложения",
    "IT студия Ташкент",
    "создание сайтов",
    "3D визуализация",
    "CRM системы",
    "автоматизация бизнеса",
    "ShoShiy",
    "web development Uzbekistan",
    "software development Tashkent",
    "dasturiy ta'minot ishlab chiqish",
    "veb sayt yaratish",
];

impl PageMeta {
    pub fn for_config(config: &SiteConfig) -> Self {
        let brand = &config.brand;
        Self {
            title: format!("{brand} — Разработка ПО и 3D решения | IT Студия в Ташкенте"),
            description: "Premium IT & 3D студия в Узбекистане. Разработка веб-приложений, \
                мобильных приложений, 3D визуализация, CRM системы. 5+ лет опыта, 100+ проектов."
                .to_string(),
            keywords: KEYWORDS.to_vec(),
            og_title: format!("{brand} — Premium IT & 3D Studio в Ташкенте"),
            og_description: "Создаем цифровые решения нового поколения: веб-приложения, \
                мобильные приложения, 3D визуализация, CRM системы. 5+ лет опыта."
                .to_string(),
            og_locale: "ru_RU",
            og_alternate_locales: ["uz_UZ", "en_US"],
            twitter_title: format!("{brand} — Premium IT & 3D Studio"),
            twitter_description:
                "Разработка веб и мобильных приложений, 3D визуализация в Ташкенте".to_string(),
            image: config.url(&config.logo),
            canonical: config.base_url.clone(),
        }
    }
}

/// `(hreflang, href)` pairs for alternate-language links.
pub fn hreflang_links(config: &SiteConfig) -> Vec<(&'static str, String)> {
    ["ru", "uz", "en", "x-default"]
        .into_iter()
        .map(|code| (code, config.base_url.clone()))
        .collect()
}

pub fn web_manifest(config: &SiteConfig) -> Value {
    json!({
        "name": config.legal_name,
        "short_name": config.brand,
        "description": translate(config.default_language, "hero_title"),
        "start_url": "/",
        "display": "standalone",
        "lang": config.default_language.html_lang(),
        "background_color": "#0a0a0a",
        "theme_color": "#00aaff",
        "icons": [
            { "src": config.logo, "sizes": "512x512", "type": "image/png" },
        ],
    })
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, UNIX_EPOCH};

    use super::*;

    #[test]
    fn robots_has_three_groups_and_disallows() {
        let txt = robots_txt(&SiteConfig::default());
        assert_eq!(txt.matches("User-Agent:").count(), 3);
        assert_eq!(txt.matches("Disallow: /api/").count(), 3);
        assert_eq!(txt.matches("Disallow: /private/").count(), 3);
        assert!(txt.contains("Sitemap: https://www.shoshiy.uz/sitemap.xml"));
        assert!(txt.ends_with("Host: https://www.shoshiy.uz\n"));
    }

    #[test]
    fn sitemap_lists_anchors_with_lastmod() {
        let at = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let xml = sitemap_xml(&SiteConfig::default(), at);
        assert_eq!(xml.matches("<url>").count(), 5);
        assert!(xml.contains("<loc>https://www.shoshiy.uz/#nav_works</loc>"));
        assert!(xml.contains("<lastmod>2023-11-14T22:13:20Z</lastmod>"));
        assert!(xml.contains("<priority>0.7</priority>"));
    }

    #[test]
    fn sitemap_locations_are_xml_escaped() {
        let config = SiteConfig {
            base_url: "https://studio.example/r&d".into(),
            ..SiteConfig::default()
        };
        let xml = sitemap_xml(&config, UNIX_EPOCH);
        assert!(xml.contains("<loc>https://studio.example/r&amp;d/#nav_about</loc>"));
        assert!(!xml.contains("r&d"));
    }

    #[test]
    fn json_ld_blocks() {
        let blocks = json_ld(&SiteConfig::default());
        let types: Vec<&str> = blocks.iter().filter_map(|b| b["@type"].as_str()).collect();
        assert_eq!(types, ["Organization", "ProfessionalService", "BreadcrumbList"]);
        assert_eq!(blocks[1]["hasOfferCatalog"]["itemListElement"].as_array().map(Vec::len), Some(4));
        assert_eq!(blocks[2]["itemListElement"][1]["item"], "https://www.shoshiy.uz#nav_works");
        assert_eq!(blocks[2]["itemListElement"][1]["name"], "Работы");
    }

    #[test]
    fn hreflang_includes_default() {
        let links = hreflang_links(&SiteConfig::default());
        assert_eq!(links.len(), 4);
        assert_eq!(links[3].0, "x-default");
    }
}
