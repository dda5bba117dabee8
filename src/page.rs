//! Renders the single-page document.
//!
//! Text nodes are emitted in the configured default language and tagged with
//! `data-i18n="<key>"` so the browser side can swap them in place. Clickable
//! controls carry a `data-action` attribute understood by
//! [`crate::host::UiAction::parse`].

use std::borrow::Cow;
use std::fmt::Write as _;

use crate::config::SiteConfig;
use crate::content::{
    contact_methods, MetricValue, Section, HIGHLIGHTS, METRICS, NAV_LINKS, PROJECTS, SERVICES,
};
use crate::host::UiAction;
use crate::i18n::{translate, Language};
use crate::seo::{hreflang_links, json_ld, PageMeta};

pub const HERO_CANVAS_ID: &str = "hero-canvas";
pub const CONTACT_CANVAS_ID: &str = "contact-canvas";
pub const CURSOR_CANVAS_ID: &str = "cursor-canvas";
pub const CAROUSEL_TRACK_ID: &str = "projects-track";
pub const CAROUSEL_DOTS_ID: &str = "projects-dots";
pub const WASM_MODULE_PATH: &str = "./pkg/shoshiy_site.js";

/// Escapes text for use in element content and quoted attribute values.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

struct Doc<'a> {
    out: String,
    lang: Language,
    config: &'a SiteConfig,
}

impl<'a> Doc<'a> {
    fn raw(&mut self, s: &str) {
        self.out.push_str(s);
    }

    /// `<tag class="..." data-i18n="key">text</tag>`
    fn text(&mut self, tag: &str, class: &str, key: &str) {
        let _ = write!(
            self.out,
            "<{tag} class=\"{class}\" data-i18n=\"{key}\">{}</{tag}>",
            escape(translate(self.lang, key))
        );
    }

    fn action_link(&mut self, class: &str, action: &UiAction, href: &str, key: &str) {
        let _ = write!(
            self.out,
            "<a class=\"{class}\" href=\"{href}\" data-action=\"{}\" data-i18n=\"{key}\">{}</a>",
            escape(&action.encode()),
            escape(translate(self.lang, key))
        );
    }

    fn section(&mut self, section: Section) {
        let _ = write!(self.out, "<{} id=\"{}\">", section.tag(), section.id());
        match section {
            Section::Header => self.header(),
            Section::Hero => self.hero(),
            Section::About => self.about(),
            Section::Projects => self.projects(),
            Section::Services => self.services(),
            Section::Contact => self.contact(),
            Section::Footer => self.footer(),
        }
        let _ = writeln!(self.out, "</{}>", section.tag());
    }

    fn header(&mut self) {
        let brand = escape(&self.config.brand).into_owned();
        let logo = escape(&self.config.logo).into_owned();
        let _ = write!(
            self.out,
            "<nav class=\"nav\"><a class=\"brand\" href=\"#\" data-action=\"top\">\
             <img src=\"{logo}\" alt=\"{brand}\" width=\"40\" height=\"40\">\
             <span class=\"brand-name\">{brand}</span></a><div class=\"nav-links\">"
        );
        for key in NAV_LINKS {
            self.action_link("nav-link", &UiAction::ScrollTo(key.to_string()), &format!("#{key}"), key);
        }
        self.raw("</div><div class=\"nav-controls\"><div class=\"lang-switch\">");
        for lang in Language::ALL {
            let active = if lang == self.lang { " active" } else { "" };
            let _ = write!(
                self.out,
                "<button class=\"lang{active}\" data-lang=\"{}\" data-action=\"{}\">{}</button>",
                lang.code(),
                UiAction::SetLanguage(lang).encode(),
                lang.label()
            );
        }
        let _ = write!(
            self.out,
            "</div><button class=\"theme-toggle\" data-action=\"{}\" aria-label=\"Toggle theme\">\
             <span class=\"icon icon-sun\"></span><span class=\"icon icon-moon\"></span></button>\
             </div></nav>",
            UiAction::ToggleTheme.encode()
        );
    }

    fn hero(&mut self) {
        let _ = write!(
            self.out,
            "<canvas id=\"{HERO_CANVAS_ID}\" class=\"scene\" aria-hidden=\"true\"></canvas>\
             <div class=\"hero-content\">"
        );
        self.text("p", "hero-subtitle", "hero_subtitle");
        self.text("h1", "hero-title", "hero_title");
        self.raw("<div class=\"hero-actions\">");
        self.action_link(
            "btn btn-primary",
            &UiAction::ScrollTo("nav_works".into()),
            "#nav_works",
            "btn_portfolio",
        );
        self.action_link(
            "btn btn-outline",
            &UiAction::ScrollTo("nav_contact".into()),
            "#nav_contact",
            "btn_contact",
        );
        self.raw("</div>");
        self.text("span", "hero-scroll", "hero_scroll");
        self.raw("</div>");
    }

    fn about(&mut self) {
        self.raw("<div class=\"container\">");
        self.text("h2", "section-title", "about_title");
        self.text("p", "section-lead", "about_desc");
        self.raw("<div class=\"about-team\">");
        self.text("h3", "", "about_team_title");
        self.text("p", "", "about_team_desc");
        self.raw("</div><ul class=\"highlights\">");
        for h in &HIGHLIGHTS {
            self.raw("<li class=\"card\">");
            self.text("h4", "", h.title_key);
            self.text("p", "", h.description_key);
            self.raw("</li>");
        }
        self.raw("</ul><div class=\"metrics\">");
        for m in &METRICS {
            self.raw("<div class=\"metric\">");
            match m.value {
                MetricValue::Fixed(v) => {
                    let _ = write!(self.out, "<span class=\"metric-value\">{}</span>", escape(v));
                }
                MetricValue::Translated(key) => {
                    self.text("span", "metric-value", key);
                }
            }
            self.text("span", "metric-label", m.label_key);
            self.text("span", "metric-note", m.note_key);
            self.raw("</div>");
        }
        self.raw("</div></div>");
    }

    fn project_card(&mut self, index: usize, hidden: bool) {
        let p = PROJECTS[index];
        let aria = if hidden { " aria-hidden=\"true\" tabindex=\"-1\"" } else { "" };
        let _ = write!(
            self.out,
            "<a class=\"project-card\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\"{aria}>\
             <div class=\"project-media\"><img src=\"{}\" alt=\"{}\" data-i18n-alt=\"{}\" loading=\"lazy\"></div>\
             <div class=\"project-body\">",
            escape(p.url),
            escape(p.image),
            escape(translate(self.lang, p.title_key)),
            p.title_key
        );
        self.text("h3", "project-title", p.title_key);
        self.text("p", "project-desc", p.description_key);
        self.raw("<div class=\"project-meta\">");
        self.text("span", "badge", p.kind.label_key());
        let _ = write!(self.out, "<span class=\"project-date\">{}</span>", p.date);
        self.raw("</div></div></a>");
    }

    fn projects(&mut self) {
        self.raw("<div class=\"container\">");
        self.text("h2", "section-title", "works_title");
        self.text("p", "section-lead", "works_description");
        let _ = write!(
            self.out,
            "<div class=\"carousel\"><button class=\"carousel-btn prev\" data-action=\"{}\" \
             aria-label=\"Previous slide\"></button><div class=\"carousel-viewport\">\
             <div class=\"carousel-track\" id=\"{CAROUSEL_TRACK_ID}\">",
            UiAction::CarouselPrev.encode()
        );
        // The second pass lets a looping window show full pages at the tail.
        for pass in 0..2 {
            for i in 0..PROJECTS.len() {
                self.project_card(i, pass == 1);
            }
        }
        let _ = write!(
            self.out,
            "</div></div><button class=\"carousel-btn next\" data-action=\"{}\" \
             aria-label=\"Next slide\"></button></div><div class=\"carousel-dots\" id=\"{CAROUSEL_DOTS_ID}\">",
            UiAction::CarouselNext.encode()
        );
        for i in 0..PROJECTS.len() {
            let active = if i == 0 { " active" } else { "" };
            let _ = write!(
                self.out,
                "<button class=\"dot{active}\" data-action=\"{}\" aria-label=\"Go to slide {}\"></button>",
                UiAction::CarouselGoTo(i).encode(),
                i + 1
            );
        }
        self.raw("</div></div>");
    }

    fn services(&mut self) {
        self.raw("<div class=\"container\">");
        self.text("h2", "section-title", "services_title");
        self.text("p", "section-lead", "services_description");
        self.raw("<div class=\"services-grid\">");
        for s in &SERVICES {
            let _ = write!(
                self.out,
                "<div class=\"card service\"><span class=\"icon icon-{}\"></span>",
                s.icon
            );
            self.text("h3", "", s.title_key);
            self.text("p", "", s.description_key);
            self.raw("</div>");
        }
        self.raw("</div></div>");
    }

    fn contact_links(&mut self, class: &str, with_values: bool) {
        for m in contact_methods(self.config) {
            let external = if m.link.starts_with("http") {
                " target=\"_blank\" rel=\"noopener noreferrer\""
            } else {
                ""
            };
            let _ = write!(
                self.out,
                "<a class=\"{class}\" href=\"{}\"{external}><span class=\"icon icon-{}\"></span>",
                escape(&m.link),
                m.icon
            );
            self.text("span", "contact-label", m.label_key);
            if let (true, Some(value)) = (with_values, &m.value) {
                let _ = write!(self.out, "<span class=\"contact-value\">{}</span>", escape(value));
            }
            self.raw("</a>");
        }
    }

    fn contact(&mut self) {
        let _ = write!(
            self.out,
            "<canvas id=\"{CONTACT_CANVAS_ID}\" class=\"scene\" aria-hidden=\"true\"></canvas>\
             <div class=\"container contact-content\">"
        );
        self.text("h2", "section-title", "contact_title");
        self.text("p", "section-lead", "contact_tagline");
        self.raw("<div class=\"contact-methods\">");
        self.contact_links("contact-method", true);
        self.raw("</div></div>");
    }

    fn footer(&mut self) {
        let brand = escape(&self.config.brand).into_owned();
        let _ = write!(
            self.out,
            "<div class=\"container footer-grid\"><div class=\"footer-brand\">\
             <img src=\"{}\" alt=\"{brand}\" width=\"40\" height=\"40\"><span class=\"brand-name\">{brand}</span>",
            escape(&self.config.logo)
        );
        self.text("p", "", "footer_description");
        self.text("p", "muted", "hero_subtitle");
        self.raw("</div><div>");
        self.text("h3", "", "footer_quick_links");
        self.raw("<ul class=\"footer-links\">");
        for key in NAV_LINKS {
            let label = if key == "nav_services" { "footer_services" } else { key };
            self.raw("<li>");
            self.action_link("", &UiAction::ScrollTo(key.to_string()), &format!("#{key}"), label);
            self.raw("</li>");
        }
        self.raw("</ul></div><div>");
        self.text("h3", "", "footer_contact_us");
        self.raw("<div class=\"footer-links\">");
        self.contact_links("footer-contact", true);
        self.raw("</div></div><div>");
        self.text("h3", "", "footer_follow_us");
        self.raw("<div class=\"socials\">");
        for social in &self.config.socials {
            let _ = write!(
                self.out,
                "<a class=\"social\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" aria-label=\"{}\">\
                 <span class=\"icon icon-{}\"></span></a>",
                escape(&social.url),
                escape(&social.network),
                escape(&social.network)
            );
        }
        self.raw("</div></div></div><div class=\"container footer-bottom\">");
        self.text("p", "", "footer_copyright");
        self.text("p", "", "footer_all_rights");
        self.raw("</div>");
    }

    fn head(&mut self) {
        let meta = PageMeta::for_config(self.config);
        let mut h = String::new();
        let _ = write!(
            h,
            "<meta charset=\"utf-8\">\n\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
             <title>{}</title>\n\
             <meta name=\"description\" content=\"{}\">\n\
             <meta name=\"keywords\" content=\"{}\">\n\
             <meta name=\"author\" content=\"{}\">\n\
             <meta name=\"robots\" content=\"index, follow\">\n\
             <link rel=\"canonical\" href=\"{}\">\n",
            escape(&meta.title),
            escape(&meta.description),
            escape(&meta.keywords.join(", ")),
            escape(&self.config.legal_name),
            escape(&meta.canonical)
        );
        for (code, href) in hreflang_links(self.config) {
            let _ = writeln!(h, "<link rel=\"alternate\" hreflang=\"{code}\" href=\"{}\">", escape(&href));
        }
        let og = [
            ("og:type", "website".to_string()),
            ("og:locale", meta.og_locale.to_string()),
            ("og:locale:alternate", meta.og_alternate_locales[0].to_string()),
            ("og:locale:alternate", meta.og_alternate_locales[1].to_string()),
            ("og:url", meta.canonical.clone()),
            ("og:site_name", self.config.legal_name.clone()),
            ("og:title", meta.og_title.clone()),
            ("og:description", meta.og_description.clone()),
            ("og:image", meta.image.clone()),
        ];
        for (property, content) in og {
            let _ = writeln!(h, "<meta property=\"{property}\" content=\"{}\">", escape(&content));
        }
        let twitter = [
            ("twitter:card", "summary_large_image".to_string()),
            ("twitter:title", meta.twitter_title),
            ("twitter:description", meta.twitter_description),
            ("twitter:image", meta.image),
        ];
        for (name, content) in twitter {
            let _ = writeln!(h, "<meta name=\"{name}\" content=\"{}\">", escape(&content));
        }
        let _ = write!(
            h,
            "<link rel=\"icon\" href=\"{}\">\n\
             <link rel=\"manifest\" href=\"/site.webmanifest\">\n\
             <link rel=\"stylesheet\" href=\"/styles.css\">\n",
            escape(&self.config.logo)
        );
        for block in json_ld(self.config) {
            let body = block.to_string().replace("</", "<\\/");
            let _ = writeln!(h, "<script type=\"application/ld+json\">{body}</script>");
        }
        self.out.push_str(&h);
    }
}

/// Full `index.html` for `config`.
pub fn render_document(config: &SiteConfig) -> String {
    let lang = config.default_language;
    let mut doc = Doc {
        out: String::with_capacity(64 * 1024),
        lang,
        config,
    };
    let _ = write!(
        doc.out,
        "<!DOCTYPE html>\n<html lang=\"{}\" class=\"{}\">\n<head>\n",
        lang.html_lang(),
        config.default_theme.class()
    );
    doc.head();
    let _ = write!(
        doc.out,
        "</head>\n<body>\n<canvas id=\"{CURSOR_CANVAS_ID}\" class=\"cursor-layer\" aria-hidden=\"true\"></canvas>\n<main>\n"
    );
    for section in Section::ORDER {
        doc.section(section);
    }
    let _ = write!(
        doc.out,
        "</main>\n<script type=\"module\">import init from \"{WASM_MODULE_PATH}\"; init();</script>\n</body>\n</html>\n"
    );
    tracing::debug!(bytes = doc.out.len(), lang = lang.code(), "rendered document");
    doc.out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_borrows_clean_text() {
        assert!(matches!(escape("plain"), Cow::Borrowed(_)));
        assert_eq!(escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }

    #[test]
    fn document_has_canvases_and_loader() {
        let html = render_document(&SiteConfig::default());
        for id in [HERO_CANVAS_ID, CONTACT_CANVAS_ID, CURSOR_CANVAS_ID, CAROUSEL_TRACK_ID] {
            assert!(html.contains(&format!("id=\"{id}\"")), "missing {id}");
        }
        assert!(html.contains(WASM_MODULE_PATH));
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"ru\" class=\"dark\">"));
    }

    #[test]
    fn carousel_controls_are_labelled() {
        let html = render_document(&SiteConfig::default());
        assert!(html.contains("aria-label=\"Go to slide 6\""));
        assert!(!html.contains("aria-label=\"Go to slide 7\""));
        assert!(html.contains("aria-label=\"Previous slide\""));
        assert!(html.contains("data-action=\"carousel:next\""));
    }

    #[test]
    fn json_ld_is_not_escaped_into_entities() {
        let html = render_document(&SiteConfig::default());
        assert_eq!(html.matches("application/ld+json").count(), 3);
        assert!(html.contains("\"@type\":\"BreadcrumbList\""));
    }
}
