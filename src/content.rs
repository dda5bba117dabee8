//! Fixed page content: projects, services, contact methods and the about
//! section. Display text lives in [`crate::i18n`]; these tables hold keys.

use serde::Serialize;

use crate::config::SiteConfig;
use crate::i18n::{translate, Language};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ProjectKind {
    Website,
    App,
    ThreeD,
    Crm,
    Server,
    ELearning,
}

impl ProjectKind {
    pub fn label_key(self) -> &'static str {
        match self {
            ProjectKind::Website => "project_type_website",
            ProjectKind::App => "project_type_app",
            ProjectKind::ThreeD => "project_type_3d",
            ProjectKind::Crm => "project_type_crm",
            ProjectKind::Server => "project_type_server",
            ProjectKind::ELearning => "project_type_elearning",
        }
    }

    pub fn label(self, lang: Language) -> &'static str {
        translate(lang, self.label_key())
    }
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Project {
    pub id: u32,
    pub title_key: &'static str,
    pub kind: ProjectKind,
    pub image: &'static str,
    pub date: &'static str,
    pub description_key: &'static str,
    pub url: &'static str,
}

pub const PROJECTS: [Project; 6] = [
    Project {
        id: 1,
        title_key: "project_1_title",
        kind: ProjectKind::Website,
        image: "/fresh-fruits-ecommerce-platform.jpg",
        date: "2024-01",
        description_key: "project_1_desc",
        url: "https://fruit-rosy-three.vercel.app",
    },
    Project {
        id: 2,
        title_key: "project_2_title",
        kind: ProjectKind::Website,
        image: "/fashion-clothing-marketplace.jpg",
        date: "2024-02",
        description_key: "project_2_desc",
        url: "https://dresshub.vercel.app",
    },
    Project {
        id: 3,
        title_key: "project_3_title",
        kind: ProjectKind::Website,
        image: "/corporate-business-website.png",
        date: "2024-03",
        description_key: "project_3_desc",
        url: "https://www.chesterfrontline.com",
    },
    Project {
        id: 4,
        title_key: "project_4_title",
        kind: ProjectKind::ELearning,
        image: "/education-training-platform.jpg",
        date: "2024-04",
        description_key: "project_4_desc",
        url: "https://futureengineers.cmspace.uz",
    },
    Project {
        id: 5,
        title_key: "project_5_title",
        kind: ProjectKind::ELearning,
        image: "/professional-training-courses.jpg",
        date: "2024-05",
        description_key: "project_5_desc",
        url: "https://training.cmspace.uz",
    },
    Project {
        id: 6,
        title_key: "project_6_title",
        kind: ProjectKind::Website,
        image: "/creative-agency-portfolio.png",
        date: "2024-06",
        description_key: "project_6_desc",
        url: "https://dalayongini.cmspace.uz",
    },
];

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Service {
    pub id: u32,
    /// Icon name, rendered as an `icon-<name>` class.
    pub icon: &'static str,
    pub title_key: &'static str,
    pub description_key: &'static str,
}

pub const SERVICES: [Service; 6] = [
    Service { id: 1, icon: "code", title_key: "service_1_title", description_key: "service_1_desc" },
    Service { id: 2, icon: "smartphone", title_key: "service_2_title", description_key: "service_2_desc" },
    Service { id: 3, icon: "palette", title_key: "service_3_title", description_key: "service_3_desc" },
    Service { id: 4, icon: "server", title_key: "service_4_title", description_key: "service_4_desc" },
    Service { id: 5, icon: "settings", title_key: "service_5_title", description_key: "service_5_desc" },
    Service { id: 6, icon: "message-square", title_key: "service_6_title", description_key: "service_6_desc" },
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactMethod {
    pub label_key: &'static str,
    pub icon: &'static str,
    pub link: String,
    pub value: Option<String>,
}

pub fn contact_methods(config: &SiteConfig) -> Vec<ContactMethod> {
    let c = &config.contact;
    vec![
        ContactMethod {
            label_key: "contact_phone",
            icon: "phone",
            link: format!("tel:{}", c.phone),
            value: Some(c.phone_display.clone()),
        },
        ContactMethod {
            label_key: "contact_email",
            icon: "mail",
            link: format!("mailto:{}", c.email),
            value: Some(c.email.clone()),
        },
        ContactMethod {
            label_key: "contact_telegram",
            icon: "send",
            link: c.telegram.clone(),
            value: None,
        },
    ]
}

#[derive(Clone, Copy, Debug)]
pub struct Highlight {
    pub title_key: &'static str,
    pub description_key: &'static str,
}

pub const HIGHLIGHTS: [Highlight; 3] = [
    Highlight { title_key: "about_highlight_1_title", description_key: "about_highlight_1_desc" },
    Highlight { title_key: "about_highlight_2_title", description_key: "about_highlight_2_desc" },
    Highlight { title_key: "about_highlight_3_title", description_key: "about_highlight_3_desc" },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetricValue {
    Fixed(&'static str),
    Translated(&'static str),
}

#[derive(Clone, Copy, Debug)]
pub struct Metric {
    pub label_key: &'static str,
    pub value: MetricValue,
    pub note_key: &'static str,
}

impl Metric {
    pub fn value_text(&self, lang: Language) -> &'static str {
        match self.value {
            MetricValue::Fixed(v) => v,
            MetricValue::Translated(key) => translate(lang, key),
        }
    }
}

pub const METRICS: [Metric; 3] = [
    Metric {
        label_key: "about_metric_1_label",
        value: MetricValue::Fixed("5+"),
        note_key: "about_metric_1_note",
    },
    Metric {
        label_key: "about_metric_2_label",
        value: MetricValue::Fixed("100+"),
        note_key: "about_metric_2_note",
    },
    Metric {
        label_key: "about_metric_3_label",
        value: MetricValue::Translated("about_metric_3_value"),
        note_key: "about_metric_3_note",
    },
];

/// Top-level regions of the document, in render order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Header,
    Hero,
    About,
    Projects,
    Services,
    Contact,
    Footer,
}

impl Section {
    pub const ORDER: [Section; 7] = [
        Section::Header,
        Section::Hero,
        Section::About,
        Section::Projects,
        Section::Services,
        Section::Contact,
        Section::Footer,
    ];

    /// Element id used for in-page navigation.
    pub fn anchor(self) -> Option<&'static str> {
        match self {
            Section::About => Some("nav_about"),
            Section::Projects => Some("nav_works"),
            Section::Services => Some("nav_services"),
            Section::Contact => Some("nav_contact"),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Section::Header => "header",
            Section::Footer => "footer",
            _ => "section",
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Section::Header => "site-header",
            Section::Hero => "hero",
            Section::Footer => "site-footer",
            other => other.anchor().unwrap_or("section"),
        }
    }
}

/// Header navigation, in display order.
pub const NAV_LINKS: [&str; 4] = ["nav_works", "nav_services", "nav_about", "nav_contact"];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::has_key;

    #[test]
    fn every_content_key_is_translated() {
        let mut keys: Vec<&str> = Vec::new();
        for p in &PROJECTS {
            keys.extend([p.title_key, p.description_key, p.kind.label_key()]);
        }
        for s in &SERVICES {
            keys.extend([s.title_key, s.description_key]);
        }
        for h in &HIGHLIGHTS {
            keys.extend([h.title_key, h.description_key]);
        }
        for m in &METRICS {
            keys.extend([m.label_key, m.note_key]);
        }
        keys.extend(NAV_LINKS);
        for lang in Language::ALL {
            for key in &keys {
                assert!(has_key(lang, key), "{lang:?} is missing {key}");
            }
        }
    }

    #[test]
    fn anchors_cover_nav_links() {
        let anchors: Vec<&str> = Section::ORDER.iter().filter_map(|s| s.anchor()).collect();
        for link in NAV_LINKS {
            assert!(anchors.contains(&link));
        }
    }

    #[test]
    fn contact_links_use_config() {
        let methods = contact_methods(&SiteConfig::default());
        assert_eq!(methods[0].link, "tel:+998970110033");
        assert_eq!(methods[1].link, "mailto:groupshoshi@gmail.com");
        assert_eq!(methods[2].value, None);
    }

    #[test]
    fn third_metric_is_localised() {
        assert_eq!(METRICS[0].value_text(Language::Uz), "5+");
        assert_ne!(
            METRICS[2].value_text(Language::Ru),
            "about_metric_3_value"
        );
    }
}
