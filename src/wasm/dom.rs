use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::app::PageView;
use crate::carousel::SlideStatus;
use crate::error::{SiteError, SiteResult};
use crate::i18n::{translate, Language};
use crate::page::{CAROUSEL_DOTS_ID, CAROUSEL_TRACK_ID};
use crate::palette::Theme;

const HEADER_ID: &str = "site-header";
const HEADER_OFFSET_PX: f64 = 80.0;

/// [`PageView`] that edits the pre-rendered document in place.
pub struct DomView {
    window: Window,
    document: Document,
}

impl DomView {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    fn root(&self) -> SiteResult<Element> {
        self.document
            .document_element()
            .ok_or_else(|| SiteError::dom("no document element"))
    }

    fn each(&self, selector: &str, mut f: impl FnMut(&Element) -> SiteResult<()>) -> SiteResult<()> {
        let nodes = self.document.query_selector_all(selector)?;
        for i in 0..nodes.length() {
            if let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                f(&el)?;
            }
        }
        Ok(())
    }

    fn apply_language(&self, lang: Language) -> SiteResult<()> {
        self.root()?.set_attribute("lang", lang.html_lang())?;
        self.each("[data-i18n]", |el| {
            if let Some(key) = el.get_attribute("data-i18n") {
                el.set_text_content(Some(translate(lang, &key)));
            }
            Ok(())
        })?;
        self.each("[data-i18n-alt]", |el| {
            if let Some(key) = el.get_attribute("data-i18n-alt") {
                el.set_attribute("alt", translate(lang, &key))?;
            }
            Ok(())
        })?;
        self.each("[data-lang]", |el| {
            let active = el.get_attribute("data-lang").as_deref() == Some(lang.code());
            el.class_list().toggle_with_force("active", active)?;
            Ok(())
        })
    }

    fn apply_theme(&self, theme: Theme) -> SiteResult<()> {
        let classes = self.root()?.class_list();
        classes.remove_2(Theme::Dark.class(), Theme::Light.class())?;
        classes.add_1(theme.class())?;
        Ok(())
    }

    fn apply_header(&self, scrolled: bool) -> SiteResult<()> {
        let header = self
            .document
            .get_element_by_id(HEADER_ID)
            .ok_or_else(|| SiteError::dom("header missing"))?;
        header.class_list().toggle_with_force("scrolled", scrolled)?;
        Ok(())
    }

    fn apply_slide(&self, slide: SlideStatus, per_view: usize) -> SiteResult<()> {
        let index = slide.index;
        let track = self
            .document
            .get_element_by_id(CAROUSEL_TRACK_ID)
            .ok_or_else(|| SiteError::dom("carousel track missing"))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| SiteError::dom("carousel track is not an HtmlElement"))?;
        let style = track.style();
        let offset = index as f64 * 100.0 / per_view.max(1) as f64;
        style.set_property("--per-view", &per_view.to_string())?;
        style.set_property("transform", &format!("translateX(-{offset}%)"))?;

        self.each(".carousel-btn.prev", |el| {
            el.toggle_attribute_with_force("disabled", !slide.can_prev)?;
            Ok(())
        })?;
        self.each(".carousel-btn.next", |el| {
            el.toggle_attribute_with_force("disabled", !slide.can_next)?;
            Ok(())
        })?;

        let mut i = 0;
        self.each(&format!("#{CAROUSEL_DOTS_ID} .dot"), |el| {
            el.class_list().toggle_with_force("active", i == index)?;
            i += 1;
            Ok(())
        })
    }

    fn apply_scroll(&self, anchor: &str) -> SiteResult<()> {
        let target = self
            .document
            .get_element_by_id(anchor)
            .ok_or_else(|| SiteError::dom(format!("no element #{anchor}")))?;
        let top = target.get_bounding_client_rect().top() + self.window.scroll_y()? - HEADER_OFFSET_PX;
        self.smooth_scroll(top);
        Ok(())
    }

    fn smooth_scroll(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}

fn report(what: &str, result: SiteResult<()>) {
    if let Err(e) = result {
        tracing::warn!(error = %e, "{what} failed");
    }
}

impl PageView for DomView {
    fn show_language(&self, lang: Language) {
        report("language switch", self.apply_language(lang));
    }

    fn show_theme(&self, theme: Theme) {
        report("theme switch", self.apply_theme(theme));
    }

    fn show_header_scrolled(&self, scrolled: bool) {
        report("header update", self.apply_header(scrolled));
    }

    fn show_slide(&self, slide: SlideStatus, per_view: usize) {
        report("carousel update", self.apply_slide(slide, per_view));
    }

    fn scroll_to_anchor(&self, anchor: &str) {
        report("scroll", self.apply_scroll(anchor));
    }

    fn scroll_top(&self) {
        self.smooth_scroll(0.0);
    }
}
