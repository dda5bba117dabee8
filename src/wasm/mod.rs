//! Browser entry point: binds the page's canvases and DOM to [`App`].

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, HtmlElement};

use crate::app::{App, PageView, Surfaces};
use crate::context::UiContext;
use crate::error::{SiteError, SiteResult};
use crate::host::{Host, Size};
use crate::i18n::Language;
use crate::logging;
use crate::page::{CONTACT_CANVAS_ID, CURSOR_CANVAS_ID, HERO_CANVAS_ID};
use crate::palette::Theme;
use crate::render::{Fit, Surface};
use crate::scenes::contact::FALLBACK_HEIGHT;

mod dom;
mod host;
mod render;

pub use dom::DomView;
pub use host::BrowserHost;
pub use render::CanvasSurface;

const CONTACT_SECTION_ID: &str = "nav_contact";

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if let Err(e) = logging::init_browser(logging::DEFAULT_FILTER) {
        web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
    }
    let app = mount()?;
    let previous = APP.with(|slot| slot.borrow_mut().replace(app));
    drop(previous);
    Ok(())
}

/// Tears down every loop, timer and listener. Safe to call more than once.
#[wasm_bindgen]
pub fn unmount() {
    let app = APP.with(|slot| slot.borrow_mut().take());
    drop(app);
}

fn mount() -> SiteResult<App> {
    let host = BrowserHost::new()?;
    let document = host.document().clone();
    let root = document
        .document_element()
        .ok_or_else(|| SiteError::dom("no document element"))?;

    let language = root
        .get_attribute("lang")
        .and_then(|code| Language::from_code(&code))
        .unwrap_or(Language::Ru);
    let theme = root
        .class_name()
        .split_whitespace()
        .find_map(Theme::from_class)
        .unwrap_or(Theme::Dark);
    let ctx = UiContext::new(language, theme);

    let surfaces = Surfaces {
        hero: canvas_surface(&document, HERO_CANVAS_ID),
        contact: canvas_surface(&document, CONTACT_CANVAS_ID)
            .map(|surface| (surface, contact_fit(document.clone()))),
        cursor: canvas_surface(&document, CURSOR_CANVAS_ID),
    };

    let view: Rc<dyn PageView> = Rc::new(DomView::new(host.window().clone(), document));
    let host: Rc<dyn Host> = Rc::new(host);
    Ok(App::mount(host, view, ctx, surfaces))
}

fn canvas_surface(document: &Document, id: &str) -> Option<Box<dyn Surface>> {
    let found = document
        .get_element_by_id(id)
        .ok_or_else(|| SiteError::dom(format!("no canvas #{id}")))
        .and_then(|el| {
            el.dyn_into::<HtmlCanvasElement>()
                .map_err(|_| SiteError::dom(format!("#{id} is not a canvas")))
        })
        .and_then(CanvasSurface::new);
    match found {
        Ok(surface) => Some(Box::new(surface)),
        Err(e) => {
            tracing::warn!(canvas = id, error = %e, "canvas unavailable");
            None
        }
    }
}

/// Contact canvas spans the viewport width and the section's height.
fn contact_fit(document: Document) -> Fit {
    Box::new(move |viewport: Size| {
        let height = document
            .get_element_by_id(CONTACT_SECTION_ID)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .map(|el| f64::from(el.offset_height()))
            .filter(|h| *h > 0.0)
            .unwrap_or(FALLBACK_HEIGHT);
        Size::new(viewport.width, height)
    })
}
