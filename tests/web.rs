#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use shoshiy_site::host::{EventKind, Host, HostEvent, Size};
use shoshiy_site::palette::Rgba;
use shoshiy_site::render::{Paint, Surface};
use shoshiy_site::wasm::{BrowserHost, CanvasSurface};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn canvas() -> web_sys::HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

#[wasm_bindgen_test]
fn canvas_surface_resizes_its_backing_store() {
    let mut surface = CanvasSurface::new(canvas()).unwrap();
    surface.resize(Size::new(320.0, 240.0));
    assert_eq!(surface.canvas().width(), 320);
    assert_eq!(surface.canvas().height(), 240);
    assert_eq!(surface.size(), Size::new(320.0, 240.0));

    surface.fill_rect(0.0, 0.0, 10.0, 10.0, &Paint::Solid(Rgba::new(255, 0, 0, 1.0)));
    surface.fade(0.5);
    surface.clear();
}

#[wasm_bindgen_test]
fn fade_darkens_instead_of_erasing() {
    let mut surface = CanvasSurface::new(canvas()).unwrap();
    surface.resize(Size::new(4.0, 4.0));
    surface.fill_rect(0.0, 0.0, 4.0, 4.0, &Paint::Solid(Rgba::new(255, 255, 255, 1.0)));
    surface.fade(0.5);

    let ctx = surface
        .canvas()
        .get_context("2d")
        .unwrap()
        .unwrap()
        .dyn_into::<web_sys::CanvasRenderingContext2d>()
        .unwrap();
    let pixel = ctx.get_image_data(1.0, 1.0, 1.0, 1.0).unwrap().data();
    assert_eq!(pixel[3], 255, "fade must not punch through to transparent");
    assert!(pixel[0] > 100 && pixel[0] < 160, "{:?}", &pixel[..]);
    assert_eq!(ctx.global_alpha(), 1.0);
}

#[wasm_bindgen_test]
fn browser_listeners_are_counted_and_released() {
    let host = BrowserHost::new().unwrap();
    let hits = Rc::new(Cell::new(0));
    let h = Rc::clone(&hits);
    let sub = host.listen(
        EventKind::Resize,
        Rc::new(move |_: &HostEvent| h.set(h.get() + 1)),
    );
    assert_eq!(host.ledger().live(), 1);

    let resize = web_sys::Event::new("resize").unwrap();
    host.window().dispatch_event(&resize).unwrap();
    assert_eq!(hits.get(), 1);

    drop(sub);
    assert_eq!(host.ledger().live(), 0);
    host.window().dispatch_event(&resize).unwrap();
    assert_eq!(hits.get(), 1);
}

#[wasm_bindgen_test]
fn viewport_is_positive() {
    let host = BrowserHost::new().unwrap();
    let size = host.viewport();
    assert!(size.width > 0.0 && size.height > 0.0);
}
