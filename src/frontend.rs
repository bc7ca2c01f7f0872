//! Page lifecycle controller for the portfolio's behavior layer.
//!
//! Boots once the DOM is ready: applies the persisted theme synchronously so
//! content never flashes the wrong mode, defers canvas and particle setup
//! until layout settles, and sequences the preloader dismissal and entrance
//! animators on the window load signal. Also owns the simulated page
//! transition between documents and recovery from back/forward-cache
//! restores. Individual features skip themselves silently when their target
//! elements are absent on the current page.

mod dom;
mod entrance;
mod filter;
mod gsap;
mod lines;
mod nav;
mod particles;
mod theme;

use gloo_timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{console, PageTransitionEvent};

use crate::motion;
use gsap::{Gsap, Vars};

const PRELOADER_HOLD_MS: u32 = 1800;
const HIGHLIGHT_SETTLE_MS: u32 = 150;

pub fn run() {
    let Some(document) = dom::document() else {
        return;
    };
    if document.ready_state() == "loading" {
        dom::listen(&document, "DOMContentLoaded", |_| boot());
    } else {
        boot();
    }
}

fn boot() {
    // The animation library is the only hard dependency; without it the page
    // is forced visible and left static.
    let Some(gsap) = gsap::detect() else {
        degrade_to_static_page();
        return;
    };
    gsap.register_scroll_trigger();

    theme::init();
    particles::create();
    lines::init_all();
    nav::init();
    init_mobile_menu();
    init_footer_year();
    init_cocreator_toggle();
    filter::init(&gsap);
    init_load_sequence(gsap.clone());
    init_page_transitions(gsap.clone());
    init_bfcache_restore(gsap);
}

fn degrade_to_static_page() {
    console::error_1(&"GSAP or ScrollTrigger is not loaded! Animations will not work.".into());
    force_body_visible();
    if let Some(preloader) = dom::by_id("preloader") {
        let _ = preloader.class_list().add_1("loaded");
    }
}

fn force_body_visible() {
    if let Some(body) = dom::body() {
        let _ = body.style().set_property("opacity", "1");
    }
}

fn init_mobile_menu() {
    let Some(button) = dom::by_id("mobileMenuButton") else {
        return;
    };
    let Some(menu) = dom::by_id("mobileMenu") else {
        return;
    };

    {
        let menu = menu.clone();
        dom::listen(&button, "click", move |_| {
            let _ = menu.class_list().toggle("hidden");
        });
    }
    for link in dom::query_all("#mobileMenu a") {
        let menu = menu.clone();
        dom::listen(&link, "click", move |_| {
            let _ = menu.class_list().add_1("hidden");
        });
    }
}

fn init_footer_year() {
    if let Some(element) = dom::by_id("currentYear") {
        element.set_text_content(Some(&js_sys::Date::new_0().get_full_year().to_string()));
    }
}

fn init_cocreator_toggle() {
    let Some(button) = dom::by_id("aiCoCreatorButton") else {
        return;
    };
    let Some(panel) = dom::by_id("ai-cocreator-info") else {
        return;
    };
    dom::listen(&button, "click", move |_| {
        let _ = panel.class_list().toggle("expanded");
    });
}

fn init_load_sequence(gsap: Gsap) {
    let Some(window) = web_sys::window() else {
        return;
    };
    dom::listen(&window, "load", move |_| {
        let gsap = gsap.clone();
        if let Some(preloader) = dom::by_id("preloader") {
            Timeout::new(PRELOADER_HOLD_MS, move || {
                let _ = preloader.class_list().add_1("loaded");
                let sequenced = gsap.clone();
                gsap.to(
                    &JsValue::from_str("body"),
                    Vars::new()
                        .num("opacity", 1.0)
                        .num("duration", 0.8)
                        .str("ease", "power1.inOut")
                        .callback("onComplete", move || run_entrance_sequence(&sequenced)),
                );
            })
            .forget();
        } else {
            force_body_visible();
            run_entrance_sequence(&gsap);
        }
    });
}

fn run_entrance_sequence(gsap: &Gsap) {
    entrance::init_homepage(gsap);
    entrance::init_projects_page(gsap);
    entrance::init_common(gsap);
    Timeout::new(HIGHLIGHT_SETTLE_MS, nav::update_active_link).forget();
}

/// Fades the body out before following an internal link, simulating a page
/// transition between the site's documents.
fn init_page_transitions(gsap: Gsap) {
    let current_file = web_sys::window()
        .and_then(|window| window.location().pathname().ok())
        .map(|path| motion::current_page_file(&path).to_string())
        .unwrap_or_default();

    let selector = "a:not([target=\"_blank\"]):not([href^=\"#\"]):not([href^=\"mailto:\"])";
    for link in dom::query_all(selector) {
        let gsap = gsap.clone();
        let current_file = current_file.clone();
        let anchor = link.clone();
        dom::listen(&link, "click", move |event| {
            let Some(href) = anchor.get_attribute("href") else {
                return;
            };
            if !motion::is_internal_page_link(&href, &current_file) {
                return;
            }
            event.prevent_default();
            gsap.to(
                &JsValue::from_str("body"),
                Vars::new()
                    .num("opacity", 0.0)
                    .num("duration", 0.4)
                    .str("ease", "power1.easeOut")
                    .callback("onComplete", move || {
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().set_href(&href);
                        }
                    }),
            );
        });
    }
}

/// Back/forward-cache restores resume with whatever opacity the body had
/// when the page was frozen; fade it back in if it is not fully visible.
fn init_bfcache_restore(gsap: Gsap) {
    let Some(window) = web_sys::window() else {
        return;
    };
    dom::listen(&window, "pageshow", move |event| {
        let Ok(event) = event.dyn_into::<PageTransitionEvent>() else {
            return;
        };
        if !event.persisted() {
            return;
        }
        let fully_visible = dom::body()
            .and_then(|body| body.style().get_property_value("opacity").ok())
            .map(|value| value == "1")
            .unwrap_or(false);
        if !fully_visible {
            gsap.set(&JsValue::from_str("body"), Vars::new().num("opacity", 0.0));
            gsap.to(
                &JsValue::from_str("body"),
                Vars::new()
                    .num("opacity", 1.0)
                    .num("duration", 0.5)
                    .str("ease", "power1.easeIn"),
            );
        }
    });
}
