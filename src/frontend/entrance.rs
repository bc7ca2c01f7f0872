//! One-shot entrance animations and the continuous card tilt. The hero plays
//! immediately on the homepage; everything else is viewport-triggered and
//! fires exactly once.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::MouseEvent;

use super::dom;
use super::gsap::{Gsap, Vars};
use crate::motion;

const HERO_PARTS: &str = ".hero-title, .hero-subtitle, .hero-description, .hero-buttons";

// Content blocks directly inside a section container, minus composite
// structures (titles, grids, cards) that animate on their own.
const CONTENT_BLOCKS: &str = "section > .container > *:not(.section-title):not(.grid):not(.max-w-3xl):not(.project-card), \
     section > .container > div > *:not(.section-title):not(.grid):not(.max-w-3xl):not(.project-card)";

fn viewport_trigger(trigger: &JsValue, start: &str) -> Vars {
    Vars::new()
        .target("trigger", trigger)
        .str("start", start)
        .str("toggleActions", "play none none none")
        .flag("once", true)
}

pub fn init_homepage(gsap: &Gsap) {
    if dom::by_id("home").is_none() {
        return;
    }

    // Per-character title reveal, second line trailing the first.
    for (selector, delay) in [
        (".hero-title .line-1 span", 0.3),
        (".hero-title .line-2 span", 0.6),
    ] {
        let spans = match dom::document().and_then(|d| d.query_selector_all(selector).ok()) {
            Some(list) if list.length() > 0 => list,
            _ => continue,
        };
        gsap.from_to(
            &JsValue::from(spans),
            Vars::new()
                .num("opacity", 0.0)
                .num("y", 40.0)
                .num("rotationX", -100.0)
                .str("filter", "blur(5px)"),
            Vars::new()
                .num("opacity", 1.0)
                .num("y", 0.0)
                .num("rotationX", 0.0)
                .str("filter", "blur(0px)")
                .num("stagger", 0.05)
                .num("duration", 1.0)
                .str("ease", "expo.out")
                .num("delay", delay),
        );
    }

    if let Some(timeline) = gsap.timeline(Vars::new().num("delay", 1.0)) {
        timeline
            .from_to(".hero-subtitle", rise_from(), rise_to(), None)
            .from_to(".hero-description", rise_from(), rise_to(), Some("-=0.6"))
            .from_to(".hero-buttons", rise_from(), rise_to(), Some("-=0.6"));
    }

    gsap.from(
        &JsValue::from_str("#featured-projects .project-card"),
        card_entrance(0.18, 0.9)
            .nested(
                "scrollTrigger",
                viewport_trigger(&JsValue::from_str("#featured-projects .grid"), "top 85%"),
            ),
    );

    attach_card_hover(gsap, "#featured-projects .project-card");
}

pub fn init_projects_page(gsap: &Gsap) {
    if dom::by_id("all-projects").is_none() {
        return;
    }

    gsap.from(
        &JsValue::from_str("#project-gallery .project-card:not(.hidden-by-filter)"),
        card_entrance(0.1, 0.7)
            .nested(
                "scrollTrigger",
                viewport_trigger(&JsValue::from_str("#project-gallery"), "top 85%"),
            ),
    );

    attach_card_hover(gsap, "#project-gallery .project-card");
}

pub fn init_common(gsap: &Gsap) {
    for title in dom::query_all(".section-title") {
        let underline = title.query_selector(".section-title-underline").ok().flatten();
        gsap.scroll_trigger_create(
            viewport_trigger(&JsValue::from(title), "top 88%").callback("onEnter", move || {
                if let Some(underline) = underline {
                    let _ = underline.class_list().add_1("visible");
                }
            }),
        );
    }

    for block in dom::query_all(CONTENT_BLOCKS) {
        // Hero descendants animate in the homepage sequence instead.
        if block.closest(HERO_PARTS).ok().flatten().is_some() {
            continue;
        }
        let target = JsValue::from(block);
        gsap.from_to(
            &target,
            Vars::new()
                .num("opacity", 0.0)
                .num("y", 60.0)
                .str("filter", "blur(3px)"),
            Vars::new()
                .num("opacity", 1.0)
                .num("y", 0.0)
                .str("filter", "blur(0px)")
                .num("duration", 1.0)
                .str("ease", "expo.out")
                .nested("scrollTrigger", viewport_trigger(&target, "top 90%")),
        );
    }
}

fn rise_from() -> Vars {
    Vars::new().num("opacity", 0.0).num("y", 25.0)
}

fn rise_to() -> Vars {
    Vars::new()
        .num("opacity", 1.0)
        .num("y", 0.0)
        .num("duration", 0.8)
        .str("ease", "power3.out")
}

fn card_entrance(stagger: f64, duration: f64) -> Vars {
    Vars::new()
        .num("opacity", 0.0)
        .num("y", 60.0)
        .num("scale", 0.9)
        .num("stagger", stagger)
        .num("duration", duration)
        .str("ease", "expo.out")
}

/// Pointer-tracking 3D tilt: proportional rotation toward the cursor while it
/// moves over a card, elastic spring back to neutral on leave.
fn attach_card_hover(gsap: &Gsap, selector: &str) {
    for card in dom::query_all(selector) {
        {
            let gsap = gsap.clone();
            let target = JsValue::from(card.clone());
            let tracked = card.clone();
            dom::listen(&card, "mousemove", move |event| {
                let Ok(event) = event.dyn_into::<MouseEvent>() else {
                    return;
                };
                let rect = tracked.get_bounding_client_rect();
                let dx = f64::from(event.client_x()) - rect.left() - rect.width() / 2.0;
                let dy = f64::from(event.client_y()) - rect.top() - rect.height() / 2.0;
                let (rotation_x, rotation_y) =
                    motion::tilt_rotation(dx, dy, rect.width(), rect.height());
                gsap.to(
                    &target,
                    Vars::new()
                        .num("rotationX", rotation_x)
                        .num("rotationY", rotation_y)
                        .num("transformPerspective", 1200.0)
                        .str("ease", "power1.out")
                        .num("duration", 0.5),
                );
            });
        }
        {
            let gsap = gsap.clone();
            let target = JsValue::from(card.clone());
            dom::listen(&card, "mouseleave", move |_| {
                gsap.to(
                    &target,
                    Vars::new()
                        .num("rotationX", 0.0)
                        .num("rotationY", 0.0)
                        .str("ease", "elastic.out(1, 0.5)")
                        .num("duration", 1.0),
                );
            });
        }
    }
}
