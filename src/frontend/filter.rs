//! Category filter for the projects gallery. Reveals cascade with a small
//! stagger; hides finalize their state only when their animation completes,
//! so a card is never removed from layout while still visually present.

use gloo_timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Element;

use super::dom;
use super::gsap::{Gsap, Vars};
use crate::motion;

const SHOW_STAGGER_SECONDS: f64 = 0.07;
const REFRESH_MARGIN_MS: u32 = 400;

pub fn init(gsap: &Gsap) {
    let Some(container) = dom::by_id("filter-buttons") else {
        return;
    };
    if dom::by_id("project-gallery").is_none() {
        return;
    }
    let cards = dom::query_all("#project-gallery .project-card");
    if cards.is_empty() {
        return;
    }

    let gsap = gsap.clone();
    let buttons = container.clone();
    dom::listen(&container, "click", move |event| {
        let Some(target) = event.target() else {
            return;
        };
        let Ok(target) = target.dyn_into::<Element>() else {
            return;
        };
        let Ok(Some(button)) = target.closest("button.filter-btn") else {
            return;
        };
        if button.class_list().contains("active") {
            return;
        }

        if let Ok(Some(previous)) = buttons.query_selector(".active") {
            let _ = previous.class_list().remove_1("active");
            let _ = previous.set_attribute("aria-pressed", "false");
        }
        let _ = button.class_list().add_1("active");
        let _ = button.set_attribute("aria-pressed", "true");

        let Some(filter) = button.get_attribute("data-filter") else {
            return;
        };

        let mut show_delay = 0.0;
        for card in &cards {
            let categories = card.get_attribute("data-category").unwrap_or_default();
            let should_show = motion::filter_matches(&filter, &categories);
            let _ = card.class_list().add_1("gsap-animating");
            let target = JsValue::from(card.clone());

            // A hide from a previous click may still be running; its completion
            // would re-hide the card after we snap it visible. Kill it first so
            // only this click decides the card's final state.
            gsap.kill_tweens_of(&target);

            if should_show {
                let was_hidden = card.class_list().contains("hidden-by-filter")
                    || gsap.opacity_of(&target) == Some(0.0);
                if was_hidden {
                    let _ = card.class_list().remove_1("hidden-by-filter");
                    gsap.set(
                        &target,
                        Vars::new()
                            .str("display", "flex")
                            .num("opacity", 0.0)
                            .num("scale", 0.95)
                            .num("y", 20.0),
                    );
                    let finished = card.clone();
                    gsap.to(
                        &target,
                        Vars::new()
                            .num("opacity", 1.0)
                            .num("scale", 1.0)
                            .num("y", 0.0)
                            .num("duration", 0.4)
                            .num("delay", show_delay)
                            .str("ease", "power2.out")
                            .callback("onComplete", move || {
                                let _ = finished.class_list().remove_1("gsap-animating");
                            }),
                    );
                    show_delay += SHOW_STAGGER_SECONDS;
                } else {
                    // Already visible: snap to the resting pose, no animation.
                    gsap.set(
                        &target,
                        Vars::new()
                            .str("display", "flex")
                            .num("opacity", 1.0)
                            .num("scale", 1.0)
                            .num("y", 0.0),
                    );
                    let _ = card.class_list().remove_1("gsap-animating");
                }
            } else {
                let finished = card.clone();
                let finish_gsap = gsap.clone();
                let finish_target = target.clone();
                gsap.to(
                    &target,
                    Vars::new()
                        .num("opacity", 0.0)
                        .num("scale", 0.95)
                        .num("y", 20.0)
                        .num("duration", 0.3)
                        .str("ease", "power2.in")
                        .callback("onComplete", move || {
                            let _ = finished.class_list().add_1("hidden-by-filter");
                            finish_gsap.set(&finish_target, Vars::new().str("display", "none"));
                            let _ = finished.class_list().remove_1("gsap-animating");
                        }),
                );
            }
        }

        // Re-measure viewport triggers once the longest reveal has landed.
        let refresh_gsap = gsap.clone();
        Timeout::new(
            (show_delay * 1000.0) as u32 + REFRESH_MARGIN_MS,
            move || refresh_gsap.scroll_trigger_refresh(),
        )
        .forget();
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::gsap::{self, stub};
    use wasm_bindgen_test::wasm_bindgen_test;
    use web_sys::HtmlElement;

    struct Gallery {
        all_button: Element,
        web_button: Element,
        ml_button: Element,
        web_card: Element,
        ml_card: Element,
    }

    fn install_gallery() -> Gallery {
        let document = dom::document().unwrap();
        let body = document.body().unwrap();
        for id in ["filter-buttons", "project-gallery"] {
            if let Some(stale) = document.get_element_by_id(id) {
                stale.remove();
            }
        }

        let buttons = document.create_element("div").unwrap();
        buttons.set_id("filter-buttons");
        let make_button = |filter: &str, active: bool| {
            let button = document.create_element("button").unwrap();
            button.set_class_name(if active { "filter-btn active" } else { "filter-btn" });
            button.set_attribute("data-filter", filter).unwrap();
            buttons.append_child(&button).unwrap();
            button
        };
        let all_button = make_button("all", true);
        let web_button = make_button("web", false);
        let ml_button = make_button("ml", false);
        body.append_child(&buttons).unwrap();

        let gallery = document.create_element("div").unwrap();
        gallery.set_id("project-gallery");
        let make_card = |category: &str| {
            let card = document.create_element("div").unwrap();
            card.set_class_name("project-card");
            card.set_attribute("data-category", category).unwrap();
            gallery.append_child(&card).unwrap();
            card
        };
        let web_card = make_card("web");
        let ml_card = make_card("ml");
        body.append_child(&gallery).unwrap();

        Gallery {
            all_button,
            web_button,
            ml_button,
            web_card,
            ml_card,
        }
    }

    fn click(button: &Element) {
        button.dyn_ref::<HtmlElement>().unwrap().click();
    }

    #[wasm_bindgen_test]
    fn interrupted_hide_cannot_finalize_a_card_the_filter_shows() {
        let handle = stub::install();
        let gallery = install_gallery();
        let gsap = gsap::detect().unwrap();
        init(&gsap);

        // First click starts hiding the mismatched card; its completion stays
        // parked, as if the 0.3 s hide were still mid-flight.
        click(&gallery.web_button);
        assert_eq!(handle.pending_count(), 1);

        // Second click re-shows everything while that hide is in flight. The
        // stale completion must be killed, not left to fire later.
        click(&gallery.all_button);
        let ml_target = JsValue::from(gallery.ml_card.clone());
        assert!(handle.kill_count_for(&ml_target) > 0);
        handle.flush_completions();

        assert!(!gallery.ml_card.class_list().contains("hidden-by-filter"));
        assert!(!gallery.web_card.class_list().contains("hidden-by-filter"));
        assert!(!gallery.ml_card.class_list().contains("gsap-animating"));
    }

    #[wasm_bindgen_test]
    fn rapid_reclicks_settle_to_the_last_filter() {
        let handle = stub::install();
        let gallery = install_gallery();
        let gsap = gsap::detect().unwrap();
        init(&gsap);

        click(&gallery.web_button);
        click(&gallery.ml_button);
        click(&gallery.web_button);
        handle.flush_completions();

        assert!(!gallery.web_card.class_list().contains("hidden-by-filter"));
        assert!(gallery.ml_card.class_list().contains("hidden-by-filter"));
        assert!(!gallery.web_card.class_list().contains("gsap-animating"));
        assert!(!gallery.ml_card.class_list().contains("gsap-animating"));
    }
}
