//! Scroll-driven navigation highlighting and navbar styling. Recomputed
//! wholesale on every scroll event, so the per-call work stays O(sections).

use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use super::{dom, theme};
use crate::motion::{self, Page, SectionSpan};

const ACTIVE_CLASSES: [&str; 2] = ["active-nav-link", "font-semibold"];
const STRIPPED_CLASSES: [&str; 5] = [
    "active-nav-link",
    "font-semibold",
    "dark:text-brand-primary",
    "text-brand-secondary",
    "text-brand-primary",
];

fn current_page() -> Page {
    let path = web_sys::window()
        .and_then(|window| window.location().pathname().ok())
        .unwrap_or_default();
    motion::page_from_path(&path)
}

fn section_spans() -> Vec<SectionSpan> {
    dom::query_all("main section[id]")
        .into_iter()
        .filter_map(|element| {
            let id = element.id();
            let element = element.dyn_into::<HtmlElement>().ok()?;
            Some(SectionSpan {
                id,
                top: f64::from(element.offset_top()),
                height: f64::from(element.offset_height()),
            })
        })
        .collect()
}

pub fn update_active_link() {
    let Some(navbar) = dom::html_by_id("navbar") else {
        return;
    };
    let Some(window) = web_sys::window() else {
        return;
    };

    let scroll = window.page_y_offset().unwrap_or(0.0);
    let viewport_height = window
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);

    let active = motion::active_section_id(
        current_page(),
        &section_spans(),
        scroll,
        f64::from(navbar.offset_height()),
        viewport_height,
    );

    let dark = theme::current().is_dark();
    let mut links = dom::query_all(".nav-link");
    links.extend(dom::query_all(".nav-link-mobile"));

    for link in links {
        for class in STRIPPED_CLASSES {
            let _ = link.class_list().remove_1(class);
        }

        let Some(href) = link.get_attribute("href") else {
            continue;
        };
        let link_section = href.rfind('#').map(|index| href[index + 1..].to_string());
        let matches = (href == "projects.html" && active.as_deref() == Some("projects-page"))
            || (link_section.is_some() && link_section.as_deref() == active.as_deref());

        if matches {
            for class in ACTIVE_CLASSES {
                let _ = link.class_list().add_1(class);
            }
            let color = if dark {
                "dark:text-brand-primary"
            } else {
                "text-brand-secondary"
            };
            let _ = link.class_list().add_1(color);
        }
    }
}

fn sync_navbar_style(scroll: f64) {
    let Some(navbar) = dom::by_id("navbar") else {
        return;
    };
    let list = navbar.class_list();
    if scroll > 20.0 {
        let _ = list.add_2("nav-scrolled", "shadow-2xl");
        let _ = list.remove_1("py-3");
        let _ = list.add_1("py-2.5");
    } else {
        let _ = list.remove_2("nav-scrolled", "shadow-2xl");
        let _ = list.remove_1("py-2.5");
        let _ = list.add_1("py-3");
    }
}

pub fn init() {
    if let Some(window) = web_sys::window() {
        dom::listen(&window, "scroll", |_| {
            let scroll = web_sys::window()
                .and_then(|window| window.page_y_offset().ok())
                .unwrap_or(0.0);
            sync_navbar_style(scroll);
            update_active_link();
        });
    }
    update_active_link();
}
