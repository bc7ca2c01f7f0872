//! Decorative floating-particle field. Built once at boot on pages that have
//! the container; the drift itself is a CSS keyframe animation driven by the
//! per-element custom properties written here.

use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use super::dom;
use crate::motion::{self, PARTICLE_COUNT};

pub fn create() {
    let Some(container) = dom::by_id("particle-container") else {
        return;
    };
    let Some(document) = dom::document() else {
        return;
    };

    container.set_inner_html("");
    let fragment = document.create_document_fragment();
    let mut rand = || js_sys::Math::random();

    for _ in 0..PARTICLE_COUNT {
        let particle = motion::spawn_particle(&mut rand);
        let Ok(element) = document.create_element("div") else {
            continue;
        };
        element.set_class_name("particle");
        let Ok(element) = element.dyn_into::<HtmlElement>() else {
            continue;
        };

        let style = element.style();
        let properties = [
            ("--tx-start", format!("{}vw", particle.x)),
            ("--ty-start", format!("{}vh", particle.y)),
            ("--tx-end", format!("{}vw", particle.x_end)),
            ("--ty-end", format!("{}vh", particle.y_end)),
            ("--op-start", format!("{}", particle.opacity_start)),
            ("--scale-end", format!("{}", particle.scale_end)),
            ("position", "absolute".to_string()),
            ("left", "var(--tx-start)".to_string()),
            ("top", "var(--ty-start)".to_string()),
            ("width", format!("{}px", particle.size)),
            ("height", format!("{}px", particle.size)),
            ("background-color", "var(--accent-glow)".to_string()),
            (
                "animation",
                format!("moveParticle {}s linear infinite alternate", particle.duration),
            ),
            ("animation-delay", format!("-{}s", particle.delay)),
        ];
        for (name, value) in properties {
            let _ = style.set_property(name, &value);
        }

        let _ = fragment.append_child(&element);
    }

    // Single insertion for the whole batch.
    let _ = container.append_child(&fragment);
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    fn install_container() -> web_sys::Element {
        let document = dom::document().unwrap();
        if let Some(existing) = document.get_element_by_id("particle-container") {
            return existing;
        }
        let container = document.create_element("div").unwrap();
        container.set_id("particle-container");
        document.body().unwrap().append_child(&container).unwrap();
        container
    }

    #[wasm_bindgen_test]
    fn creates_exactly_sixty_particles_even_when_rerun() {
        let container = install_container();

        create();
        assert_eq!(container.child_element_count(), PARTICLE_COUNT as u32);

        create();
        assert_eq!(container.child_element_count(), PARTICLE_COUNT as u32);
    }

    #[wasm_bindgen_test]
    fn missing_container_is_a_silent_no_op() {
        let container = install_container();
        container.remove();
        create();
        assert!(dom::by_id("particle-container").is_none());
    }
}
