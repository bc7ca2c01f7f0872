//! Animated background line fields, one independent loop per tagged canvas.
//!
//! Each canvas owns its line set for the lifetime of the page. Re-starting a
//! canvas cancels its previous frame request instead of stacking loops, and
//! resizing only rescales the backing store; the cached line set is never
//! regenerated. The theme controller recolors lines in place through
//! [`update_all_colors`] without tearing the loops down.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use js_sys::Object;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{dom, theme};
use crate::motion::{self, Line, Theme};

const CANVAS_SELECTOR: &str = ".section-bg-lines-canvas";
const LAYOUT_RETRY_MS: u32 = 50;
const RESIZE_SETTLE_MS: u32 = 100;

struct FieldEntry {
    canvas: HtmlCanvasElement,
    lines: Rc<RefCell<Vec<Line>>>,
    frame: Rc<Cell<i32>>,
}

thread_local! {
    static REGISTRY: RefCell<Vec<FieldEntry>> = RefCell::new(Vec::new());
}

fn same_canvas(a: &HtmlCanvasElement, b: &HtmlCanvasElement) -> bool {
    Object::is(AsRef::<JsValue>::as_ref(a), AsRef::<JsValue>::as_ref(b))
}

fn register(canvas: &HtmlCanvasElement) -> (Rc<RefCell<Vec<Line>>>, Rc<Cell<i32>>) {
    REGISTRY.with(|registry| {
        let mut registry = registry.borrow_mut();
        if let Some(entry) = registry
            .iter()
            .find(|entry| same_canvas(&entry.canvas, canvas))
        {
            return (entry.lines.clone(), entry.frame.clone());
        }

        let entry = FieldEntry {
            canvas: canvas.clone(),
            lines: Rc::new(RefCell::new(Vec::new())),
            frame: Rc::new(Cell::new(0)),
        };
        let handles = (entry.lines.clone(), entry.frame.clone());
        registry.push(entry);
        handles
    })
}

fn color_for(canvas: &HtmlCanvasElement, theme: Theme) -> Option<String> {
    let attribute = if theme.is_dark() {
        "data-color-dark"
    } else {
        "data-color-light"
    };
    canvas.get_attribute(attribute)
}

/// Rewrites every registered line's color in place; the next frame of each
/// loop picks it up. Positions, angles and speeds are untouched.
pub fn update_all_colors(theme: Theme) {
    REGISTRY.with(|registry| {
        for entry in registry.borrow().iter() {
            let Some(color) = color_for(&entry.canvas, theme) else {
                continue;
            };
            for line in entry.lines.borrow_mut().iter_mut() {
                line.color = color.clone();
            }
        }
    });
}

/// Starts a renderer on every tagged canvas, deferred briefly so layout can
/// settle before the element box is measured.
pub fn init_all() {
    for element in dom::query_all(CANVAS_SELECTOR) {
        let Ok(canvas) = element.dyn_into::<HtmlCanvasElement>() else {
            continue;
        };
        Timeout::new(LAYOUT_RETRY_MS, move || {
            if canvas.offset_width() > 0 && canvas.offset_height() > 0 {
                if let Some(color) = color_for(&canvas, theme::current()) {
                    let _ = start(canvas, color);
                }
            }
        })
        .forget();
    }
}

fn measure(canvas: &HtmlCanvasElement) -> (f64, f64) {
    (
        f64::from(canvas.offset_width()),
        f64::from(canvas.offset_height()),
    )
}

fn device_pixel_ratio() -> f64 {
    web_sys::window()
        .map(|window| window.device_pixel_ratio())
        .unwrap_or(1.0)
}

fn apply_backing_scale(
    canvas: &HtmlCanvasElement,
    ctx: &CanvasRenderingContext2d,
    (width, height): (f64, f64),
) {
    let dpr = device_pixel_ratio();
    canvas.set_width((width * dpr) as u32);
    canvas.set_height((height * dpr) as u32);
    let _ = ctx.scale(dpr, dpr);
}

fn schedule(slot: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>, frame: &Rc<Cell<i32>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let borrowed = slot.borrow();
    let Some(callback) = borrowed.as_ref() else {
        return;
    };
    if let Ok(handle) = window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        frame.set(handle);
    }
}

/// Starts (or restarts) the animation loop for one canvas. Idempotent per
/// canvas: any previous frame request is canceled first, and a non-empty
/// cached line set is reused rather than regenerated.
pub fn start(canvas: HtmlCanvasElement, color: String) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or("2d context unavailable")?
        .dyn_into::<CanvasRenderingContext2d>()?;

    let size = Rc::new(Cell::new(measure(&canvas)));

    if size.get().0 > 0.0 && size.get().1 > 0.0 {
        apply_backing_scale(&canvas, &ctx, size.get());
    } else {
        // Not laid out yet; retry once shortly after.
        let retry_canvas = canvas.clone();
        let retry_ctx = ctx.clone();
        let retry_size = size.clone();
        Timeout::new(LAYOUT_RETRY_MS, move || {
            let measured = measure(&retry_canvas);
            if measured.0 > 0.0 && measured.1 > 0.0 {
                retry_size.set(measured);
                apply_backing_scale(&retry_canvas, &retry_ctx, measured);
            }
        })
        .forget();
    }

    // Trailing-debounced resize: rescale only, never regenerate lines.
    {
        let resize_canvas = canvas.clone();
        let resize_ctx = ctx.clone();
        let resize_size = size.clone();
        let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
        dom::listen(&window, "resize", move |_| {
            if let Some(scheduled) = pending.borrow_mut().take() {
                scheduled.cancel();
            }
            let canvas = resize_canvas.clone();
            let ctx = resize_ctx.clone();
            let size = resize_size.clone();
            let settled = Timeout::new(RESIZE_SETTLE_MS, move || {
                let measured = measure(&canvas);
                if measured.0 == 0.0 || measured.1 == 0.0 {
                    return;
                }
                size.set(measured);
                apply_backing_scale(&canvas, &ctx, measured);
            });
            *pending.borrow_mut() = Some(settled);
        });
    }

    let (lines, frame) = register(&canvas);
    if frame.get() != 0 {
        window.cancel_animation_frame(frame.get())?;
        frame.set(0);
    }

    {
        let mut lines = lines.borrow_mut();
        if lines.is_empty() {
            let (width, height) = size.get();
            let mut rand = || js_sys::Math::random();
            for _ in 0..motion::line_count(width) {
                lines.push(motion::spawn_line(&mut rand, width, height, &color));
            }
        }
        for line in lines.iter_mut() {
            line.color = color.clone();
        }
    }

    let slot: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let inner_slot = slot.clone();
    let frame_handle = frame.clone();
    let loop_canvas = canvas.clone();
    let loop_lines = lines.clone();
    let loop_size = size.clone();
    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        // A hidden ancestor collapses the box; keep the loop alive but idle.
        if loop_canvas.offset_width() == 0 || loop_canvas.offset_height() == 0 {
            schedule(&inner_slot, &frame_handle);
            return;
        }

        let dpr = device_pixel_ratio();
        ctx.clear_rect(
            0.0,
            0.0,
            f64::from(loop_canvas.width()) / dpr,
            f64::from(loop_canvas.height()) / dpr,
        );

        let (width, height) = loop_size.get();
        let mut rand = || js_sys::Math::random();
        for line in loop_lines.borrow_mut().iter_mut() {
            ctx.begin_path();
            ctx.move_to(line.x, line.y);
            ctx.line_to(
                line.x + line.angle.cos() * line.length,
                line.y + line.angle.sin() * line.length,
            );
            ctx.set_stroke_style_str(&line.color);
            ctx.set_line_width(motion::LINE_WIDTH);
            ctx.set_global_alpha(line.opacity);
            ctx.stroke();
            motion::advance_line(line, width, height, &mut rand);
        }

        schedule(&inner_slot, &frame_handle);
    }) as Box<dyn FnMut()>));

    schedule(&slot, &frame);
    Ok(())
}

#[cfg(test)]
fn lines_snapshot(canvas: &HtmlCanvasElement) -> Option<Vec<Line>> {
    REGISTRY.with(|registry| {
        registry
            .borrow()
            .iter()
            .find(|entry| same_canvas(&entry.canvas, canvas))
            .map(|entry| entry.lines.borrow().clone())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    fn install_canvas() -> HtmlCanvasElement {
        let document = dom::document().unwrap();
        let canvas = document
            .create_element("canvas")
            .unwrap()
            .dyn_into::<HtmlCanvasElement>()
            .unwrap();
        canvas.set_attribute("data-color-dark", "#123456").unwrap();
        canvas.set_attribute("data-color-light", "#abcdef").unwrap();
        document.body().unwrap().append_child(&canvas).unwrap();
        canvas
    }

    #[wasm_bindgen_test]
    fn start_populates_lines_once_and_is_idempotent() {
        let canvas = install_canvas();
        start(canvas.clone(), "#123456".to_string()).unwrap();

        let first = lines_snapshot(&canvas).unwrap();
        let expected = motion::line_count(f64::from(canvas.offset_width()));
        assert_eq!(first.len(), expected);

        // Restarting must reuse the cached set, not append a second one.
        start(canvas.clone(), "#123456".to_string()).unwrap();
        let second = lines_snapshot(&canvas).unwrap();
        assert_eq!(second.len(), expected);
        canvas.remove();
    }

    #[wasm_bindgen_test]
    fn color_update_preserves_line_geometry() {
        let canvas = install_canvas();
        start(canvas.clone(), "#123456".to_string()).unwrap();

        let before = lines_snapshot(&canvas).unwrap();
        update_all_colors(Theme::Light);
        let after = lines_snapshot(&canvas).unwrap();

        for (old, new) in before.iter().zip(after.iter()) {
            assert_eq!(new.color, "#abcdef");
            assert_eq!(new.angle, old.angle);
            assert_eq!(new.speed, old.speed);
            assert_eq!(new.length, old.length);
        }
        canvas.remove();
    }
}
