//! Dynamic binding to the page-global GSAP and ScrollTrigger objects.
//!
//! The animation library is loaded by the host document, not by this crate,
//! so every call goes through `Reflect` lookups against whatever the page
//! provides. `detect` returning `None` is the one fatal startup condition:
//! the lifecycle controller degrades to a static page instead of booting.

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

#[derive(Clone)]
pub struct Gsap {
    core: JsValue,
    scroll_trigger: JsValue,
}

pub fn detect() -> Option<Gsap> {
    let window = web_sys::window()?;
    let core = Reflect::get(window.as_ref(), &JsValue::from_str("gsap")).ok()?;
    let scroll_trigger = Reflect::get(window.as_ref(), &JsValue::from_str("ScrollTrigger")).ok()?;
    if core.is_undefined() || core.is_null() || scroll_trigger.is_undefined() || scroll_trigger.is_null()
    {
        return None;
    }
    Some(Gsap {
        core,
        scroll_trigger,
    })
}

fn invoke(receiver: &JsValue, name: &str, args: &[JsValue]) -> Option<JsValue> {
    let method = Reflect::get(receiver, &JsValue::from_str(name)).ok()?;
    let method = method.dyn_into::<Function>().ok()?;
    let list = Array::new();
    for arg in args {
        list.push(arg);
    }
    method.apply(receiver, &list).ok()
}

impl Gsap {
    pub fn register_scroll_trigger(&self) {
        invoke(&self.core, "registerPlugin", &[self.scroll_trigger.clone()]);
    }

    pub fn to(&self, target: &JsValue, vars: Vars) {
        invoke(&self.core, "to", &[target.clone(), vars.into_value()]);
    }

    pub fn from(&self, target: &JsValue, vars: Vars) {
        invoke(&self.core, "from", &[target.clone(), vars.into_value()]);
    }

    pub fn from_to(&self, target: &JsValue, from: Vars, to: Vars) {
        invoke(
            &self.core,
            "fromTo",
            &[target.clone(), from.into_value(), to.into_value()],
        );
    }

    pub fn set(&self, target: &JsValue, vars: Vars) {
        invoke(&self.core, "set", &[target.clone(), vars.into_value()]);
    }

    /// Cancels every in-flight tween on `target`, including its completion
    /// callback, so a superseded animation can never finalize stale state.
    pub fn kill_tweens_of(&self, target: &JsValue) {
        invoke(&self.core, "killTweensOf", &[target.clone()]);
    }

    pub fn opacity_of(&self, target: &JsValue) -> Option<f64> {
        invoke(
            &self.core,
            "getProperty",
            &[target.clone(), JsValue::from_str("opacity")],
        )?
        .as_f64()
    }

    pub fn timeline(&self, vars: Vars) -> Option<Timeline> {
        Some(Timeline(invoke(&self.core, "timeline", &[vars.into_value()])?))
    }

    pub fn scroll_trigger_create(&self, vars: Vars) {
        invoke(&self.scroll_trigger, "create", &[vars.into_value()]);
    }

    pub fn scroll_trigger_refresh(&self) {
        invoke(&self.scroll_trigger, "refresh", &[]);
    }
}

pub struct Timeline(JsValue);

impl Timeline {
    /// Appends a `fromTo` step, optionally at a relative position such as
    /// `"-=0.6"` to overlap the previous step.
    pub fn from_to(&self, target: &str, from: Vars, to: Vars, position: Option<&str>) -> &Self {
        let mut args = vec![JsValue::from_str(target), from.into_value(), to.into_value()];
        if let Some(position) = position {
            args.push(JsValue::from_str(position));
        }
        invoke(&self.0, "fromTo", &args);
        self
    }
}

/// Builder for a GSAP vars object.
pub struct Vars(Object);

impl Vars {
    pub fn new() -> Self {
        Self(Object::new())
    }

    fn put(self, key: &str, value: JsValue) -> Self {
        let _ = Reflect::set(&self.0, &JsValue::from_str(key), &value);
        self
    }

    pub fn num(self, key: &str, value: f64) -> Self {
        self.put(key, JsValue::from_f64(value))
    }

    pub fn str(self, key: &str, value: &str) -> Self {
        self.put(key, JsValue::from_str(value))
    }

    pub fn flag(self, key: &str, value: bool) -> Self {
        self.put(key, JsValue::from_bool(value))
    }

    pub fn target(self, key: &str, value: &JsValue) -> Self {
        self.put(key, value.clone())
    }

    pub fn nested(self, key: &str, value: Vars) -> Self {
        let value = value.into_value();
        self.put(key, value)
    }

    /// One-shot callback slot (`onComplete`, `onEnter`). The closure is handed
    /// to the library and dropped after its single invocation.
    pub fn callback(self, key: &str, f: impl FnOnce() + 'static) -> Self {
        self.put(key, Closure::once_into_js(f))
    }

    pub fn into_value(self) -> JsValue {
        self.0.into()
    }
}
