use crate::config::ElementIds;
use crate::dom::Page;
use crate::error::Result;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlInputElement, HtmlMeterElement};

pub const LABELS: [&str; 5] = ["Worst", "Bad", "Weak", "Good", "Strong"];

thread_local! {
    static LISTENING_ON: RefCell<Option<HtmlInputElement>> = const { RefCell::new(None) };
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_name = zxcvbn)]
    fn zxcvbn_global(password: &str) -> std::result::Result<JsValue, JsValue>;
}

/// Guessability rating, 0 (worst) through 4 (strong).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct StrengthScore(u8);

impl StrengthScore {
    pub const MAX: u8 = 4;

    pub fn new(score: u8) -> Self {
        StrengthScore(score.min(Self::MAX))
    }

    /// Estimators hand back JS numbers; NaN and negatives land on 0.
    pub fn from_f64(score: f64) -> Self {
        if score.is_nan() || score <= 0.0 {
            StrengthScore(0)
        } else {
            StrengthScore::new(score.min(Self::MAX as f64) as u8)
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn label(self) -> &'static str {
        LABELS[self.0 as usize]
    }
}

/// Text shown under the meter. Empty input clears it whatever the score.
pub fn strength_text(value: &str, score: StrengthScore) -> String {
    if value.is_empty() {
        String::new()
    } else {
        format!("Strength: {}", score.label())
    }
}

pub trait StrengthEstimator {
    fn estimate(&self, password: &str) -> StrengthScore;
}

/// The `zxcvbn` function loaded by the page.
pub struct Zxcvbn;

impl StrengthEstimator for Zxcvbn {
    fn estimate(&self, password: &str) -> StrengthScore {
        let result = match zxcvbn_global(password) {
            Ok(result) => result,
            Err(e) => {
                crate::console_warn!(
                    "[PasswordMeter] zxcvbn unavailable: {}",
                    crate::error::describe_js(&e)
                );
                return StrengthScore::default();
            }
        };
        match js_sys::Reflect::get(&result, &JsValue::from_str("score"))
            .ok()
            .and_then(|v| v.as_f64())
        {
            Some(score) => StrengthScore::from_f64(score),
            None => {
                crate::console_warn!("[PasswordMeter] zxcvbn returned no numeric score");
                StrengthScore::default()
            }
        }
    }
}

pub struct PasswordMeter<E> {
    input: HtmlInputElement,
    meter: HtmlMeterElement,
    text: Element,
    estimator: E,
}

impl<E: StrengthEstimator> PasswordMeter<E> {
    pub fn bind(page: &Page, ids: &ElementIds, estimator: E) -> Result<Self> {
        Ok(PasswordMeter {
            input: page.typed_by_id(&ids.new_password, "HtmlInputElement")?,
            meter: page.typed_by_id(&ids.strength_meter, "HtmlMeterElement")?,
            text: page.by_id(&ids.strength_text)?,
            estimator,
        })
    }

    pub fn on_password_input(&self, value: &str) -> StrengthScore {
        let score = self.estimator.estimate(value);
        self.meter.set_value(score.value() as f64);
        self.text.set_text_content(Some(&strength_text(value, score)));
        score
    }

    /// Re-scores whatever is currently typed in the password field.
    pub fn refresh(&self) -> StrengthScore {
        self.on_password_input(&self.input.value())
    }
}

/// Hooks the meter to the field's `input` event for the life of the page.
/// Returns `false` when that field already has a meter listener.
pub fn attach<E: StrengthEstimator + 'static>(meter: PasswordMeter<E>) -> Result<bool> {
    let already = LISTENING_ON.with(|l| {
        l.borrow()
            .as_ref()
            .is_some_and(|input| input.is_same_node(Some(meter.input.as_ref())))
    });
    if already {
        return Ok(false);
    }
    let meter = Rc::new(meter);
    let handler = meter.clone();
    let closure = Closure::<dyn FnMut(_)>::wrap(Box::new(move |_e: Event| {
        handler.refresh();
    }));
    meter
        .input
        .add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
    closure.forget();
    LISTENING_ON.with(|l| *l.borrow_mut() = Some(meter.input.clone()));
    Ok(true)
}
