use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("element not found: {selector}")]
    MissingElement { selector: String },

    #[error("element {selector} is not a {expected}")]
    UnexpectedElement { selector: String, expected: &'static str },

    #[error("{component} is not bound to this page")]
    NotBound { component: &'static str },

    #[error("no window or document available")]
    NoWindow,

    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("request to {url} timed out after {timeout_ms}ms")]
    Timeout { url: String, timeout_ms: u32 },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for PanelError {
    fn from(value: JsValue) -> Self {
        PanelError::Js(describe_js(&value))
    }
}

impl From<PanelError> for JsValue {
    fn from(err: PanelError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Best-effort rendering of a thrown JS value. `Error` objects (including
/// `TypeError` and `DOMException`) yield their message.
pub fn describe_js(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    match value.dyn_ref::<js_sys::Error>() {
        Some(err) => String::from(err.message()),
        None => format!("{:?}", value),
    }
}

pub type Result<T> = std::result::Result<T, PanelError>;
