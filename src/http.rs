use crate::error::{describe_js, PanelError, Result};
use gloo_timers::callback::Timeout;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Request, RequestInit, RequestMode, Response};

/// Status line and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

pub async fn get(url: &str, timeout_ms: Option<u32>) -> Result<HttpReply> {
    send(Method::Get, url, timeout_ms).await
}

/// POST with an empty body.
pub async fn post(url: &str, timeout_ms: Option<u32>) -> Result<HttpReply> {
    send(Method::Post, url, timeout_ms).await
}

/// Issues a same-origin request and waits for the full body. Non-2xx
/// statuses are returned as replies, only transport failures are errors.
pub async fn send(method: Method, url: &str, timeout_ms: Option<u32>) -> Result<HttpReply> {
    let opts = RequestInit::new();
    opts.set_method(method.as_str());
    opts.set_mode(RequestMode::SameOrigin);

    let controller = match timeout_ms {
        Some(_) => Some(AbortController::new()?),
        None => None,
    };
    if let Some(controller) = &controller {
        opts.set_signal(Some(&controller.signal()));
    }

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|e| request_error(url, "failed to create request", &e))?;

    let window = web_sys::window().ok_or(PanelError::NoWindow)?;

    let timed_out = Rc::new(Cell::new(false));
    // Dropping the guard cancels the timer, so it must outlive the body read.
    let _guard = match (controller, timeout_ms) {
        (Some(controller), Some(ms)) => {
            let flag = timed_out.clone();
            Some(Timeout::new(ms, move || {
                flag.set(true);
                controller.abort();
            }))
        }
        _ => None,
    };
    let fail = |stage: &str, e: JsValue| match timeout_ms {
        Some(ms) if timed_out.get() => PanelError::Timeout {
            url: url.to_string(),
            timeout_ms: ms,
        },
        _ => request_error(url, stage, &e),
    };

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| fail("fetch failed", e))?;

    let resp: Response = resp_value
        .dyn_into()
        .map_err(|e| fail("response is not a Response object", e))?;
    let status = resp.status();

    let text = JsFuture::from(resp.text().map_err(|e| fail("failed to get text", e))?)
        .await
        .map_err(|e| fail("failed to read text", e))?;

    Ok(HttpReply {
        status,
        body: text.as_string().unwrap_or_default(),
    })
}

fn request_error(url: &str, stage: &str, e: &JsValue) -> PanelError {
    PanelError::Request {
        url: url.to_string(),
        reason: format!("{}: {}", stage, describe_js(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_200_is_ok() {
        let reply = |status| HttpReply {
            status,
            body: String::new(),
        };
        assert!(reply(200).is_ok());
        assert!(!reply(201).is_ok());
        assert!(!reply(204).is_ok());
        assert!(!reply(404).is_ok());
        assert!(!reply(500).is_ok());
    }

    #[test]
    fn test_method_names() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::Post.as_str(), "POST");
    }
}
