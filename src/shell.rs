use crate::config::{ElementIds, PanelConfig};
use crate::dom::Page;
use crate::error::Result;
use crate::http::{self, HttpReply};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, HtmlSelectElement};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellOutcome {
    Changed,
    Rejected { message: String },
}

impl ShellOutcome {
    pub fn from_reply(reply: HttpReply) -> Self {
        if reply.is_ok() {
            ShellOutcome::Changed
        } else {
            ShellOutcome::Rejected {
                message: reply.body,
            }
        }
    }

    pub fn from_result(result: Result<HttpReply>) -> Self {
        match result {
            Ok(reply) => ShellOutcome::from_reply(reply),
            Err(e) => ShellOutcome::Rejected {
                message: e.to_string(),
            },
        }
    }
}

pub fn shell_url(endpoint: &str, shell: &str) -> String {
    format!("{}?shell={}", endpoint, urlencoding::encode(shell))
}

pub struct ShellChanger {
    page: Page,
    ids: ElementIds,
    endpoint: String,
    timeout_ms: Option<u32>,
}

impl ShellChanger {
    pub fn new(page: Page, config: &PanelConfig) -> Self {
        ShellChanger {
            page,
            ids: config.ids.clone(),
            endpoint: config.endpoints.change_shell.clone(),
            timeout_ms: config.request_timeout_ms,
        }
    }

    pub fn selected_shell(&self) -> Result<String> {
        let select: HtmlSelectElement =
            self.page.typed_query(&self.ids.shell_select, "HtmlSelectElement")?;
        Ok(select.value())
    }

    pub async fn request(&self, shell: &str) -> ShellOutcome {
        let url = shell_url(&self.endpoint, shell);
        crate::console_debug!("[ShellChanger] POST {}", url);
        ShellOutcome::from_result(http::post(&url, self.timeout_ms).await)
    }

    /// Shows exactly one of the success and error elements. Server messages
    /// are inserted as text.
    pub fn render(&self, outcome: &ShellOutcome) -> Result<()> {
        match outcome {
            ShellOutcome::Changed => {
                self.page.hide(&self.ids.shell_error)?;
                self.page.show(&self.ids.shell_success)
            }
            ShellOutcome::Rejected { message } => {
                self.page.hide(&self.ids.shell_success)?;
                self.page.set_text(&self.ids.shell_error, message)?;
                self.page.show(&self.ids.shell_error)
            }
        }
    }

    pub async fn change(&self, shell: &str) -> Result<ShellOutcome> {
        let outcome = self.request(shell).await;
        match &outcome {
            ShellOutcome::Changed => crate::console_info!("[ShellChanger] shell set to {}", shell),
            ShellOutcome::Rejected { message } => {
                crate::console_warn!("[ShellChanger] change to {} rejected: {}", shell, message)
            }
        }
        self.render(&outcome)?;
        Ok(outcome)
    }
}

/// Submit handler for the shells form: `onsubmit="changeShell(event)"`.
#[wasm_bindgen(js_name = changeShell)]
pub fn change_shell(event: Event) -> std::result::Result<(), JsValue> {
    event.prevent_default();
    let changer = ShellChanger::new(Page::current()?, &crate::current_config());
    let shell = changer.selected_shell()?;
    spawn_local(async move {
        if let Err(e) = changer.change(&shell).await {
            crate::console_error!("[ShellChanger] {}", e);
        }
    });
    Ok(())
}
