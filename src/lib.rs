pub mod config;
pub mod database;
pub mod dom;
pub mod error;
pub mod http;
mod log;
pub mod shell;
pub mod strength;
pub mod wordpress;

pub use config::PanelConfig;
pub use database::{DatabaseForm, FormState};
pub use dom::Page;
pub use error::PanelError;
pub use shell::{ShellChanger, ShellOutcome};
pub use strength::{PasswordMeter, StrengthScore};
pub use wordpress::{InstallOutcome, WordpressInstaller};

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Event;

thread_local! {
    static CONFIG: RefCell<Option<PanelConfig>> = const { RefCell::new(None) };
}

/// Config captured at bootstrap, or the stock defaults before that.
pub fn current_config() -> PanelConfig {
    CONFIG.with(|c| c.borrow().clone()).unwrap_or_default()
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let page = Page::current()?;
    if page.document().ready_state() == "loading" {
        let deferred = page.clone();
        let on_ready = Closure::once_into_js(move |_e: Event| {
            bind_page(&deferred);
        });
        page.document()
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    } else {
        bind_page(&page);
    }
    Ok(())
}

/// Loads the page config and binds whichever components have markup on this
/// page. The database form snapshot is taken here, before any handler runs.
pub fn bind_page(page: &Page) -> PanelConfig {
    let config = PanelConfig::load(page);
    CONFIG.with(|c| *c.borrow_mut() = Some(config.clone()));

    if page.has_id(&config.ids.database_form_title) {
        match DatabaseForm::capture(page.clone(), &config) {
            Ok(form) => {
                crate::console_debug!("[bind] database form captured: {:?}", form.original());
                database::install(form);
            }
            Err(e) => crate::console_warn!("[bind] database form not bound: {}", e),
        }
    }

    if page.has_id(&config.ids.new_password) {
        let bound = PasswordMeter::bind(page, &config.ids, strength::Zxcvbn)
            .and_then(strength::attach);
        match bound {
            Ok(true) => crate::console_debug!("[bind] password meter attached"),
            Ok(false) => {}
            Err(e) => crate::console_warn!("[bind] password meter not bound: {}", e),
        }
    }

    config
}
