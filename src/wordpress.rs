//! One-click WordPress install. The button stays hidden once clicked; the
//! result shown is decided by the response status alone.

use crate::config::{ElementIds, PanelConfig};
use crate::dom::Page;
use crate::error::Result;
use crate::http;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

pub const INSTALLING_MESSAGE: &str = "Installing WordPress...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed,
    /// `status` is `None` when no response arrived at all.
    Failed { status: Option<u16> },
}

impl InstallOutcome {
    pub fn from_status(status: u16) -> Self {
        if status == 200 {
            InstallOutcome::Installed
        } else {
            InstallOutcome::Failed {
                status: Some(status),
            }
        }
    }
}

pub async fn trigger_install(endpoint: &str, timeout_ms: Option<u32>) -> InstallOutcome {
    match http::get(endpoint, timeout_ms).await {
        Ok(reply) => InstallOutcome::from_status(reply.status),
        Err(e) => {
            crate::console_error!("[WordpressInstaller] {}", e);
            InstallOutcome::Failed { status: None }
        }
    }
}

pub struct WordpressInstaller {
    page: Page,
    ids: ElementIds,
    endpoint: String,
    timeout_ms: Option<u32>,
}

impl WordpressInstaller {
    pub fn new(page: Page, config: &PanelConfig) -> Self {
        WordpressInstaller {
            page,
            ids: config.ids.clone(),
            endpoint: config.endpoints.wordpress_install.clone(),
            timeout_ms: config.request_timeout_ms,
        }
    }

    pub fn show_in_progress(&self) -> Result<()> {
        self.page.hide(&self.ids.wordpress_button)?;
        self.page
            .set_text(&self.ids.wordpress_description, INSTALLING_MESSAGE)?;
        self.page.show(&self.ids.wordpress_progress)
    }

    pub fn render(&self, outcome: InstallOutcome) -> Result<()> {
        self.page.hide(&self.ids.wordpress_progress)?;
        self.page.hide(&self.ids.wordpress_description)?;
        match outcome {
            InstallOutcome::Installed => self.page.show(&self.ids.wordpress_setup_link),
            InstallOutcome::Failed { .. } => self.page.show(&self.ids.wordpress_setup_fail),
        }
    }

    pub async fn install(&self) -> Result<InstallOutcome> {
        self.show_in_progress()?;
        let outcome = trigger_install(&self.endpoint, self.timeout_ms).await;
        match outcome {
            InstallOutcome::Installed => crate::console_info!("Wordpress install complete"),
            InstallOutcome::Failed { status } => {
                crate::console_warn!("[WordpressInstaller] install failed, status {:?}", status)
            }
        }
        self.render(outcome)?;
        Ok(outcome)
    }
}

/// Click handler for `#wordpress-install-button`.
#[wasm_bindgen(js_name = installWordpress)]
pub fn install_wordpress() -> std::result::Result<(), JsValue> {
    let installer = WordpressInstaller::new(Page::current()?, &crate::current_config());
    spawn_local(async move {
        if let Err(e) = installer.install().await {
            crate::console_error!("[WordpressInstaller] {}", e);
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_status() {
        assert_eq!(InstallOutcome::from_status(200), InstallOutcome::Installed);
        assert_eq!(
            InstallOutcome::from_status(404),
            InstallOutcome::Failed { status: Some(404) }
        );
        assert_eq!(
            InstallOutcome::from_status(500),
            InstallOutcome::Failed { status: Some(500) }
        );
        assert_eq!(
            InstallOutcome::from_status(204),
            InstallOutcome::Failed { status: Some(204) }
        );
    }
}
