//! Page configuration.
//!
//! Pages may embed a JSON object in
//! `<script type="application/json" id="netsoc-panel-config">` to override
//! element ids, endpoints, or the request timeout. Every field is optional and
//! falls back to the ids used by the panel's stock templates.

use crate::error::{PanelError, Result};
use serde::{Deserialize, Serialize};

pub const CONFIG_ELEMENT_ID: &str = "netsoc-panel-config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    // database page
    pub database_form_title: String,
    pub database_form_button_text: String,
    pub database_change_form: String,
    pub password_reset_form: String,
    pub database_name_input: String,

    // password meter
    pub new_password: String,
    pub strength_meter: String,
    pub strength_text: String,

    // shells page; `shell_select` is a CSS selector, the rest are ids
    pub shell_select: String,
    pub shell_success: String,
    pub shell_error: String,

    // wordpress page
    pub wordpress_button: String,
    pub wordpress_description: String,
    pub wordpress_progress: String,
    pub wordpress_setup_link: String,
    pub wordpress_setup_fail: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            database_form_title: "database-form-title".to_string(),
            database_form_button_text: "database-form-button-text".to_string(),
            database_change_form: "database-change-form".to_string(),
            password_reset_form: "password-reset-form".to_string(),
            database_name_input: "dbname".to_string(),
            new_password: "new-password".to_string(),
            strength_meter: "password-strength-meter".to_string(),
            strength_text: "password-strength-text".to_string(),
            shell_select: "form select".to_string(),
            shell_success: "shell-success".to_string(),
            shell_error: "shell-error".to_string(),
            wordpress_button: "wordpress-install-button".to_string(),
            wordpress_description: "wordpress-install-description".to_string(),
            wordpress_progress: "wordpress-progress".to_string(),
            wordpress_setup_link: "wordpress-setup-link".to_string(),
            wordpress_setup_fail: "wordpress-setup-fail".to_string(),
        }
    }
}

impl ElementIds {
    /// Selector for the `<form>` nested in the database change card.
    pub fn database_form_selector(&self) -> String {
        format!("#{} form", self.database_change_form)
    }

    fn all(&self) -> [(&'static str, &str); 16] {
        [
            ("database_form_title", &self.database_form_title),
            ("database_form_button_text", &self.database_form_button_text),
            ("database_change_form", &self.database_change_form),
            ("password_reset_form", &self.password_reset_form),
            ("database_name_input", &self.database_name_input),
            ("new_password", &self.new_password),
            ("strength_meter", &self.strength_meter),
            ("strength_text", &self.strength_text),
            ("shell_select", &self.shell_select),
            ("shell_success", &self.shell_success),
            ("shell_error", &self.shell_error),
            ("wordpress_button", &self.wordpress_button),
            ("wordpress_description", &self.wordpress_description),
            ("wordpress_progress", &self.wordpress_progress),
            ("wordpress_setup_link", &self.wordpress_setup_link),
            ("wordpress_setup_fail", &self.wordpress_setup_fail),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub change_shell: String,
    pub wordpress_install: String,
    pub delete_db: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            change_shell: "/change-shell".to_string(),
            wordpress_install: "/wordpressinstall".to_string(),
            delete_db: "/deletedb".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub ids: ElementIds,
    pub endpoints: Endpoints,
    /// Abort requests after this many milliseconds. `None` waits indefinitely.
    pub request_timeout_ms: Option<u32>,
}

impl PanelConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PanelConfig =
            serde_json::from_str(json).map_err(|e| PanelError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.ids.all() {
            if value.trim().is_empty() {
                return Err(PanelError::Config(format!("ids.{} must not be empty", name)));
            }
        }
        for (name, value) in [
            ("change_shell", &self.endpoints.change_shell),
            ("wordpress_install", &self.endpoints.wordpress_install),
            ("delete_db", &self.endpoints.delete_db),
        ] {
            if value.trim().is_empty() {
                return Err(PanelError::Config(format!(
                    "endpoints.{} must not be empty",
                    name
                )));
            }
        }
        if self.request_timeout_ms == Some(0) {
            return Err(PanelError::Config(
                "request_timeout_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Reads the embedded config element. Falls back to defaults when the
    /// element is absent or its contents are unusable.
    pub fn load(page: &crate::dom::Page) -> Self {
        let Some(el) = page.document().get_element_by_id(CONFIG_ELEMENT_ID) else {
            return Self::default();
        };
        let json = el.text_content().unwrap_or_default();
        match Self::from_json(&json) {
            Ok(config) => {
                crate::console_debug!("[PanelConfig] loaded from #{}", CONFIG_ELEMENT_ID);
                config
            }
            Err(e) => {
                crate::console_error!("[PanelConfig] {}; using defaults", e);
                Self::default()
            }
        }
    }
}
