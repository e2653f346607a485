//! Create/delete switching for the MySQL page's database form, and the swap
//! between the database card and the password-reset card.

use crate::config::{ElementIds, PanelConfig};
use crate::dom::{set_visible, Page};
use crate::error::{PanelError, Result};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlFormElement, HtmlInputElement};

pub const DELETE_TITLE: &str = "Delete Database:";
pub const DELETE_BUTTON: &str = "Remove";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = Materialize, js_name = updateTextFields)]
    fn materialize_update_text_fields() -> std::result::Result<(), JsValue>;
}

thread_local! {
    static DATABASE_FORM: RefCell<Option<DatabaseForm>> = const { RefCell::new(None) };
}

/// Presentation of the form in create mode, as rendered by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub title: String,
    pub button_text: String,
    pub action: String,
}

impl FormState {
    pub fn capture(page: &Page, ids: &ElementIds) -> Result<Self> {
        let form: HtmlFormElement =
            page.typed_query(&ids.database_form_selector(), "HtmlFormElement")?;
        Ok(FormState {
            title: page.text(&ids.database_form_title)?,
            button_text: page.text(&ids.database_form_button_text)?,
            action: form.action(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Delete { database: String },
}

impl FormMode {
    pub fn from_database(database: Option<&str>) -> Self {
        match database {
            Some(name) if !name.is_empty() => FormMode::Delete {
                database: name.to_string(),
            },
            _ => FormMode::Create,
        }
    }

    /// Form presentation and name-field value for this mode.
    pub fn view(&self, original: &FormState, delete_action: &str) -> (FormState, String) {
        match self {
            FormMode::Create => (original.clone(), String::new()),
            FormMode::Delete { database } => (
                FormState {
                    title: DELETE_TITLE.to_string(),
                    button_text: DELETE_BUTTON.to_string(),
                    action: delete_action.to_string(),
                },
                database.clone(),
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Card {
    PasswordReset,
    DatabaseChange,
}

impl Card {
    pub fn from_show_change_form(show_change_form: bool) -> Self {
        if show_change_form {
            Card::DatabaseChange
        } else {
            Card::PasswordReset
        }
    }

    fn id(self, ids: &ElementIds) -> &str {
        match self {
            Card::PasswordReset => &ids.password_reset_form,
            Card::DatabaseChange => &ids.database_change_form,
        }
    }

    fn other(self) -> Card {
        match self {
            Card::PasswordReset => Card::DatabaseChange,
            Card::DatabaseChange => Card::PasswordReset,
        }
    }
}

/// Shows exactly one of the two cards.
pub fn show_card(page: &Page, ids: &ElementIds, card: Card) -> Result<()> {
    set_visible(&page.html_by_id(card.id(ids))?, true)?;
    set_visible(&page.html_by_id(card.other().id(ids))?, false)
}

pub struct DatabaseForm {
    page: Page,
    ids: ElementIds,
    delete_action: String,
    original: FormState,
}

impl DatabaseForm {
    pub fn new(page: Page, config: &PanelConfig, original: FormState) -> Self {
        DatabaseForm {
            page,
            ids: config.ids.clone(),
            delete_action: config.endpoints.delete_db.clone(),
            original,
        }
    }

    /// Snapshots the server-rendered create mode. Call before any mutation.
    pub fn capture(page: Page, config: &PanelConfig) -> Result<Self> {
        let original = FormState::capture(&page, &config.ids)?;
        Ok(DatabaseForm::new(page, config, original))
    }

    pub fn original(&self) -> &FormState {
        &self.original
    }

    pub fn show_form(&self, database: Option<&str>) -> Result<FormMode> {
        let mode = FormMode::from_database(database);
        let (state, name) = mode.view(&self.original, &self.delete_action);

        let form: HtmlFormElement = self
            .page
            .typed_query(&self.ids.database_form_selector(), "HtmlFormElement")?;
        let input: HtmlInputElement = self
            .page
            .typed_by_id(&self.ids.database_name_input, "HtmlInputElement")?;

        form.set_action(&state.action);
        self.page
            .html_by_id(&self.ids.database_form_title)?
            .set_inner_text(&state.title);
        self.page
            .html_by_id(&self.ids.database_form_button_text)?
            .set_inner_text(&state.button_text);
        input.set_value(&name);
        refresh_text_fields();

        Ok(mode)
    }

    pub fn toggle_password_reset_card(&self, show_change_form: bool) -> Result<()> {
        show_card(
            &self.page,
            &self.ids,
            Card::from_show_change_form(show_change_form),
        )
    }
}

/// Lets Materialize re-float labels after values change programmatically.
fn refresh_text_fields() {
    if let Err(e) = materialize_update_text_fields() {
        crate::console_warn!(
            "[DatabaseForm] Materialize.updateTextFields unavailable: {}",
            crate::error::describe_js(&e)
        );
    }
}

/// Binds the form for the exported handlers. Replaces any earlier binding.
pub fn install(form: DatabaseForm) {
    DATABASE_FORM.with(|f| *f.borrow_mut() = Some(form));
}

pub fn is_installed() -> bool {
    DATABASE_FORM.with(|f| f.borrow().is_some())
}

fn with_form<T>(op: impl FnOnce(&DatabaseForm) -> Result<T>) -> Result<T> {
    DATABASE_FORM.with(|f| match f.borrow().as_ref() {
        Some(form) => op(form),
        None => Err(PanelError::NotBound {
            component: "database form",
        }),
    })
}

/// `databaseForm(db)`: delete mode for `db`, create mode when omitted.
#[wasm_bindgen(js_name = databaseForm)]
pub fn database_form(db: Option<String>) -> std::result::Result<(), JsValue> {
    with_form(|form| form.show_form(db.as_deref()).map(|_| ())).map_err(|e| {
        crate::console_error!("[DatabaseForm] {}", e);
        e.into()
    })
}

/// `passwordReset(true)` brings back the database card; `false` shows the
/// password reset card.
#[wasm_bindgen(js_name = passwordReset)]
pub fn password_reset(show_change_form: bool) -> std::result::Result<(), JsValue> {
    let result = if is_installed() {
        with_form(|form| form.toggle_password_reset_card(show_change_form))
    } else {
        let config = crate::current_config();
        Page::current().and_then(|page| {
            show_card(
                &page,
                &config.ids,
                Card::from_show_change_form(show_change_form),
            )
        })
    };
    result.map_err(|e| {
        crate::console_error!("[DatabaseForm] {}", e);
        e.into()
    })
}
