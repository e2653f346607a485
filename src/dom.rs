use crate::error::{PanelError, Result};
use wasm_bindgen::JsCast;
use web_sys::{window, Document, Element, HtmlElement};

/// Handle to the document the panel scripts are bound to.
#[derive(Clone)]
pub struct Page {
    document: Document,
}

impl Page {
    pub fn new(document: Document) -> Self {
        Page { document }
    }

    pub fn current() -> Result<Self> {
        let document = window()
            .and_then(|w| w.document())
            .ok_or(PanelError::NoWindow)?;
        Ok(Page::new(document))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn has_id(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    pub fn by_id(&self, id: &str) -> Result<Element> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| PanelError::MissingElement {
                selector: format!("#{}", id),
            })
    }

    pub fn query(&self, selector: &str) -> Result<Element> {
        self.document
            .query_selector(selector)?
            .ok_or_else(|| PanelError::MissingElement {
                selector: selector.to_string(),
            })
    }

    pub fn typed_by_id<T: JsCast>(&self, id: &str, expected: &'static str) -> Result<T> {
        self.by_id(id)?
            .dyn_into::<T>()
            .map_err(|_| PanelError::UnexpectedElement {
                selector: format!("#{}", id),
                expected,
            })
    }

    pub fn typed_query<T: JsCast>(&self, selector: &str, expected: &'static str) -> Result<T> {
        self.query(selector)?
            .dyn_into::<T>()
            .map_err(|_| PanelError::UnexpectedElement {
                selector: selector.to_string(),
                expected,
            })
    }

    pub fn html_by_id(&self, id: &str) -> Result<HtmlElement> {
        self.typed_by_id(id, "HtmlElement")
    }

    pub fn show(&self, id: &str) -> Result<()> {
        set_visible(&self.html_by_id(id)?, true)
    }

    pub fn hide(&self, id: &str) -> Result<()> {
        set_visible(&self.html_by_id(id)?, false)
    }

    /// Replaces the element's children with a single text node.
    pub fn set_text(&self, id: &str, text: &str) -> Result<()> {
        self.by_id(id)?.set_text_content(Some(text));
        Ok(())
    }

    pub fn text(&self, id: &str) -> Result<String> {
        Ok(self.html_by_id(id)?.inner_text())
    }
}

pub fn set_visible(el: &HtmlElement, visible: bool) -> Result<()> {
    el.style()
        .set_property("display", if visible { "block" } else { "none" })?;
    Ok(())
}

pub fn is_visible(el: &HtmlElement) -> bool {
    el.style()
        .get_property_value("display")
        .map(|d| d != "none")
        .unwrap_or(true)
}
