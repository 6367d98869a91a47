use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures surfaced by the browser bindings while wiring up a widget.
#[derive(Debug, Error)]
pub enum DomError {
    #[error("no global window available")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("document has no root element")]
    NoRootElement,

    #[error("invalid selector `{0}`")]
    Selector(String),

    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        DomError::Js(message)
    }
}

pub type Result<T> = std::result::Result<T, DomError>;
