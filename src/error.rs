use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CardError {
    #[error("no window")]
    NoWindow,

    #[error("no document")]
    NoDocument,

    #[error("document has no body")]
    NoBody,

    #[error("element not found: #{0}")]
    MissingElement(String),

    #[error("message list must contain at least one message")]
    EmptyMessages,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("js error: {0}")]
    Js(String),
}

pub type Result<T> = std::result::Result<T, CardError>;

impl From<JsValue> for CardError {
    fn from(value: JsValue) -> Self {
        CardError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<CardError> for JsValue {
    fn from(err: CardError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
