use thiserror::Error;
use wasm_bindgen::JsValue;

use orrery_engine::AssetError;

/// Failures while setting up the browser surface.
#[derive(Debug, Error)]
pub enum WebError {
    #[error("no global window")]
    NoWindow,

    #[error("document has no body")]
    NoBody,

    #[error("WebGL2 is not available")]
    NoWebGl,

    #[error("shader compile failed: {0}")]
    Shader(String),

    #[error("program link failed: {0}")]
    Link(String),

    #[error("failed to allocate GPU {0}")]
    Allocation(&'static str),

    #[error("already started")]
    AlreadyStarted,

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error("DOM call failed: {0}")]
    Js(String),
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        WebError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

pub type WebResult<T> = Result<T, WebError>;
