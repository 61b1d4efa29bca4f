pub mod html;
pub mod plain;

pub use crate::errors::ResultResp;

// Normal HTML response
pub use html::{html_response, html_response_with_cookie};
pub use plain::{css_response, text_response};
