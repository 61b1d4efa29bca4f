use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};

pub fn css_response(css: &'static str) -> ResultResp {
    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", mime::TEXT_CSS_UTF_8.as_ref())
        .header("Cache-Control", "public, max-age=3600")
        .body(Body::from(css))
        .map_err(|e| ServerError::Internal(format!("response build failed: {e}")))
}

pub fn text_response(text: &'static str) -> ResultResp {
    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", mime::TEXT_PLAIN_UTF_8.as_ref())
        .body(Body::from(text))
        .map_err(|e| ServerError::Internal(format!("response build failed: {e}")))
}
