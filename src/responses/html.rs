use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use maud::Markup;

pub fn html_response(markup: Markup) -> ResultResp {
    html_response_with_cookie(markup, None)
}

/// HTML response that optionally sets a cookie (new visitor sessions).
pub fn html_response_with_cookie(markup: Markup, set_cookie: Option<String>) -> ResultResp {
    let mut builder = ResponseBuilder::new()
        .status(200)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref());

    if let Some(cookie) = set_cookie {
        builder = builder.header("Set-Cookie", cookie);
    }

    builder
        .body(Body::from(markup.into_string()))
        .map_err(|e| ServerError::Internal(format!("response build failed: {e}")))
}
