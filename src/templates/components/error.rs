use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};
use maud::{html, DOCTYPE};

/// Convert a ServerError into a proper HTML response page
pub fn html_error_response(err: ServerError) -> Response {
    let status = err.status();
    match &err {
        ServerError::NotFound => render_error(status, "Not Found"),
        ServerError::BadRequest(msg) => render_error(status, msg),
        ServerError::Internal(msg) => {
            tracing::error!(error = %msg, "request failed");
            render_error(status, "Internal Server Error")
        }
    }
}

/// Build a basic HTML error page
fn render_error(status: u16, message: &str) -> Response {
    let page = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Error " (status) }
                style {
                    "body { font-family: system-ui, sans-serif; max-width: 720px; margin: 4rem auto; padding: 1rem; }"
                    "h1 { font-size: 2rem; margin-bottom: 1rem; }"
                    "p { font-size: 1.1rem; color: #444; }"
                }
            }
            body {
                h1 { "Error " (status) }
                p { (message) }
                p { a href="/" { "← Back to listings" } }
            }
        }
    };

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(page.into_string()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
