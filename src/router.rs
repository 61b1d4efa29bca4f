use crate::app::App;
use crate::domain::SortKey;
use crate::errors::ServerError;
use crate::responses::{
    css_response, html_response, html_response_with_cookie, text_response, ResultResp,
};
use crate::templates::{self, listing_grid, pages};
use crate::view::sessions::{session_cookie, token_from_cookie_header};
use crate::view::{location_param, QueryControls, Ticket, ViewController};
use astra::{Request, Response};
use maud::Markup;
use std::collections::HashMap;

const MAIN_CSS: &str = include_str!("../static/main.css");

/// Entry point for the server: route, turn errors into pages, log the outcome.
pub fn serve(req: Request, app: &App) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let resp = match handle(req, app) {
        Ok(resp) => resp,
        Err(err) => templates::html_error_response(err),
    };

    tracing::debug!(%method, %path, status = resp.status().as_u16(), "request");
    resp
}

pub fn handle(req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();
    let params = parse_query(&req);

    match (method, path) {
        ("GET", "/") => render_for_visitor(&req, app, |vc| {
            Ok(pages::browser_page(vc, &app.config.currency_symbol))
        }),

        ("GET", "/category") => {
            let key = params
                .get("key")
                .ok_or_else(|| ServerError::BadRequest("missing category key".into()))?;
            render_for_visitor(&req, app, |vc| {
                vc.select_category(key);
                Ok(pages::browser_fragment(vc, &app.config.currency_symbol))
            })
        }

        ("GET", "/listings") => render_for_visitor(&req, app, |vc| {
            let q = params.get("q");
            let location = params.get("location");
            let sort = params.get("sort");

            match (q, location, sort) {
                // Whole form submitted.
                (Some(q), Some(location), Some(sort)) => {
                    vc.apply_controls(QueryControls::from_params(q, location, sort))
                }
                // Single control; the others keep their values.
                _ => {
                    if let Some(q) = q {
                        vc.set_search(q);
                    }
                    if let Some(location) = location {
                        vc.set_location(location_param(location));
                    }
                    if let Some(sort) = sort {
                        vc.set_sort(SortKey::from_param(sort));
                    }
                }
            }
            Ok(listing_grid(vc, &app.config.currency_symbol, true))
        }),

        ("POST", p) if p.starts_with("/cards/") => {
            let action = parse_card_action(p, &params)?;
            render_for_visitor(&req, app, |vc| {
                let changed = match action {
                    CardAction::Open(i) => vc.expand(i),
                    CardAction::Close(i) => vc.collapse(i),
                    CardAction::Settle(i, ticket) => vc.settle(i, ticket),
                };
                tracing::debug!(?action, changed, expanded = ?vc.expanded_index(), "card event");
                Ok(listing_grid(vc, &app.config.currency_symbol, false))
            })
        }

        ("GET", "/static/main.css") => css_response(MAIN_CSS),
        ("GET", "/health") => text_response("ok"),

        _ => Err(ServerError::NotFound),
    }
}

/// Run `f` against the requesting visitor's view and wrap the markup,
/// setting the session cookie when a new session had to be created.
fn render_for_visitor<F>(req: &Request, app: &App, f: F) -> ResultResp
where
    F: FnOnce(&mut ViewController) -> Result<Markup, ServerError>,
{
    let token = req
        .headers()
        .get("Cookie")
        .and_then(|v| v.to_str().ok())
        .and_then(token_from_cookie_header);

    let access = app
        .sessions
        .with_view(token, chrono::Utc::now(), || app.new_view(), f)?;

    if access.created {
        tracing::debug!(sessions = app.sessions.len(), "new visitor session");
        html_response_with_cookie(access.value, Some(session_cookie(&access.token)))
    } else {
        html_response(access.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CardAction {
    Open(usize),
    Close(usize),
    Settle(usize, Ticket),
}

/// `/cards/{index}/{open|close|settle}`; settle also needs `?ticket=`.
fn parse_card_action(
    path: &str,
    params: &HashMap<String, String>,
) -> Result<CardAction, ServerError> {
    let rest = path.trim_start_matches("/cards/");
    let (index, action) = rest.split_once('/').ok_or(ServerError::NotFound)?;

    let index: usize = index
        .parse()
        .map_err(|_| ServerError::BadRequest(format!("invalid card index `{index}`")))?;

    match action {
        "open" => Ok(CardAction::Open(index)),
        "close" => Ok(CardAction::Close(index)),
        "settle" => {
            let raw = params
                .get("ticket")
                .ok_or_else(|| ServerError::BadRequest("missing ticket".into()))?;
            let ticket = raw
                .parse()
                .map_err(|_| ServerError::BadRequest(format!("invalid ticket `{raw}`")))?;
            Ok(CardAction::Settle(index, ticket))
        }
        _ => Err(ServerError::NotFound),
    }
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}
