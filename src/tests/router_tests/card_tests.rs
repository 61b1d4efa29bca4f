use crate::router::handle;
use crate::tests::utils::{body_string, request, session_token, test_app};
use http::Method;

/// Pull `ticket=N` for a card's pending settle event out of rendered markup.
fn settle_ticket(body: &str, index: usize) -> Option<u64> {
    let marker = format!("/cards/{index}/settle?ticket=");
    let start = body.find(&marker)? + marker.len();
    let digits: String = body[start..].chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

fn post(app: &crate::app::App, uri: &str, token: &str) -> String {
    let resp = handle(request(Method::POST, uri, Some(token)), app).expect("Handler failed");
    assert_eq!(resp.status(), 200);
    body_string(resp)
}

#[test]
fn expand_then_settle_opens_details() {
    let app = test_app();
    let token = session_token(&handle(request(Method::GET, "/", None), &app).unwrap());

    let body = post(&app, "/cards/1/open", &token);
    assert!(body.contains("property-card col-span-full expanded"));
    assert!(!body.contains("is-open"));
    let ticket = settle_ticket(&body, 1).expect("expanding card carries a ticket");

    let body = post(&app, &format!("/cards/1/settle?ticket={ticket}"), &token);
    assert!(body.contains("expanded-details rounded-lg is-open"));
    assert!(settle_ticket(&body, 1).is_none());
    // only the collapsed cards still offer "See Details"
    assert_eq!(body.matches("See Details").count(), 2);
}

#[test]
fn expanding_another_card_collapses_the_first() {
    let app = test_app();
    let token = session_token(&handle(request(Method::GET, "/", None), &app).unwrap());

    let body = post(&app, "/cards/0/open", &token);
    let t0 = settle_ticket(&body, 0).unwrap();
    post(&app, &format!("/cards/0/settle?ticket={t0}"), &token);

    let body = post(&app, "/cards/2/open", &token);
    let closing = settle_ticket(&body, 0).expect("card 0 is collapsing");
    let opening = settle_ticket(&body, 2).expect("card 2 is expanding");

    post(&app, &format!("/cards/0/settle?ticket={closing}"), &token);
    let body = post(&app, &format!("/cards/2/settle?ticket={opening}"), &token);

    assert_eq!(body.matches("is-open").count(), 1);
    assert_eq!(body.matches("col-span-full expanded").count(), 1);
    let open_at = body.find("is-open").unwrap();
    let card2_at = body.find("data-index=\"2\"").unwrap();
    assert!(open_at > card2_at);
}

#[test]
fn close_collapses_after_settle() {
    let app = test_app();
    let token = session_token(&handle(request(Method::GET, "/", None), &app).unwrap());

    let t = settle_ticket(&post(&app, "/cards/0/open", &token), 0).unwrap();
    post(&app, &format!("/cards/0/settle?ticket={t}"), &token);

    let body = post(&app, "/cards/0/close", &token);
    assert!(!body.contains("is-open"));
    assert!(body.contains("col-span-full expanded"));
    let t = settle_ticket(&body, 0).unwrap();

    let body = post(&app, &format!("/cards/0/settle?ticket={t}"), &token);
    assert!(!body.contains("col-span-full"));
    assert_eq!(body.matches("See Details").count(), 3);
}

#[test]
fn settle_after_requery_is_ignored() {
    let app = test_app();
    let token = session_token(&handle(request(Method::GET, "/", None), &app).unwrap());

    let stale = settle_ticket(&post(&app, "/cards/0/open", &token), 0).unwrap();
    handle(
        request(Method::GET, "/listings?q=&location=&sort=price-asc", Some(&token)),
        &app,
    )
    .unwrap();

    let body = post(&app, &format!("/cards/0/settle?ticket={stale}"), &token);
    assert!(!body.contains("is-open"));
    assert!(!body.contains("col-span-full"));
}

#[test]
fn malformed_card_requests_are_rejected() {
    let app = test_app();
    let token = session_token(&handle(request(Method::GET, "/", None), &app).unwrap());

    match handle(request(Method::POST, "/cards/x/open", Some(&token)), &app) {
        Err(err) => assert_eq!(err.status(), 400),
        Ok(resp) => panic!("expected 400, got {}", resp.status()),
    }
    match handle(request(Method::POST, "/cards/0/settle?ticket=soon", Some(&token)), &app) {
        Err(err) => assert_eq!(err.status(), 400),
        Ok(resp) => panic!("expected 400, got {}", resp.status()),
    }
}

#[test]
fn out_of_range_card_is_a_no_op() {
    let app = test_app();
    let token = session_token(&handle(request(Method::GET, "/", None), &app).unwrap());

    let body = post(&app, "/cards/42/open", &token);
    assert!(!body.contains("col-span-full"));
    assert_eq!(body.matches("See Details").count(), 3);
}
