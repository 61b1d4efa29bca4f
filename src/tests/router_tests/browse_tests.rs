use crate::router::handle;
use crate::config::Config;
use crate::tests::utils::{app_with_catalog, body_string, request, session_token, test_app};
use http::Method;

fn titles_in_order(body: &str, titles: &[&str]) -> bool {
    let positions: Vec<usize> = titles
        .iter()
        .map(|t| body.find(&format!(">{t}<")).expect("title rendered"))
        .collect();
    positions.windows(2).all(|w| w[0] < w[1])
}

#[test]
fn home_page_renders_default_category_and_sets_cookie() {
    let app = test_app();

    let resp = handle(request(Method::GET, "/", None), &app).expect("Handler failed");
    assert_eq!(resp.status(), 200);
    let token = session_token(&resp);
    assert!(!token.is_empty());

    let body = body_string(resp);
    assert!(body.contains("Property Listings"));
    assert!(body.contains("tab-btn tab-active\" data-category=\"house-lot\""));
    assert!(titles_in_order(&body, &["Seaside Villa", "Garden Home", "Townhouse Row"]));
    assert!(!body.contains("Corner Lot"));
    // location dropdown for house-lot
    assert!(body.contains("<option value=\"Cebu\">Cebu</option>"));
    assert!(body.contains("<option value=\"Davao\">Davao</option>"));
}

#[test]
fn known_session_is_not_reissued() {
    let app = test_app();
    let first = handle(request(Method::GET, "/", None), &app).unwrap();
    let token = session_token(&first);

    let again = handle(request(Method::GET, "/", Some(&token)), &app).unwrap();
    assert!(again.headers().get("Set-Cookie").is_none());
}

#[test]
fn sort_by_price_desc_reorders_grid() {
    let app = test_app();
    let token = session_token(&handle(request(Method::GET, "/", None), &app).unwrap());

    let resp = handle(
        request(Method::GET, "/listings?q=&location=&sort=price-desc", Some(&token)),
        &app,
    )
    .unwrap();
    let body = body_string(resp);
    assert!(body.starts_with("<div id=\"grid\""));
    assert!(titles_in_order(&body, &["Townhouse Row", "Seaside Villa", "Garden Home"]));
}

#[test]
fn search_and_location_combine() {
    let app = test_app();
    let token = session_token(&handle(request(Method::GET, "/", None), &app).unwrap());

    let body = body_string(
        handle(
            request(Method::GET, "/listings?q=VILLA&location=Cebu&sort=", Some(&token)),
            &app,
        )
        .unwrap(),
    );
    assert!(body.contains(">Seaside Villa<"));
    assert!(body.contains(">Townhouse Row<"));
    assert!(!body.contains(">Garden Home<"));
}

#[test]
fn location_filter_matches_dropdown_value_exactly() {
    let app = app_with_catalog(
        r#"{"house-lot": [
            {"title": "Spacey", "location": "Cebu "},
            {"title": "Tidy", "location": "Cebu"},
            {"title": "Odd Town", "location": "any"}
        ]}"#,
        Config::default(),
    );
    let home = handle(request(Method::GET, "/", None), &app).unwrap();
    let token = session_token(&home);
    let body = body_string(home);
    assert!(body.contains("<option value=\"Cebu \">Cebu </option>"));
    assert!(body.contains("<option value=\"any\">any</option>"));

    let body = body_string(
        handle(
            request(Method::GET, "/listings?q=&location=Cebu%20&sort=", Some(&token)),
            &app,
        )
        .unwrap(),
    );
    assert!(body.contains(">Spacey<"));
    assert!(!body.contains(">Tidy<"));

    let body = body_string(
        handle(
            request(Method::GET, "/listings?q=&location=any&sort=", Some(&token)),
            &app,
        )
        .unwrap(),
    );
    assert!(body.contains(">Odd Town<"));
    assert!(!body.contains(">Spacey<"));
}

#[test]
fn cookieless_visitors_are_capped() {
    let config = Config {
        max_sessions: 5,
        ..Config::default()
    };
    let app = app_with_catalog(crate::tests::utils::CATALOG_JSON, config);

    for _ in 0..50 {
        let resp = handle(request(Method::GET, "/", None), &app).unwrap();
        assert!(resp.headers().get("Set-Cookie").is_some());
    }
    assert_eq!(app.sessions.len(), 5);
}

#[test]
fn single_control_change_keeps_the_others() {
    let app = test_app();
    let token = session_token(&handle(request(Method::GET, "/", None), &app).unwrap());

    handle(request(Method::GET, "/listings?location=Cebu", Some(&token)), &app).unwrap();
    let body = body_string(
        handle(request(Method::GET, "/listings?sort=price-asc", Some(&token)), &app).unwrap(),
    );
    assert!(!body.contains(">Garden Home<"));
    assert!(titles_in_order(&body, &["Seaside Villa", "Townhouse Row"]));
}

#[test]
fn no_match_shows_no_results_state() {
    let app = test_app();
    let token = session_token(&handle(request(Method::GET, "/", None), &app).unwrap());

    let body = body_string(
        handle(
            request(Method::GET, "/listings?q=penthouse&location=&sort=", Some(&token)),
            &app,
        )
        .unwrap(),
    );
    assert!(body.contains("No properties found"));
    assert!(!body.contains("property-card"));
}

#[test]
fn switching_category_resets_controls() {
    let app = test_app();
    let token = session_token(&handle(request(Method::GET, "/", None), &app).unwrap());

    handle(
        request(Method::GET, "/listings?q=villa&location=Cebu&sort=area-asc", Some(&token)),
        &app,
    )
    .unwrap();

    let body = body_string(
        handle(request(Method::GET, "/category?key=lot-only", Some(&token)), &app).unwrap(),
    );
    assert!(body.starts_with("<section id=\"browser\""));
    assert!(body.contains(">Corner Lot<"));
    assert!(body.contains("value=\"\" placeholder"));
    assert!(body.contains("<option value=\"\" selected>All locations</option>"));
    assert!(body.contains("<option value=\"\" selected>Sort by</option>"));
    // "-" is not a location facet
    assert!(!body.contains("<option value=\"-\">"));
}

#[test]
fn unknown_category_renders_empty_grid() {
    let app = test_app();
    let body = body_string(
        handle(request(Method::GET, "/category?key=penthouses", None), &app).unwrap(),
    );
    assert!(body.contains("No properties found"));
}

#[test]
fn category_without_key_is_bad_request() {
    let app = test_app();
    match handle(request(Method::GET, "/category", None), &app) {
        Err(err) => assert_eq!(err.status(), 400),
        Ok(resp) => panic!("expected 400, got {}", resp.status()),
    }
}

#[test]
fn unknown_route_is_not_found_page() {
    let app = test_app();
    let resp = crate::router::serve(request(Method::GET, "/nope", None), &app);
    assert_eq!(resp.status(), 404);
    assert!(body_string(resp).contains("Error 404"));
}

#[test]
fn stylesheet_and_health_are_served() {
    let app = test_app();

    let css = handle(request(Method::GET, "/static/main.css", None), &app).unwrap();
    assert_eq!(css.status(), 200);
    assert!(body_string(css).contains(".expanded-details"));

    let health = handle(request(Method::GET, "/health", None), &app).unwrap();
    assert_eq!(body_string(health), "ok");
}

#[test]
fn money_fields_render_with_currency_or_marker() {
    let app = test_app();
    let body = body_string(handle(request(Method::GET, "/", None), &app).unwrap());
    assert!(body.contains("₱ 25,000"));
    assert!(body.contains("₱ 626,500"));
    // Garden Home has a blank down payment and a null TCP
    assert!(body.contains("Down Payment:</span> -"));
    assert!(body.contains("TCP:</span> -"));
}
