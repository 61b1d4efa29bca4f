use crate::router::handle;
use crate::tests::utils::{body_string, file_backed_app, request, temp_path};
use http::Method;

#[test]
fn failed_startup_load_serves_empty_browser() {
    let app = file_backed_app(&temp_path("missing_catalog"));
    assert_eq!(app.catalog().listing_count(), 0);

    let resp = handle(request(Method::GET, "/", None), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("No properties found"));
}

#[test]
fn startup_load_reads_catalog_file() {
    let path = temp_path("startup_catalog");
    std::fs::write(&path, r#"{"house-lot": [{"title": "First", "location": "Cebu"}]}"#).unwrap();

    let app = file_backed_app(&path);
    let body = body_string(handle(request(Method::GET, "/", None), &app).unwrap());
    assert!(body.contains(">First<"));
    assert!(body.contains("<option value=\"Cebu\">Cebu</option>"));

    let _ = std::fs::remove_file(path);
}
