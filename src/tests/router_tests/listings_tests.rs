use crate::errors::ServerError;
use crate::responses::error_to_response;
use crate::router::{handle, serve_request};
use crate::tests::utils::{body_json, body_string, get, ids, test_app, SNAPSHOT};

#[test]
fn listings_come_back_sorted_in_the_data_envelope() {
    let app = test_app(SNAPSHOT);

    let resp = handle(get("/api/listings"), &app).expect("Handler failed");
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap().to_str().unwrap(),
        "application/json"
    );

    let json = body_json(resp);
    assert_eq!(
        ids(&json["data"]),
        vec!["so-5", "im-2", "hg-3", "iw-1", "ms-4"]
    );

    // Cheapest per square meter first, unknown size last as null.
    assert_eq!(json["data"][0]["squareMeterPrice"], 10.0);
    assert_eq!(json["data"][1]["squareMeterPrice"], 13.49);
    assert!(json["data"][4]["squareMeterPrice"].is_null());
}

#[test]
fn price_band_filters_compose() {
    let app = test_app(SNAPSHOT);

    let resp = handle(get("/api/listings?priceMin=600&priceMax=900"), &app)
        .expect("Handler failed");

    let json = body_json(resp);
    assert_eq!(ids(&json["data"]), vec!["im-2", "hg-3"]);
}

#[test]
fn provider_filter_excludes_non_members() {
    let app = test_app(SNAPSHOT);

    let resp = handle(get("/api/listings?providers=Immowelt,Immonet"), &app)
        .expect("Handler failed");

    let json = body_json(resp);
    assert_eq!(ids(&json["data"]), vec!["im-2", "iw-1"]);
}

#[test]
fn area_filter_uses_the_listing_size() {
    let app = test_app(SNAPSHOT);

    let resp = handle(get("/api/listings?area=50"), &app).expect("Handler failed");

    let json = body_json(resp);
    assert_eq!(ids(&json["data"]), vec!["so-5", "im-2", "iw-1"]);
}

#[test]
fn malformed_parameters_are_ignored() {
    let app = test_app(SNAPSHOT);

    let resp = handle(get("/api/listings?priceMax=abc&rooms=-2"), &app)
        .expect("Handler failed");

    let json = body_json(resp);
    assert_eq!(json["data"].as_array().unwrap().len(), 5);
}

#[test]
fn unknown_route_is_not_found() {
    let app = test_app(SNAPSHOT);

    let result = handle(get("/nope"), &app);
    assert!(matches!(result, Err(ServerError::NotFound)));
}

#[test]
fn broken_snapshot_fails_the_whole_query() {
    let app = test_app("{ this is not a snapshot");

    let result = handle(get("/api/listings"), &app);
    assert!(matches!(result, Err(ServerError::Snapshot(_))));
}

#[test]
fn api_errors_render_as_json_envelope() {
    let resp = error_to_response(ServerError::NotFound, true);
    assert_eq!(resp.status(), 404);

    let json = body_json(resp);
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["error"]["message"], "Not Found");
}

#[test]
fn page_errors_render_as_html() {
    let resp = error_to_response(ServerError::BadRequest("bad input".to_string()), false);
    assert_eq!(resp.status(), 400);

    let body = body_string(resp);
    assert!(body.contains("Error 400"));
    assert!(body.contains("bad input"));
}

#[test]
fn served_api_errors_come_back_as_json() {
    let app = test_app(SNAPSHOT);

    let resp = serve_request(get("/api/nope"), &app);
    assert_eq!(resp.status(), 404);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap().to_str().unwrap(),
        "application/json"
    );

    let json = body_json(resp);
    assert_eq!(json["error"]["code"], "not_found");
}

#[test]
fn served_page_errors_come_back_as_html() {
    let app = test_app(SNAPSHOT);

    let resp = serve_request(get("/nope"), &app);
    assert_eq!(resp.status(), 404);

    let body = body_string(resp);
    assert!(body.contains("Error 404"));
}
