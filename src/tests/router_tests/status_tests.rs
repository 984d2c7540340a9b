use crate::catalog::SnapshotFile;
use crate::prefs::PrefStore;
use crate::router::{handle, App};
use crate::tests::utils::{body_string, get, post, test_app, SNAPSHOT};
use crate::view::ViewSession;

#[test]
fn status_page_shows_snapshot_stats() {
    let app = test_app(SNAPSHOT);

    let resp = handle(get("/"), &app).expect("Handler failed");
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap().to_str().unwrap(),
        "text/html; charset=utf-8"
    );

    let body = body_string(resp);
    assert!(body.contains("<!DOCTYPE html>"));
    assert!(body.contains("Wohnungsfinder"));
    assert!(body.contains("5 listings loaded"));
    assert!(body.contains("0 listings hidden"));
    assert!(body.contains("Last scrape:"));
}

#[test]
fn status_page_counts_hidden_listings() {
    let app = test_app(SNAPSHOT);

    handle(post("/api/view/hide?id=iw-1"), &app).expect("Handler failed");

    let body = body_string(handle(get("/"), &app).expect("Handler failed"));
    assert!(body.contains("1 listings hidden"));
}

#[test]
fn status_page_survives_a_missing_snapshot() {
    let store = PrefStore::open_in_memory().expect("Failed to open prefs store");
    let app = App {
        snapshot: SnapshotFile::new("/definitely/not/here/results.json"),
        view: ViewSession::new(&store),
    };

    let resp = handle(get("/"), &app).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Load failed"));
}
