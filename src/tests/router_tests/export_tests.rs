use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{get, test_app, SNAPSHOT};
use std::io::Read;

#[test]
fn xlsx_download_is_a_real_workbook() {
    let app = test_app(SNAPSHOT);

    let resp = handle(get("/api/listings.xlsx"), &app).expect("Handler failed");
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap().to_str().unwrap(),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(
        resp.headers()
            .get("Content-Disposition")
            .unwrap()
            .to_str()
            .unwrap(),
        "attachment; filename=\"listings.xlsx\""
    );

    let mut bytes = Vec::new();
    resp.into_body()
        .reader()
        .read_to_end(&mut bytes)
        .expect("Failed to read workbook body");

    // XLSX is a zip archive.
    assert!(bytes.len() > 4);
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn export_fails_like_the_query_when_the_snapshot_is_broken() {
    let app = test_app("[ { \"provider\": \"Nope\" } ]");

    let result = handle(get("/api/listings.xlsx"), &app);
    assert!(matches!(result, Err(ServerError::Snapshot(_))));
}
