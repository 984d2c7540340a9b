use crate::catalog::SnapshotFile;
use crate::prefs::PrefStore;
use crate::router::App;
use crate::view::ViewSession;
use astra::{Body, Response};
use http::{Method, Request};
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use std::{env, fs};

/// Five listings, one per provider. `ms-4` has size 0, so its square-meter
/// price is unknown. Ascending m2 order: so-5, im-2, hg-3, iw-1, ms-4.
pub const SNAPSHOT: &str = r#"[
  {
    "provider": "Immowelt",
    "id": "iw-1",
    "title": "3-Zimmer-Wohnung in Gaarden",
    "url": "https://www.immowelt.de/expose/iw-1",
    "price": 1000.0,
    "size": 62.5,
    "rooms": 3.0,
    "address": "Kaiserstraße 12, 24143 Kiel",
    "image": "https://www.immowelt.de/img/iw-1.jpg"
  },
  {
    "provider": "Immonet",
    "id": "im-2",
    "title": "Helle 2-Zimmer-Wohnung",
    "url": "https://www.immonet.de/angebot/im-2",
    "price": 850.0,
    "size": 63.0,
    "rooms": 2.0,
    "address": null,
    "image": null
  },
  {
    "provider": "HausUndGrund",
    "id": "hg-3",
    "title": "Altbauwohnung am Schrevenpark",
    "url": "https://www.haus-und-grund-kiel.de/expose/hg-3",
    "price": 700.0,
    "size": 48.0,
    "rooms": 2.0,
    "address": "Goethestraße 3, 24116 Kiel",
    "image": null
  },
  {
    "provider": "MeineStadt",
    "id": "ms-4",
    "title": "Wohnung ohne Größenangabe",
    "url": "https://www.meinestadt.de/kiel/immobilien/ms-4",
    "price": 560.0,
    "size": 0.0,
    "rooms": 1.0,
    "address": null,
    "image": null
  },
  {
    "provider": "SvenOldoerp",
    "id": "so-5",
    "title": "2-Zimmer-Wohnung in Elmschenhagen",
    "url": "https://www.sven-oldoerp.de/immobilien/so-5",
    "price": 500.0,
    "size": 50.0,
    "rooms": 2.0,
    "address": "Preetzer Chaussee 9, 24146 Kiel",
    "image": "https://www.sven-oldoerp.de/img/so-5.jpg"
  }
]"#;

/// Writes a snapshot fixture to a fresh temp file and returns its path.
pub fn temp_snapshot(json: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let path = env::temp_dir().join(format!("router_snapshot_{nanos}.json"));
    fs::write(&path, json).expect("Failed to write snapshot fixture");
    path
}

/// A full App over a temp snapshot file and an in-memory preference store.
pub fn test_app(snapshot_json: &str) -> App {
    let store = PrefStore::open_in_memory().expect("Failed to open prefs store");
    App {
        snapshot: SnapshotFile::new(temp_snapshot(snapshot_json)),
        view: ViewSession::new(&store),
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body()
        .reader()
        .read_to_string(&mut body)
        .expect("Failed to read response body");
    body
}

pub fn body_json(resp: Response) -> Value {
    let body = body_string(resp);
    serde_json::from_str(&body).expect("Response body was not valid JSON")
}

/// The `id` of every element of a JSON listing array, in order.
pub fn ids(array: &Value) -> Vec<String> {
    array
        .as_array()
        .expect("Expected a JSON array")
        .iter()
        .map(|v| v["id"].as_str().expect("Listing had no id").to_string())
        .collect()
}
