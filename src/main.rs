use crate::catalog::SnapshotFile;
use crate::prefs::PrefStore;
use crate::router::{serve_request, App};
use crate::view::ViewSession;
use astra::Server;
use std::env;
use std::net::SocketAddr;

mod catalog;
mod errors;
mod prefs;
mod responses;
mod router;
mod spreadsheets;
mod templates;
mod view;
mod visibility;

#[cfg(test)]
mod tests;

fn main() {
    // 1️⃣ Locate the snapshot the scraper run produced
    let snapshot_file = env::var("SNAPSHOT_FILE").unwrap_or_else(|_| "results.json".to_string());
    let snapshot = SnapshotFile::new(&snapshot_file);

    // 2️⃣ Open the preference store (hidden listings, saved filters)
    let prefs_db = env::var("PREFS_DB").unwrap_or_else(|_| "prefs.sqlite3".to_string());
    let store = match PrefStore::open(&prefs_db) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("❌ Preference store initialization failed: {e}");
            std::process::exit(1);
        }
    };
    let view = ViewSession::new(&store);

    // 3️⃣ Start the server
    let listen = env::var("LISTEN_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    let addr: SocketAddr = match listen.parse() {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("❌ Invalid LISTEN_ADDR '{listen}': {e}");
            std::process::exit(1);
        }
    };

    println!("Serving {snapshot_file} at http://{addr}");

    let app = App { snapshot, view };
    let server = Server::bind(&addr).max_workers(8);

    // 4️⃣ Serve requests; API routes answer errors as JSON
    let result = server.serve(move |req, _info| serve_request(req, &app));

    if let Err(e) = result {
        eprintln!("Server ended with error: {e}");
    }

    println!("Server shut down cleanly.");
}
