use crate::catalog::{run_query, ListingQuery, SnapshotFile};
use crate::errors::{ResultResp, ServerError};
use crate::responses::{error_to_response, html_response, json_response};
use crate::spreadsheets::export_listings_xlsx;
use crate::templates::pages::{home_page, StatusView};
use crate::view::ViewSession;
use astra::{Request, Response};
use chrono::{DateTime, Local};
use std::collections::HashMap;

/// Everything a request handler needs: the snapshot source and the client
/// session. One instance lives for the whole server run.
pub struct App {
    pub snapshot: SnapshotFile,
    pub view: ViewSession,
}

/// One request, one response. Errors under `/api/` render as the JSON
/// envelope, everything else as the HTML error page.
pub fn serve_request(req: Request, app: &App) -> Response {
    let api = req.uri().path().starts_with("/api/");
    match handle(req, app) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err, api),
    }
}

pub fn handle(req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();

    match (method, path) {
        ("GET", "/") => status_page(app),
        ("GET", "/api/listings") => api_listings(&req, app),
        ("GET", "/api/listings.xlsx") => api_listings_xlsx(&req, app),
        ("GET", "/api/view") => api_view(&req, app),
        ("POST", "/api/view/hide") => api_view_toggle(&req, app, true),
        ("POST", "/api/view/unhide") => api_view_toggle(&req, app, false),
        _ => Err(ServerError::NotFound),
    }
}

fn status_page(app: &App) -> ResultResp {
    let (listing_count, load_error) = match app.snapshot.load() {
        Ok(listings) => (Some(listings.len()), None),
        Err(e) => (None, Some(e.to_string())),
    };

    let status = StatusView {
        snapshot_file: app.snapshot.path().display().to_string(),
        listing_count,
        load_error,
        modified: app.snapshot.modified().map(DateTime::<Local>::from),
        hidden_count: app.view.hidden_count(),
    };

    html_response(home_page(&status))
}

/// The pure query endpoint: parameters in, envelope out, prefs untouched.
fn api_listings(req: &Request, app: &App) -> ResultResp {
    let params = parse_query(req);
    let query = ListingQuery::from_params(&params);

    let listings = app.snapshot.load()?;
    json_response(run_query(&listings, &query))
}

fn api_listings_xlsx(req: &Request, app: &App) -> ResultResp {
    let params = parse_query(req);
    let query = ListingQuery::from_params(&params);

    let listings = app.snapshot.load()?;
    export_listings_xlsx(&run_query(&listings, &query))
}

fn api_view(req: &Request, app: &App) -> ResultResp {
    let params = parse_query(req);
    partitioned_response(&params, app)
}

fn api_view_toggle(req: &Request, app: &App, hide: bool) -> ResultResp {
    let params = parse_query(req);
    let id = params
        .get("id")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ServerError::BadRequest("missing id parameter".to_string()))?;

    if hide {
        app.view.hide_entry(id);
    } else {
        app.view.unhide_entry(id);
    }

    partitioned_response(&params, app)
}

/// Shared tail of the view routes: run the session's effective query, then
/// split the result along the hidden list.
fn partitioned_response(params: &HashMap<String, String>, app: &App) -> ResultResp {
    let query = app.view.effective_query(params);

    let listings = app.snapshot.load()?;
    let catalog = run_query(&listings, &query);
    json_response(app.view.partition(catalog))
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    let mut map = HashMap::new();

    if let Some(q) = req.uri().query() {
        for (key, value) in url::form_urlencoded::parse(q.as_bytes()) {
            map.insert(key.into_owned(), value.into_owned());
        }
    }

    map
}
