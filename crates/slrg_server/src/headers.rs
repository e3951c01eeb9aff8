//! Response headers read by the browser UI.

use axum::http::header::{LINK, LOCATION};
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use log::warn;
use slrg_core::{Alert, FailureAlert, Page};

pub const ALERT: HeaderName = HeaderName::from_static("x-slrg-alert");
pub const ERROR: HeaderName = HeaderName::from_static("x-slrg-error");
pub const ENTITY: HeaderName = HeaderName::from_static("x-slrg-entity");
pub const PARAMS: HeaderName = HeaderName::from_static("x-slrg-params");
pub const TOTAL_COUNT: HeaderName = HeaderName::from_static("x-total-count");

/// Headers the UI may read across origins.
pub fn exposed() -> [HeaderName; 7] {
    [ALERT, ERROR, ENTITY, PARAMS, TOTAL_COUNT, LINK, LOCATION]
}

pub fn alert(alert: &Alert) -> HeaderMap {
    let mut headers = HeaderMap::new();
    put(&mut headers, ALERT, alert.key());
    put(&mut headers, ENTITY, alert.entity_name);
    put(&mut headers, PARAMS, &alert.param);
    headers
}

pub fn failure(failure: &FailureAlert) -> HeaderMap {
    let mut headers = HeaderMap::new();
    put(&mut headers, ERROR, &failure.error_key);
    if let Some(entity) = failure.entity_name {
        put(&mut headers, ENTITY, entity);
    }
    headers
}

/// `X-Total-Count` plus the `Link` navigation header for `base_path`.
pub fn pagination<T>(page: &Page<T>, base_path: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    put(&mut headers, TOTAL_COUNT, &page.total_elements.to_string());
    put(&mut headers, LINK, &page.link_header(base_path));
    headers
}

pub fn put(headers: &mut HeaderMap, name: HeaderName, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(value) => {
            headers.insert(name, value);
        }
        Err(_) => {
            warn!("event=header_skipped module=server status=invalid_value header={name}");
        }
    }
}
