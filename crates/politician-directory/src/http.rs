use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::header::CACHE_CONTROL,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use directory_core::model::PoliticianQuery;
use directory_core::query::query_politicians;
use tracing::warn;

use crate::config::Config;
use crate::error::AppError;

pub const POLITICIANS_ROUTE: &str = "/api/crypto-politicians";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

/// Raw query string. Numbers arrive as text so that junk like `page=abc`
/// falls back to the default instead of rejecting the request. A repeated
/// key keeps its first value.
#[derive(Debug, Default)]
pub struct PoliticianQueryParams {
    query: Option<String>,
    state: Option<String>,
    zip: Option<String>,
    party: Option<String>,
    role: Option<String>,
    stance: Option<String>,
    page: Option<String>,
    page_size: Option<String>,
}

impl PoliticianQueryParams {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "query" => &mut params.query,
                "state" => &mut params.state,
                "zip" => &mut params.zip,
                "party" => &mut params.party,
                "role" => &mut params.role,
                "stance" => &mut params.stance,
                "page" => &mut params.page,
                "pageSize" => &mut params.page_size,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

impl From<PoliticianQueryParams> for PoliticianQuery {
    fn from(params: PoliticianQueryParams) -> Self {
        Self {
            query: params.query,
            state: params.state,
            zip: params.zip,
            party: params.party,
            role: params.role,
            stance: params.stance,
            page: params.page.as_deref().and_then(parse_leading_int),
            page_size: params.page_size.as_deref().and_then(parse_leading_int),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(POLITICIANS_ROUTE, get(politicians_handler))
        .with_state(state)
}

pub async fn politicians_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let query = PoliticianQuery::from(PoliticianQueryParams::from_pairs(pairs));
    let page = query_politicians(state.config.csv_path(), &query)
        .await
        .inspect_err(|e| warn!(error = %e, "politician query failed"))?;

    Ok(([(CACHE_CONTROL, "no-store")], Json(page)).into_response())
}

/// Reads an optional sign and the leading digits, ignoring anything after.
/// Values beyond `i64` saturate so that a huge page still clamps to the last one.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() {
        return None;
    }
    let value = match digits.parse::<i64>() {
        Ok(n) if negative => -n,
        Ok(n) => n,
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    };
    Some(value)
}
