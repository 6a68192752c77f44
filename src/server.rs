use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, StatusCode};
use log::{debug, info};
use serde::Serialize;
use serde_json::json;

use crate::dashboard::{Dashboard, KillsQuery, SirusDashboard};
use crate::error::ApiError;
use crate::week_window::PeriodKey;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

pub async fn serve<S>(addr: SocketAddr, dashboard: Arc<SirusDashboard>, shutdown: S) -> Result<()>
where
    S: Future<Output = ()>,
{
    let make_svc = make_service_fn(move |_| {
        let dashboard = dashboard.clone();
        async move {
            Ok::<_, Infallible>(service_fn(move |req| {
                let dashboard = dashboard.clone();
                async move { Ok::<_, Infallible>(handle_request(dashboard, req).await) }
            }))
        }
    });

    let server = hyper::Server::try_bind(&addr)
        .with_context(|| format!("could not bind {addr}"))?
        .serve(make_svc);

    info!("listening on http://{}", server.local_addr());

    server
        .with_graceful_shutdown(shutdown)
        .await
        .context("http server error")?;

    info!("server stopped");

    Ok(())
}

pub async fn handle_request<D: Dashboard>(dashboard: Arc<D>, req: Request<Body>) -> Response<Body> {
    debug!("{} {}", req.method(), req.uri());

    let path = req.uri().path();

    if !matches!(path, "/api/latest-kills" | "/api/progression" | "/api/guild") {
        return empty_response(StatusCode::NOT_FOUND);
    }

    if req.method() != Method::GET {
        return empty_response(StatusCode::METHOD_NOT_ALLOWED);
    }

    match path {
        "/api/latest-kills" => {
            let query = parse_kills_query(req.uri().query());
            to_response(
                dashboard.latest_kills(query).await,
                "Failed to fetch latest boss kills from Sirus",
            )
        }
        "/api/progression" => to_response(
            dashboard.progression().await,
            "Failed to fetch progression data from Sirus",
        ),
        _ => to_response(dashboard.guild().await, "Failed to fetch guild data from Sirus"),
    }
}

/// Missing or empty values take their defaults, garbage numbers are dropped.
pub fn parse_kills_query(query: Option<&str>) -> KillsQuery {
    let mut kills_query = KillsQuery::default();

    let pairs = form_urlencoded::parse(query.unwrap_or_default().as_bytes())
        .filter(|(_, value)| !value.is_empty());

    for (name, value) in pairs {
        let value = value.trim();

        match name.as_ref() {
            "period" => kills_query.period = PeriodKey::parse(value),
            "page" => kills_query.page = value.parse::<u32>().unwrap_or(1).max(1),
            "i" => kills_query.raid_index = value.parse().ok(),
            "boss" => kills_query.boss = value.parse().ok(),
            _ => {}
        }
    }

    kills_query
}

pub fn error_body(message: &str, err: &ApiError) -> (StatusCode, serde_json::Value) {
    match err {
        ApiError::Upstream { status, status_text, details } => (
            StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            json!({
                "error": message,
                "status": status,
                "statusText": status_text,
                "details": details,
            }),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({
                "error": message,
                "details": err.details(),
            }),
        ),
    }
}

fn to_response<T: Serialize>(result: Result<T, ApiError>, message: &str) -> Response<Body> {
    match result {
        Ok(view) => json_response(StatusCode::OK, &view),
        Err(err) => {
            let (status, body) = error_body(message, &err);
            json_response(status, &body)
        }
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Body> {
    let bytes = match serde_json::to_vec(body) {
        Ok(bytes) => bytes,
        Err(_) => return empty_response(StatusCode::INTERNAL_SERVER_ERROR),
    };

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

    response
}

fn empty_response(status: StatusCode) -> Response<Body> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    response
}
