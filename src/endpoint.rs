/// HTTP endpoint for flood risk predictions
///
/// Wraps the scorer in a small JSON API so dashboards and scripts can ask
/// for a prediction without linking the crate.
///
/// Endpoints:
/// - POST /predict - Score a (possibly partial) prediction input
/// - GET /predict/defaults - Inputs used for omitted fields
/// - GET /insights/{historical|predictions|comparison} - Display datasets
/// - GET /regions - Sample map regions with their bands
/// - GET /health - Service health check
///
/// Requests are handed to a thread pool. Each request builds its own scorer,
/// so concurrent predictions never contend on shared state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Duration;
use thiserror::Error;
use threadpool::ThreadPool;

use crate::alert::{advisory, band};
use crate::config::ServiceConfig;
use crate::insights::{self, Dataset, REGIONS};
use crate::model::{PredictionInput, RiskScore};
use crate::scoring::{self, RiskScorer};

const AVAILABLE_ENDPOINTS: [&str; 5] = [
    "POST /predict",
    "GET /predict/defaults",
    "GET /insights/{historical|predictions|comparison}",
    "GET /regions",
    "GET /health",
];

#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("failed to start HTTP server on {address}: {reason}")]
    Bind { address: String, reason: String },

    #[error("invalid prediction request: {0}")]
    BadRequest(#[from] serde_json::Error),

    #[error("unknown dataset '{0}'")]
    UnknownDataset(String),
}

// ---------------------------------------------------------------------------
// Request / Response Types
// ---------------------------------------------------------------------------

/// Body of POST /predict. Omitted fields come from the configured defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PredictRequest {
    pub rainfall: Option<f64>,
    pub duration: Option<f64>,
    pub soil_saturation: Option<f64>,
    pub river_level: Option<f64>,
    pub use_historical: Option<bool>,
}

impl PredictRequest {
    pub fn resolve(&self, defaults: &PredictionInput) -> PredictionInput {
        PredictionInput {
            rainfall: self.rainfall.unwrap_or(defaults.rainfall),
            duration: self.duration.unwrap_or(defaults.duration),
            soil_saturation: self.soil_saturation.unwrap_or(defaults.soil_saturation),
            river_level: self.river_level.unwrap_or(defaults.river_level),
            use_historical: self.use_historical.unwrap_or(defaults.use_historical),
        }
    }
}

/// Prediction result with everything needed to render it
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub input: PredictionInput,
    pub base_score: f64,
    pub risk: RiskScore,

    /// Risk as a whole-number percentage, for progress bars
    pub percent: u8,

    pub band: String,
    pub badge: String,
    pub color: String,
    pub advisory: String,
    pub scored_at: DateTime<Utc>,
}

impl PredictionResponse {
    pub fn new(input: PredictionInput, risk: RiskScore) -> Self {
        let severity = band(risk);
        Self {
            input,
            base_score: scoring::base_score(&input),
            risk,
            percent: (risk * 100.0).round() as u8,
            band: severity.label().to_string(),
            badge: severity.badge_variant().to_string(),
            color: severity.map_color().to_string(),
            advisory: advisory(risk).message().to_string(),
            scored_at: Utc::now(),
        }
    }
}

/// Map region with its derived band
#[derive(Debug, Serialize)]
struct RegionData {
    id: u32,
    name: &'static str,
    latitude: f64,
    longitude: f64,
    risk: f64,
    band: &'static str,
    color: &'static str,
    radius_m: f64,
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Other,
}

impl From<&tiny_http::Method> for Method {
    fn from(method: &tiny_http::Method) -> Self {
        match method {
            tiny_http::Method::Get => Method::Get,
            tiny_http::Method::Post => Method::Post,
            _ => Method::Other,
        }
    }
}

/// Transport-independent view of an incoming request
#[derive(Debug, Clone, Copy)]
pub struct Request<'a> {
    pub method: Method,
    pub path: &'a str,
    pub body: &'a str,
}

/// Status code plus JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: serde_json::Value,
}

impl Reply {
    fn ok(body: serde_json::Value) -> Self {
        Self { status: 200, body }
    }

    fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: serde_json::json!({ "error": message.into() }),
        }
    }
}

/// State shared by all request handlers
#[derive(Debug)]
pub struct Context {
    defaults: PredictionInput,
    seed: Option<u64>,
    simulated_latency: Duration,
    predictions_served: AtomicU64,
}

impl Context {
    pub fn new(defaults: PredictionInput, seed: Option<u64>, simulated_latency: Duration) -> Self {
        Self {
            defaults,
            seed,
            simulated_latency,
            predictions_served: AtomicU64::new(0),
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(
            config.defaults.into(),
            config.scoring.seed,
            Duration::from_millis(config.scoring.simulated_latency_ms),
        )
    }

    pub fn predictions_served(&self) -> u64 {
        self.predictions_served.load(Ordering::Relaxed)
    }

    /// A fresh scorer for one request. With a seed configured, the n-th
    /// request always gets `seed + n`.
    fn scorer(&self) -> RiskScorer {
        let n = self.predictions_served.fetch_add(1, Ordering::Relaxed);
        match self.seed {
            Some(seed) => RiskScorer::seeded(seed.wrapping_add(n)),
            None => RiskScorer::from_entropy(),
        }
    }
}

/// Dispatches a request to its handler.
pub fn route(request: &Request<'_>, ctx: &Context) -> Reply {
    let path = request.path.split('?').next().unwrap_or_default();

    match (request.method, path) {
        (Method::Get, "/health") => handle_health(ctx),
        (Method::Post, "/predict") => handle_predict(request.body, ctx),
        (Method::Get, "/predict/defaults") => Reply::ok(serde_json::json!(ctx.defaults)),
        (Method::Get, "/regions") => handle_regions(),
        (Method::Get, p) if p.starts_with("/insights/") => {
            handle_insights(p.trim_start_matches("/insights/"))
        }
        (_, "/health" | "/predict" | "/predict/defaults" | "/regions") => {
            Reply::error(405, format!("Method not allowed for {}", path))
        }
        (_, p) if p.starts_with("/insights/") => {
            Reply::error(405, format!("Method not allowed for {}", path))
        }
        _ => Reply {
            status: 404,
            body: serde_json::json!({
                "error": "Not found",
                "available_endpoints": AVAILABLE_ENDPOINTS,
            }),
        },
    }
}

/// Handle /health endpoint
fn handle_health(ctx: &Context) -> Reply {
    Reply::ok(serde_json::json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "predictions_served": ctx.predictions_served(),
    }))
}

/// Handle POST /predict
fn handle_predict(body: &str, ctx: &Context) -> Reply {
    let input = match parse_predict_body(body, &ctx.defaults) {
        Ok(input) => input,
        Err(e) => {
            tracing::warn!(error = %e, "rejected prediction request");
            return Reply::error(400, e.to_string());
        }
    };

    if !ctx.simulated_latency.is_zero() {
        thread::sleep(ctx.simulated_latency);
    }

    let risk = ctx.scorer().score(&input);
    let response = PredictionResponse::new(input, risk);
    tracing::info!(risk, band = %response.band, use_historical = input.use_historical, "prediction served");

    match serde_json::to_value(&response) {
        Ok(body) => Reply::ok(body),
        Err(e) => Reply::error(500, e.to_string()),
    }
}

/// An empty body means "score the defaults".
fn parse_predict_body(body: &str, defaults: &PredictionInput) -> Result<PredictionInput, EndpointError> {
    if body.trim().is_empty() {
        return Ok(*defaults);
    }
    let request: PredictRequest = serde_json::from_str(body)?;
    Ok(request.resolve(defaults))
}

/// Handle /insights/{dataset}
fn handle_insights(name: &str) -> Reply {
    match Dataset::parse(name).ok_or_else(|| EndpointError::UnknownDataset(name.to_string())) {
        Ok(dataset) => {
            let records = match insights::dataset_json(dataset) {
                Ok(records) => records,
                Err(e) => return Reply::error(500, e.to_string()),
            };
            let mut body = serde_json::json!({
                "dataset": dataset.name(),
                "records": records,
            });
            if dataset == Dataset::Comparison {
                body["mean_absolute_error"] =
                    serde_json::json!(insights::mean_absolute_error(&insights::COMPARISON));
            }
            Reply::ok(body)
        }
        Err(e) => Reply::error(404, e.to_string()),
    }
}

/// Handle /regions
fn handle_regions() -> Reply {
    let regions: Vec<RegionData> = REGIONS
        .iter()
        .map(|r| {
            let severity = r.band();
            RegionData {
                id: r.id,
                name: r.name,
                latitude: r.latitude,
                longitude: r.longitude,
                risk: r.risk,
                band: severity.label(),
                color: severity.map_color(),
                radius_m: r.display_radius_m(),
            }
        })
        .collect();

    Reply::ok(serde_json::json!({ "regions": regions }))
}

// ---------------------------------------------------------------------------
// HTTP Server
// ---------------------------------------------------------------------------

/// Start the HTTP endpoint and serve until the listener closes.
pub fn start_endpoint_server(config: &ServiceConfig) -> Result<(), EndpointError> {
    let address = format!("{}:{}", config.server.bind_address, config.server.port);
    let server = tiny_http::Server::http(&address).map_err(|e| EndpointError::Bind {
        address: address.clone(),
        reason: e.to_string(),
    })?;

    tracing::info!(%address, workers = config.server.workers, "prediction endpoint listening");
    println!("📡 HTTP endpoint listening on http://{}", address);
    for endpoint in AVAILABLE_ENDPOINTS {
        println!("   {}", endpoint);
    }
    println!();

    let ctx = Arc::new(Context::from_config(config));
    let pool = ThreadPool::new(config.server.workers);

    for request in server.incoming_requests() {
        let ctx = Arc::clone(&ctx);
        pool.execute(move || serve_request(request, &ctx));
    }

    pool.join();
    Ok(())
}

fn serve_request(mut request: tiny_http::Request, ctx: &Context) {
    let mut body = String::new();
    let reply = match request.as_reader().read_to_string(&mut body) {
        Ok(_) => {
            let method = Method::from(request.method());
            let path = request.url().to_string();
            tracing::debug!(?method, %path, "request");
            route(&Request { method, path: &path, body: &body }, ctx)
        }
        Err(e) => Reply::error(400, format!("Failed to read request body: {}", e)),
    };

    if let Err(e) = request.respond(create_response(&reply)) {
        tracing::warn!(error = %e, "failed to send response");
    }
}

/// Create HTTP response with JSON body
fn create_response(reply: &Reply) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let body = serde_json::to_string_pretty(&reply.body).unwrap_or_default();
    let response = tiny_http::Response::from_data(body.into_bytes())
        .with_status_code(tiny_http::StatusCode::from(reply.status));

    match tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_ctx() -> Context {
        Context::new(PredictionInput::default(), Some(7), Duration::ZERO)
    }

    fn get(path: &str) -> Request<'_> {
        Request { method: Method::Get, path, body: "" }
    }

    #[test]
    fn test_partial_request_uses_defaults() {
        let request: PredictRequest =
            serde_json::from_str(r#"{"rainfall": 180.0, "use_historical": false}"#).expect("parse");
        let input = request.resolve(&PredictionInput::default());

        assert_eq!(input.rainfall, 180.0);
        assert!(!input.use_historical);
        assert_eq!(input.duration, 24.0);
        assert_eq!(input.soil_saturation, 30.0);
        assert_eq!(input.river_level, 40.0);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let ctx = seeded_ctx();
        let reply = route(
            &Request { method: Method::Post, path: "/predict", body: r#"{"rain": 10}"# },
            &ctx,
        );
        assert_eq!(reply.status, 400);
        assert_eq!(ctx.predictions_served(), 0);
    }

    #[test]
    fn test_predict_returns_banded_score() {
        let ctx = seeded_ctx();
        let body = r#"{"rainfall": 200, "duration": 72, "soil_saturation": 100, "river_level": 100}"#;
        let reply = route(&Request { method: Method::Post, path: "/predict", body }, &ctx);

        assert_eq!(reply.status, 200);
        let risk = reply.body["risk"].as_f64().expect("risk");
        // base = 1.0 with the historical default, so risk is in [0.9, 1.0].
        assert!((0.9..=1.0).contains(&risk));
        assert_eq!(reply.body["band"], "Severe");
        assert_eq!(reply.body["advisory"], "Immediate action recommended");
        assert_eq!(reply.body["base_score"].as_f64(), Some(1.0));
        assert_eq!(ctx.predictions_served(), 1);
    }

    #[test]
    fn test_empty_body_scores_defaults() {
        let ctx = seeded_ctx();
        let reply = route(&Request { method: Method::Post, path: "/predict", body: "" }, &ctx);
        assert_eq!(reply.status, 200);
        assert_eq!(reply.body["input"]["rainfall"], 50.0);
    }

    #[test]
    fn test_seeded_context_is_reproducible() {
        let request = Request { method: Method::Post, path: "/predict", body: "{}" };
        let a = route(&request, &seeded_ctx());
        let b = route(&request, &seeded_ctx());
        assert_eq!(a.body["risk"], b.body["risk"]);
    }

    #[test]
    fn test_health() {
        let reply = route(&get("/health"), &seeded_ctx());
        assert_eq!(reply.status, 200);
        assert_eq!(reply.body["status"], "ok");
        assert_eq!(reply.body["service"], "flood_risk_service");
    }

    #[test]
    fn test_insights_routes() {
        let ctx = seeded_ctx();

        let reply = route(&get("/insights/predictions"), &ctx);
        assert_eq!(reply.status, 200);
        assert_eq!(reply.body["records"].as_array().map(Vec::len), Some(7));

        let reply = route(&get("/insights/comparison"), &ctx);
        assert!(reply.body["mean_absolute_error"].as_f64().is_some());

        let reply = route(&get("/insights/weather"), &ctx);
        assert_eq!(reply.status, 404);
    }

    #[test]
    fn test_regions_include_bands() {
        let reply = route(&get("/regions"), &seeded_ctx());
        let regions = reply.body["regions"].as_array().expect("array");
        assert_eq!(regions.len(), 5);
        assert_eq!(regions[1]["name"], "Riverside");
        assert_eq!(regions[1]["band"], "Severe");
    }

    #[test]
    fn test_wrong_method_and_unknown_path() {
        let ctx = seeded_ctx();
        assert_eq!(route(&get("/predict"), &ctx).status, 405);
        assert_eq!(route(&get("/nowhere"), &ctx).status, 404);
        assert_eq!(route(&get("/health?verbose=1"), &ctx).status, 200);
    }

    #[test]
    fn test_non_get_on_read_only_routes() {
        let ctx = seeded_ctx();
        for path in ["/insights/historical", "/health"] {
            let reply = route(&Request { method: Method::Post, path, body: "" }, &ctx);
            assert_eq!(reply.status, 405, "POST {} should be 405", path);
        }
    }

    #[test]
    fn test_simulated_latency_still_answers() {
        let ctx = Context::new(PredictionInput::default(), Some(3), Duration::from_millis(1));
        let reply = route(&Request { method: Method::Post, path: "/predict", body: "{}" }, &ctx);
        assert_eq!(reply.status, 200);
        assert!(reply.body["risk"].as_f64().is_some());
    }

    #[test]
    fn test_prediction_response_percent() {
        let response = PredictionResponse::new(PredictionInput::default(), 0.456);
        assert_eq!(response.percent, 46);
        assert_eq!(response.band, "Moderate");
        assert_eq!(response.badge, "warning");
    }
}
