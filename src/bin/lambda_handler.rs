//! AWS Lambda handler for computing a loan schedule
//!
//! Accepts loan parameters as JSON and returns the full schedule with its
//! summary and yearly breakdown. Missing fields take the calculator defaults.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use emi_schedule::{
    LoanParameters, ScheduleConfig, ScheduleEngine, ScheduleResult, Summary, YearRecord,
};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::Serialize;

/// Output for a computed schedule
#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub installment_label: &'static str,
    pub summary: Summary,
    pub yearly: Vec<YearRecord>,
    pub schedule: ScheduleResult,
    pub execution_time_ms: u64,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn with_cors(
    builder: lambda_http::http::response::Builder,
) -> lambda_http::http::response::Builder {
    builder
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
}

fn json_response<T: Serialize>(status: u16, body: &T) -> Result<Response<Body>, Error> {
    let text = serde_json::to_string(body)?;
    Ok(with_cors(Response::builder())
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::Text(text))?)
}

fn error_response(status: u16, message: String) -> Result<Response<Body>, Error> {
    json_response(status, &ErrorBody { error: message })
}

/// Parse the request body into loan parameters
fn parse_parameters(body: &Body) -> Result<LoanParameters, serde_json::Error> {
    match body {
        Body::Text(s) => serde_json::from_str(s),
        Body::Binary(b) => serde_json::from_slice(b),
        Body::Empty => Ok(LoanParameters::default()),
    }
}

/// Lambda handler function
async fn handler(engine: &ScheduleEngine, event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(with_cors(Response::builder()).status(200).body(Body::Empty)?);
    }

    let params = match parse_parameters(event.body()) {
        Ok(p) => p,
        Err(e) => return error_response(400, format!("Invalid JSON: {}", e)),
    };

    let schedule = match engine.try_compute(&params) {
        Ok(schedule) => schedule,
        Err(e) => {
            log::warn!("rejected parameters {:?}: {}", params, e);
            return error_response(422, e.to_string());
        }
    };

    let response = ScheduleResponse {
        installment_label: schedule.frequency.installment_label(),
        summary: schedule.summary(),
        yearly: schedule.yearly_breakdown(),
        execution_time_ms: start.elapsed().as_millis() as u64,
        schedule,
    };

    json_response(200, &response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    let engine = ScheduleEngine::new(ScheduleConfig::from_env());
    let engine = &engine;
    run(service_fn(move |event: Request| async move { handler(engine, event).await })).await
}
