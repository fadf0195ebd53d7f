use crate::display_bridge::model::StatusReply;
use aerocore::{
    AeroEngine, AeroQuery, EngineError, EngineResult, ProcessedSample, Sample, Scenario,
};
use serde::Serialize;
use serde_json::json;
use std::{net::SocketAddr, sync::Arc, thread};
use tokio::runtime::Builder;
use tokio::sync::watch;
use warp::{http::StatusCode, reply::Response, Filter, Reply};

pub fn display_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

fn reply_result<T: Serialize>(result: EngineResult<T>) -> Response {
    match result {
        Ok(value) => warp::reply::json(&value).into_response(),
        Err(err) => {
            let status = match err {
                EngineError::UnknownPort(_) | EngineError::UnknownScenario(_) => {
                    StatusCode::NOT_FOUND
                }
                EngineError::NonFinite { .. } => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            log::warn!("display request failed: {}", err);
            let body = warp::reply::json(&json!({ "error": err.to_string() }));
            warp::reply::with_status(body, status).into_response()
        }
    }
}

/// HTTP routes exposing the engine's query, reset and ingest operations.
pub fn routes(
    engine: Arc<AeroEngine>,
) -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    let query = engine.query();
    let live = engine.subscribe();
    let query_filter = warp::any().map(move || query.clone());
    let live_filter = warp::any().map(move || live.clone());
    let engine_filter = warp::any().map(move || engine.clone());

    let averages = warp::path!("averages")
        .and(warp::get())
        .and(query_filter.clone())
        .map(|query: AeroQuery| reply_result(query.get_averages()));

    let histograms = warp::path!("histograms" / Scenario)
        .and(warp::get())
        .and(query_filter.clone())
        .map(|scenario: Scenario, query: AeroQuery| reply_result(query.get_histograms(scenario)));

    let histogram = warp::path!("histograms" / Scenario / usize)
        .and(warp::get())
        .and(query_filter.clone())
        .map(|scenario: Scenario, port: usize, query: AeroQuery| {
            reply_result(query.get_histogram(scenario, port))
        });

    let reset_all = warp::path!("reset")
        .and(warp::post())
        .and(query_filter.clone())
        .map(|query: AeroQuery| {
            reply_result(query.reset_averages(None).map(|_| StatusReply::reset(None)))
        });

    let reset_scenario = warp::path!("reset" / Scenario)
        .and(warp::post())
        .and(query_filter)
        .map(|scenario: Scenario, query: AeroQuery| {
            reply_result(
                query
                    .reset_averages(Some(scenario))
                    .map(|_| StatusReply::reset(Some(scenario))),
            )
        });

    let ingest = warp::path!("ingest")
        .and(warp::post())
        .and(warp::body::json())
        .and(engine_filter.clone())
        .map(|sample: Sample, engine: Arc<AeroEngine>| reply_result(engine.ingest(&sample)));

    let live_route = warp::path!("live")
        .and(warp::get())
        .and(live_filter)
        .map(|live: watch::Receiver<Option<ProcessedSample>>| {
            warp::reply::json(&*live.borrow()).into_response()
        });

    let counters = warp::path!("counters")
        .and(warp::get())
        .and(engine_filter)
        .map(|engine: Arc<AeroEngine>| warp::reply::json(&engine.counters()).into_response());

    averages
        .or(histograms)
        .or(histogram)
        .or(reset_all)
        .or(reset_scenario)
        .or(ingest)
        .or(live_route)
        .or(counters)
}

/// Local display bridge serving the engine over HTTP on its own thread.
pub struct DisplayBridge {
    engine: Arc<AeroEngine>,
}

impl DisplayBridge {
    pub fn new(engine: Arc<AeroEngine>) -> Self {
        Self { engine }
    }

    pub fn serve(&self, address: SocketAddr) -> thread::JoinHandle<()> {
        let routes = routes(self.engine.clone());
        thread::spawn(move || {
            let runtime = match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime,
                Err(err) => {
                    log::error!("failed to build display bridge runtime: {}", err);
                    return;
                }
            };
            log::info!("display bridge listening on http://{}", address);
            runtime.block_on(async move {
                warp::serve(routes).run(address).await;
            });
        })
    }

    pub fn publish_status(&self, message: &str) {
        println!("[DISPLAY] {}", message);
    }
}
