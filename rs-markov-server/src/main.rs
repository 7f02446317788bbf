use std::sync::{Arc, Mutex};

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, put, web};
use env_logger::Env;
use log::info;

use rs_markov_core::Result;
use rs_markov_core::model::generation_config::{DEFAULT_MAX_TOKENS, DEFAULT_ORDER, GenerationConfig};
use rs_markov_core::model::state_model::StateModel;
use serde::Deserialize;

/// Query parameters for the `/v1/model` upload endpoint
#[derive(Deserialize)]
struct ModelParams {
	order: Option<usize>,
}

/// Query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	max_tokens: Option<usize>,
	seed: Option<u64>,
}

/// Highest `max_tokens` a single request may ask for.
const MAX_TOKENS_LIMIT: usize = 100_000;

struct SharedData {
	model: Option<Arc<StateModel>>,
	max_tokens_limit: usize,
}

impl SharedData {
	fn new(max_tokens_limit: usize) -> Self {
		Self { model: None, max_tokens_limit }
	}
}

type Shared = web::Data<Mutex<SharedData>>;

/// HTTP PUT endpoint `/v1/model`
///
/// Builds a model from the request body and replaces the loaded one.
#[put("/v1/model")]
async fn put_model(data: Shared, query: web::Query<ModelParams>, body: web::Bytes) -> impl Responder {
	let order = query.order.unwrap_or(DEFAULT_ORDER);

	let model = match StateModel::from_reader(&body[..], order) {
		Ok(model) => model,
		Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
	};
	let summary = format!("Model built: order {}, {} prefixes", model.order(), model.len());

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	shared_data.model = Some(Arc::new(model));

	info!("{}", summary);
	HttpResponse::Ok().body(summary)
}

/// HTTP GET endpoint `/v1/generate`
///
/// Walks the loaded model and returns the generated words, one per line.
///
/// `max_tokens` is capped at the server limit. The walk runs on the blocking
/// pool, without holding the model lock.
#[get("/v1/generate")]
async fn get_generated(data: Shared, query: web::Query<GenerateParams>) -> impl Responder {
	let (model, max_tokens_limit) = {
		let shared_data = match data.lock() {
			Ok(m) => m,
			Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
		};
		match &shared_data.model {
			Some(model) => (Arc::clone(model), shared_data.max_tokens_limit),
			None => return HttpResponse::Conflict().body("No model loaded"),
		}
	};

	let config = GenerationConfig {
		order: model.order(),
		max_tokens: query.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS).min(max_tokens_limit),
		seed: query.seed,
	};

	let walk = web::block(move || {
		model
			.generate(config.max_tokens, config.rng())
			.collect::<Result<Vec<Vec<u8>>>>()
	})
	.await;

	match walk {
		Ok(Ok(words)) => HttpResponse::Ok().body(words.join(&b'\n')),
		Ok(Err(e)) => HttpResponse::InternalServerError().body(e.to_string()),
		Err(_) => HttpResponse::InternalServerError().body("Generation task failed"),
	}
}

/// HTTP GET endpoint `/v1/model`
///
/// Returns the loaded model as JSON, prefixes in their encoded form.
#[get("/v1/model")]
async fn get_model(data: Shared) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	match &shared_data.model {
		Some(model) => HttpResponse::Ok().json(model.as_ref()),
		None => HttpResponse::Conflict().body("No model loaded"),
	}
}

fn routes(cfg: &mut web::ServiceConfig) {
	cfg.service(put_model)
		.service(get_generated)
		.service(get_model);
}

/// Main entry point for the server.
///
/// Starts with no model loaded; `PUT /v1/model` must be called first.
/// The server binds to 127.0.0.1:5000.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

	let shared_model = web::Data::new(Mutex::new(SharedData::new(MAX_TOKENS_LIMIT)));

	info!("listening on 127.0.0.1:5000");
	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_model.clone())
			.configure(routes)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}
