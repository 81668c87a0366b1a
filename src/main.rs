use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use news_processor::{pipeline, scrape, types::*, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    info!("Starting news processor API");
    info!(
        "Translation/summarization: {}",
        configured(config.openai_api_key.is_some())
    );
    info!("Sentiment model: {}", configured(config.hf_api_token.is_some()));

    let state = Arc::new(AppState::new(&config)?);

    let app = Router::new()
        .route("/", get(index))
        .route("/api/health", get(health_check))
        .route("/api/scrape", post(scrape_handler))
        .route("/api/process", post(process_handler))
        .route("/api/translate", post(translate_handler))
        .route("/api/summarize", post(summarize_handler))
        .route("/api/sentiment", post(sentiment_handler))
        .route("/api/chat", post(chat_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn configured(is_set: bool) -> &'static str {
    if is_set {
        "configured"
    } else {
        "not configured (simulation mode)"
    }
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: &str) -> HandlerError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse { error: message.to_string() }),
    )
}

fn internal_error(message: String) -> HandlerError {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: message }))
}

async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "News Processing API",
        "endpoints": {
            "POST /api/scrape": "scrape an article URL",
            "POST /api/process": "scrape, translate and summarize an article",
            "POST /api/translate": "translate text",
            "POST /api/summarize": "summarize text",
            "POST /api/sentiment": "financial sentiment (favorable/unfavorable/neutral)",
            "POST /api/chat": "assistant chat",
            "GET /api/health": "service health",
        },
    }))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "message": "News Processing API is running",
    }))
}

async fn scrape_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ScrapeRequest>,
) -> Result<Json<ScrapeResponse>, HandlerError> {
    if request.url.trim().is_empty() {
        return Err(bad_request("url is required"));
    }
    let outcome = scrape::scrape_article(&state, &request.url).await;
    Ok(Json(ScrapeResponse::from(outcome)))
}

async fn process_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ProcessRequest>,
) -> Result<Json<ProcessResponse>, HandlerError> {
    if request.url.trim().is_empty() {
        return Err(bad_request("url is required"));
    }
    Ok(Json(pipeline::process_article(&state, &request.url).await))
}

async fn translate_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, HandlerError> {
    if request.text.trim().is_empty() {
        return Err(bad_request("text is required"));
    }
    match state.translator.translate(&request.text, &request.target_lang).await {
        Some(translated) => Ok(Json(TranslateResponse {
            success: true,
            original: request.text,
            translated,
        })),
        None => Err(internal_error("translation failed: text is too short".to_string())),
    }
}

async fn summarize_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, HandlerError> {
    if request.text.trim().is_empty() {
        return Err(bad_request("text is required"));
    }
    match state.summarizer.summarize(&request.text, request.max_length).await {
        Some(summarized) => Ok(Json(SummarizeResponse {
            success: true,
            original: request.text,
            summarized,
        })),
        None => Err(internal_error("summarization failed: text is too short".to_string())),
    }
}

async fn sentiment_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SentimentRequest>,
) -> Result<Json<SentimentResponse>, HandlerError> {
    if request.title.trim().is_empty() {
        return Err(bad_request("title is required"));
    }
    match state.sentiment.analyze_news(&request.title, &request.description).await {
        Ok(sentiment) => Ok(Json(SentimentResponse { success: true, sentiment })),
        Err(e) => {
            error!("Sentiment error: {e}");
            Err(internal_error(format!("sentiment analysis failed: {e}")))
        }
    }
}

async fn chat_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, HandlerError> {
    if request.message.trim().is_empty() {
        return Err(bad_request("message is required"));
    }
    let reply = state.chatbot.chat(&request.message, &request.history).await;
    Ok(Json(ChatResponse { success: true, reply }))
}
