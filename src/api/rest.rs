// =============================================================================
// REST API Endpoints — Axum
// =============================================================================
//
// All endpoints live under `/api`. Health is public; the auth endpoints
// manage their own session tokens; the dashboard data endpoints mirror what
// the web client requests. CORS is configured permissively for development;
// tighten `allowed_origins` in production.
// =============================================================================

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Months, Utc};
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::api::auth::{self, AuthSession};
use crate::app_state::AppState;
use crate::indicators::{self, round2};
use crate::llm;
use crate::news::classify_headline;
use crate::pdf;
use crate::types::{
    MarketSentiment, NewsArticle, PdfReportRequest, PricePoint, QuoteMetric, StockBasicInfo,
    StockData,
};

/// The indices shown on the sentiment heatmap.
const MARKET_INDICES: [(&str, &str); 5] = [
    ("S&P 500", "^GSPC"),
    ("NASDAQ", "^IXIC"),
    ("Dow Jones", "^DJI"),
    ("Bitcoin", "BTC-USD"),
    ("Gold", "GC=F"),
];

/// Articles requested from the provider per refresh.
const NEWS_PAGE_SIZE: u32 = 20;
/// Articles returned to the dashboard after deduplication.
const MAX_ARTICLES: usize = 6;

// =============================================================================
// Router construction
// =============================================================================

/// Build the full REST API router with CORS middleware and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // ── Public ──────────────────────────────────────────────────
        .route("/api/health", get(health))
        // ── Auth ────────────────────────────────────────────────────
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
        // ── Dashboard data ──────────────────────────────────────────
        .route("/api/market-sentiment", get(market_sentiment))
        .route("/api/news", get(news))
        .route("/api/chat", post(chat))
        .route("/api/stock/{ticker}", get(stock))
        .route("/api/generate-pdf", post(generate_pdf))
        // ── Middleware & State ──────────────────────────────────────
        .layer(cors)
        .with_state(state)
}

fn error_response(status: StatusCode, message: &str) -> Response {
    let body = serde_json::json!({ "error": message });
    (status, Json(body)).into_response()
}

// =============================================================================
// Health (public)
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    server_time: i64,
    uptime_secs: u64,
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        server_time: Utc::now().timestamp_millis(),
        uptime_secs: state.uptime_secs(),
    })
}

// =============================================================================
// Auth
// =============================================================================

#[derive(Deserialize)]
struct CredentialsRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CredentialsRequest>,
) -> Response {
    if req.username.len() < 3 || req.password.len() < 4 {
        return error_response(StatusCode::BAD_REQUEST, "Invalid username or password");
    }

    if state.storage.get_user_by_username(&req.username).is_some() {
        return error_response(StatusCode::CONFLICT, "Username already exists");
    }

    let user = state.storage.create_user(&req.username, &req.password);
    info!(username = %user.username, "user registered");

    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "id": user.id, "username": user.username })),
    )
        .into_response()
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CredentialsRequest>,
) -> Response {
    if req.username.is_empty() || req.password.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Username and password required");
    }

    let Some(user) = state.storage.get_user_by_username(&req.username) else {
        return error_response(StatusCode::UNAUTHORIZED, "Invalid credentials");
    };
    if !state.storage.verify_password(&req.password, &user.password_hash) {
        return error_response(StatusCode::UNAUTHORIZED, "Invalid credentials");
    }

    let token = state.sessions.create(&user.id);
    info!(username = %user.username, "user logged in");

    Json(serde_json::json!({
        "id": user.id,
        "username": user.username,
        "token": token,
    }))
    .into_response()
}

async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = auth::bearer_token(&headers) {
        state.sessions.destroy(token);
    }
    Json(serde_json::json!({ "message": "Logged out" }))
}

async fn me(session: AuthSession) -> impl IntoResponse {
    Json(serde_json::json!({ "userId": session.user_id }))
}

// =============================================================================
// Market sentiment
// =============================================================================

async fn market_sentiment(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let fetches = MARKET_INDICES.map(|(name, symbol)| {
        let state = state.clone();
        async move {
            // One failing index must not take down the heatmap.
            let change = match state.market.get_quote(symbol).await {
                Ok(quote) => quote.change_percent.map(round2),
                Err(e) => {
                    warn!(symbol, error = %e, "index quote failed");
                    None
                }
            };
            MarketSentiment {
                name: name.to_string(),
                symbol: symbol.to_string(),
                change,
            }
        }
    });

    let results: Vec<MarketSentiment> = join_all(fetches).await;
    Json(results)
}

// =============================================================================
// News
// =============================================================================

async fn news(State(state): State<Arc<AppState>>) -> Response {
    if !state.news.is_configured() {
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "News API key not configured",
        );
    }

    let raw = match state.news.get_everything("stocks+business", NEWS_PAGE_SIZE).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!(error = %e, "news fetch failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch news");
        }
    };

    let mut seen_urls = HashSet::new();
    let mut articles = Vec::new();

    for item in raw {
        if articles.len() >= MAX_ARTICLES {
            break;
        }

        let url = item.url.unwrap_or_default();
        if !url.is_empty() && !seen_urls.insert(url.clone()) {
            continue;
        }

        let title = item.title.unwrap_or_else(|| "No Title".to_string());
        let class = classify_headline(&title);

        articles.push(NewsArticle {
            title,
            source: item
                .source
                .and_then(|s| s.name)
                .unwrap_or_else(|| "Unknown".to_string()),
            image: item.url_to_image,
            url: (!url.is_empty()).then_some(url),
            published: item.published_at,
            sentiment: class.sentiment,
            sentiment_color: class.color.to_string(),
            category: class.category.to_string(),
        });
    }

    Json(articles).into_response()
}

// =============================================================================
// Chat
// =============================================================================

#[derive(Deserialize)]
struct ChatRequestBody {
    #[serde(default)]
    question: String,
}

async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequestBody>,
) -> Response {
    if req.question.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Question is required");
    }
    if !state.chat.is_configured() {
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "OpenAI API key not configured",
        );
    }

    match state.chat.complete(llm::ANALYST_PERSONA, &req.question).await {
        Ok(text) => Json(serde_json::json!({ "response": text })).into_response(),
        Err(e) => {
            warn!(error = %e, "chat completion failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to get AI response")
        }
    }
}

// =============================================================================
// Stock lookup
// =============================================================================

fn months_ago(months: u32) -> DateTime<Utc> {
    Utc::now()
        .checked_sub_months(Months::new(months))
        .unwrap_or_else(Utc::now)
}

async fn stock(State(state): State<Arc<AppState>>, Path(ticker): Path<String>) -> Response {
    let symbol = ticker.to_uppercase();

    let (quote, history) = tokio::join!(
        state.market.get_quote(&symbol),
        state.market.get_daily_history(&symbol, months_ago(6)),
    );
    let (quote, history) = match (quote, history) {
        (Ok(q), Ok(h)) => (q, h),
        (Err(e), _) | (_, Err(e)) => {
            warn!(symbol = %symbol, error = %e, "stock fetch failed");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch stock data",
            );
        }
    };

    let price_history: Vec<PricePoint> =
        history.into_iter().filter(|p| p.close > 0.0).collect();
    let closes: Vec<f64> = price_history.iter().map(|p| p.close).collect();

    // The engine computes nothing for series under 50 closes, so the
    // benchmark fetch is skipped for them. A benchmark failure only costs
    // relativeStrength; the remaining indicators are returned normally.
    let benchmark_closes: Vec<f64> = if closes.len() >= 50 {
        match state
            .market
            .get_daily_history(&state.config.benchmark_symbol, months_ago(1))
            .await
        {
            Ok(points) => points
                .into_iter()
                .map(|p| p.close)
                .filter(|c| *c != 0.0)
                .collect(),
            Err(e) => {
                warn!(
                    benchmark = %state.config.benchmark_symbol,
                    error = %e,
                    "benchmark fetch failed"
                );
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };

    let computed = indicators::compute_indicators(&closes, &benchmark_closes);

    let data = StockData {
        basic_info: StockBasicInfo {
            current_price: QuoteMetric::from_option(quote.price),
            market_cap: QuoteMetric::from_option(quote.market_cap),
            pe_ratio: QuoteMetric::from_option(quote.pe_ratio),
            name: quote.name.unwrap_or_else(|| symbol.clone()),
            symbol: symbol.clone(),
        },
        indicators: computed,
        price_history,
    };

    Json(data).into_response()
}

// =============================================================================
// PDF report
// =============================================================================

async fn generate_pdf(Json(req): Json<PdfReportRequest>) -> Response {
    let Some(indicators) = req.indicators.as_ref() else {
        return error_response(StatusCode::BAD_REQUEST, "Missing required fields");
    };
    if req.ticker.is_empty() || req.question.is_empty() || req.ai_analysis.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Missing required fields");
    }

    match pdf::render_report(&req.ticker, &req.question, &req.ai_analysis, indicators) {
        Ok(bytes) => {
            let headers = [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=stocksense_{}_report.pdf", req.ticker),
                ),
            ];
            (headers, bytes).into_response()
        }
        Err(e) => {
            warn!(error = %e, "pdf generation failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate PDF")
        }
    }
}
