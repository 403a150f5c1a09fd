// Expense Tracker - REST API with Axum
// Handlers, response envelope, router and error middleware

use crate::analysis::{analyze, SpendingAnalysis};
use crate::error::ExpenseError;
use crate::expense::{Expense, ExpenseDraft};
use crate::filter::ExpenseFilter;
use crate::store::ExpenseStore;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

pub const WELCOME_MESSAGE: &str = "Welcome to the Personal Expense Tracker API!";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: ExpenseStore,
}

/// Success envelope: `{"status": "success", "data": ...}`
#[derive(Serialize)]
pub struct ApiResponse<T> {
    status: &'static str,
    data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: "success",
            data,
        }
    }
}

/// Error envelope: `{"status": "error", "error": "..."}`
#[derive(Serialize)]
pub struct ApiError {
    status: &'static str,
    error: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            status: "error",
            error: error.into(),
        }
    }
}

impl IntoResponse for ExpenseError {
    fn into_response(self) -> Response {
        let status = if self.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            error!(error = %self, "request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (status, Json(ApiError::new(self.public_message()))).into_response()
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET / - Welcome text
async fn root() -> &'static str {
    WELCOME_MESSAGE
}

/// POST /expenses - Record a new expense
async fn create_expense(
    State(state): State<AppState>,
    payload: Result<Json<ExpenseDraft>, JsonRejection>,
) -> Result<Json<ApiResponse<Expense>>, ExpenseError> {
    let Json(draft) = payload.map_err(|rejection| ExpenseError::validation(rejection.body_text()))?;

    let expense = state.store.append(draft.validate()?)?;
    info!(id = expense.id, category = %expense.category, amount = expense.amount, "expense recorded");

    Ok(Json(ApiResponse::ok(expense)))
}

/// GET /expenses - List expenses, optionally filtered by category and date range
async fn list_expenses(
    State(state): State<AppState>,
    query: Result<Query<ExpenseFilter>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Expense>>>, ExpenseError> {
    // An unreadable query (repeated key, bad encoding) still lists, it just matches nothing
    let filter = match query {
        Ok(Query(filter)) => filter,
        Err(rejection) => {
            warn!(reason = %rejection.body_text(), "unreadable expense query");
            ExpenseFilter::nothing()
        }
    };

    let expenses = state.store.query(&filter)?;
    Ok(Json(ApiResponse::ok(expenses)))
}

/// GET /expenses/analysis - Totals per category and the top category
async fn analyze_expenses(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SpendingAnalysis>>, ExpenseError> {
    let expenses = state.store.all()?;
    Ok(Json(ApiResponse::ok(analyze(&expenses))))
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ApiError::new("Not found")))
}

/// Last line of defence: a panicking handler still gets the generic 500.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ExpenseError::Internal(format!("handler panicked: {}", detail)).into_response()
}

// ============================================================================
// Router
// ============================================================================

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/analysis", get(analyze_expenses))
}

/// Fallback plus the middleware stack shared by every route
fn with_middleware(router: Router) -> Router {
    router
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Full application, ready for `axum::serve`
pub fn app(store: ExpenseStore) -> Router {
    with_middleware(routes().with_state(AppState { store }))
}
