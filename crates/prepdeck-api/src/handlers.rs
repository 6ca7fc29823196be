use crate::{ApiError, ApiResult, AppState};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use prepdeck_core::{Company, Period, PrepdeckError, Question};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Deserialize)]
pub struct CompanyQuery {
    pub slug: Option<String>,
    pub period: Option<String>,
}

#[derive(Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<Question>,
}

#[derive(Serialize)]
pub struct AllPeriodsResponse {
    pub questions: HashMap<Period, Vec<Question>>,
}

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub code: String,
    pub language: Option<String>,
}

const ANALYSIS_FAILED: &str =
    "Failed to analyze time complexity. Please check your API key and try again.";

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: option_env!("CARGO_PKG_VERSION")
            .unwrap_or("0.1.0")
            .to_string(),
    })
}

/// `GET /api/company?slug=<slug>&period=<period>`
pub async fn company_query(
    State(state): State<AppState>,
    Query(params): Query<CompanyQuery>,
) -> ApiResult<Json<QuestionsResponse>> {
    let slug = params
        .slug
        .ok_or_else(|| ApiError::BadRequest("Missing slug parameter".to_string()))?;

    // An unrecognized period degrades to the same not-found as a missing file.
    let period: Period = params
        .period
        .as_deref()
        .unwrap_or("all")
        .parse()
        .map_err(|_| ApiError::NotFound("Data not found".to_string()))?;

    let questions = state
        .store
        .load_questions(&slug, period)
        .await
        .map_err(|e| match e {
            PrepdeckError::NotFound(_) => ApiError::NotFound("Data not found".to_string()),
            other => {
                warn!(slug, period = %period, error = %other, "question lookup failed");
                ApiError::Internal("Server error".to_string())
            }
        })?;

    Ok(Json(QuestionsResponse { questions }))
}

/// `GET /api/companies-list`
pub async fn companies_list(State(state): State<AppState>) -> ApiResult<Json<Vec<Company>>> {
    let companies = state.store.list_companies().await.map_err(|e| {
        warn!(error = %e, "companies list lookup failed");
        ApiError::Internal("Failed to read companies list.".to_string())
    })?;

    Ok(Json(companies))
}

/// `GET /api/company/{slug}/{period}`, answering with a bare question array.
pub async fn company_period(
    State(state): State<AppState>,
    Path((slug, period)): Path<(String, String)>,
) -> ApiResult<Json<Vec<Question>>> {
    let period: Period = period
        .parse()
        .map_err(|_| ApiError::NotFound("Company period file not found.".to_string()))?;

    let questions = state
        .store
        .load_questions(&slug, period)
        .await
        .map_err(|e| match e {
            PrepdeckError::NotFound(_) => {
                ApiError::NotFound("Company period file not found.".to_string())
            }
            other => {
                warn!(slug, period = %period, error = %other, "period file lookup failed");
                ApiError::Internal("Invalid JSON format.".to_string())
            }
        })?;

    Ok(Json(questions))
}

/// `GET /api/company/{slug}`, aggregating every period found for the company.
pub async fn company_all_periods(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<AllPeriodsResponse>> {
    let questions = state.store.load_all_periods(&slug).await.map_err(|e| {
        match e {
            PrepdeckError::NotFound(_) => {}
            ref other => warn!(slug, error = %other, "period aggregation failed"),
        }
        ApiError::NotFound("No questions found for this company.".to_string())
    })?;

    Ok(Json(AllPeriodsResponse { questions }))
}

/// `POST /api/analyze`
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<Json<prepdeck_core::AnalysisResult>> {
    if request.code.trim().is_empty() {
        return Err(ApiError::BadRequest("Missing code parameter".to_string()));
    }

    let analyzer = state.analyzer.as_ref().ok_or_else(|| {
        ApiError::ServiceUnavailable("Time complexity analysis is not configured.".to_string())
    })?;

    let language = request.language.as_deref().unwrap_or("python");

    let result = analyzer
        .analyze(&request.code, language)
        .await
        .map_err(|e| {
            warn!(language, error = %e, "time complexity analysis failed");
            ApiError::Internal(ANALYSIS_FAILED.to_string())
        })?;

    Ok(Json(result))
}
