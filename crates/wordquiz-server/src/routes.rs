//! Route handlers.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use wordquiz_core::results::{AnswerOutcome, EndOutcome, StartOutcome};
use wordquiz_core::{QuizError, SessionMode, UserProfile};

use crate::error::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/user/setup", post(setup_user))
        .route("/ai/generate_words", post(generate_words))
        .route("/learn/start", post(start_learning))
        .route("/learn/submit_answer", post(submit_answer))
        .route("/learn/end_learning_session", post(end_learning_session))
}

#[derive(Debug, Deserialize)]
struct UserQuery {
    user_name: String,
}

#[derive(Debug, Deserialize)]
struct StartQuery {
    user_name: String,
    #[serde(default)]
    mode: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnswerSubmission {
    user_name: String,
    word: String,
    user_answer: String,
}

#[derive(Serialize)]
struct StartResponse {
    message: &'static str,
    #[serde(flatten)]
    outcome: StartOutcome,
}

#[derive(Serialize)]
struct AnswerResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    #[serde(flatten)]
    outcome: AnswerOutcome,
}

#[derive(Serialize)]
struct EndResponse {
    message: &'static str,
    #[serde(flatten)]
    outcome: EndOutcome,
}

async fn root() -> Json<Value> {
    Json(json!({ "status": "ok", "service": "wordquiz" }))
}

async fn setup_user(
    State(state): State<AppState>,
    payload: Result<Json<UserProfile>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(profile) = payload?;
    let profile = state.engine.setup_profile(profile).await?;
    Ok(Json(json!({
        "message": format!("User {} profile set up successfully!", profile.name),
        "profile": profile,
    })))
}

async fn generate_words(
    State(state): State<AppState>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let Query(query) = query?;
    let words = state.engine.generate_words(&query.user_name).await?;
    Ok(Json(json!({ "words": words })))
}

async fn start_learning(
    State(state): State<AppState>,
    query: Result<Query<StartQuery>, QueryRejection>,
) -> Result<Json<StartResponse>, AppError> {
    let Query(query) = query?;
    let mode = match query.mode.as_deref() {
        None => SessionMode::default(),
        Some(raw) => raw.parse().map_err(QuizError::InvalidMode)?,
    };
    let outcome = state.engine.start_session(&query.user_name, mode).await?;
    Ok(Json(StartResponse {
        message: "Learning session started!",
        outcome,
    }))
}

async fn submit_answer(
    State(state): State<AppState>,
    payload: Result<Json<AnswerSubmission>, JsonRejection>,
) -> Result<Json<AnswerResponse>, AppError> {
    let Json(submission) = payload?;
    let outcome = state
        .engine
        .submit_answer(
            &submission.user_name,
            &submission.word,
            &submission.user_answer,
        )
        .await?;
    let message = outcome.is_finished().then_some("学習セッションが終了しました！");
    Ok(Json(AnswerResponse { message, outcome }))
}

async fn end_learning_session(
    State(state): State<AppState>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> Result<Json<EndResponse>, AppError> {
    let Query(query) = query?;
    let outcome = state.engine.end_learning_session(&query.user_name).await?;
    Ok(Json(EndResponse {
        message: "学習セッションを終了しました。",
        outcome,
    }))
}
