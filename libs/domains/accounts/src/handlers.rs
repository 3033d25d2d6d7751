use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post, put},
};
use axum_helpers::{
    AppJson, AppQuery,
    errors::responses::{BadRequestValidationResponse, InternalServerErrorResponse},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::AccountResult;
use crate::models::{
    AccountUpdate, AuthResponse, NewAccount, OutcomeKind, Rejection, SignInQuery,
};
use crate::repository::AccountRepository;
use crate::service::AccountService;

/// OpenAPI documentation for the account endpoints
#[derive(OpenApi)]
#[openapi(
    paths(sign_in, sign_up, update_account),
    components(
        schemas(NewAccount, AccountUpdate, AuthResponse, OutcomeKind, Rejection),
        responses(BadRequestValidationResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Accounts", description = "Sign-in, sign-up and profile update")
    )
)]
pub struct ApiDoc;

/// Create the accounts router with all HTTP endpoints
pub fn router<R: AccountRepository + 'static>(service: AccountService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/signin", get(sign_in))
        .route("/signup", post(sign_up))
        .route("/update/{email}", put(update_account))
        .with_state(shared_service)
}

/// Sign in with email and password
#[utoipa::path(
    get,
    path = "/signin",
    tag = "Accounts",
    params(SignInQuery),
    responses(
        (status = 200, description = "Sign-in outcome", body = AuthResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn sign_in<R: AccountRepository>(
    State(service): State<Arc<AccountService<R>>>,
    AppQuery(query): AppQuery<SignInQuery>,
) -> AccountResult<Json<AuthResponse>> {
    let outcome = service.sign_in(&query.email, &query.password).await?;
    Ok(Json(outcome.into()))
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/signup",
    tag = "Accounts",
    request_body = NewAccount,
    responses(
        (status = 200, description = "Sign-up outcome, including field rejections", body = AuthResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn sign_up<R: AccountRepository>(
    State(service): State<Arc<AccountService<R>>>,
    AppJson(candidate): AppJson<NewAccount>,
) -> AccountResult<Json<AuthResponse>> {
    let outcome = service.sign_up(candidate).await?;
    Ok(Json(outcome.into()))
}

/// Update the profile registered under an email
#[utoipa::path(
    put,
    path = "/update/{email}",
    tag = "Accounts",
    params(
        ("email" = String, Path, description = "Account email")
    ),
    request_body = AccountUpdate,
    responses(
        (status = 200, description = "Update outcome", body = AuthResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_account<R: AccountRepository>(
    State(service): State<Arc<AccountService<R>>>,
    Path(email): Path<String>,
    AppJson(update): AppJson<AccountUpdate>,
) -> AccountResult<Json<AuthResponse>> {
    let outcome = service.update(&email, update).await?;
    Ok(Json(outcome.into()))
}
