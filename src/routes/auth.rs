use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
};
use serde::Deserialize;

use crate::{dto::auth_dto::LoginResponse, error::Result, routes::params::required, AppState};

#[derive(Debug, Deserialize)]
pub struct CredentialsQuery {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[utoipa::path(
    post,
    path = "/auth/generateToken",
    params(
        ("username" = String, Query, description = "Username"),
        ("password" = String, Query, description = "Password")
    ),
    responses(
        (status = 200, description = "Signed login token", body = LoginResponse),
        (status = 401, description = "Bad credentials")
    )
)]
#[axum::debug_handler]
pub async fn generate_token(
    State(state): State<AppState>,
    Query(query): Query<CredentialsQuery>,
) -> Result<impl IntoResponse> {
    let username = required("username", query.username)?;
    let password = required("password", query.password)?;
    let login = state
        .authentication_service
        .authenticate(&username, &password)
        .await?;
    Ok(Json(login))
}
