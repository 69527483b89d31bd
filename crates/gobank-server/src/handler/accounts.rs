//! Account handlers: open, list, read and delete accounts.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum_extra::TypedHeader;

use crate::extract::{Json, Path, Query, SessionToken, ValidateJson};
use crate::handler::request::{AccountPathParams, CreateAccount, PaginationQuery};
use crate::handler::response::{Account, Accounts, DeletedAccount};
use crate::handler::{ErrorKind, Result};
use crate::service::{AccessControl, PasswordHasher, ServiceState, SharedAccountStore, StoreError};

/// Tracing target for account operations.
const TRACING_TARGET: &str = "gobank_server::handler::accounts";

/// Account numbers are drawn uniformly from this range.
const ACCOUNT_NUMBER_RANGE: std::ops::Range<i64> = 1..1_000_000;

/// Attempts at drawing an unused account number before giving up.
const ACCOUNT_NUMBER_ATTEMPTS: usize = 8;

/// Opens a new account and returns it with a session token header.
#[tracing::instrument(skip_all)]
async fn create_account(
    State(account_store): State<SharedAccountStore>,
    State(password_hasher): State<PasswordHasher>,
    State(access_control): State<AccessControl>,
    ValidateJson(request): ValidateJson<CreateAccount>,
) -> Result<(StatusCode, TypedHeader<SessionToken>, Json<Account>)> {
    let password_hash = password_hasher.hash_password(&request.password)?;

    let mut attempts = 0;
    let account = loop {
        attempts += 1;
        let number = rand::random_range(ACCOUNT_NUMBER_RANGE);
        let new_account = request.clone().into_model(number, password_hash.clone());

        match account_store.create_account(new_account).await {
            Ok(account) => break account,
            Err(StoreError::DuplicateNumber(number)) if attempts < ACCOUNT_NUMBER_ATTEMPTS => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    number,
                    attempts,
                    "account number collision, drawing another"
                );
            }
            Err(error) => return Err(error.into()),
        }
    };

    let token = access_control.issue_token(&account)?;

    tracing::info!(
        target: TRACING_TARGET,
        account_id = account.id,
        "account created"
    );

    Ok((
        StatusCode::CREATED,
        TypedHeader(SessionToken::new(token)),
        Json(Account::from_model(account)),
    ))
}

/// Lists accounts ordered by id.
#[tracing::instrument(skip_all)]
async fn list_accounts(
    State(account_store): State<SharedAccountStore>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<Accounts>> {
    let accounts = account_store
        .list_accounts(pagination.into_pagination())
        .await?;

    tracing::debug!(
        target: TRACING_TARGET,
        count = accounts.len(),
        "accounts listed"
    );

    Ok(Json(accounts.into_iter().map(Account::from_model).collect()))
}

/// Returns the account owned by the session token.
#[tracing::instrument(skip_all, fields(account_id = path_params.id))]
async fn get_account(
    State(account_store): State<SharedAccountStore>,
    Path(path_params): Path<AccountPathParams>,
) -> Result<Json<Account>> {
    let account = account_store.get_account_by_id(path_params.id).await?;
    Ok(Json(Account::from_model(account)))
}

/// Account updates are not supported.
#[tracing::instrument(skip_all, fields(account_id = path_params.id))]
async fn update_account(Path(path_params): Path<AccountPathParams>) -> Result<StatusCode> {
    tracing::debug!(target: TRACING_TARGET, "account update requested");
    Err(ErrorKind::NotImplemented.with_resource("account"))
}

/// Deletes the account owned by the session token.
#[tracing::instrument(skip_all, fields(account_id = path_params.id))]
async fn delete_account(
    State(account_store): State<SharedAccountStore>,
    Path(path_params): Path<AccountPathParams>,
) -> Result<Json<DeletedAccount>> {
    account_store.delete_account(path_params.id).await?;

    tracing::info!(target: TRACING_TARGET, "account deleted");

    Ok(Json(DeletedAccount {
        deleted: path_params.id,
    }))
}

/// Returns routes that require the session token to own `{id}`.
pub fn private_routes() -> Router<ServiceState> {
    Router::new().route(
        "/account/{id}",
        get(get_account).put(update_account).delete(delete_account),
    )
}

/// Returns routes open to any caller.
pub fn public_routes() -> Router<ServiceState> {
    Router::new().route("/account", get(list_accounts).post(create_account))
}
