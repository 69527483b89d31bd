use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::headers::HeaderMapExt;

use crate::extract::{Path, SessionToken};
use crate::handler::ErrorKind;
use crate::handler::request::AccountPathParams;
use crate::service::{AccessControl, AccessDecision};

/// Lets the request through only if its session token owns the `{id}` account.
///
/// Every denial is the same `403 permission denied` response, and the
/// handler is never invoked. A non-numeric `{id}` is rejected with
/// `400 Bad Request` before any token work.
///
/// #### Examples
///
/// ```rust,ignore
/// use axum::middleware::from_fn_with_state;
/// use gobank_server::middleware::require_account_owner;
///
/// let router = Router::new()
///     .route("/account/{id}", get(get_account))
///     .route_layer(from_fn_with_state(state.clone(), require_account_owner))
///     .with_state(state);
/// ```
pub async fn require_account_owner(
    State(access_control): State<AccessControl>,
    Path(path_params): Path<AccountPathParams>,
    request: Request,
    next: Next,
) -> Response {
    let session_token = request.headers().typed_get::<SessionToken>();
    let credential = session_token.as_ref().map(SessionToken::as_str);

    match access_control.authorize(credential, path_params.id).await {
        AccessDecision::Allow => next.run(request).await,
        AccessDecision::Deny => ErrorKind::PermissionDenied.into_response(),
    }
}
