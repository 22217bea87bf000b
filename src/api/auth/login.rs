use crate::model::UserRole;
use crate::{methods, model};
use bcrypt::verify;
use serde_derive::{Deserialize, Serialize};
use warp::http::StatusCode;
use warp::reply::with_status;
use warp::{Filter, Reply};

#[derive(Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
struct LoginData {
    email: String,
    password: String,
    organization_id: Option<i32>,
}

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path!("auth" / "login")
        .and(warp::post())
        .and(warp::body::json())
        .and(warp::cookie::optional::<String>(
            methods::sessions::SESSION_COOKIE,
        ))
        .and_then(move |login_data: LoginData, old_cookie: Option<String>| async move {
            let lookup = match login_data.organization_id {
                Some(org_id) => {
                    methods::user::find_by_email_in_org(login_data.email.clone(), org_id).await
                }
                None => methods::user::find_by_email_global(login_data.email.clone()).await,
            };

            let user = match lookup {
                Ok(Some(user)) => user,
                Ok(None) => return methods::standard_replies::invalid_credentials(),
                Err(e) => {
                    tracing::error!(error = ?e, "login lookup failed");
                    return methods::standard_replies::internal_server_error_response();
                }
            };

            // Without an organization context only platform operators may
            // log in; org-scoped accounts must come through their tenant's
            // login page.
            if login_data.organization_id.is_none() && user.role != UserRole::SuperAdmin {
                return methods::standard_replies::organization_required();
            }

            if !verify(&login_data.password, &user.password).unwrap_or(false) {
                return methods::standard_replies::invalid_credentials();
            }

            methods::user::touch_last_login(user.id).await;

            // New session id on every privilege change; the response is only
            // built after the insert has committed.
            let session =
                match methods::sessions::regenerate_session(old_cookie, user.id).await {
                    Ok(session) => session,
                    Err(e) => {
                        tracing::error!(error = ?e, "session regeneration failed");
                        return methods::standard_replies::internal_server_error_response();
                    }
                };

            let pub_user: model::PublishUser = user.to_publish_user();
            let cookie = methods::sessions::session_cookie(&session);
            Ok::<_, warp::Rejection>((methods::sessions::wrap_reply_with_cookie(
                cookie,
                with_status(warp::reply::json(&pub_user), StatusCode::OK),
            ),))
        })
}
