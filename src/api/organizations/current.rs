use crate::helper_model::SessionError;
use crate::model::{Organization, UserRole};
use crate::{methods, POOL};
use diesel::prelude::*;
use tokio::task::spawn_blocking;
use warp::http::StatusCode;
use warp::{Filter, Reply};

// Full organization record, billing fields included, for the operator
// dashboard. Customers get the public slug projection instead.
pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path!("organization" / "current")
        .and(warp::get())
        .and(warp::cookie::optional::<String>(
            methods::sessions::SESSION_COOKIE,
        ))
        .and_then(move |cookie: Option<String>| async move {
            let user = match methods::sessions::authenticate(cookie).await {
                Ok(user) => user,
                Err(SessionError::Db) => {
                    return methods::standard_replies::internal_server_error_response();
                }
                Err(_) => return methods::standard_replies::unauthorized(),
            };
            if !methods::policy::role_in(&user, &[UserRole::OrgOwner, UserRole::OrgAdmin]) {
                return methods::standard_replies::permission_denied();
            }
            let Some(org_id) = user.organization_id else {
                return methods::standard_replies::not_found("Organization");
            };

            let Ok(mut conn) = POOL.get() else {
                tracing::error!("could not get a database connection from the pool");
                return methods::standard_replies::internal_server_error_response();
            };
            let org = spawn_blocking(move || {
                use crate::schema::organizations::dsl::*;
                organizations
                    .filter(id.eq(org_id))
                    .first::<Organization>(&mut conn)
                    .optional()
            })
            .await
            .unwrap();

            match org {
                Ok(Some(org)) => {
                    methods::standard_replies::response_with_obj(org, StatusCode::OK)
                }
                Ok(None) => methods::standard_replies::not_found("Organization"),
                Err(e) => {
                    tracing::error!(error = ?e, "current organization lookup failed");
                    methods::standard_replies::internal_server_error_response()
                }
            }
        })
}
