use crate::helper_model::SessionError;
use crate::model::{Organization, UserRole};
use crate::{methods, POOL};
use diesel::prelude::*;
use tokio::task::spawn_blocking;
use warp::http::StatusCode;
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path!("admin" / "organizations")
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
            if user.role != UserRole::SuperAdmin {
                return methods::standard_replies::permission_denied();
            }

            let Ok(mut conn) = POOL.get() else {
                tracing::error!("could not get a database connection from the pool");
                return methods::standard_replies::internal_server_error_response();
            };
            let result = spawn_blocking(move || {
                use crate::schema::organizations::dsl::*;
                organizations
                    .order(created_at.desc())
                    .load::<Organization>(&mut conn)
            })
            .await
            .unwrap();

            match result {
                Ok(rows) => methods::standard_replies::response_with_obj(rows, StatusCode::OK),
                Err(e) => {
                    tracing::error!(error = ?e, "organization list failed");
                    methods::standard_replies::internal_server_error_response()
                }
            }
        })
}
