use crate::helper_model::SessionError;
use crate::model::UserRole;
use crate::{methods, POOL};
use diesel::prelude::*;
use tokio::task::spawn_blocking;
use warp::http::StatusCode;
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path!("admin" / "organizations" / i32)
        .and(warp::delete())
        .and(warp::cookie::optional::<String>(
            methods::sessions::SESSION_COOKIE,
        ))
        .and_then(move |org_id: i32, cookie: Option<String>| async move {
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
            let deleted = spawn_blocking(move || {
                use crate::schema::organizations::dsl::*;
                diesel::delete(organizations.filter(id.eq(org_id))).execute(&mut conn)
            })
            .await
            .unwrap();

            match deleted {
                Ok(0) => methods::standard_replies::not_found("Organization"),
                Ok(_) => {
                    let msg = serde_json::json!({"message": "Organization deleted"});
                    methods::standard_replies::response_with_obj(msg, StatusCode::OK)
                }
                Err(e) if methods::diesel_fn::is_foreign_key_violation(&e) => {
                    methods::standard_replies::conflict(
                        "Organization still has dependent records",
                    )
                }
                Err(e) => {
                    tracing::error!(error = ?e, "organization delete failed");
                    methods::standard_replies::internal_server_error_response()
                }
            }
        })
}
