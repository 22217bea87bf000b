use crate::helper_model::SessionError;
use crate::model::{DumpsterType, UserRole};
use crate::{methods, POOL};
use diesel::prelude::*;
use tokio::task::spawn_blocking;
use warp::http::StatusCode;
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path!("dumpster-types" / i32)
        .and(warp::delete())
        .and(warp::cookie::optional::<String>(
            methods::sessions::SESSION_COOKIE,
        ))
        .and_then(move |type_id: i32, cookie: Option<String>| async move {
            let user = match methods::sessions::authenticate(cookie).await {
                Ok(user) => user,
                Err(SessionError::Db) => {
                    return methods::standard_replies::internal_server_error_response();
                }
                Err(_) => return methods::standard_replies::unauthorized(),
            };
            if user.role == UserRole::Customer {
                return methods::standard_replies::permission_denied();
            }

            let Ok(mut conn) = POOL.get() else {
                tracing::error!("could not get a database connection from the pool");
                return methods::standard_replies::internal_server_error_response();
            };
            let existing = spawn_blocking(move || {
                use crate::schema::dumpster_types::dsl::*;
                dumpster_types
                    .filter(id.eq(type_id))
                    .first::<DumpsterType>(&mut conn)
                    .optional()
            })
            .await
            .unwrap();
            let existing = match existing {
                Ok(Some(existing)) => existing,
                Ok(None) => return methods::standard_replies::not_found("Dumpster type"),
                Err(e) => {
                    tracing::error!(error = ?e, "dumpster type lookup failed");
                    return methods::standard_replies::internal_server_error_response();
                }
            };
            if !methods::policy::can_access_org(&user, existing.organization_id) {
                return methods::standard_replies::wrong_tenant();
            }

            let Ok(mut conn) = POOL.get() else {
                tracing::error!("could not get a database connection from the pool");
                return methods::standard_replies::internal_server_error_response();
            };
            let deleted = spawn_blocking(move || {
                use crate::schema::dumpster_types::dsl::*;
                diesel::delete(dumpster_types.filter(id.eq(type_id))).execute(&mut conn)
            })
            .await
            .unwrap();

            match deleted {
                Ok(_) => {
                    let msg = serde_json::json!({"message": "Dumpster type deleted"});
                    methods::standard_replies::response_with_obj(msg, StatusCode::OK)
                }
                Err(e) if methods::diesel_fn::is_foreign_key_violation(&e) => {
                    methods::standard_replies::conflict(
                        "Dumpster type is referenced by existing bookings or inventory",
                    )
                }
                Err(e) => {
                    tracing::error!(error = ?e, "dumpster type delete failed");
                    methods::standard_replies::internal_server_error_response()
                }
            }
        })
}
