use crate::helper_model::SessionError;
use crate::model::{ServiceArea, UserRole};
use crate::{methods, POOL};
use diesel::prelude::*;
use tokio::task::spawn_blocking;
use warp::http::StatusCode;
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path!("service-areas" / i32)
        .and(warp::delete())
        .and(warp::cookie::optional::<String>(
            methods::sessions::SESSION_COOKIE,
        ))
        .and_then(move |area_id: i32, cookie: Option<String>| async move {
            let user = match methods::sessions::authenticate(cookie).await {
                Ok(user) => user,
                Err(SessionError::Db) => {
                    return methods::standard_replies::internal_server_error_response();
                }
                Err(_) => return methods::standard_replies::unauthorized(),
            };
            if !methods::policy::role_in(
                &user,
                &[UserRole::SuperAdmin, UserRole::OrgOwner, UserRole::OrgAdmin],
            ) {
                return methods::standard_replies::permission_denied();
            }

            let Ok(mut conn) = POOL.get() else {
                tracing::error!("could not get a database connection from the pool");
                return methods::standard_replies::internal_server_error_response();
            };
            let existing = spawn_blocking(move || {
                use crate::schema::service_areas::dsl::*;
                service_areas
                    .filter(id.eq(area_id))
                    .first::<ServiceArea>(&mut conn)
                    .optional()
            })
            .await
            .unwrap();
            let existing = match existing {
                Ok(Some(existing)) => existing,
                Ok(None) => return methods::standard_replies::not_found("Service area"),
                Err(e) => {
                    tracing::error!(error = ?e, "service area lookup failed");
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
                use crate::schema::service_areas::dsl::*;
                diesel::delete(service_areas.filter(id.eq(area_id))).execute(&mut conn)
            })
            .await
            .unwrap();

            match deleted {
                Ok(_) => {
                    let msg = serde_json::json!({"message": "Service area deleted"});
                    methods::standard_replies::response_with_obj(msg, StatusCode::OK)
                }
                Err(e) => {
                    tracing::error!(error = ?e, "service area delete failed");
                    methods::standard_replies::internal_server_error_response()
                }
            }
        })
}
