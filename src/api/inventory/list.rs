use crate::helper_model::{OrgQuery, SessionError};
use crate::methods::policy::OrgContextError;
use crate::model::{DumpsterInventoryUnit, UserRole};
use crate::{methods, POOL};
use diesel::prelude::*;
use tokio::task::spawn_blocking;
use warp::http::StatusCode;
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path!("inventory")
        .and(warp::get())
        .and(warp::query::<OrgQuery>())
        .and(warp::cookie::optional::<String>(
            methods::sessions::SESSION_COOKIE,
        ))
        .and_then(move |query: OrgQuery, cookie: Option<String>| async move {
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
            let org_id =
                match methods::policy::resolve_org_context(&user, query.organization_id) {
                    Ok(org_id) => org_id,
                    Err(OrgContextError::Forbidden) => {
                        return methods::standard_replies::wrong_tenant();
                    }
                    Err(OrgContextError::Missing) => {
                        return methods::standard_replies::bad_request(
                            "Organization context required",
                        );
                    }
                };

            let Ok(mut conn) = POOL.get() else {
                tracing::error!("could not get a database connection from the pool");
                return methods::standard_replies::internal_server_error_response();
            };
            let result = spawn_blocking(move || {
                use crate::schema::dumpster_inventory::dsl::*;
                dumpster_inventory
                    .filter(organization_id.eq(org_id))
                    .order(unit_number.asc())
                    .load::<DumpsterInventoryUnit>(&mut conn)
            })
            .await
            .unwrap();

            match result {
                Ok(rows) => methods::standard_replies::response_with_obj(rows, StatusCode::OK),
                Err(e) => {
                    tracing::error!(error = ?e, "inventory list failed");
                    methods::standard_replies::internal_server_error_response()
                }
            }
        })
}
