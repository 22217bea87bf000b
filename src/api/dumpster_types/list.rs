use crate::helper_model::{OrgQuery, SessionError};
use crate::methods::policy::OrgContextError;
use crate::model::{DumpsterType, UserRole};
use crate::{methods, POOL};
use diesel::prelude::*;
use tokio::task::spawn_blocking;
use warp::http::StatusCode;
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path!("dumpster-types")
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
            let org_id = match methods::policy::resolve_org_context(&user, query.organization_id)
            {
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
            // Customers only ever see the bookable catalog.
            let active_only = user.role == UserRole::Customer;

            let Ok(mut conn) = POOL.get() else {
                tracing::error!("could not get a database connection from the pool");
                return methods::standard_replies::internal_server_error_response();
            };
            let result = spawn_blocking(move || {
                use crate::schema::dumpster_types::dsl::*;
                let mut query = dumpster_types
                    .filter(organization_id.eq(org_id))
                    .into_boxed();
                if active_only {
                    query = query.filter(is_active.eq(true));
                }
                query.order(size_yards.asc()).load::<DumpsterType>(&mut conn)
            })
            .await
            .unwrap();

            match result {
                Ok(rows) => methods::standard_replies::response_with_obj(rows, StatusCode::OK),
                Err(e) => {
                    tracing::error!(error = ?e, "dumpster type list failed");
                    methods::standard_replies::internal_server_error_response()
                }
            }
        })
}
