use crate::model::Organization;
use crate::{methods, POOL};
use diesel::prelude::*;
use tokio::task::spawn_blocking;
use warp::http::StatusCode;
use warp::{Filter, Reply};

// Public tenant resolution for booking/login pages. Returns the branding
// projection only; a missing slug is a plain 404 so the client can show
// its "organization not found" fallback.
pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path!("organizations" / String)
        .and(warp::get())
        .and_then(move |lookup_slug: String| async move {
            let Ok(mut conn) = POOL.get() else {
                tracing::error!("could not get a database connection from the pool");
                return methods::standard_replies::internal_server_error_response();
            };
            let org = spawn_blocking(move || {
                use crate::schema::organizations::dsl::*;
                organizations
                    .filter(slug.eq(lookup_slug))
                    .first::<Organization>(&mut conn)
                    .optional()
            })
            .await
            .unwrap();

            match org {
                Ok(Some(org)) => methods::standard_replies::response_with_obj(
                    org.to_public_organization(),
                    StatusCode::OK,
                ),
                Ok(None) => methods::standard_replies::not_found("Organization"),
                Err(e) => {
                    tracing::error!(error = ?e, "organization slug lookup failed");
                    methods::standard_replies::internal_server_error_response()
                }
            }
        })
}
