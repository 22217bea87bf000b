use crate::helper_model::SessionError;
use crate::methods::policy::OrgContextError;
use crate::model::{DumpsterType, NewDumpsterType, UserRole};
use crate::{methods, POOL};
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use warp::http::StatusCode;
use warp::{Filter, Reply};

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
struct CreateTypeData {
    organization_id: Option<i32>,
    name: String,
    size_yards: i32,
    description: Option<String>,
    daily_rate: f64,
    weekly_rate: f64,
    weight_limit_tons: f64,
    overage_fee_per_ton: f64,
    is_active: Option<bool>,
}

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path!("dumpster-types")
        .and(warp::post())
        .and(warp::body::json())
        .and(warp::cookie::optional::<String>(
            methods::sessions::SESSION_COOKIE,
        ))
        .and_then(move |body: CreateTypeData, cookie: Option<String>| async move {
            let user = match methods::sessions::authenticate(cookie).await {
                Ok(user) => user,
                Err(SessionError::Db) => {
                    return methods::standard_replies::internal_server_error_response();
                }
                Err(_) => return methods::standard_replies::unauthorized(),
            };
            if !methods::policy::role_in(&user, &[UserRole::SuperAdmin, UserRole::OrgOwner, UserRole::OrgAdmin]) {
                return methods::standard_replies::permission_denied();
            }
            let org_id = match methods::policy::resolve_org_context(&user, body.organization_id)
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
            if body.name.trim().is_empty() {
                return methods::standard_replies::bad_request("Name is required");
            }
            if body.size_yards <= 0 {
                return methods::standard_replies::bad_request(
                    "Size in yards must be positive",
                );
            }
            if body.daily_rate < 0.0 || body.weekly_rate < 0.0 {
                return methods::standard_replies::bad_request("Rates must not be negative");
            }

            let to_be_inserted = NewDumpsterType {
                organization_id: org_id,
                name: body.name,
                size_yards: body.size_yards,
                description: body.description,
                daily_rate: body.daily_rate,
                weekly_rate: body.weekly_rate,
                weight_limit_tons: body.weight_limit_tons,
                overage_fee_per_ton: body.overage_fee_per_ton,
                is_active: body.is_active.unwrap_or(true),
            };

            let Ok(mut conn) = POOL.get() else {
                tracing::error!("could not get a database connection from the pool");
                return methods::standard_replies::internal_server_error_response();
            };
            let inserted = spawn_blocking(move || {
                use crate::schema::dumpster_types::dsl::*;
                diesel::insert_into(dumpster_types)
                    .values(&to_be_inserted)
                    .get_result::<DumpsterType>(&mut conn)
            })
            .await
            .unwrap();

            match inserted {
                Ok(row) => methods::standard_replies::response_with_obj(row, StatusCode::CREATED),
                Err(e) => {
                    tracing::error!(error = ?e, "dumpster type insert failed");
                    methods::standard_replies::internal_server_error_response()
                }
            }
        })
}
