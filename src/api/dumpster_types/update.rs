use crate::helper_model::SessionError;
use crate::model::{DumpsterType, UserRole};
use crate::{methods, POOL};
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use warp::http::StatusCode;
use warp::{Filter, Reply};

#[derive(Deserialize, Serialize, Clone, Debug, AsChangeset)]
#[diesel(table_name = crate::schema::dumpster_types)]
#[serde(rename_all = "camelCase")]
struct UpdateTypeData {
    name: Option<String>,
    size_yards: Option<i32>,
    description: Option<String>,
    daily_rate: Option<f64>,
    weekly_rate: Option<f64>,
    weight_limit_tons: Option<f64>,
    overage_fee_per_ton: Option<f64>,
    is_active: Option<bool>,
}

impl UpdateTypeData {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.size_yards.is_none()
            && self.description.is_none()
            && self.daily_rate.is_none()
            && self.weekly_rate.is_none()
            && self.weight_limit_tons.is_none()
            && self.overage_fee_per_ton.is_none()
            && self.is_active.is_none()
    }
}

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path!("dumpster-types" / i32)
        .and(warp::patch())
        .and(warp::body::json())
        .and(warp::cookie::optional::<String>(
            methods::sessions::SESSION_COOKIE,
        ))
        .and_then(
            move |type_id: i32, body: UpdateTypeData, cookie: Option<String>| async move {
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
                if body.is_empty() {
                    return methods::standard_replies::bad_request("No changes provided");
                }
                if let Some(ref name) = body.name {
                    if name.trim().is_empty() {
                        return methods::standard_replies::bad_request("Name is required");
                    }
                }
                if body.daily_rate.is_some_and(|r| r < 0.0)
                    || body.weekly_rate.is_some_and(|r| r < 0.0)
                {
                    return methods::standard_replies::bad_request("Rates must not be negative");
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

                let changes = body.clone();
                let Ok(mut conn) = POOL.get() else {
                    tracing::error!("could not get a database connection from the pool");
                    return methods::standard_replies::internal_server_error_response();
                };
                let updated = spawn_blocking(move || {
                    use crate::schema::dumpster_types::dsl::*;
                    diesel::update(dumpster_types.filter(id.eq(type_id)))
                        .set(&changes)
                        .get_result::<DumpsterType>(&mut conn)
                })
                .await
                .unwrap();

                match updated {
                    Ok(row) => methods::standard_replies::response_with_obj(row, StatusCode::OK),
                    Err(e) => {
                        tracing::error!(error = ?e, "dumpster type update failed");
                        methods::standard_replies::internal_server_error_response()
                    }
                }
            },
        )
}
