use crate::helper_model::SessionError;
use crate::model::{DumpsterInventoryUnit, InventoryStatus, UserRole};
use crate::{methods, POOL};
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use warp::http::StatusCode;
use warp::{Filter, Reply};

#[derive(Deserialize, Serialize, Clone, Debug, AsChangeset)]
#[diesel(table_name = crate::schema::dumpster_inventory)]
#[serde(rename_all = "camelCase")]
struct UpdateUnitData {
    status: Option<InventoryStatus>,
    current_location: Option<String>,
}

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path!("inventory" / i32)
        .and(warp::patch())
        .and(warp::body::json())
        .and(warp::cookie::optional::<String>(
            methods::sessions::SESSION_COOKIE,
        ))
        .and_then(
            move |unit_id: i32, body: UpdateUnitData, cookie: Option<String>| async move {
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
                if body.status.is_none() && body.current_location.is_none() {
                    return methods::standard_replies::bad_request("No changes provided");
                }

                let Ok(mut conn) = POOL.get() else {
                    tracing::error!("could not get a database connection from the pool");
                    return methods::standard_replies::internal_server_error_response();
                };
                let existing = spawn_blocking(move || {
                    use crate::schema::dumpster_inventory::dsl::*;
                    dumpster_inventory
                        .filter(id.eq(unit_id))
                        .first::<DumpsterInventoryUnit>(&mut conn)
                        .optional()
                })
                .await
                .unwrap();
                let existing = match existing {
                    Ok(Some(existing)) => existing,
                    Ok(None) => return methods::standard_replies::not_found("Inventory unit"),
                    Err(e) => {
                        tracing::error!(error = ?e, "inventory unit lookup failed");
                        return methods::standard_replies::internal_server_error_response();
                    }
                };
                if !methods::policy::can_access_org(&user, existing.organization_id) {
                    return methods::standard_replies::wrong_tenant();
                }

                if let Some(new_status) = body.status {
                    if !methods::transitions::inventory_transition_allowed(
                        existing.status,
                        new_status,
                    ) {
                        return methods::standard_replies::illegal_transition(
                            methods::transitions::inventory_status_name(existing.status),
                            methods::transitions::inventory_status_name(new_status),
                        );
                    }
                }

                let changes = body.clone();
                let Ok(mut conn) = POOL.get() else {
                    tracing::error!("could not get a database connection from the pool");
                    return methods::standard_replies::internal_server_error_response();
                };
                let updated = spawn_blocking(move || {
                    use crate::schema::dumpster_inventory::dsl::*;
                    diesel::update(dumpster_inventory.filter(id.eq(unit_id)))
                        .set(&changes)
                        .get_result::<DumpsterInventoryUnit>(&mut conn)
                })
                .await
                .unwrap();

                match updated {
                    Ok(unit) => methods::standard_replies::response_with_obj(unit, StatusCode::OK),
                    Err(e) => {
                        tracing::error!(error = ?e, "inventory update failed");
                        methods::standard_replies::internal_server_error_response()
                    }
                }
            },
        )
}
