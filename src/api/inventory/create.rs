use crate::helper_model::SessionError;
use crate::methods::policy::OrgContextError;
use crate::model::{
    DumpsterInventoryUnit, DumpsterType, InventoryStatus, NewDumpsterInventoryUnit, UserRole,
};
use crate::{methods, POOL};
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use warp::http::StatusCode;
use warp::{Filter, Reply};

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
struct CreateUnitData {
    organization_id: Option<i32>,
    dumpster_type_id: i32,
    unit_number: String,
    current_location: Option<String>,
}

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path!("inventory")
        .and(warp::post())
        .and(warp::body::json())
        .and(warp::cookie::optional::<String>(
            methods::sessions::SESSION_COOKIE,
        ))
        .and_then(move |body: CreateUnitData, cookie: Option<String>| async move {
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
                match methods::policy::resolve_org_context(&user, body.organization_id) {
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
            if body.unit_number.trim().is_empty() {
                return methods::standard_replies::bad_request("Unit number is required");
            }

            let type_id = body.dumpster_type_id;
            let Ok(mut conn) = POOL.get() else {
                tracing::error!("could not get a database connection from the pool");
                return methods::standard_replies::internal_server_error_response();
            };
            let type_exists = spawn_blocking(move || {
                use crate::schema::dumpster_types::dsl::*;
                dumpster_types
                    .filter(id.eq(type_id))
                    .filter(organization_id.eq(org_id))
                    .first::<DumpsterType>(&mut conn)
                    .optional()
            })
            .await
            .unwrap();
            match type_exists {
                Ok(Some(_)) => {}
                Ok(None) => return methods::standard_replies::not_found("Dumpster type"),
                Err(e) => {
                    tracing::error!(error = ?e, "dumpster type lookup failed");
                    return methods::standard_replies::internal_server_error_response();
                }
            }

            let to_be_inserted = NewDumpsterInventoryUnit {
                organization_id: org_id,
                dumpster_type_id: body.dumpster_type_id,
                unit_number: body.unit_number,
                status: InventoryStatus::Available,
                current_location: body.current_location,
            };

            let Ok(mut conn) = POOL.get() else {
                tracing::error!("could not get a database connection from the pool");
                return methods::standard_replies::internal_server_error_response();
            };
            let inserted = spawn_blocking(move || {
                use crate::schema::dumpster_inventory::dsl::*;
                diesel::insert_into(dumpster_inventory)
                    .values(&to_be_inserted)
                    .get_result::<DumpsterInventoryUnit>(&mut conn)
            })
            .await
            .unwrap();

            match inserted {
                Ok(unit) => {
                    methods::standard_replies::response_with_obj(unit, StatusCode::CREATED)
                }
                Err(e) if methods::diesel_fn::is_unique_violation(&e) => {
                    methods::standard_replies::conflict(
                        "Unit number already exists for this organization",
                    )
                }
                Err(e) => {
                    tracing::error!(error = ?e, "inventory insert failed");
                    methods::standard_replies::internal_server_error_response()
                }
            }
        })
}
