use crate::helper_model::SessionError;
use crate::methods::policy::OrgContextError;
use crate::model::{NewServiceArea, ServiceArea, UserRole};
use crate::{methods, POOL};
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use warp::http::StatusCode;
use warp::{Filter, Reply};

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
struct CreateServiceAreaData {
    organization_id: Option<i32>,
    zip_code: String,
    delivery_fee: f64,
    is_active: Option<bool>,
}

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path!("service-areas")
        .and(warp::post())
        .and(warp::body::json())
        .and(warp::cookie::optional::<String>(
            methods::sessions::SESSION_COOKIE,
        ))
        .and_then(
            move |body: CreateServiceAreaData, cookie: Option<String>| async move {
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
                if !methods::validation::is_valid_zip_code(&body.zip_code) {
                    return methods::standard_replies::bad_request("Invalid ZIP code");
                }
                if body.delivery_fee < 0.0 {
                    return methods::standard_replies::bad_request(
                        "Delivery fee must not be negative",
                    );
                }

                let to_be_inserted = NewServiceArea {
                    organization_id: org_id,
                    zip_code: body.zip_code,
                    delivery_fee: body.delivery_fee,
                    is_active: body.is_active.unwrap_or(true),
                };

                let Ok(mut conn) = POOL.get() else {
                    tracing::error!("could not get a database connection from the pool");
                    return methods::standard_replies::internal_server_error_response();
                };
                let inserted = spawn_blocking(move || {
                    use crate::schema::service_areas::dsl::*;
                    diesel::insert_into(service_areas)
                        .values(&to_be_inserted)
                        .get_result::<ServiceArea>(&mut conn)
                })
                .await
                .unwrap();

                match inserted {
                    Ok(row) => {
                        methods::standard_replies::response_with_obj(row, StatusCode::CREATED)
                    }
                    Err(e) if methods::diesel_fn::is_unique_violation(&e) => {
                        methods::standard_replies::conflict(
                            "ZIP code already covered for this organization",
                        )
                    }
                    Err(e) => {
                        tracing::error!(error = ?e, "service area insert failed");
                        methods::standard_replies::internal_server_error_response()
                    }
                }
            },
        )
}
