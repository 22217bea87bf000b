use crate::helper_model::{OrgQuery, SessionError};
use crate::methods::policy::OrgContextError;
use crate::model::{OrganizationSettings, UserRole};
use crate::{methods, POOL};
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use warp::http::StatusCode;
use warp::{Filter, Reply};

#[derive(Deserialize, Serialize, Clone, Debug, AsChangeset)]
#[diesel(table_name = crate::schema::organization_settings)]
#[serde(rename_all = "camelCase")]
struct UpdateSettingsData {
    min_rental_days: Option<i32>,
    lead_time_days: Option<i32>,
    turnaround_hours: Option<i32>,
    allow_same_day_pickup: Option<bool>,
    cancellation_notice_hours: Option<i32>,
    cancellation_fee: Option<f64>,
    notify_on_booking: Option<bool>,
    notify_on_cancellation: Option<bool>,
}

impl UpdateSettingsData {
    fn is_empty(&self) -> bool {
        self.min_rental_days.is_none()
            && self.lead_time_days.is_none()
            && self.turnaround_hours.is_none()
            && self.allow_same_day_pickup.is_none()
            && self.cancellation_notice_hours.is_none()
            && self.cancellation_fee.is_none()
            && self.notify_on_booking.is_none()
            && self.notify_on_cancellation.is_none()
    }
}

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path!("settings")
        .and(warp::patch())
        .and(warp::query::<OrgQuery>())
        .and(warp::body::json())
        .and(warp::cookie::optional::<String>(
            methods::sessions::SESSION_COOKIE,
        ))
        .and_then(
            move |query: OrgQuery, body: UpdateSettingsData, cookie: Option<String>| async move {
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
                if body.is_empty() {
                    return methods::standard_replies::bad_request("No changes provided");
                }
                if body.min_rental_days.is_some_and(|days| days < 1) {
                    return methods::standard_replies::bad_request(
                        "Minimum rental days must be at least 1",
                    );
                }
                if body.cancellation_fee.is_some_and(|fee| fee < 0.0) {
                    return methods::standard_replies::bad_request(
                        "Cancellation fee must not be negative",
                    );
                }

                let changes = body.clone();
                let Ok(mut conn) = POOL.get() else {
                    tracing::error!("could not get a database connection from the pool");
                    return methods::standard_replies::internal_server_error_response();
                };
                let updated = spawn_blocking(move || {
                    use crate::schema::organization_settings::dsl::*;
                    diesel::update(
                        organization_settings.filter(organization_id.eq(org_id)),
                    )
                    .set(&changes)
                    .get_result::<OrganizationSettings>(&mut conn)
                    .optional()
                })
                .await
                .unwrap();

                match updated {
                    Ok(Some(row)) => {
                        methods::standard_replies::response_with_obj(row, StatusCode::OK)
                    }
                    Ok(None) => methods::standard_replies::not_found("Settings"),
                    Err(e) => {
                        tracing::error!(error = ?e, "settings update failed");
                        methods::standard_replies::internal_server_error_response()
                    }
                }
            },
        )
}
