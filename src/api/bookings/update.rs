use crate::helper_model::SessionError;
use crate::model::{Booking, BookingStatus, DumpsterInventoryUnit, UserRole};
use crate::{methods, POOL};
use chrono::NaiveDate;
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use warp::http::StatusCode;
use warp::{Filter, Reply};

// The price snapshot is immutable after creation; only operational fields
// are accepted here.
#[derive(Deserialize, Serialize, Clone, Debug, AsChangeset)]
#[diesel(table_name = crate::schema::bookings)]
#[serde(rename_all = "camelCase")]
struct UpdateBookingData {
    status: Option<BookingStatus>,
    pickup_date: Option<NaiveDate>,
    dumpster_inventory_id: Option<i32>,
    notes: Option<String>,
}

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path!("bookings" / i32)
        .and(warp::patch())
        .and(warp::body::json())
        .and(warp::cookie::optional::<String>(
            methods::sessions::SESSION_COOKIE,
        ))
        .and_then(
            move |booking_id: i32, body: UpdateBookingData, cookie: Option<String>| async move {
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
                if body.status.is_none()
                    && body.pickup_date.is_none()
                    && body.dumpster_inventory_id.is_none()
                    && body.notes.is_none()
                {
                    return methods::standard_replies::bad_request("No changes provided");
                }

                let Ok(mut conn) = POOL.get() else {
                    tracing::error!("could not get a database connection from the pool");
                    return methods::standard_replies::internal_server_error_response();
                };
                let existing = spawn_blocking(move || {
                    use crate::schema::bookings::dsl::*;
                    bookings
                        .filter(id.eq(booking_id))
                        .first::<Booking>(&mut conn)
                        .optional()
                })
                .await
                .unwrap();
                let existing = match existing {
                    Ok(Some(existing)) => existing,
                    Ok(None) => return methods::standard_replies::not_found("Booking"),
                    Err(e) => {
                        tracing::error!(error = ?e, "booking lookup failed");
                        return methods::standard_replies::internal_server_error_response();
                    }
                };
                if !methods::policy::can_access_org(&user, existing.organization_id) {
                    return methods::standard_replies::wrong_tenant();
                }

                // Status writes go through the transition table, never raw.
                if let Some(new_status) = body.status {
                    if !methods::transitions::booking_transition_allowed(
                        existing.status,
                        new_status,
                    ) {
                        return methods::standard_replies::illegal_transition(
                            methods::transitions::booking_status_name(existing.status),
                            methods::transitions::booking_status_name(new_status),
                        );
                    }
                }

                // An assigned unit must belong to the same organization.
                if let Some(unit_id) = body.dumpster_inventory_id {
                    let Ok(mut conn) = POOL.get() else {
                        tracing::error!("could not get a database connection from the pool");
                        return methods::standard_replies::internal_server_error_response();
                    };
                    let unit = spawn_blocking(move || {
                        use crate::schema::dumpster_inventory::dsl::*;
                        dumpster_inventory
                            .filter(id.eq(unit_id))
                            .first::<DumpsterInventoryUnit>(&mut conn)
                            .optional()
                    })
                    .await
                    .unwrap();
                    match unit {
                        Ok(Some(unit)) if unit.organization_id == existing.organization_id => {}
                        Ok(Some(_)) | Ok(None) => {
                            return methods::standard_replies::not_found("Inventory unit");
                        }
                        Err(e) => {
                            tracing::error!(error = ?e, "inventory unit lookup failed");
                            return methods::standard_replies::internal_server_error_response();
                        }
                    }
                }

                let changes = body.clone();
                let Ok(mut conn) = POOL.get() else {
                    tracing::error!("could not get a database connection from the pool");
                    return methods::standard_replies::internal_server_error_response();
                };
                let updated = spawn_blocking(move || {
                    use crate::schema::bookings::dsl::*;
                    diesel::update(bookings.filter(id.eq(booking_id)))
                        .set(&changes)
                        .get_result::<Booking>(&mut conn)
                })
                .await
                .unwrap();

                match updated {
                    Ok(booking) => {
                        let event =
                            methods::webhooks::booking_update_event(existing.status, booking.status);
                        methods::webhooks::dispatch_booking_event(event, booking.clone());
                        methods::standard_replies::response_with_obj(booking, StatusCode::OK)
                    }
                    Err(e) => {
                        tracing::error!(error = ?e, "booking update failed");
                        methods::standard_replies::internal_server_error_response()
                    }
                }
            },
        )
}
