use crate::helper_model::SessionError;
use crate::methods::policy::OrgContextError;
use crate::model::{
    Booking, BookingStatus, DumpsterType, NewBooking, OrganizationSettings, UserRole,
};
use crate::{methods, POOL};
use chrono::NaiveDate;
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use warp::http::StatusCode;
use warp::{Filter, Reply};

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
struct CreateBookingData {
    organization_id: Option<i32>,
    dumpster_type_id: i32,
    customer_name: String,
    customer_email: String,
    customer_phone: String,
    delivery_address: String,
    delivery_city: String,
    delivery_state: String,
    delivery_zip_code: String,
    delivery_date: NaiveDate,
    pickup_date: Option<NaiveDate>,
    rental_days: i32,
    deposit_amount: Option<f64>,
    notes: Option<String>,
    // Client-computed totals, displayed before submission. The server
    // recomputes and must agree before anything is persisted.
    subtotal: f64,
    tax_amount: f64,
    total_amount: f64,
}

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path!("bookings")
        .and(warp::post())
        .and(warp::body::json())
        .and(warp::cookie::optional::<String>(
            methods::sessions::SESSION_COOKIE,
        ))
        .and_then(move |body: CreateBookingData, cookie: Option<String>| async move {
            let user = match methods::sessions::authenticate(cookie).await {
                Ok(user) => user,
                Err(SessionError::Db) => {
                    return methods::standard_replies::internal_server_error_response();
                }
                Err(_) => return methods::standard_replies::unauthorized(),
            };
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

            if !methods::validation::is_valid_email(&body.customer_email)
                || !methods::validation::is_valid_phone_number(&body.customer_phone)
            {
                return methods::standard_replies::bad_request(
                    "Please check the customer email and phone number format",
                );
            }
            if !methods::validation::is_valid_zip_code(&body.delivery_zip_code) {
                return methods::standard_replies::bad_request("Please check the ZIP code format");
            }
            if body.rental_days < 1 {
                return methods::standard_replies::bad_request(
                    "Rental must be at least one day",
                );
            }
            if let Some(pickup) = body.pickup_date {
                if pickup < body.delivery_date {
                    return methods::standard_replies::bad_request(
                        "Pickup date cannot precede the delivery date",
                    );
                }
            }

            let type_id = body.dumpster_type_id;
            let Ok(mut conn) = POOL.get() else {
                tracing::error!("could not get a database connection from the pool");
                return methods::standard_replies::internal_server_error_response();
            };
            let dumpster_type = spawn_blocking(move || {
                use crate::schema::dumpster_types::dsl::*;
                dumpster_types
                    .filter(id.eq(type_id))
                    .filter(organization_id.eq(org_id))
                    .filter(is_active.eq(true))
                    .first::<DumpsterType>(&mut conn)
                    .optional()
            })
            .await
            .unwrap();
            let dumpster_type = match dumpster_type {
                Ok(Some(dt)) => dt,
                Ok(None) => return methods::standard_replies::not_found("Dumpster type"),
                Err(e) => {
                    tracing::error!(error = ?e, "dumpster type lookup failed");
                    return methods::standard_replies::internal_server_error_response();
                }
            };

            // Booking-rule knobs from org settings, if the row exists yet.
            let Ok(mut conn) = POOL.get() else {
                tracing::error!("could not get a database connection from the pool");
                return methods::standard_replies::internal_server_error_response();
            };
            let settings = spawn_blocking(move || {
                use crate::schema::organization_settings::dsl::*;
                organization_settings
                    .filter(organization_id.eq(org_id))
                    .first::<OrganizationSettings>(&mut conn)
                    .optional()
            })
            .await
            .unwrap()
            .unwrap_or(None);
            if let Some(settings) = settings {
                if body.rental_days < settings.min_rental_days {
                    return methods::standard_replies::bad_request(
                        "Rental period is shorter than this organization's minimum",
                    );
                }
            }

            let service_area = match methods::booking::service_area_for_zip(
                org_id,
                body.delivery_zip_code.clone(),
            )
            .await
            {
                Ok(Some(area)) => area,
                Ok(None) => {
                    return methods::standard_replies::bad_request(
                        "Delivery address is outside the service area",
                    );
                }
                Err(e) => {
                    tracing::error!(error = ?e, "service area lookup failed");
                    return methods::standard_replies::internal_server_error_response();
                }
            };

            let tax_rate = {
                let Ok(mut conn) = POOL.get() else {
                    tracing::error!("could not get a database connection from the pool");
                    return methods::standard_replies::internal_server_error_response();
                };
                let rate = spawn_blocking(move || {
                    use crate::schema::organizations::dsl::*;
                    organizations
                        .filter(id.eq(org_id))
                        .select(tax_rate)
                        .first::<f64>(&mut conn)
                })
                .await
                .unwrap();
                match rate {
                    Ok(rate) => rate,
                    Err(e) => {
                        tracing::error!(error = ?e, "tax rate lookup failed");
                        return methods::standard_replies::internal_server_error_response();
                    }
                }
            };

            // The submitted totals must match the server's own arithmetic;
            // the snapshot that gets persisted is always the server's.
            let quote = methods::pricing::compute_quote(
                &dumpster_type,
                body.rental_days,
                service_area.delivery_fee,
                tax_rate,
            );
            if !methods::pricing::totals_match(quote.total_amount, body.total_amount) {
                return methods::standard_replies::bad_request(
                    "Submitted total does not match the current rate card",
                );
            }

            let booking_number = match methods::booking::generate_unique_booking_number().await {
                Ok(number) => number,
                Err(e) => {
                    tracing::error!(error = ?e, "booking number generation failed");
                    return methods::standard_replies::internal_server_error_response();
                }
            };
            let to_be_inserted = NewBooking {
                organization_id: org_id,
                customer_id: (user.role == UserRole::Customer).then_some(user.id),
                dumpster_type_id: dumpster_type.id,
                dumpster_inventory_id: None,
                booking_number,
                status: BookingStatus::Pending,
                customer_name: body.customer_name,
                customer_email: body.customer_email,
                customer_phone: body.customer_phone,
                delivery_address: body.delivery_address,
                delivery_city: body.delivery_city,
                delivery_state: body.delivery_state,
                delivery_zip_code: body.delivery_zip_code,
                delivery_date: body.delivery_date,
                pickup_date: body.pickup_date,
                rental_days: body.rental_days,
                base_rate: quote.base_rate,
                daily_rate: quote.daily_rate,
                delivery_fee: quote.delivery_fee,
                subtotal: quote.subtotal,
                tax_amount: quote.tax_amount,
                total_amount: quote.total_amount,
                deposit_amount: body.deposit_amount.unwrap_or(0.0),
                amount_paid: 0.0,
                balance_due: quote.total_amount,
                notes: body.notes,
            };

            let Ok(mut conn) = POOL.get() else {
                tracing::error!("could not get a database connection from the pool");
                return methods::standard_replies::internal_server_error_response();
            };
            let inserted = spawn_blocking(move || {
                use crate::schema::bookings::dsl::*;
                diesel::insert_into(bookings)
                    .values(&to_be_inserted)
                    .get_result::<Booking>(&mut conn)
            })
            .await
            .unwrap();

            match inserted {
                Ok(booking) => {
                    methods::webhooks::dispatch_booking_event(
                        methods::webhooks::EVENT_BOOKING_CREATED,
                        booking.clone(),
                    );
                    methods::standard_replies::response_with_obj(booking, StatusCode::CREATED)
                }
                Err(e) => {
                    tracing::error!(error = ?e, "booking insert failed");
                    methods::standard_replies::internal_server_error_response()
                }
            }
        })
}
