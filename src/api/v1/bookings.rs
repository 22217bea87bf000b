use crate::helper_model::ApiV1Error;
use crate::model::{Booking, BookingStatus, DumpsterType, NewBooking};
use crate::{methods, POOL};
use chrono::NaiveDate;
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use warp::http::StatusCode;
use warp::{Filter, Reply};

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
struct V1BookingData {
    customer_name: String,
    customer_email: String,
    customer_phone: String,
    delivery_address: String,
    delivery_city: String,
    delivery_state: String,
    delivery_zip_code: String,
    delivery_date: NaiveDate,
    pickup_date: NaiveDate,
    dumpster_type_id: i32,
    notes: Option<String>,
}

fn v1_error(
    error: &str,
    details: Option<Vec<String>>,
    status: StatusCode,
) -> Result<(warp::reply::Response,), warp::Rejection> {
    let body = ApiV1Error {
        error: error.to_string(),
        details,
    };
    Ok((
        warp::reply::with_status(warp::reply::json(&body), status).into_response(),
    ))
}

fn validate(body: &V1BookingData) -> Vec<String> {
    let mut details = Vec::new();
    if body.customer_name.trim().is_empty() {
        details.push("customerName is required".to_string());
    }
    if !methods::validation::is_valid_email(&body.customer_email) {
        details.push("customerEmail must be a valid email address".to_string());
    }
    if !methods::validation::is_valid_phone_number(&body.customer_phone) {
        details.push("customerPhone must be a 10-digit phone number".to_string());
    }
    if body.delivery_address.trim().is_empty() {
        details.push("deliveryAddress is required".to_string());
    }
    if !methods::validation::is_valid_zip_code(&body.delivery_zip_code) {
        details.push("deliveryZipCode must be a valid ZIP code".to_string());
    }
    if body.pickup_date <= body.delivery_date {
        details.push("pickupDate must be after deliveryDate".to_string());
    }
    details
}

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path!("v1" / "bookings")
        .and(warp::post())
        .and(warp::header::optional::<String>("x-api-key"))
        .and(warp::body::json())
        .and_then(
            move |api_key: Option<String>, body: V1BookingData| async move {
                let Some(api_key) = api_key else {
                    return v1_error("Invalid API key", None, StatusCode::UNAUTHORIZED);
                };
                let key = match methods::api_keys::authenticate_api_key(api_key).await {
                    Ok(Some(key)) => key,
                    Ok(None) => {
                        return v1_error("Invalid API key", None, StatusCode::UNAUTHORIZED);
                    }
                    Err(e) => {
                        tracing::error!(error = ?e, "api key lookup failed");
                        return v1_error(
                            "Internal server error",
                            None,
                            StatusCode::INTERNAL_SERVER_ERROR,
                        );
                    }
                };
                let org_id = key.organization_id;

                let details = validate(&body);
                if !details.is_empty() {
                    return v1_error("Validation failed", Some(details), StatusCode::BAD_REQUEST);
                }

                let type_id = body.dumpster_type_id;
                let Ok(mut conn) = POOL.get() else {
                    tracing::error!("could not get a database connection from the pool");
                    return v1_error(
                        "Internal server error",
                        None,
                        StatusCode::INTERNAL_SERVER_ERROR,
                    );
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
                    Ok(None) => {
                        return v1_error(
                            "Validation failed",
                            Some(vec!["dumpsterTypeId does not match an active dumpster type"
                                .to_string()]),
                            StatusCode::BAD_REQUEST,
                        );
                    }
                    Err(e) => {
                        tracing::error!(error = ?e, "dumpster type lookup failed");
                        return v1_error(
                            "Internal server error",
                            None,
                            StatusCode::INTERNAL_SERVER_ERROR,
                        );
                    }
                };

                let service_area = match methods::booking::service_area_for_zip(
                    org_id,
                    body.delivery_zip_code.clone(),
                )
                .await
                {
                    Ok(Some(area)) => area,
                    Ok(None) => {
                        return v1_error(
                            "Validation failed",
                            Some(vec![
                                "deliveryZipCode is outside the service area".to_string()
                            ]),
                            StatusCode::BAD_REQUEST,
                        );
                    }
                    Err(e) => {
                        tracing::error!(error = ?e, "service area lookup failed");
                        return v1_error(
                            "Internal server error",
                            None,
                            StatusCode::INTERNAL_SERVER_ERROR,
                        );
                    }
                };

                let tax_rate = {
                    let Ok(mut conn) = POOL.get() else {
                        tracing::error!("could not get a database connection from the pool");
                        return v1_error(
                            "Internal server error",
                            None,
                            StatusCode::INTERNAL_SERVER_ERROR,
                        );
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
                            return v1_error(
                                "Internal server error",
                                None,
                                StatusCode::INTERNAL_SERVER_ERROR,
                            );
                        }
                    }
                };

                // Integrators never send prices; the rental window defines the
                // charge.
                let rental_days =
                    (body.pickup_date - body.delivery_date).num_days().max(1) as i32;
                let quote = methods::pricing::compute_quote(
                    &dumpster_type,
                    rental_days,
                    service_area.delivery_fee,
                    tax_rate,
                );

                let booking_number =
                    match methods::booking::generate_unique_booking_number().await {
                        Ok(number) => number,
                        Err(e) => {
                            tracing::error!(error = ?e, "booking number generation failed");
                            return v1_error(
                                "Internal server error",
                                None,
                                StatusCode::INTERNAL_SERVER_ERROR,
                            );
                        }
                    };
                let to_be_inserted = NewBooking {
                    organization_id: org_id,
                    customer_id: None,
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
                    pickup_date: Some(body.pickup_date),
                    rental_days,
                    base_rate: quote.base_rate,
                    daily_rate: quote.daily_rate,
                    delivery_fee: quote.delivery_fee,
                    subtotal: quote.subtotal,
                    tax_amount: quote.tax_amount,
                    total_amount: quote.total_amount,
                    deposit_amount: 0.0,
                    amount_paid: 0.0,
                    balance_due: quote.total_amount,
                    notes: body.notes,
                };

                let Ok(mut conn) = POOL.get() else {
                    tracing::error!("could not get a database connection from the pool");
                    return v1_error(
                        "Internal server error",
                        None,
                        StatusCode::INTERNAL_SERVER_ERROR,
                    );
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
                        Ok((warp::reply::with_status(
                            warp::reply::json(&booking),
                            StatusCode::CREATED,
                        )
                        .into_response(),))
                    }
                    Err(e) => {
                        tracing::error!(error = ?e, "booking insert failed");
                        v1_error(
                            "Internal server error",
                            None,
                            StatusCode::INTERNAL_SERVER_ERROR,
                        )
                    }
                }
            },
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_body() -> V1BookingData {
        V1BookingData {
            customer_name: "Jordan Fields".into(),
            customer_email: "jordan@example.com".into(),
            customer_phone: "6145551234".into(),
            delivery_address: "100 Main St".into(),
            delivery_city: "Columbus".into(),
            delivery_state: "OH".into(),
            delivery_zip_code: "43004".into(),
            delivery_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            pickup_date: NaiveDate::from_ymd_opt(2026, 9, 8).unwrap(),
            dumpster_type_id: 1,
            notes: None,
        }
    }

    #[test]
    fn valid_body_produces_no_details() {
        assert!(validate(&valid_body()).is_empty());
    }

    #[test]
    fn each_bad_field_is_reported() {
        let mut body = valid_body();
        body.customer_email = "not-an-email".into();
        body.customer_phone = "123".into();
        body.pickup_date = body.delivery_date;
        let details = validate(&body);
        assert_eq!(details.len(), 3);
        assert!(details.iter().any(|d| d.contains("customerEmail")));
        assert!(details.iter().any(|d| d.contains("customerPhone")));
        assert!(details.iter().any(|d| d.contains("pickupDate")));
    }
}
