use crate::helper_model::SessionError;
use crate::methods::policy::OrgContextError;
use crate::model::{Booking, NewPayment, Payment, PaymentMethodKind, PaymentStatus, UserRole};
use crate::{methods, POOL};
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use warp::http::StatusCode;
use warp::{Filter, Reply};

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
struct CreatePaymentData {
    organization_id: Option<i32>,
    booking_id: Option<i32>,
    quote_id: Option<i32>,
    amount: f64,
    method: PaymentMethodKind,
    status: Option<PaymentStatus>,
    reference: Option<String>,
}

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path!("payments")
        .and(warp::post())
        .and(warp::body::json())
        .and(warp::cookie::optional::<String>(
            methods::sessions::SESSION_COOKIE,
        ))
        .and_then(move |body: CreatePaymentData, cookie: Option<String>| async move {
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
            if body.amount <= 0.0 {
                return methods::standard_replies::bad_request("Amount must be positive");
            }

            if let Some(booking_id_value) = body.booking_id {
                let Ok(mut conn) = POOL.get() else {
                    tracing::error!("could not get a database connection from the pool");
                    return methods::standard_replies::internal_server_error_response();
                };
                let booking = spawn_blocking(move || {
                    use crate::schema::bookings::dsl::*;
                    bookings
                        .filter(id.eq(booking_id_value))
                        .filter(organization_id.eq(org_id))
                        .first::<Booking>(&mut conn)
                        .optional()
                })
                .await
                .unwrap();
                match booking {
                    Ok(Some(_)) => {}
                    Ok(None) => return methods::standard_replies::not_found("Booking"),
                    Err(e) => {
                        tracing::error!(error = ?e, "booking lookup failed");
                        return methods::standard_replies::internal_server_error_response();
                    }
                }
            }

            let status_value = body.status.unwrap_or(PaymentStatus::Completed);
            let to_be_inserted = NewPayment {
                organization_id: org_id,
                booking_id: body.booking_id,
                quote_id: body.quote_id,
                amount: body.amount,
                method: body.method,
                status: status_value,
                reference: body.reference,
            };

            // The payment row and the booking balance move together or not at
            // all.
            let Ok(mut conn) = POOL.get() else {
                tracing::error!("could not get a database connection from the pool");
                return methods::standard_replies::internal_server_error_response();
            };
            let inserted = spawn_blocking(move || {
                conn.transaction::<Payment, diesel::result::Error, _>(|conn| {
                    let payment: Payment = {
                        use crate::schema::payments::dsl::*;
                        diesel::insert_into(payments)
                            .values(&to_be_inserted)
                            .get_result::<Payment>(conn)?
                    };
                    if payment.status == PaymentStatus::Completed {
                        if let Some(paid_booking_id) = payment.booking_id {
                            use crate::schema::bookings::dsl::*;
                            let booking: Booking = bookings
                                .filter(id.eq(paid_booking_id))
                                .for_update()
                                .first::<Booking>(conn)?;
                            let new_paid =
                                methods::pricing::round_cents(booking.amount_paid + payment.amount);
                            let new_balance =
                                methods::pricing::round_cents(booking.total_amount - new_paid);
                            diesel::update(bookings.filter(id.eq(paid_booking_id)))
                                .set((amount_paid.eq(new_paid), balance_due.eq(new_balance)))
                                .execute(conn)?;
                        }
                    }
                    Ok(payment)
                })
            })
            .await
            .unwrap();

            match inserted {
                Ok(payment) => {
                    methods::standard_replies::response_with_obj(payment, StatusCode::CREATED)
                }
                Err(e) if methods::diesel_fn::is_foreign_key_violation(&e) => {
                    methods::standard_replies::bad_request("Referenced quote does not exist")
                }
                Err(e) => {
                    tracing::error!(error = ?e, "payment insert failed");
                    methods::standard_replies::internal_server_error_response()
                }
            }
        })
}
