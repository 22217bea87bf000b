use crate::helper_model::SessionError;
use crate::model::{Booking, UserRole};
use crate::{methods, POOL};
use diesel::prelude::*;
use tokio::task::spawn_blocking;
use warp::http::StatusCode;
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path!("bookings" / i32)
        .and(warp::get())
        .and(warp::cookie::optional::<String>(
            methods::sessions::SESSION_COOKIE,
        ))
        .and_then(move |booking_id: i32, cookie: Option<String>| async move {
            let user = match methods::sessions::authenticate(cookie).await {
                Ok(user) => user,
                Err(SessionError::Db) => {
                    return methods::standard_replies::internal_server_error_response();
                }
                Err(_) => return methods::standard_replies::unauthorized(),
            };

            let Ok(mut conn) = POOL.get() else {
                tracing::error!("could not get a database connection from the pool");
                return methods::standard_replies::internal_server_error_response();
            };
            let booking = spawn_blocking(move || {
                use crate::schema::bookings::dsl::*;
                bookings
                    .filter(id.eq(booking_id))
                    .first::<Booking>(&mut conn)
                    .optional()
            })
            .await
            .unwrap();

            let booking = match booking {
                Ok(Some(booking)) => booking,
                Ok(None) => return methods::standard_replies::not_found("Booking"),
                Err(e) => {
                    tracing::error!(error = ?e, "booking lookup failed");
                    return methods::standard_replies::internal_server_error_response();
                }
            };

            if !methods::policy::can_access_org(&user, booking.organization_id) {
                return methods::standard_replies::wrong_tenant();
            }
            if user.role == UserRole::Customer && booking.customer_id != Some(user.id) {
                return methods::standard_replies::permission_denied();
            }

            methods::standard_replies::response_with_obj(booking, StatusCode::OK)
        })
}
