use crate::helper_model::SessionError;
use crate::model::{Quote, QuoteStatus, UserRole};
use crate::{methods, POOL};
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use warp::http::StatusCode;
use warp::{Filter, Reply};

#[derive(Deserialize, Serialize, Clone, Debug, AsChangeset)]
#[diesel(table_name = crate::schema::quotes)]
#[serde(rename_all = "camelCase")]
struct UpdateQuoteData {
    status: Option<QuoteStatus>,
    quoted_amount: Option<f64>,
}

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path!("quotes" / i32)
        .and(warp::patch())
        .and(warp::body::json())
        .and(warp::cookie::optional::<String>(
            methods::sessions::SESSION_COOKIE,
        ))
        .and_then(
            move |quote_id: i32, body: UpdateQuoteData, cookie: Option<String>| async move {
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
                if body.status.is_none() && body.quoted_amount.is_none() {
                    return methods::standard_replies::bad_request("No changes provided");
                }
                if body.quoted_amount.is_some_and(|amount| amount < 0.0) {
                    return methods::standard_replies::bad_request(
                        "Quoted amount must not be negative",
                    );
                }

                let Ok(mut conn) = POOL.get() else {
                    tracing::error!("could not get a database connection from the pool");
                    return methods::standard_replies::internal_server_error_response();
                };
                let existing = spawn_blocking(move || {
                    use crate::schema::quotes::dsl::*;
                    quotes
                        .filter(id.eq(quote_id))
                        .first::<Quote>(&mut conn)
                        .optional()
                })
                .await
                .unwrap();
                let existing = match existing {
                    Ok(Some(existing)) => existing,
                    Ok(None) => return methods::standard_replies::not_found("Quote"),
                    Err(e) => {
                        tracing::error!(error = ?e, "quote lookup failed");
                        return methods::standard_replies::internal_server_error_response();
                    }
                };
                if !methods::policy::can_access_org(&user, existing.organization_id) {
                    return methods::standard_replies::wrong_tenant();
                }

                if let Some(new_status) = body.status {
                    if !methods::transitions::quote_transition_allowed(existing.status, new_status)
                    {
                        return methods::standard_replies::illegal_transition(
                            methods::transitions::quote_status_name(existing.status),
                            methods::transitions::quote_status_name(new_status),
                        );
                    }
                    // Moving to quoted requires a number on record, either in
                    // this request or from a previous one.
                    if new_status == QuoteStatus::Quoted
                        && body.quoted_amount.is_none()
                        && existing.quoted_amount.is_none()
                    {
                        return methods::standard_replies::bad_request(
                            "Quoted amount is required to mark a quote as quoted",
                        );
                    }
                }

                let changes = body.clone();
                let Ok(mut conn) = POOL.get() else {
                    tracing::error!("could not get a database connection from the pool");
                    return methods::standard_replies::internal_server_error_response();
                };
                let updated = spawn_blocking(move || {
                    use crate::schema::quotes::dsl::*;
                    diesel::update(quotes.filter(id.eq(quote_id)))
                        .set(&changes)
                        .get_result::<Quote>(&mut conn)
                })
                .await
                .unwrap();

                match updated {
                    Ok(row) => methods::standard_replies::response_with_obj(row, StatusCode::OK),
                    Err(e) => {
                        tracing::error!(error = ?e, "quote update failed");
                        methods::standard_replies::internal_server_error_response()
                    }
                }
            },
        )
}
