use crate::helper_model::SessionError;
use crate::methods::policy::OrgContextError;
use crate::model::{NewQuote, Quote, QuoteStatus, UserRole};
use crate::{methods, POOL};
use chrono::NaiveDate;
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use warp::http::StatusCode;
use warp::{Filter, Reply};

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
struct CreateQuoteData {
    organization_id: Option<i32>,
    customer_name: String,
    customer_email: String,
    customer_phone: String,
    service_address: String,
    service_city: String,
    service_state: String,
    service_zip_code: String,
    item_description: String,
    preferred_date: Option<NaiveDate>,
}

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path!("quotes")
        .and(warp::post())
        .and(warp::body::json())
        .and(warp::cookie::optional::<String>(
            methods::sessions::SESSION_COOKIE,
        ))
        .and_then(move |body: CreateQuoteData, cookie: Option<String>| async move {
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
            if body.customer_name.trim().is_empty() {
                return methods::standard_replies::bad_request("Customer name is required");
            }
            if !methods::validation::is_valid_email(&body.customer_email) {
                return methods::standard_replies::bad_request("Invalid email address");
            }
            if !methods::validation::is_valid_phone_number(&body.customer_phone) {
                return methods::standard_replies::bad_request("Invalid phone number");
            }
            if !methods::validation::is_valid_zip_code(&body.service_zip_code) {
                return methods::standard_replies::bad_request("Invalid ZIP code");
            }
            if body.item_description.trim().is_empty() {
                return methods::standard_replies::bad_request("Item description is required");
            }

            let to_be_inserted = NewQuote {
                organization_id: org_id,
                customer_name: body.customer_name,
                customer_email: body.customer_email,
                customer_phone: body.customer_phone,
                service_address: body.service_address,
                service_city: body.service_city,
                service_state: body.service_state,
                service_zip_code: body.service_zip_code,
                item_description: body.item_description,
                preferred_date: body.preferred_date,
                status: QuoteStatus::Pending,
                quoted_amount: None,
            };

            let Ok(mut conn) = POOL.get() else {
                tracing::error!("could not get a database connection from the pool");
                return methods::standard_replies::internal_server_error_response();
            };
            let inserted = spawn_blocking(move || {
                use crate::schema::quotes::dsl::*;
                diesel::insert_into(quotes)
                    .values(&to_be_inserted)
                    .get_result::<Quote>(&mut conn)
            })
            .await
            .unwrap();

            match inserted {
                Ok(row) => methods::standard_replies::response_with_obj(row, StatusCode::CREATED),
                Err(e) => {
                    tracing::error!(error = ?e, "quote insert failed");
                    methods::standard_replies::internal_server_error_response()
                }
            }
        })
}
