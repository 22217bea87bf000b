use crate::helper_model::SessionError;
use crate::model::{BillingCycle, Organization, OrganizationStatus, UserRole};
use crate::{methods, POOL};
use chrono::NaiveDate;
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use warp::http::StatusCode;
use warp::{Filter, Reply};

// Slug is deliberately absent: it is a public URL and immutable after
// creation.
#[derive(Deserialize, Serialize, Clone, Debug, AsChangeset)]
#[diesel(table_name = crate::schema::organizations)]
#[serde(rename_all = "camelCase")]
struct UpdateOrganizationData {
    name: Option<String>,
    business_name: Option<String>,
    contact_email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    city: Option<String>,
    state: Option<String>,
    zip_code: Option<String>,
    website: Option<String>,
    logo_url: Option<String>,
    primary_color: Option<String>,
    secondary_color: Option<String>,
    status: Option<OrganizationStatus>,
    subscription_amount: Option<f64>,
    billing_cycle: Option<BillingCycle>,
    trial_ends_at: Option<NaiveDate>,
    next_billing_date: Option<NaiveDate>,
    tax_rate: Option<f64>,
}

impl UpdateOrganizationData {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.business_name.is_none()
            && self.contact_email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.zip_code.is_none()
            && self.website.is_none()
            && self.logo_url.is_none()
            && self.primary_color.is_none()
            && self.secondary_color.is_none()
            && self.status.is_none()
            && self.subscription_amount.is_none()
            && self.billing_cycle.is_none()
            && self.trial_ends_at.is_none()
            && self.next_billing_date.is_none()
            && self.tax_rate.is_none()
    }
}

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path!("admin" / "organizations" / i32)
        .and(warp::patch())
        .and(warp::body::json())
        .and(warp::cookie::optional::<String>(
            methods::sessions::SESSION_COOKIE,
        ))
        .and_then(
            move |org_id: i32, body: UpdateOrganizationData, cookie: Option<String>| async move {
                let user = match methods::sessions::authenticate(cookie).await {
                    Ok(user) => user,
                    Err(SessionError::Db) => {
                        return methods::standard_replies::internal_server_error_response();
                    }
                    Err(_) => return methods::standard_replies::unauthorized(),
                };
                if user.role != UserRole::SuperAdmin {
                    return methods::standard_replies::permission_denied();
                }
                if body.is_empty() {
                    return methods::standard_replies::bad_request("No changes provided");
                }
                if let Some(ref email) = body.contact_email {
                    if !methods::validation::is_valid_email(email) {
                        return methods::standard_replies::bad_request("Invalid email address");
                    }
                }
                if let Some(ref phone_value) = body.phone {
                    if !methods::validation::is_valid_phone_number(phone_value) {
                        return methods::standard_replies::bad_request("Invalid phone number");
                    }
                }
                if body.tax_rate.is_some_and(|rate| !(0.0..1.0).contains(&rate)) {
                    return methods::standard_replies::bad_request(
                        "Tax rate must be a fraction between 0 and 1",
                    );
                }

                let changes = body.clone();
                let Ok(mut conn) = POOL.get() else {
                    tracing::error!("could not get a database connection from the pool");
                    return methods::standard_replies::internal_server_error_response();
                };
                let updated = spawn_blocking(move || {
                    use crate::schema::organizations::dsl::*;
                    diesel::update(organizations.filter(id.eq(org_id)))
                        .set(&changes)
                        .get_result::<Organization>(&mut conn)
                        .optional()
                })
                .await
                .unwrap();

                match updated {
                    Ok(Some(org)) => {
                        methods::standard_replies::response_with_obj(org, StatusCode::OK)
                    }
                    Ok(None) => methods::standard_replies::not_found("Organization"),
                    Err(e) => {
                        tracing::error!(error = ?e, "organization update failed");
                        methods::standard_replies::internal_server_error_response()
                    }
                }
            },
        )
}
