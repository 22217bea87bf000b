use crate::helper_model::SessionError;
use crate::model::{
    BillingCycle, NewOrganization, NewOrganizationSettings, Organization, OrganizationStatus,
    UserRole,
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
struct CreateOrganizationData {
    name: String,
    slug: String,
    business_name: String,
    contact_email: String,
    phone: String,
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

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path!("admin" / "organizations")
        .and(warp::post())
        .and(warp::body::json())
        .and(warp::cookie::optional::<String>(
            methods::sessions::SESSION_COOKIE,
        ))
        .and_then(
            move |body: CreateOrganizationData, cookie: Option<String>| async move {
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
                if body.name.trim().is_empty() {
                    return methods::standard_replies::bad_request("Name is required");
                }
                if !methods::validation::is_valid_slug(&body.slug) {
                    return methods::standard_replies::bad_request(
                        "Slug must be lowercase letters, digits, and hyphens",
                    );
                }
                if !methods::validation::is_valid_email(&body.contact_email) {
                    return methods::standard_replies::bad_request("Invalid email address");
                }
                if !methods::validation::is_valid_phone_number(&body.phone) {
                    return methods::standard_replies::bad_request("Invalid phone number");
                }
                if let Some(ref color) = body.primary_color {
                    if !methods::validation::is_valid_hex_color(color) {
                        return methods::standard_replies::bad_request("Invalid primary color");
                    }
                }
                if let Some(ref color) = body.secondary_color {
                    if !methods::validation::is_valid_hex_color(color) {
                        return methods::standard_replies::bad_request("Invalid secondary color");
                    }
                }
                if body.tax_rate.is_some_and(|rate| !(0.0..1.0).contains(&rate)) {
                    return methods::standard_replies::bad_request(
                        "Tax rate must be a fraction between 0 and 1",
                    );
                }

                let to_be_inserted = NewOrganization {
                    name: body.name,
                    slug: body.slug,
                    business_name: body.business_name,
                    contact_email: body.contact_email,
                    phone: body.phone,
                    address: body.address,
                    city: body.city,
                    state: body.state,
                    zip_code: body.zip_code,
                    website: body.website,
                    logo_url: body.logo_url,
                    primary_color: body.primary_color,
                    secondary_color: body.secondary_color,
                    status: body.status.unwrap_or(OrganizationStatus::Trial),
                    subscription_amount: body.subscription_amount.unwrap_or(0.0),
                    billing_cycle: body.billing_cycle.unwrap_or(BillingCycle::Monthly),
                    trial_ends_at: body.trial_ends_at,
                    next_billing_date: body.next_billing_date,
                    tax_rate: body.tax_rate.unwrap_or(0.0),
                };

                // New tenants get their settings row up front so the dashboard
                // never sees a missing-settings state.
                let Ok(mut conn) = POOL.get() else {
                    tracing::error!("could not get a database connection from the pool");
                    return methods::standard_replies::internal_server_error_response();
                };
                let inserted = spawn_blocking(move || {
                    conn.transaction::<Organization, diesel::result::Error, _>(|conn| {
                        let org: Organization = {
                            use crate::schema::organizations::dsl::*;
                            diesel::insert_into(organizations)
                                .values(&to_be_inserted)
                                .get_result::<Organization>(conn)?
                        };
                        {
                            use crate::schema::organization_settings::dsl::*;
                            diesel::insert_into(organization_settings)
                                .values(&NewOrganizationSettings::defaults_for(org.id))
                                .execute(conn)?;
                        }
                        Ok(org)
                    })
                })
                .await
                .unwrap();

                match inserted {
                    Ok(org) => {
                        methods::standard_replies::response_with_obj(org, StatusCode::CREATED)
                    }
                    Err(e) if methods::diesel_fn::is_unique_violation(&e) => {
                        methods::standard_replies::conflict("Slug already in use")
                    }
                    Err(e) => {
                        tracing::error!(error = ?e, "organization insert failed");
                        methods::standard_replies::internal_server_error_response()
                    }
                }
            },
        )
}
