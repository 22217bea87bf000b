use crate::model::{NewUser, Organization, User, UserRole};
use crate::{methods, POOL};
use bcrypt::{hash, DEFAULT_COST};
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use warp::http::StatusCode;
use warp::reply::with_status;
use warp::{Filter, Reply};

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
struct RegisterCustomerData {
    email: String,
    password: String,
    first_name: String,
    last_name: String,
    phone: Option<String>,
    organization_id: i32,
}

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path!("auth" / "register" / "customer")
        .and(warp::post())
        .and(warp::body::json())
        .and(warp::cookie::optional::<String>(
            methods::sessions::SESSION_COOKIE,
        ))
        .and_then(
            move |mut body: RegisterCustomerData, old_cookie: Option<String>| async move {
                if !methods::validation::is_valid_email(&body.email) {
                    return methods::standard_replies::bad_request("Please check your email format");
                }
                if !methods::validation::is_valid_password(&body.password) {
                    return methods::standard_replies::bad_request(
                        "Password must be at least 8 characters",
                    );
                }
                if body.first_name.trim().is_empty() || body.last_name.trim().is_empty() {
                    return methods::standard_replies::bad_request(
                        "First and last name are required",
                    );
                }
                if let Some(ref phone) = body.phone {
                    if !methods::validation::is_valid_phone_number(phone) {
                        return methods::standard_replies::bad_request(
                            "Please check your phone number format",
                        );
                    }
                }

                let org_id = body.organization_id;
                let Ok(mut conn) = POOL.get() else {
                    tracing::error!("could not get a database connection from the pool");
                    return methods::standard_replies::internal_server_error_response();
                };
                let org = spawn_blocking(move || {
                    use crate::schema::organizations::dsl::*;
                    organizations
                        .filter(id.eq(org_id))
                        .first::<Organization>(&mut conn)
                        .optional()
                })
                .await
                .unwrap();
                match org {
                    Ok(Some(_)) => {}
                    Ok(None) => return methods::standard_replies::not_found("Organization"),
                    Err(e) => {
                        tracing::error!(error = ?e, "organization lookup failed");
                        return methods::standard_replies::internal_server_error_response();
                    }
                }

                // Advisory pre-check; the composite unique constraint on
                // (email, organization_id) is what actually enforces this
                // under concurrent submissions.
                match methods::user::find_by_email_in_org(body.email.clone(), org_id).await {
                    Ok(Some(_)) => {
                        return methods::standard_replies::bad_request(
                            "Email already registered for this organization",
                        );
                    }
                    Ok(None) => {}
                    Err(e) => {
                        tracing::error!(error = ?e, "duplicate email pre-check failed");
                        return methods::standard_replies::internal_server_error_response();
                    }
                }

                let Ok(hashed_pass) = hash(&body.password, DEFAULT_COST) else {
                    return methods::standard_replies::internal_server_error_response();
                };
                body.password = hashed_pass;

                // Role is forced server-side; a client-supplied role field is
                // never honored on this endpoint.
                let to_be_inserted = NewUser {
                    organization_id: Some(org_id),
                    email: body.email,
                    password: body.password,
                    first_name: body.first_name,
                    last_name: body.last_name,
                    phone: body.phone,
                    role: UserRole::Customer,
                };

                let Ok(mut conn) = POOL.get() else {
                    tracing::error!("could not get a database connection from the pool");
                    return methods::standard_replies::internal_server_error_response();
                };
                let inserted = spawn_blocking(move || {
                    use crate::schema::users::dsl::*;
                    diesel::insert_into(users)
                        .values(&to_be_inserted)
                        .get_result::<User>(&mut conn)
                })
                .await
                .unwrap();

                let user = match inserted {
                    Ok(user) => user,
                    Err(e) if methods::diesel_fn::is_unique_violation(&e) => {
                        return methods::standard_replies::bad_request(
                            "Email already registered for this organization",
                        );
                    }
                    Err(e) => {
                        tracing::error!(error = ?e, "customer insert failed");
                        return methods::standard_replies::internal_server_error_response();
                    }
                };

                let session =
                    match methods::sessions::regenerate_session(old_cookie, user.id).await {
                        Ok(session) => session,
                        Err(e) => {
                            tracing::error!(error = ?e, "session regeneration failed");
                            return methods::standard_replies::internal_server_error_response();
                        }
                    };

                let pub_user = user.to_publish_user();
                let cookie = methods::sessions::session_cookie(&session);
                Ok::<_, warp::Rejection>((methods::sessions::wrap_reply_with_cookie(
                    cookie,
                    with_status(warp::reply::json(&pub_user), StatusCode::OK),
                ),))
            },
        )
}
