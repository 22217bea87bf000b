use crate::helper_model::{InvitedUser, SessionError};
use crate::model::{
    NewOrganizationInvitation, NewUser, Organization, OrganizationInvitation, User, UserRole,
};
use crate::{methods, POOL};
use chrono::{Duration, Utc};
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use warp::http::StatusCode;
use warp::{Filter, Reply};

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
struct InviteUserData {
    email: String,
    first_name: String,
    last_name: String,
    phone: Option<String>,
    role: UserRole,
}

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path!("admin" / "organizations" / i32 / "users")
        .and(warp::post())
        .and(warp::body::json())
        .and(warp::cookie::optional::<String>(
            methods::sessions::SESSION_COOKIE,
        ))
        .and_then(
            move |org_id: i32, body: InviteUserData, cookie: Option<String>| async move {
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
                if !methods::validation::is_valid_email(&body.email) {
                    return methods::standard_replies::bad_request("Invalid email address");
                }
                if body.first_name.trim().is_empty() || body.last_name.trim().is_empty() {
                    return methods::standard_replies::bad_request(
                        "First and last name are required",
                    );
                }
                if body.role == UserRole::SuperAdmin {
                    return methods::standard_replies::bad_request(
                        "Cannot invite a super admin into an organization",
                    );
                }
                if let Some(ref phone_value) = body.phone {
                    if !methods::validation::is_valid_phone_number(phone_value) {
                        return methods::standard_replies::bad_request("Invalid phone number");
                    }
                }

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

                let temporary_password = methods::invitations::generate_temporary_password();
                let password_hash =
                    match bcrypt::hash(temporary_password.clone(), bcrypt::DEFAULT_COST) {
                        Ok(hash) => hash,
                        Err(e) => {
                            tracing::error!(error = ?e, "password hashing failed");
                            return methods::standard_replies::internal_server_error_response();
                        }
                    };
                let invitation_token = methods::invitations::generate_invitation_token();
                let expires_at = Utc::now() + Duration::days(7);

                let new_user = NewUser {
                    organization_id: Some(org_id),
                    email: body.email.clone(),
                    password: password_hash,
                    first_name: body.first_name,
                    last_name: body.last_name,
                    phone: body.phone,
                    role: body.role,
                };
                let new_invitation = NewOrganizationInvitation {
                    organization_id: org_id,
                    email: body.email,
                    role: body.role,
                    invited_by: user.id,
                    token: invitation_token,
                    expires_at,
                };

                // User and invitation land together; a unique-violation on the
                // user rolls the invitation back too.
                let Ok(mut conn) = POOL.get() else {
                    tracing::error!("could not get a database connection from the pool");
                    return methods::standard_replies::internal_server_error_response();
                };
                let inserted = spawn_blocking(move || {
                    conn.transaction::<(User, OrganizationInvitation), diesel::result::Error, _>(
                        |conn| {
                            let created_user: User = {
                                use crate::schema::users::dsl::*;
                                diesel::insert_into(users)
                                    .values(&new_user)
                                    .get_result::<User>(conn)?
                            };
                            let invitation: OrganizationInvitation = {
                                use crate::schema::organization_invitations::dsl::*;
                                diesel::insert_into(organization_invitations)
                                    .values(&new_invitation)
                                    .get_result::<OrganizationInvitation>(conn)?
                            };
                            Ok((created_user, invitation))
                        },
                    )
                })
                .await
                .unwrap();

                match inserted {
                    Ok((created_user, invitation)) => {
                        let reply = InvitedUser {
                            user: created_user.to_publish_user(),
                            temporary_password,
                            invitation_token: invitation.token,
                            invitation_expires_at: invitation.expires_at,
                        };
                        methods::standard_replies::response_with_obj(reply, StatusCode::CREATED)
                    }
                    Err(e) if methods::diesel_fn::is_unique_violation(&e) => {
                        methods::standard_replies::conflict(
                            "Email already registered for this organization",
                        )
                    }
                    Err(e) => {
                        tracing::error!(error = ?e, "user invitation failed");
                        methods::standard_replies::internal_server_error_response()
                    }
                }
            },
        )
}
