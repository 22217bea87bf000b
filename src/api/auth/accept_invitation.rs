use crate::model::{OrganizationInvitation, User};
use crate::{methods, POOL};
use bcrypt::{hash, DEFAULT_COST};
use chrono::Utc;
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use warp::http::StatusCode;
use warp::{Filter, Reply};

#[derive(Deserialize, Serialize, Clone)]
struct AcceptInvitationData {
    token: String,
    password: String,
}

// The invitee replaces the one-time temporary password issued at invite
// time with one of their own.
pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path!("auth" / "invitations" / "accept")
        .and(warp::post())
        .and(warp::body::json())
        .and_then(move |body: AcceptInvitationData| async move {
            if !methods::validation::is_valid_password(&body.password) {
                return methods::standard_replies::bad_request(
                    "Password must be at least 8 characters",
                );
            }
            if !methods::invitations::token_signature_valid(&body.token) {
                return methods::standard_replies::bad_request(
                    "Invitation is invalid or has expired",
                );
            }

            let lookup_token = body.token.clone();
            let Ok(mut conn) = POOL.get() else {
                tracing::error!("could not get a database connection from the pool");
                return methods::standard_replies::internal_server_error_response();
            };
            let invitation = spawn_blocking(move || {
                use crate::schema::organization_invitations::dsl::*;
                organization_invitations
                    .filter(token.eq(lookup_token))
                    .first::<OrganizationInvitation>(&mut conn)
                    .optional()
            })
            .await
            .unwrap();

            let invitation = match invitation {
                Ok(Some(invitation)) => invitation,
                Ok(None) => {
                    return methods::standard_replies::bad_request(
                        "Invitation is invalid or has expired",
                    );
                }
                Err(e) => {
                    tracing::error!(error = ?e, "invitation lookup failed");
                    return methods::standard_replies::internal_server_error_response();
                }
            };

            if invitation.accepted_at.is_some() || invitation.expires_at < Utc::now() {
                return methods::standard_replies::bad_request(
                    "Invitation is invalid or has expired",
                );
            }

            let Ok(hashed_pass) = hash(&body.password, DEFAULT_COST) else {
                return methods::standard_replies::internal_server_error_response();
            };

            let invitation_id = invitation.id;
            let invite_email = invitation.email.clone();
            let invite_org = invitation.organization_id;
            let Ok(mut conn) = POOL.get() else {
                tracing::error!("could not get a database connection from the pool");
                return methods::standard_replies::internal_server_error_response();
            };
            let updated = spawn_blocking(move || {
                conn.transaction::<User, diesel::result::Error, _>(|conn| {
                    let user = {
                        use crate::schema::users::dsl::*;
                        diesel::update(
                            users
                                .filter(email.eq(&invite_email))
                                .filter(organization_id.eq(invite_org)),
                        )
                        .set(password.eq(&hashed_pass))
                        .get_result::<User>(conn)?
                    };
                    {
                        use crate::schema::organization_invitations::dsl::*;
                        diesel::update(organization_invitations.filter(id.eq(invitation_id)))
                            .set(accepted_at.eq(Some(Utc::now())))
                            .execute(conn)?;
                    }
                    Ok(user)
                })
            })
            .await
            .unwrap();

            match updated {
                Ok(user) => methods::standard_replies::response_with_obj(
                    user.to_publish_user(),
                    StatusCode::OK,
                ),
                Err(diesel::result::Error::NotFound) => {
                    methods::standard_replies::bad_request("Invitation is invalid or has expired")
                }
                Err(e) => {
                    tracing::error!(error = ?e, "invitation acceptance failed");
                    methods::standard_replies::internal_server_error_response()
                }
            }
        })
}
