use crate::helper_model::SessionError;
use crate::model::{UserRole, Webhook};
use crate::{methods, POOL};
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use warp::http::StatusCode;
use warp::{Filter, Reply};

#[derive(Deserialize, Serialize, Clone, Debug, AsChangeset)]
#[diesel(table_name = crate::schema::webhooks)]
#[serde(rename_all = "camelCase")]
struct UpdateWebhookData {
    url: Option<String>,
    events: Option<Vec<String>>,
    is_active: Option<bool>,
}

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path!("webhooks" / i32)
        .and(warp::patch())
        .and(warp::body::json())
        .and(warp::cookie::optional::<String>(
            methods::sessions::SESSION_COOKIE,
        ))
        .and_then(
            move |webhook_id: i32, body: UpdateWebhookData, cookie: Option<String>| async move {
                let user = match methods::sessions::authenticate(cookie).await {
                    Ok(user) => user,
                    Err(SessionError::Db) => {
                        return methods::standard_replies::internal_server_error_response();
                    }
                    Err(_) => return methods::standard_replies::unauthorized(),
                };
                if !methods::policy::role_in(
                    &user,
                    &[UserRole::SuperAdmin, UserRole::OrgOwner, UserRole::OrgAdmin],
                ) {
                    return methods::standard_replies::permission_denied();
                }
                if body.url.is_none() && body.events.is_none() && body.is_active.is_none() {
                    return methods::standard_replies::bad_request("No changes provided");
                }
                if let Some(ref url_value) = body.url {
                    let parsed = reqwest::Url::parse(url_value);
                    let valid = parsed
                        .map(|u| matches!(u.scheme(), "http" | "https") && u.host().is_some())
                        .unwrap_or(false);
                    if !valid {
                        return methods::standard_replies::bad_request("Invalid webhook URL");
                    }
                }
                if let Some(ref events_value) = body.events {
                    if events_value.is_empty() {
                        return methods::standard_replies::bad_request(
                            "At least one event is required",
                        );
                    }
                    if let Some(unknown) = events_value
                        .iter()
                        .find(|e| !methods::webhooks::is_known_event(e))
                    {
                        return methods::standard_replies::bad_request(&format!(
                            "Unknown event: {unknown}"
                        ));
                    }
                }

                let Ok(mut conn) = POOL.get() else {
                    tracing::error!("could not get a database connection from the pool");
                    return methods::standard_replies::internal_server_error_response();
                };
                let existing = spawn_blocking(move || {
                    use crate::schema::webhooks::dsl::*;
                    webhooks
                        .filter(id.eq(webhook_id))
                        .first::<Webhook>(&mut conn)
                        .optional()
                })
                .await
                .unwrap();
                let existing = match existing {
                    Ok(Some(existing)) => existing,
                    Ok(None) => return methods::standard_replies::not_found("Webhook"),
                    Err(e) => {
                        tracing::error!(error = ?e, "webhook lookup failed");
                        return methods::standard_replies::internal_server_error_response();
                    }
                };
                if !methods::policy::can_access_org(&user, existing.organization_id) {
                    return methods::standard_replies::wrong_tenant();
                }

                let changes = body.clone();
                let Ok(mut conn) = POOL.get() else {
                    tracing::error!("could not get a database connection from the pool");
                    return methods::standard_replies::internal_server_error_response();
                };
                let updated = spawn_blocking(move || {
                    use crate::schema::webhooks::dsl::*;
                    diesel::update(webhooks.filter(id.eq(webhook_id)))
                        .set(&changes)
                        .get_result::<Webhook>(&mut conn)
                })
                .await
                .unwrap();

                match updated {
                    Ok(row) => methods::standard_replies::response_with_obj(
                        row.to_publish_webhook(),
                        StatusCode::OK,
                    ),
                    Err(e) => {
                        tracing::error!(error = ?e, "webhook update failed");
                        methods::standard_replies::internal_server_error_response()
                    }
                }
            },
        )
}
