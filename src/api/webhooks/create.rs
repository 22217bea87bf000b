use crate::helper_model::{CreatedWebhook, SessionError};
use crate::methods::policy::OrgContextError;
use crate::model::{NewWebhook, UserRole, Webhook};
use crate::{methods, POOL};
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use warp::http::StatusCode;
use warp::{Filter, Reply};

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
struct CreateWebhookData {
    organization_id: Option<i32>,
    url: String,
    events: Vec<String>,
}

fn is_valid_endpoint_url(url: &str) -> bool {
    match reqwest::Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https") && parsed.host().is_some(),
        Err(_) => false,
    }
}

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path!("webhooks")
        .and(warp::post())
        .and(warp::body::json())
        .and(warp::cookie::optional::<String>(
            methods::sessions::SESSION_COOKIE,
        ))
        .and_then(move |body: CreateWebhookData, cookie: Option<String>| async move {
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
            if !is_valid_endpoint_url(&body.url) {
                return methods::standard_replies::bad_request("Invalid webhook URL");
            }
            if body.events.is_empty() {
                return methods::standard_replies::bad_request(
                    "At least one event is required",
                );
            }
            if let Some(unknown) = body
                .events
                .iter()
                .find(|e| !methods::webhooks::is_known_event(e))
            {
                return methods::standard_replies::bad_request(&format!(
                    "Unknown event: {unknown}"
                ));
            }

            let secret = methods::webhooks::generate_webhook_secret();
            let to_be_inserted = NewWebhook {
                organization_id: org_id,
                url: body.url,
                secret: secret.clone(),
                events: body.events,
                is_active: true,
            };

            let Ok(mut conn) = POOL.get() else {
                tracing::error!("could not get a database connection from the pool");
                return methods::standard_replies::internal_server_error_response();
            };
            let inserted = spawn_blocking(move || {
                use crate::schema::webhooks::dsl::*;
                diesel::insert_into(webhooks)
                    .values(&to_be_inserted)
                    .get_result::<Webhook>(&mut conn)
            })
            .await
            .unwrap();

            match inserted {
                Ok(row) => {
                    let created = CreatedWebhook {
                        webhook: row.to_publish_webhook(),
                        secret,
                    };
                    methods::standard_replies::response_with_obj(created, StatusCode::CREATED)
                }
                Err(e) => {
                    tracing::error!(error = ?e, "webhook insert failed");
                    methods::standard_replies::internal_server_error_response()
                }
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_validation() {
        assert!(is_valid_endpoint_url("https://example.com/hooks"));
        assert!(is_valid_endpoint_url("http://localhost:4000/cb"));
        assert!(!is_valid_endpoint_url("ftp://example.com"));
        assert!(!is_valid_endpoint_url("not a url"));
    }
}
