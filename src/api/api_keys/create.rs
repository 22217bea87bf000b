use crate::helper_model::{CreatedApiKey, SessionError};
use crate::methods::policy::OrgContextError;
use crate::model::{ApiKey, NewApiKey, UserRole};
use crate::{methods, POOL};
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use warp::http::StatusCode;
use warp::{Filter, Reply};

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
struct CreateApiKeyData {
    organization_id: Option<i32>,
    name: String,
}

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path!("api-keys")
        .and(warp::post())
        .and(warp::body::json())
        .and(warp::cookie::optional::<String>(
            methods::sessions::SESSION_COOKIE,
        ))
        .and_then(move |body: CreateApiKeyData, cookie: Option<String>| async move {
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
            if body.name.trim().is_empty() {
                return methods::standard_replies::bad_request("Name is required");
            }

            let generated = methods::api_keys::generate_api_key();
            let to_be_inserted = NewApiKey {
                organization_id: org_id,
                name: body.name,
                key_prefix: generated.prefix.clone(),
                key_hash: generated.hash.clone(),
            };

            let Ok(mut conn) = POOL.get() else {
                tracing::error!("could not get a database connection from the pool");
                return methods::standard_replies::internal_server_error_response();
            };
            let inserted = spawn_blocking(move || {
                use crate::schema::api_keys::dsl::*;
                diesel::insert_into(api_keys)
                    .values(&to_be_inserted)
                    .get_result::<ApiKey>(&mut conn)
            })
            .await
            .unwrap();

            match inserted {
                Ok(row) => {
                    let created = CreatedApiKey {
                        api_key: row.to_publish_api_key(),
                        key: generated.raw,
                    };
                    methods::standard_replies::response_with_obj(created, StatusCode::CREATED)
                }
                Err(e) => {
                    tracing::error!(error = ?e, "api key insert failed");
                    methods::standard_replies::internal_server_error_response()
                }
            }
        })
}
