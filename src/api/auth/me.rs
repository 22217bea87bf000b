use crate::helper_model::SessionError;
use crate::methods;
use warp::http::StatusCode;
use warp::{Filter, Reply};

// Re-fetches the user from storage on every call, so role/org changes made
// elsewhere are visible within the lifetime of an existing session.
pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path!("auth" / "me")
        .and(warp::get())
        .and(warp::cookie::optional::<String>(
            methods::sessions::SESSION_COOKIE,
        ))
        .and_then(move |cookie: Option<String>| async move {
            let user = match methods::sessions::authenticate(cookie).await {
                Ok(user) => user,
                Err(SessionError::Db) => {
                    return methods::standard_replies::internal_server_error_response();
                }
                Err(_) => return methods::standard_replies::unauthorized(),
            };
            methods::standard_replies::response_with_obj(user.to_publish_user(), StatusCode::OK)
        })
}
