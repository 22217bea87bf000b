use crate::methods;
use warp::http::StatusCode;
use warp::reply::with_status;
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path!("auth" / "logout")
        .and(warp::post())
        .and(warp::cookie::optional::<String>(
            methods::sessions::SESSION_COOKIE,
        ))
        .and_then(move |cookie: Option<String>| async move {
            if let Some(cookie) = cookie {
                methods::sessions::destroy_session(cookie).await;
            }
            let msg = serde_json::json!({"message": "Logged out"});
            Ok::<_, warp::Rejection>((methods::sessions::wrap_reply_with_cookie(
                methods::sessions::clear_session_cookie(),
                with_status(warp::reply::json(&msg), StatusCode::OK),
            ),))
        })
}
