use crate::helper_model::SessionError;
use crate::methods::environment;
use crate::model::{NewSession, Session, User};
use crate::POOL;
use chrono::Utc;
use diesel::prelude::*;
use secrets::Secret;
use std::ops::Add;
use tokio::task;
use tokio::task::spawn_blocking;

// Deliberately not the framework default name, to reduce fingerprinting.
pub const SESSION_COOKIE: &str = "sessionId";
const SESSION_DAYS: i64 = 30;
const SESSION_MAX_AGE_SECS: i64 = SESSION_DAYS * 24 * 60 * 60;

async fn generate_unique_token() -> QueryResult<Vec<u8>> {
    loop {
        // Generate a secure random 32-byte token
        let token_vec = Secret::<[u8; 32]>::random(|s| s.to_vec());

        let token_to_return = token_vec.clone();

        let mut conn = crate::db::connection(&POOL)?;
        let token_exists = task::spawn_blocking(move || {
            diesel::select(diesel::dsl::exists(
                crate::schema::sessions::table
                    .filter(crate::schema::sessions::token.eq(token_vec)),
            ))
            .get_result::<bool>(&mut conn)
        })
        .await
        .unwrap()?;

        if !token_exists {
            return Ok(token_to_return);
        }
    }
}

pub async fn create_session(session_user_id: i32) -> QueryResult<Session> {
    let new_session = NewSession {
        user_id: session_user_id,
        token: generate_unique_token().await?,
        exp: Utc::now().add(chrono::Duration::days(SESSION_DAYS)),
    };
    let mut conn = crate::db::connection(&POOL)?;
    spawn_blocking(move || {
        use crate::schema::sessions::dsl::*;
        diesel::insert_into(sessions)
            .values(&new_session)
            .get_result::<Session>(&mut conn)
    })
    .await
    .unwrap()
}

// Session-fixation mitigation: the pre-auth session (if any) is deleted
// before the new one is inserted, and the caller only responds after the
// insert has returned, so a client never sees a logged-in response ahead
// of the durable session row.
pub async fn regenerate_session(
    old_cookie: Option<String>,
    session_user_id: i32,
) -> QueryResult<Session> {
    if let Some(old_cookie) = old_cookie {
        if let Ok(old_token) = hex::decode(old_cookie) {
            let mut conn = crate::db::connection(&POOL)?;
            let deleted = spawn_blocking(move || {
                use crate::schema::sessions::dsl::*;
                diesel::delete(sessions.filter(token.eq(old_token))).execute(&mut conn)
            })
            .await
            .unwrap();
            if let Err(e) = deleted {
                tracing::error!(error = ?e, "failed to delete pre-auth session row");
            }
        }
    }
    create_session(session_user_id).await
}

pub async fn destroy_session(cookie_value: String) {
    let Ok(token_bytes) = hex::decode(cookie_value) else {
        return;
    };
    let Ok(mut conn) = POOL.get() else {
        tracing::error!("could not get a database connection from the pool");
        return;
    };
    let result = spawn_blocking(move || {
        use crate::schema::sessions::dsl::*;
        diesel::delete(sessions.filter(token.eq(token_bytes))).execute(&mut conn)
    })
    .await
    .unwrap();
    if let Err(e) = result {
        tracing::error!(error = ?e, "failed to delete session row");
    }
}

// The authentication guard. Re-fetches the user row on every call so the
// role/org always reflect current database state. A session pointing at a
// user that no longer exists is deleted here (self-healing) and treated
// as invalid.
pub async fn authenticate(cookie: Option<String>) -> Result<User, SessionError> {
    let cookie_value = cookie.ok_or(SessionError::Missing)?;
    let token_bytes = hex::decode(&cookie_value).map_err(|_| SessionError::Invalid)?;

    let token_clone = token_bytes.clone();
    let mut conn = POOL.get().map_err(|_| SessionError::Db)?;
    let session_row = spawn_blocking(move || {
        use crate::schema::sessions::dsl::*;
        sessions
            .filter(token.eq(token_clone))
            .first::<Session>(&mut conn)
            .optional()
    })
    .await
    .unwrap()
    .map_err(|_| SessionError::Db)?;

    let Some(session_row) = session_row else {
        return Err(SessionError::Invalid);
    };

    if session_row.exp < Utc::now() {
        destroy_session(cookie_value).await;
        return Err(SessionError::Invalid);
    }

    let user_row = crate::methods::user::get_user_by_id(session_row.user_id)
        .await
        .map_err(|_| SessionError::Db)?;

    match user_row {
        Some(user) => Ok(user),
        None => {
            destroy_session(cookie_value).await;
            Err(SessionError::Invalid)
        }
    }
}

pub fn session_cookie(session: &Session) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; SameSite=Strict; Path=/; Max-Age={}",
        SESSION_COOKIE,
        hex::encode(&session.token),
        SESSION_MAX_AGE_SECS
    );
    if environment::is_production() {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn clear_session_cookie() -> String {
    let mut cookie = format!(
        "{}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0",
        SESSION_COOKIE
    );
    if environment::is_production() {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn wrap_reply_with_cookie(
    cookie_value: String,
    reply: impl warp::Reply,
) -> warp::reply::Response {
    use warp::Reply;
    warp::reply::with_header(reply, "Set-Cookie", cookie_value).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> Session {
        Session {
            id: 1,
            user_id: 9,
            token: vec![0xab; 32],
            exp: Utc::now(),
        }
    }

    #[test]
    fn cookie_carries_required_attributes() {
        let cookie = session_cookie(&sample_session());
        assert!(cookie.starts_with("sessionId="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Max-Age=2592000"));
        // APP_ENV unset in tests, so no Secure flag
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn cookie_value_is_hex_token() {
        let cookie = session_cookie(&sample_session());
        let value = cookie
            .split(';')
            .next()
            .unwrap()
            .strip_prefix("sessionId=")
            .unwrap()
            .to_string();
        assert_eq!(value, "ab".repeat(32));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let cookie = clear_session_cookie();
        assert!(cookie.starts_with("sessionId=;"));
        assert!(cookie.contains("Max-Age=0"));
    }
}
