use crate::model::User;
use crate::POOL;
use chrono::Utc;
use diesel::prelude::*;
use tokio::task;

pub async fn get_user_by_id(lookup_id: i32) -> QueryResult<Option<User>> {
    let mut conn = crate::db::connection(&POOL)?;
    task::spawn_blocking(move || {
        use crate::schema::users::dsl::*;
        users
            .filter(id.eq(lookup_id))
            .first::<User>(&mut conn)
            .optional()
    })
    .await
    .unwrap()
}

// (email, organization_id) is the identity pair; the same address may be a
// different account in every organization.
pub async fn find_by_email_in_org(
    lookup_email: String,
    org_id: i32,
) -> QueryResult<Option<User>> {
    let mut conn = crate::db::connection(&POOL)?;
    task::spawn_blocking(move || {
        use crate::schema::users::dsl::*;
        users
            .filter(email.eq(lookup_email))
            .filter(organization_id.eq(org_id))
            .first::<User>(&mut conn)
            .optional()
    })
    .await
    .unwrap()
}

// Global lookup is reserved for super_admin login; the caller rejects any
// other role resolved this way.
pub async fn find_by_email_global(lookup_email: String) -> QueryResult<Option<User>> {
    let mut conn = crate::db::connection(&POOL)?;
    task::spawn_blocking(move || {
        use crate::schema::users::dsl::*;
        users
            .filter(email.eq(lookup_email))
            .first::<User>(&mut conn)
            .optional()
    })
    .await
    .unwrap()
}

pub async fn touch_last_login(user_id: i32) {
    let Ok(mut conn) = POOL.get() else {
        tracing::error!("could not get a database connection from the pool");
        return;
    };
    let result = task::spawn_blocking(move || {
        use crate::schema::users::dsl::*;
        diesel::update(users.filter(id.eq(user_id)))
            .set(last_login_at.eq(Some(Utc::now())))
            .execute(&mut conn)
    })
    .await
    .unwrap();
    if let Err(e) = result {
        tracing::error!(error = ?e, user_id, "failed to update last login timestamp");
    }
}
