use crate::helper_model;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

pub fn bad_request(err_msg: &str) -> Result<(warp::reply::Response,), Rejection> {
    let msg = helper_model::ErrorResponse {
        title: String::from("Bad Request"),
        message: err_msg.to_string(),
    };
    Ok::<_, Rejection>((warp::reply::with_status(
        warp::reply::json(&msg),
        StatusCode::BAD_REQUEST,
    )
    .into_response(),))
}

// One message for "no such account" and "wrong password" alike, so the
// endpoint cannot be used to enumerate accounts.
pub fn invalid_credentials() -> Result<(warp::reply::Response,), Rejection> {
    let msg = helper_model::ErrorResponse {
        title: String::from("Unauthorized"),
        message: String::from("Invalid email or password"),
    };
    Ok((warp::reply::with_status(
        warp::reply::json(&msg),
        StatusCode::UNAUTHORIZED,
    )
    .into_response(),))
}

pub fn organization_required() -> Result<(warp::reply::Response,), Rejection> {
    let msg = helper_model::ErrorResponse {
        title: String::from("Unauthorized"),
        message: String::from("Organization required for login"),
    };
    Ok((warp::reply::with_status(
        warp::reply::json(&msg),
        StatusCode::UNAUTHORIZED,
    )
    .into_response(),))
}

// Used for every missing/expired/stale session. Deliberately does not say
// which of those it was.
pub fn unauthorized() -> Result<(warp::reply::Response,), Rejection> {
    let msg = helper_model::ErrorResponse {
        title: String::from("Unauthorized"),
        message: String::from("Authentication required"),
    };
    Ok((warp::reply::with_status(
        warp::reply::json(&msg),
        StatusCode::UNAUTHORIZED,
    )
    .into_response(),))
}

pub fn permission_denied() -> Result<(warp::reply::Response,), Rejection> {
    let msg = helper_model::ErrorResponse {
        title: String::from("Permission Denied"),
        message: String::from("You do not have permission to perform this action."),
    };
    Ok((warp::reply::with_status(
        warp::reply::json(&msg),
        StatusCode::FORBIDDEN,
    )
    .into_response(),))
}

// Tenant-isolation failure: authenticated, but the resource belongs to a
// different organization.
pub fn wrong_tenant() -> Result<(warp::reply::Response,), Rejection> {
    let msg = helper_model::ErrorResponse {
        title: String::from("Permission Denied"),
        message: String::from("You do not have access to this organization's resources."),
    };
    Ok((warp::reply::with_status(
        warp::reply::json(&msg),
        StatusCode::FORBIDDEN,
    )
    .into_response(),))
}

pub fn not_found(what: &str) -> Result<(warp::reply::Response,), Rejection> {
    let msg = helper_model::ErrorResponse {
        title: String::from("Not Found"),
        message: what.to_owned() + " not found",
    };
    Ok((warp::reply::with_status(
        warp::reply::json(&msg),
        StatusCode::NOT_FOUND,
    )
    .into_response(),))
}

pub fn conflict(err_msg: &str) -> Result<(warp::reply::Response,), Rejection> {
    let msg = helper_model::ErrorResponse {
        title: String::from("Conflict"),
        message: err_msg.to_string(),
    };
    Ok((warp::reply::with_status(
        warp::reply::json(&msg),
        StatusCode::CONFLICT,
    )
    .into_response(),))
}

pub fn illegal_transition(from: &str, to: &str) -> Result<(warp::reply::Response,), Rejection> {
    let msg_txt = "Status cannot change from ".to_owned() + from + " to " + to + ".";
    let msg = helper_model::ErrorResponse {
        title: String::from("Illegal Status Change"),
        message: msg_txt,
    };
    Ok((warp::reply::with_status(
        warp::reply::json(&msg),
        StatusCode::CONFLICT,
    )
    .into_response(),))
}

pub fn internal_server_error_response() -> Result<(warp::reply::Response,), Rejection> {
    let msg = helper_model::ErrorResponse {
        title: String::from("Internal Server Error"),
        message: String::from("Please try again later."),
    };
    Ok::<_, Rejection>((warp::reply::with_status(
        warp::reply::json(&msg),
        StatusCode::INTERNAL_SERVER_ERROR,
    )
    .into_response(),))
}

pub fn response_with_obj<T>(
    obj: T,
    status_code: StatusCode,
) -> Result<(warp::reply::Response,), Rejection>
where
    T: serde::Serialize,
{
    Ok((warp::reply::with_status(warp::reply::json(&obj), status_code).into_response(),))
}
