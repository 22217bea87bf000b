mod admin;
mod api_keys;
mod auth;
mod bookings;
mod dumpster_types;
mod inventory;
mod organizations;
mod payments;
mod quotes;
mod service_areas;
mod settings;
mod v1;
mod webhooks;

use warp::Filter;

pub fn api() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("api").and(
        auth::routes()
            .or(organizations::routes())
            .or(bookings::routes())
            .or(inventory::routes())
            .or(dumpster_types::routes())
            .or(quotes::routes())
            .or(payments::routes())
            .or(settings::routes())
            .or(service_areas::routes())
            .or(api_keys::routes())
            .or(webhooks::routes())
            .or(admin::routes())
            .or(v1::routes()),
    )
}
