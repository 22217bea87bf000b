mod create_organization;
mod get_organization;
mod invite_user;
mod list_organization_users;
mod list_organizations;
mod remove_organization;
mod update_organization;

use warp::Filter;

pub fn routes() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    list_organizations::main()
        .or(create_organization::main())
        .or(get_organization::main())
        .or(update_organization::main())
        .or(remove_organization::main())
        .or(list_organization_users::main())
        .or(invite_user::main())
}
