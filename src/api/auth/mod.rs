mod accept_invitation;
mod login;
mod logout;
mod me;
mod register_customer;

use warp::Filter;

pub fn routes() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    login::main()
        .or(register_customer::main())
        .or(logout::main())
        .or(me::main())
        .or(accept_invitation::main())
}
