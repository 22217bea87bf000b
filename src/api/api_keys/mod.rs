mod create;
mod list;
mod remove;

use warp::Filter;

pub fn routes() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    list::main().or(create::main()).or(remove::main())
}
