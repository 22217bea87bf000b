mod current;
mod get_by_slug;

use warp::Filter;

pub fn routes() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    current::main().or(get_by_slug::main())
}
