mod create;
mod get;
mod list;
mod remove;
mod update;

use warp::Filter;

pub fn routes() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    list::main()
        .or(create::main())
        .or(get::main())
        .or(update::main())
        .or(remove::main())
}
