mod create;
mod list;
mod remove;
mod update;

use warp::Filter;

pub fn routes() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    list::main()
        .or(create::main())
        .or(update::main())
        .or(remove::main())
}
