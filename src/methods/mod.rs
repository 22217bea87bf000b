pub mod api_keys;
pub mod booking;
pub mod diesel_fn;
pub mod environment;
pub mod invitations;
pub mod policy;
pub mod pricing;
pub mod sessions;
pub mod standard_replies;
pub mod transitions;
pub mod user;
pub mod validation;
pub mod webhooks;
