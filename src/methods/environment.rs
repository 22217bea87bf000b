use std::env;

pub fn is_production() -> bool {
    env::var("APP_ENV")
        .map(|v| v == "production")
        .unwrap_or(false)
}

// Falls back to a fixed development key so local setups work without a
// .env file. main() refuses to start in production without the real one.
pub fn session_secret() -> Vec<u8> {
    env::var("SESSION_SECRET")
        .unwrap_or_else(|_| String::from("dev-only-secret"))
        .into_bytes()
}
