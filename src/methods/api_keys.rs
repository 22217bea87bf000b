use crate::model::ApiKey;
use crate::POOL;
use chrono::Utc;
use diesel::prelude::*;
use rand::RngCore;
use tokio::task::spawn_blocking;

// Keys are stored as blake3 hashes; the raw value crosses the wire exactly
// once, in the creation response. The prefix is kept for dashboard display.
pub struct GeneratedKey {
    pub raw: String,
    pub prefix: String,
    pub hash: String,
}

pub fn generate_api_key() -> GeneratedKey {
    let mut bytes = [0u8; 24];
    rand::rng().fill_bytes(&mut bytes);
    let raw = format!("dk_live_{}", hex::encode(bytes));
    GeneratedKey {
        prefix: raw[..15].to_string(),
        hash: blake3::hash(raw.as_bytes()).to_hex().to_string(),
        raw,
    }
}

pub fn hash_api_key(raw: &str) -> String {
    blake3::hash(raw.as_bytes()).to_hex().to_string()
}

pub async fn authenticate_api_key(raw: String) -> QueryResult<Option<ApiKey>> {
    let lookup_hash = hash_api_key(&raw);
    let mut conn = crate::db::connection(&POOL)?;
    let found = spawn_blocking(move || {
        use crate::schema::api_keys::dsl::*;
        api_keys
            .filter(key_hash.eq(lookup_hash))
            .first::<ApiKey>(&mut conn)
            .optional()
    })
    .await
    .unwrap()?;

    if let Some(ref key) = found {
        let key_id = key.id;
        // last_used_at is best effort; a pool hiccup must not fail the auth.
        let Ok(mut conn) = POOL.get() else {
            tracing::warn!(key_id, "could not get a database connection from the pool");
            return Ok(found);
        };
        let touched = spawn_blocking(move || {
            use crate::schema::api_keys::dsl::*;
            diesel::update(api_keys.filter(id.eq(key_id)))
                .set(last_used_at.eq(Some(Utc::now())))
                .execute(&mut conn)
        })
        .await
        .unwrap();
        if let Err(e) = touched {
            tracing::warn!(error = ?e, key_id, "failed to touch api key last_used_at");
        }
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_key_shape() {
        let key = generate_api_key();
        assert!(key.raw.starts_with("dk_live_"));
        assert_eq!(key.raw.len(), 8 + 48);
        assert!(key.raw.starts_with(&key.prefix));
        assert_eq!(key.hash.len(), 64);
    }

    #[test]
    fn hash_is_deterministic_and_key_dependent() {
        let key = generate_api_key();
        assert_eq!(hash_api_key(&key.raw), key.hash);
        let other = generate_api_key();
        assert_ne!(key.hash, other.hash);
    }
}
