use crate::methods::environment;
use hmac::{Hmac, Mac};
use rand::Rng;
use rand::RngCore;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

// Invitation tokens are random-part.signature, signed with SESSION_SECRET,
// so a leaked database dump alone cannot be used to forge acceptances for
// tokens that were never issued.
pub fn generate_invitation_token() -> String {
    let mut bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    let random_part = hex::encode(bytes);
    let signature = sign_part(&random_part);
    format!("{}.{}", random_part, signature)
}

fn sign_part(random_part: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(&environment::session_secret())
        .expect("HMAC accepts any key length");
    mac.update(random_part.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

pub fn token_signature_valid(token: &str) -> bool {
    let Some((random_part, signature)) = token.split_once('.') else {
        return false;
    };
    sign_part(random_part) == signature
}

// Issued once in the invite response; the invitee replaces it via the
// acceptance endpoint.
pub fn generate_temporary_password() -> String {
    let charset: &[u8] = b"abcdefghijkmnpqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ23456789";
    let mut rng = rand::rng();
    (0..12)
        .map(|_| {
            let idx = rng.random_range(0..charset.len());
            charset[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trips() {
        let token = generate_invitation_token();
        assert!(token_signature_valid(&token));
    }

    #[test]
    fn tampered_token_is_rejected() {
        let token = generate_invitation_token();
        let mut tampered = token.clone();
        tampered.replace_range(0..1, if token.starts_with('0') { "1" } else { "0" });
        assert!(!token_signature_valid(&tampered));
        assert!(!token_signature_valid("no-separator"));
    }

    #[test]
    fn temporary_password_is_long_enough() {
        let pw = generate_temporary_password();
        assert_eq!(pw.len(), 12);
        assert!(crate::methods::validation::is_valid_password(&pw));
    }
}
