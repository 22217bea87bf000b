use crate::helper_model::WebhookPayload;
use crate::model::{Booking, BookingStatus, Webhook};
use crate::POOL;
use chrono::Utc;
use diesel::prelude::*;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tokio::task::spawn_blocking;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "X-Webhook-Signature";

pub const EVENT_BOOKING_CREATED: &str = "booking.created";
pub const EVENT_BOOKING_UPDATED: &str = "booking.updated";
pub const EVENT_BOOKING_CANCELLED: &str = "booking.cancelled";
pub const EVENT_BOOKING_COMPLETED: &str = "booking.completed";

pub fn is_known_event(event: &str) -> bool {
    matches!(
        event,
        EVENT_BOOKING_CREATED
            | EVENT_BOOKING_UPDATED
            | EVENT_BOOKING_CANCELLED
            | EVENT_BOOKING_COMPLETED
    )
}

// The terminal events fire only on the transition into the terminal status.
// Editing notes on an already-cancelled booking is just an update; receivers
// must never see booking.cancelled twice for the same booking.
pub fn booking_update_event(previous: BookingStatus, updated: BookingStatus) -> &'static str {
    if previous == updated {
        return EVENT_BOOKING_UPDATED;
    }
    match updated {
        BookingStatus::Cancelled => EVENT_BOOKING_CANCELLED,
        BookingStatus::Completed => EVENT_BOOKING_COMPLETED,
        _ => EVENT_BOOKING_UPDATED,
    }
}

// HMAC-SHA256 over the exact JSON body, hex-encoded. Receivers verify with
// the per-webhook secret.
pub fn sign_payload(secret: &[u8], body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

pub fn generate_webhook_secret() -> String {
    use rand::RngCore;
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

// Fire-and-forget delivery on a spawned task. Failures are logged; there is
// no retry queue.
pub fn dispatch_booking_event(event: &'static str, booking: Booking) {
    tokio::spawn(async move {
        let org_id = booking.organization_id;
        let conn = POOL.get();
        let Ok(mut conn) = conn else {
            tracing::error!(org_id, event, "no db connection for webhook dispatch");
            return;
        };
        let hooks = spawn_blocking(move || {
            use crate::schema::webhooks::dsl::*;
            webhooks
                .filter(organization_id.eq(org_id))
                .filter(is_active.eq(true))
                .load::<Webhook>(&mut conn)
        })
        .await
        .unwrap();

        let hooks = match hooks {
            Ok(hooks) => hooks,
            Err(e) => {
                tracing::error!(error = ?e, org_id, event, "failed to load webhooks");
                return;
            }
        };

        let payload = WebhookPayload {
            event: event.to_string(),
            timestamp: Utc::now(),
            data: booking,
        };
        let body = match serde_json::to_vec(&payload) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(error = ?e, event, "failed to serialize webhook payload");
                return;
            }
        };

        let client = reqwest::Client::new();
        for hook in hooks
            .into_iter()
            .filter(|h| h.events.iter().any(|e| e == event))
        {
            let signature = sign_payload(hook.secret.as_bytes(), &body);
            let result = client
                .post(&hook.url)
                .header("Content-Type", "application/json")
                .header(SIGNATURE_HEADER, signature)
                .body(body.clone())
                .send()
                .await;
            match result {
                Ok(resp) if resp.status().is_success() => {
                    tracing::info!(webhook_id = hook.id, event, "webhook delivered");
                }
                Ok(resp) => {
                    tracing::warn!(
                        webhook_id = hook.id,
                        event,
                        status = %resp.status(),
                        "webhook endpoint returned an error"
                    );
                }
                Err(e) => {
                    tracing::warn!(webhook_id = hook.id, event, error = ?e, "webhook delivery failed");
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_matches_rfc4231_vector() {
        // RFC 4231 test case 2
        let sig = sign_payload(b"Jefe", b"what do ya want for nothing?");
        assert_eq!(
            sig,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn signature_depends_on_secret() {
        let body = br#"{"event":"booking.created"}"#;
        assert_ne!(sign_payload(b"a", body), sign_payload(b"b", body));
    }

    #[test]
    fn known_events() {
        assert!(is_known_event("booking.created"));
        assert!(is_known_event("booking.completed"));
        assert!(!is_known_event("booking.deleted"));
    }

    #[test]
    fn terminal_events_fire_only_on_the_transition() {
        assert_eq!(
            booking_update_event(BookingStatus::PickedUp, BookingStatus::Completed),
            EVENT_BOOKING_COMPLETED
        );
        assert_eq!(
            booking_update_event(BookingStatus::Pending, BookingStatus::Cancelled),
            EVENT_BOOKING_CANCELLED
        );
        // Re-saving a terminal booking (notes edit, same-status re-submit)
        // is an update, not a second terminal event.
        assert_eq!(
            booking_update_event(BookingStatus::Completed, BookingStatus::Completed),
            EVENT_BOOKING_UPDATED
        );
        assert_eq!(
            booking_update_event(BookingStatus::Cancelled, BookingStatus::Cancelled),
            EVENT_BOOKING_UPDATED
        );
        assert_eq!(
            booking_update_event(BookingStatus::Pending, BookingStatus::Confirmed),
            EVENT_BOOKING_UPDATED
        );
    }

    #[test]
    fn secret_is_64_hex_chars() {
        let secret = generate_webhook_secret();
        assert_eq!(secret.len(), 64);
        assert!(secret.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
