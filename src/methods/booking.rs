use crate::model::ServiceArea;
use crate::POOL;
use diesel::prelude::*;
use rand::Rng;
use tokio::task::spawn_blocking;

// Booking numbers are what customers read over the phone: short, uppercase,
// unique across the whole platform.
pub async fn generate_unique_booking_number() -> QueryResult<String> {
    let charset: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

    loop {
        let suffix: String = {
            let mut rng = rand::rng();
            (0..8)
                .map(|_| {
                    let idx = rng.random_range(0..charset.len());
                    charset[idx] as char
                })
                .collect()
        };
        let candidate = format!("BK-{}", suffix);

        let check = candidate.clone();
        let mut conn = crate::db::connection(&POOL)?;
        let exists = spawn_blocking(move || {
            diesel::select(diesel::dsl::exists(
                crate::schema::bookings::table
                    .filter(crate::schema::bookings::booking_number.eq(&check)),
            ))
            .get_result::<bool>(&mut conn)
        })
        .await
        .unwrap()?;

        if !exists {
            return Ok(candidate);
        }
    }
}

// Service areas are the source of truth for the delivery fee. No active row
// for the ZIP means the organization does not deliver there.
pub async fn service_area_for_zip(org_id: i32, zip: String) -> QueryResult<Option<ServiceArea>> {
    let mut conn = crate::db::connection(&POOL)?;
    spawn_blocking(move || {
        use crate::schema::service_areas::dsl::*;
        service_areas
            .filter(organization_id.eq(org_id))
            .filter(zip_code.eq(zip))
            .filter(is_active.eq(true))
            .first::<ServiceArea>(&mut conn)
            .optional()
    })
    .await
    .unwrap()
}
