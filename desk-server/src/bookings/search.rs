//! Booking search
//!
//! Substring lookup over reference code, customer name and phone, used by
//! the find-booking box. Scoped to the store, never to the visible window.

use shared::AppResult;

use crate::core::ServerState;
use crate::db::repository::booking;

/// Result cap; the UI shows a short newest-first list, not a report
pub const SEARCH_LIMIT: i64 = 50;

/// Run a booking search for the desk
///
/// An empty or whitespace-only query returns nothing rather than the whole
/// store.
pub async fn run(
    state: &ServerState,
    store_id: &str,
    query: &str,
) -> AppResult<Vec<shared::models::Booking>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }
    let rows = booking::search(&state.pool, store_id, query, SEARCH_LIMIT).await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::BookingCreate;

    async fn test_state() -> ServerState {
        let config = crate::core::Config {
            work_dir: "./ignored".into(),
            http_port: 0,
            database_path: None,
            store_id: "s1".into(),
            jwt: crate::auth::JwtConfig::default(),
            environment: "development".into(),
            log_level: "info".into(),
            default_admin_email: "admin@losmen.local".into(),
            default_admin_password: Some("secret".into()),
        };
        ServerState::initialize_in_memory(&config).await.unwrap()
    }

    async fn seed(state: &ServerState, name: &str, phone: Option<&str>, bid: Option<&str>) {
        let room = crate::db::repository::room::create(
            &state.pool,
            "s1",
            shared::models::RoomCreate {
                name: format!("room-{}", uuid::Uuid::new_v4()),
                status: None,
                sort_order: None,
            },
        )
        .await
        .unwrap();
        booking::create(
            &state.pool,
            "s1",
            BookingCreate {
                room_id: room.id,
                date: "2024-06-01".parse().unwrap(),
                duration: 1,
                customer_name: name.into(),
                phone: phone.map(String::from),
                bid: bid.map(String::from),
                room_price: 150_000,
                total_price: 150_000,
                note: None,
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_empty_query_returns_nothing() {
        let state = test_state().await;
        seed(&state, "Budi Santoso", None, None).await;
        assert!(run(&state, "s1", "").await.unwrap().is_empty());
        assert!(run(&state, "s1", "   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_matches_name_phone_and_reference() {
        let state = test_state().await;
        seed(&state, "Budi Santoso", Some("081234567890"), Some("LSM-001")).await;
        seed(&state, "Siti Rahma", Some("089876543210"), Some("LSM-002")).await;

        let by_name = run(&state, "s1", "budi").await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].customer_name, "Budi Santoso");

        let by_phone = run(&state, "s1", "8987").await.unwrap();
        assert_eq!(by_phone.len(), 1);
        assert_eq!(by_phone[0].customer_name, "Siti Rahma");

        let by_bid = run(&state, "s1", "LSM-").await.unwrap();
        assert_eq!(by_bid.len(), 2);
    }

    #[tokio::test]
    async fn test_no_match() {
        let state = test_state().await;
        seed(&state, "Budi Santoso", None, None).await;
        assert!(run(&state, "s1", "zzz").await.unwrap().is_empty());
    }
}
