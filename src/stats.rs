use crate::{
    error::ApiError,
    models::{Booking, DashboardStats, Guest, Room, BOOKING_CHECKED_IN, BOOKING_CONFIRMED, ROOM_AVAILABLE},
    store::{Collection, JsonStore},
};

/// Read-side projection over all three collections; never mutates state.
pub fn compute_stats(store: &JsonStore) -> Result<DashboardStats, ApiError> {
    let rooms: Vec<Room> = store.read(Collection::Rooms)?;
    let guests: Vec<Guest> = store.read(Collection::Guests)?;
    let bookings: Vec<Booking> = store.read(Collection::Bookings)?;

    let total_rooms = rooms.len();
    let available_rooms = rooms
        .iter()
        .filter(|room| room.status == ROOM_AVAILABLE)
        .count();
    let active_bookings = bookings
        .iter()
        .filter(|booking| {
            booking.status == BOOKING_CONFIRMED || booking.status == BOOKING_CHECKED_IN
        })
        .count();

    let occupancy_rate = if total_rooms > 0 {
        let occupied = (total_rooms - available_rooms) as f64;
        format!("{:.1}", occupied / total_rooms as f64 * 100.0)
    } else {
        "0.0".to_string()
    };

    Ok(DashboardStats {
        total_rooms,
        available_rooms,
        total_guests: guests.len(),
        active_bookings,
        occupancy_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BOOKING_CANCELLED;

    #[test]
    fn seeded_collections_produce_expected_stats() {
        // seeds: 5 rooms with one occupied, 3 guests, 1 confirmed booking
        let store = JsonStore::in_memory();
        let stats = compute_stats(&store).unwrap();
        assert_eq!(stats.total_rooms, 5);
        assert_eq!(stats.available_rooms, 4);
        assert_eq!(stats.total_guests, 3);
        assert_eq!(stats.active_bookings, 1);
        assert_eq!(stats.occupancy_rate, "20.0");
    }

    #[test]
    fn cancelled_and_checked_out_bookings_are_inactive() {
        let store = JsonStore::in_memory();
        let mut bookings: Vec<Booking> = store.read(Collection::Bookings).unwrap();
        let mut cancelled = bookings[0].clone();
        cancelled.id = 2;
        cancelled.status = BOOKING_CANCELLED.to_string();
        bookings.push(cancelled);
        store.write(Collection::Bookings, &bookings).unwrap();

        let stats = compute_stats(&store).unwrap();
        assert_eq!(stats.active_bookings, 1);
    }

    #[test]
    fn empty_hotel_has_zero_occupancy() {
        let store = JsonStore::in_memory();
        store.write::<Room>(Collection::Rooms, &[]).unwrap();
        let stats = compute_stats(&store).unwrap();
        assert_eq!(stats.total_rooms, 0);
        assert_eq!(stats.occupancy_rate, "0.0");
    }

    #[test]
    fn stats_do_not_mutate_collections() {
        let store = JsonStore::in_memory();
        compute_stats(&store).unwrap();
        let rooms: Vec<Room> = store.read(Collection::Rooms).unwrap();
        let before = serde_json::to_value(&rooms).unwrap();
        compute_stats(&store).unwrap();
        let rooms: Vec<Room> = store.read(Collection::Rooms).unwrap();
        assert_eq!(before, serde_json::to_value(&rooms).unwrap());
    }
}
