use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const ROOM_AVAILABLE: &str = "available";
pub const ROOM_OCCUPIED: &str = "occupied";

pub const BOOKING_CONFIRMED: &str = "confirmed";
pub const BOOKING_CHECKED_IN: &str = "checked-in";
pub const BOOKING_CHECKED_OUT: &str = "checked-out";
pub const BOOKING_CANCELLED: &str = "cancelled";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: i64,
    pub number: String,
    #[serde(rename = "type")]
    pub room_type: String,
    pub price: f64,
    pub status: String,
    pub capacity: i64,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for Room {
    fn default() -> Self {
        Self {
            id: 0,
            number: String::new(),
            room_type: String::new(),
            price: 0.0,
            status: ROOM_AVAILABLE.to_string(),
            capacity: 0,
            amenities: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }
}

/// Partial room, applied field-by-field on create and update. `id` and
/// `createdAt` are deliberately not representable here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPatch {
    pub number: Option<String>,
    #[serde(rename = "type")]
    pub room_type: Option<String>,
    pub price: Option<f64>,
    pub status: Option<String>,
    pub capacity: Option<i64>,
    pub amenities: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_document: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// `idDocument` is assigned server-side on creation and cannot be patched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub nationality: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub guest_id: i64,
    pub room_id: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: String,
    pub number_of_guests: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    pub total_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for Booking {
    fn default() -> Self {
        Self {
            id: 0,
            guest_id: 0,
            room_id: 0,
            check_in: NaiveDate::default(),
            check_out: NaiveDate::default(),
            status: BOOKING_CONFIRMED.to_string(),
            number_of_guests: 1,
            special_requests: None,
            total_price: 0.0,
            created_at: None,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPatch {
    pub guest_id: Option<i64>,
    pub room_id: Option<i64>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub status: Option<String>,
    pub number_of_guests: Option<i64>,
    pub special_requests: Option<String>,
    pub total_price: Option<f64>,
}

/// Dashboard projection. `occupancyRate` is pre-formatted to one decimal,
/// `"0.0"` for an empty hotel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_rooms: usize,
    pub available_rooms: usize,
    pub total_guests: usize,
    pub active_bookings: usize,
    pub occupancy_rate: String,
}
