use std::{collections::HashMap, fs, io, path::PathBuf, sync::Arc};

use chrono::Utc;
use parking_lot::Mutex;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};

use crate::error::ApiError;

/// The three persisted collections. Each one is serialized as a single JSON
/// array under a fixed key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Rooms,
    Guests,
    Bookings,
}

impl Collection {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Rooms => "hotel_rooms",
            Self::Guests => "hotel_guests",
            Self::Bookings => "hotel_bookings",
        }
    }

    /// Default records written the first time a collection is read while
    /// absent or unreadable.
    fn seed(self) -> Value {
        match self {
            Self::Rooms => json!([
                { "id": 1, "number": "101", "type": "Single", "price": 99.0, "status": "available", "capacity": 2, "amenities": ["WiFi", "TV"] },
                { "id": 2, "number": "102", "type": "Single", "price": 99.0, "status": "available", "capacity": 2, "amenities": ["WiFi", "TV"] },
                { "id": 3, "number": "201", "type": "Double", "price": 149.0, "status": "available", "capacity": 4, "amenities": ["WiFi", "TV", "AC"] },
                { "id": 4, "number": "202", "type": "Double", "price": 149.0, "status": "occupied", "capacity": 4, "amenities": ["WiFi", "TV", "AC"] },
                { "id": 5, "number": "301", "type": "Suite", "price": 299.0, "status": "available", "capacity": 6, "amenities": ["WiFi", "TV", "AC", "Mini Bar"] }
            ]),
            Self::Guests => json!([
                { "id": 1, "name": "John Doe", "email": "john@email.com", "phone": "+1234567890", "nationality": "USA", "idDocument": "PAS123456", "createdAt": Utc::now() },
                { "id": 2, "name": "Jane Smith", "email": "jane@email.com", "phone": "+1234567891", "nationality": "Canada", "idDocument": "PAS123457", "createdAt": Utc::now() },
                { "id": 3, "name": "Mike Johnson", "email": "mike@email.com", "phone": "+1234567892", "nationality": "UK", "idDocument": "PAS123458", "createdAt": Utc::now() }
            ]),
            Self::Bookings => json!([
                {
                    "id": 1,
                    "guestId": 1,
                    "roomId": 4,
                    "checkIn": "2024-01-15",
                    "checkOut": "2024-01-20",
                    "status": "confirmed",
                    "totalPrice": 745.0,
                    "numberOfGuests": 2,
                    "specialRequests": "Early check-in requested",
                    "createdAt": Utc::now()
                }
            ]),
        }
    }
}

/// Key-value store persisted as one JSON document on disk. Every mutation
/// rewrites the whole document; there is no finer-grained durability. Each
/// call locks the map, so a single read or write is all-or-nothing, but a
/// read-modify-write across two calls can still lose updates if interleaved.
#[derive(Clone)]
pub struct JsonStore {
    path: Option<PathBuf>,
    entries: Arc<Mutex<HashMap<String, Value>>>,
}

impl JsonStore {
    /// Opens (or lazily creates) the backing file. An unreadable file is
    /// treated the same as a missing one: collections reseed on first read.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    log::warn!("Discarding corrupt store file {}: {err}", path.display());
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        Self {
            path: Some(path),
            entries: Arc::new(Mutex::new(entries)),
        }
    }

    /// Store with no backing file, used by tests.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns all records of a collection, writing the seed dataset first
    /// if the collection is absent or does not deserialize as a list of
    /// records. Seeds are written at most once.
    pub fn read<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>, ApiError> {
        let mut entries = self.entries.lock();
        if let Some(value) = entries.get(collection.key()) {
            if let Ok(records) = serde_json::from_value::<Vec<T>>(value.clone()) {
                return Ok(records);
            }
            log::warn!("Reseeding unreadable collection {}", collection.key());
        }
        let seeded = collection.seed();
        entries.insert(collection.key().to_string(), seeded.clone());
        self.flush(&entries)?;
        serde_json::from_value(seeded).map_err(invalid_data)
    }

    /// Replaces the whole collection in a single write.
    pub fn write<T: Serialize>(&self, collection: Collection, records: &[T]) -> Result<(), ApiError> {
        let value = serde_json::to_value(records).map_err(invalid_data)?;
        let mut entries = self.entries.lock();
        entries.insert(collection.key().to_string(), value);
        self.flush(&entries)
    }

    fn flush(&self, entries: &HashMap<String, Value>) -> Result<(), ApiError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let raw = serde_json::to_string_pretty(entries).map_err(invalid_data)?;
        fs::write(path, raw)?;
        Ok(())
    }
}

fn invalid_data(err: serde_json::Error) -> ApiError {
    ApiError::Storage(io::Error::new(io::ErrorKind::InvalidData, err))
}
