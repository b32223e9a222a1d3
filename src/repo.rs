use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    error::ApiError,
    models::{Booking, BookingPatch, Guest, GuestPatch, Room, RoomPatch},
    store::{Collection, JsonStore},
};

/// A record that lives in one of the persisted collections. Patches are
/// typed per entity, so payloads can never smuggle in `id` or `createdAt`.
pub trait Entity: Clone + Default + Serialize + DeserializeOwned {
    type Patch;

    const COLLECTION: Collection;
    const NAME: &'static str;

    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
    fn set_created_at(&mut self, at: DateTime<Utc>);
    fn set_updated_at(&mut self, at: DateTime<Utc>);
    fn apply(&mut self, patch: Self::Patch);

    /// Hook for server-assigned fields, run once on creation.
    fn on_create(&mut self) {}
}

/// CRUD over a single collection. Every operation reads the full collection,
/// mutates it, and writes it back in one store call.
pub struct Repo<'a, T> {
    store: &'a JsonStore,
    _entity: std::marker::PhantomData<T>,
}

impl<'a, T: Entity> Repo<'a, T> {
    pub fn new(store: &'a JsonStore) -> Self {
        Self {
            store,
            _entity: std::marker::PhantomData,
        }
    }

    pub fn list(&self) -> Result<Vec<T>, ApiError> {
        self.store.read(T::COLLECTION)
    }

    /// Applies the patch over a blank record, assigns the next ID
    /// (max existing + 1, or 1 for an empty collection) and stamps both
    /// timestamps.
    pub fn create(&self, patch: T::Patch) -> Result<T, ApiError> {
        let mut records: Vec<T> = self.store.read(T::COLLECTION)?;
        let mut record = T::default();
        record.apply(patch);
        record.on_create();
        let next_id = records.iter().map(Entity::id).max().unwrap_or(0) + 1;
        record.set_id(next_id);
        let now = Utc::now();
        record.set_created_at(now);
        record.set_updated_at(now);
        records.push(record.clone());
        self.store.write(T::COLLECTION, &records)?;
        Ok(record)
    }

    /// Shallow merge: only fields present in the patch change, and
    /// `updatedAt` is refreshed.
    pub fn update(&self, id: i64, patch: T::Patch) -> Result<T, ApiError> {
        let mut records: Vec<T> = self.store.read(T::COLLECTION)?;
        let record = records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or(ApiError::NotFound(T::NAME))?;
        record.apply(patch);
        record.set_updated_at(Utc::now());
        let updated = record.clone();
        self.store.write(T::COLLECTION, &records)?;
        Ok(updated)
    }

    /// Deletes by ID alone; a miss is detected by the collection length
    /// staying the same.
    pub fn delete(&self, id: i64) -> Result<(), ApiError> {
        let mut records: Vec<T> = self.store.read(T::COLLECTION)?;
        let before = records.len();
        records.retain(|record| record.id() != id);
        if records.len() == before {
            return Err(ApiError::NotFound(T::NAME));
        }
        self.store.write(T::COLLECTION, &records)?;
        Ok(())
    }
}

macro_rules! entity_timestamps {
    () => {
        fn id(&self) -> i64 {
            self.id
        }
        fn set_id(&mut self, id: i64) {
            self.id = id;
        }
        fn set_created_at(&mut self, at: DateTime<Utc>) {
            self.created_at = Some(at);
        }
        fn set_updated_at(&mut self, at: DateTime<Utc>) {
            self.updated_at = Some(at);
        }
    };
}

impl Entity for Room {
    type Patch = RoomPatch;

    const COLLECTION: Collection = Collection::Rooms;
    const NAME: &'static str = "Room";

    entity_timestamps!();

    fn apply(&mut self, patch: RoomPatch) {
        if let Some(number) = patch.number {
            self.number = number;
        }
        if let Some(room_type) = patch.room_type {
            self.room_type = room_type;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(capacity) = patch.capacity {
            self.capacity = capacity;
        }
        if let Some(amenities) = patch.amenities {
            self.amenities = amenities;
        }
    }
}

impl Entity for Guest {
    type Patch = GuestPatch;

    const COLLECTION: Collection = Collection::Guests;
    const NAME: &'static str = "Guest";

    entity_timestamps!();

    fn apply(&mut self, patch: GuestPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(nationality) = patch.nationality {
            self.nationality = Some(nationality);
        }
    }

    fn on_create(&mut self) {
        let digits = rand::thread_rng().gen_range(100_000..1_000_000);
        self.id_document = Some(format!("PAS{digits}"));
    }
}

impl Entity for Booking {
    type Patch = BookingPatch;

    const COLLECTION: Collection = Collection::Bookings;
    const NAME: &'static str = "Booking";

    entity_timestamps!();

    fn apply(&mut self, patch: BookingPatch) {
        if let Some(guest_id) = patch.guest_id {
            self.guest_id = guest_id;
        }
        if let Some(room_id) = patch.room_id {
            self.room_id = room_id;
        }
        if let Some(check_in) = patch.check_in {
            self.check_in = check_in;
        }
        if let Some(check_out) = patch.check_out {
            self.check_out = check_out;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(number_of_guests) = patch.number_of_guests {
            self.number_of_guests = number_of_guests;
        }
        if let Some(special_requests) = patch.special_requests {
            self.special_requests = Some(special_requests);
        }
        if let Some(total_price) = patch.total_price {
            self.total_price = total_price;
        }
    }
}
