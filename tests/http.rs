use actix_web::{test, web, App};
use serde_json::{json, Value};

use hotelier::{api::ApiClient, routes, state::AppState, store::JsonStore};

fn fresh_state() -> AppState {
    AppState {
        api: ApiClient::mock(JsonStore::in_memory()),
    }
}

macro_rules! spawn_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(fresh_state()))
                .configure(routes::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn lists_seeded_rooms() {
    let app = spawn_app!();
    let response =
        test::call_service(&app, test::TestRequest::get().uri("/rooms").to_request()).await;
    assert!(response.status().is_success());
    let body: Value = test::read_body_json(response).await;
    let rooms = body["data"].as_array().unwrap();
    assert_eq!(rooms.len(), 5);
    assert_eq!(rooms[0]["number"], "101");
}

#[actix_web::test]
async fn creates_and_deletes_a_room() {
    let app = spawn_app!();

    let request = test::TestRequest::post()
        .uri("/rooms")
        .set_json(json!({ "number": "401", "type": "Suite", "price": 319.0, "capacity": 4 }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 201);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "Room created successfully");
    assert_eq!(body["data"]["id"], 6);
    assert_eq!(body["data"]["status"], "available");

    let request = test::TestRequest::delete().uri("/rooms/6").to_request();
    let response = test::call_service(&app, request).await;
    assert!(response.status().is_success());

    // second delete hits nothing
    let request = test::TestRequest::delete().uri("/rooms/6").to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 404);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "Room not found");
}

#[actix_web::test]
async fn rejects_room_with_missing_fields() {
    let app = spawn_app!();
    let request = test::TestRequest::post()
        .uri("/rooms")
        .set_json(json!({ "number": "401" }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 400);
    let body: Value = test::read_body_json(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Missing required fields"));
}

#[actix_web::test]
async fn updates_only_patched_fields() {
    let app = spawn_app!();
    let request = test::TestRequest::put()
        .uri("/rooms/3")
        .set_json(json!({ "status": "occupied" }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert!(response.status().is_success());
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["data"]["status"], "occupied");
    assert_eq!(body["data"]["number"], "201");
    assert_eq!(body["data"]["price"], 149.0);
    assert!(body["data"]["updatedAt"].is_string());
}

#[actix_web::test]
async fn guest_creation_ignores_client_id_document() {
    let app = spawn_app!();
    let request = test::TestRequest::post()
        .uri("/guests")
        .set_json(json!({
            "name": "Ada Lovelace",
            "email": "ada@email.com",
            "phone": "+1234567899",
            "idDocument": "FORGED01"
        }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 201);
    let body: Value = test::read_body_json(response).await;
    let document = body["data"]["idDocument"].as_str().unwrap();
    assert!(document.starts_with("PAS"));
    assert_ne!(document, "FORGED01");
}

#[actix_web::test]
async fn booking_requires_checkout_after_checkin() {
    let app = spawn_app!();
    let request = test::TestRequest::post()
        .uri("/bookings")
        .set_json(json!({
            "guestId": 1,
            "roomId": 1,
            "checkIn": "2024-01-20",
            "checkOut": "2024-01-15"
        }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 400);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "Check-out date must be after check-in date");
}

#[actix_web::test]
async fn books_a_room() {
    let app = spawn_app!();
    let request = test::TestRequest::post()
        .uri("/bookings")
        .set_json(json!({
            "guestId": 2,
            "roomId": 3,
            "checkIn": "2024-02-01",
            "checkOut": "2024-02-06",
            "totalPrice": 745.0,
            "numberOfGuests": 2
        }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 201);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["data"]["id"], 2);
    assert_eq!(body["data"]["status"], "confirmed");
    assert_eq!(body["data"]["totalPrice"], 745.0);
}

#[actix_web::test]
async fn quotes_a_stay() {
    let app = spawn_app!();
    let request = test::TestRequest::get()
        .uri("/bookings/quote?roomId=3&checkIn=2024-01-15&checkOut=2024-01-20")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert!(response.status().is_success());
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["data"]["nights"], 5);
    assert_eq!(body["data"]["totalPrice"], 745.0);

    // reversed dates quote zero instead of erroring
    let request = test::TestRequest::get()
        .uri("/bookings/quote?roomId=3&checkIn=2024-01-20&checkOut=2024-01-15")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert!(response.status().is_success());
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["data"]["totalPrice"], 0.0);
}

#[actix_web::test]
async fn dashboard_reflects_mutations() {
    let app = spawn_app!();

    let response =
        test::call_service(&app, test::TestRequest::get().uri("/dashboard").to_request()).await;
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["data"]["totalRooms"], 5);
    assert_eq!(body["data"]["availableRooms"], 4);
    assert_eq!(body["data"]["totalGuests"], 3);
    assert_eq!(body["data"]["activeBookings"], 1);
    assert_eq!(body["data"]["occupancyRate"], "20.0");

    let request = test::TestRequest::put()
        .uri("/rooms/1")
        .set_json(json!({ "status": "occupied" }))
        .to_request();
    test::call_service(&app, request).await;

    let response =
        test::call_service(&app, test::TestRequest::get().uri("/dashboard").to_request()).await;
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["data"]["availableRooms"], 3);
    assert_eq!(body["data"]["occupancyRate"], "40.0");
}

#[actix_web::test]
async fn wrong_verb_is_method_not_allowed() {
    let app = spawn_app!();
    let request = test::TestRequest::delete().uri("/rooms").to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 405);
}
