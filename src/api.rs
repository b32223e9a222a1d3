use std::{io, time::Duration};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};

use crate::{
    error::ApiError,
    models::{Booking, Guest, Room},
    repo::{Entity, Repo},
    stats::compute_stats,
    store::JsonStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Rooms,
    Guests,
    Bookings,
    Dashboard,
}

impl Target {
    const fn base_path(self) -> &'static str {
        match self {
            Self::Rooms => "/rooms",
            Self::Guests => "/guests",
            Self::Bookings => "/bookings",
            Self::Dashboard => "/dashboard",
        }
    }
}

/// A logical request, routed by variant instead of by string matching.
/// `parse` exists for callers holding a wire path; `path` renders it back
/// for the network backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiRequest {
    pub target: Target,
    pub id: Option<i64>,
    pub method: Method,
}

impl ApiRequest {
    pub const fn new(target: Target, id: Option<i64>, method: Method) -> Self {
        Self { target, id, method }
    }

    /// Splits `/collection` or `/collection/{id}`; anything else, including
    /// a non-numeric trailing segment, is unroutable.
    pub fn parse(path: &str, method: Method) -> Result<Self, ApiError> {
        let unknown = || ApiError::UnknownEndpoint(path.to_string());
        let mut segments = path.trim_matches('/').split('/');
        let target = match segments.next() {
            Some("rooms") => Target::Rooms,
            Some("guests") => Target::Guests,
            Some("bookings") => Target::Bookings,
            Some("dashboard") => Target::Dashboard,
            _ => return Err(unknown()),
        };
        let id = match segments.next() {
            None | Some("") => None,
            Some(raw) => Some(raw.parse().map_err(|_| unknown())?),
        };
        if segments.next().is_some() || (id.is_some() && target == Target::Dashboard) {
            return Err(unknown());
        }
        Ok(Self { target, id, method })
    }

    pub fn path(&self) -> String {
        match self.id {
            Some(id) => format!("{}/{id}", self.target.base_path()),
            None => self.target.base_path().to_string(),
        }
    }

    fn unsupported(&self) -> ApiError {
        ApiError::UnsupportedMethod {
            method: self.method.as_str(),
            path: self.path(),
        }
    }
}

#[derive(Clone)]
enum Backend {
    Mock { store: JsonStore, latency: Duration },
    Remote { http: reqwest::Client, base_url: String },
}

/// The single seam between callers and a backend. Callers issue the same
/// (request, payload) pair whether the data lives in the local store or
/// behind a remote HTTP API.
#[derive(Clone)]
pub struct ApiClient {
    backend: Backend,
}

impl ApiClient {
    pub fn mock(store: JsonStore) -> Self {
        Self {
            backend: Backend::Mock {
                store,
                latency: Duration::ZERO,
            },
        }
    }

    /// Artificial delay per mock operation, modeling network latency.
    pub fn with_latency(mut self, delay: Duration) -> Self {
        if let Backend::Mock { latency, .. } = &mut self.backend {
            *latency = delay;
        }
        self
    }

    pub fn remote(base_url: impl Into<String>) -> Self {
        Self {
            backend: Backend::Remote {
                http: reqwest::Client::new(),
                base_url: base_url.into().trim_end_matches('/').to_string(),
            },
        }
    }

    pub async fn dispatch(
        &self,
        request: ApiRequest,
        payload: Option<Value>,
    ) -> Result<Value, ApiError> {
        match &self.backend {
            Backend::Mock { store, latency } => {
                if !latency.is_zero() {
                    tokio::time::sleep(*latency).await;
                }
                dispatch_mock(store, request, payload)
            }
            Backend::Remote { http, base_url } => {
                dispatch_remote(http, base_url, request, payload).await
            }
        }
    }
}

fn dispatch_mock(store: &JsonStore, request: ApiRequest, payload: Option<Value>) -> Result<Value, ApiError> {
    match request.target {
        Target::Dashboard => match request.method {
            Method::Get => Ok(json!({ "data": compute_stats(store)? })),
            _ => Err(request.unsupported()),
        },
        Target::Rooms => collection_op::<Room>(store, request, payload),
        Target::Guests => collection_op::<Guest>(store, request, payload),
        Target::Bookings => collection_op::<Booking>(store, request, payload),
    }
}

fn collection_op<T: Entity>(
    store: &JsonStore,
    request: ApiRequest,
    payload: Option<Value>,
) -> Result<Value, ApiError>
where
    T::Patch: DeserializeOwned,
{
    let repo = Repo::<T>::new(store);
    match (request.id, request.method) {
        (None, Method::Get) => Ok(json!({ "data": to_value(&repo.list()?)? })),
        (None, Method::Post) => {
            let created = repo.create(parse_patch::<T>(payload)?)?;
            Ok(json!({
                "data": to_value(&created)?,
                "message": format!("{} created successfully", T::NAME),
            }))
        }
        (Some(id), Method::Put | Method::Patch) => {
            let updated = repo.update(id, parse_patch::<T>(payload)?)?;
            Ok(json!({
                "data": to_value(&updated)?,
                "message": format!("{} updated successfully", T::NAME),
            }))
        }
        // delete needs no payload, only the id
        (Some(id), Method::Delete) => {
            repo.delete(id)?;
            Ok(json!({ "message": format!("{} deleted successfully", T::NAME) }))
        }
        _ => Err(request.unsupported()),
    }
}

fn parse_patch<T: Entity>(payload: Option<Value>) -> Result<T::Patch, ApiError>
where
    T::Patch: DeserializeOwned,
{
    let payload = match payload {
        Some(Value::Null) | None => json!({}),
        Some(value) => value,
    };
    serde_json::from_value(payload)
        .map_err(|err| ApiError::ValidationFailed(format!("Invalid {} payload: {err}", T::NAME)))
}

fn to_value<T: Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value)
        .map_err(|err| ApiError::Storage(io::Error::new(io::ErrorKind::InvalidData, err)))
}

async fn dispatch_remote(
    http: &reqwest::Client,
    base_url: &str,
    request: ApiRequest,
    payload: Option<Value>,
) -> Result<Value, ApiError> {
    let url = format!("{base_url}{}", request.path());
    let mut builder = match request.method {
        Method::Get => http.get(&url),
        Method::Post => http.post(&url),
        Method::Put => http.put(&url),
        Method::Patch => http.patch(&url),
        Method::Delete => http.delete(&url),
    };
    if let Some(payload) = payload {
        if matches!(request.method, Method::Post | Method::Put | Method::Patch) {
            builder = builder.json(&payload);
        }
    }
    let response = builder
        .send()
        .await
        .map_err(|err| ApiError::RequestFailed(err.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::RequestFailed(format!(
            "HTTP {status} from {} {url}",
            request.method.as_str()
        )));
    }
    response
        .json()
        .await
        .map_err(|err| ApiError::RequestFailed(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_collection_and_id_paths() {
        let request = ApiRequest::parse("/rooms", Method::Get).unwrap();
        assert_eq!(request.target, Target::Rooms);
        assert_eq!(request.id, None);

        let request = ApiRequest::parse("/bookings/12", Method::Delete).unwrap();
        assert_eq!(request.target, Target::Bookings);
        assert_eq!(request.id, Some(12));
        assert_eq!(request.path(), "/bookings/12");
    }

    #[test]
    fn rejects_unroutable_paths() {
        for path in ["/pets", "/rooms/abc", "/rooms/1/extra", "/dashboard/1", ""] {
            let err = ApiRequest::parse(path, Method::Get).unwrap_err();
            assert!(matches!(err, ApiError::UnknownEndpoint(_)), "path {path:?}");
        }
    }

    #[tokio::test]
    async fn mock_lists_seeded_rooms() {
        let client = ApiClient::mock(JsonStore::in_memory());
        let request = ApiRequest::parse("/rooms", Method::Get).unwrap();
        let response = client.dispatch(request, None).await.unwrap();
        assert_eq!(response["data"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn mock_create_wraps_record_in_envelope() {
        let client = ApiClient::mock(JsonStore::in_memory());
        let request = ApiRequest::new(Target::Guests, None, Method::Post);
        let payload = json!({ "name": "Ada", "email": "ada@email.com", "phone": "+1" });
        let response = client.dispatch(request, Some(payload)).await.unwrap();
        assert_eq!(response["message"], "Guest created successfully");
        assert_eq!(response["data"]["id"], 4);
        assert_eq!(response["data"]["name"], "Ada");
    }

    #[tokio::test]
    async fn mock_rejects_wrong_verb_for_path_shape() {
        let client = ApiClient::mock(JsonStore::in_memory());

        let request = ApiRequest::new(Target::Rooms, None, Method::Delete);
        let err = client.dispatch(request, None).await.unwrap_err();
        assert!(matches!(err, ApiError::UnsupportedMethod { .. }));

        let request = ApiRequest::new(Target::Dashboard, None, Method::Post);
        let err = client.dispatch(request, None).await.unwrap_err();
        assert!(matches!(err, ApiError::UnsupportedMethod { .. }));
    }

    #[tokio::test]
    async fn mock_update_and_delete_by_id() {
        let client = ApiClient::mock(JsonStore::in_memory());

        let update = ApiRequest::new(Target::Rooms, Some(1), Method::Put);
        let response = client
            .dispatch(update, Some(json!({ "status": "occupied" })))
            .await
            .unwrap();
        assert_eq!(response["data"]["status"], "occupied");
        assert_eq!(response["data"]["number"], "101");

        let delete = ApiRequest::new(Target::Rooms, Some(1), Method::Delete);
        let response = client.dispatch(delete, None).await.unwrap();
        assert_eq!(response["message"], "Room deleted successfully");

        let err = client.dispatch(delete, None).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound("Room")));
    }

    #[tokio::test]
    async fn mock_dashboard_reports_stats() {
        let client = ApiClient::mock(JsonStore::in_memory());
        let request = ApiRequest::parse("/dashboard", Method::Get).unwrap();
        let response = client.dispatch(request, None).await.unwrap();
        assert_eq!(response["data"]["totalRooms"], 5);
        assert_eq!(response["data"]["occupancyRate"], "20.0");
    }

    #[tokio::test]
    async fn mock_rejects_malformed_payload() {
        let client = ApiClient::mock(JsonStore::in_memory());
        let request = ApiRequest::new(Target::Rooms, None, Method::Post);
        let err = client
            .dispatch(request, Some(json!({ "price": "not a number" })))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::ValidationFailed(_)));
    }

    #[tokio::test]
    async fn remote_backend_surfaces_transport_failures() {
        // nothing listens on this port
        let client = ApiClient::remote("http://127.0.0.1:9");
        let request = ApiRequest::parse("/rooms", Method::Get).unwrap();
        let err = client.dispatch(request, None).await.unwrap_err();
        assert!(matches!(err, ApiError::RequestFailed(_)));
    }
}
