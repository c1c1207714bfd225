//! HTTP catalog store client
//!
//! Talks to the external catalog/store service over JSON. Auth is a
//! bearer token carried by the session context handed to the
//! constructor.

use crate::error::{Error, Result};
use crate::geofence::{CatalogItem, SellerLocation};
use crate::store::{CatalogStore, SessionContext};
use reqwest::{RequestBuilder, StatusCode};
use uuid::Uuid;

/// Store client backed by the catalog service's REST API
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
    session: SessionContext,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>, session: SessionContext) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            session,
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.session.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

impl CatalogStore for HttpStore {
    async fn get_seller_location(&self, seller_id: Uuid) -> Result<Option<SellerLocation>> {
        let url = format!("{}/sellers/{}/location", self.base_url, seller_id);
        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| Error::Store(format!("Location fetch failed: {}", e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Error::Store(format!(
                "Location fetch returned status: {}",
                response.status()
            )));
        }

        let location: SellerLocation = response
            .json()
            .await
            .map_err(|e| Error::Store(format!("Failed to parse location response: {}", e)))?;
        Ok(Some(location))
    }

    async fn save_seller_location(&self, location: &SellerLocation) -> Result<()> {
        let url = format!("{}/sellers/{}/location", self.base_url, location.owner_id);
        let response = self
            .authorize(self.client.put(&url))
            .json(location)
            .send()
            .await
            .map_err(|e| Error::Store(format!("Location save failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Store(format!(
                "Location save returned status: {}",
                response.status()
            )));
        }
        Ok(())
    }

    async fn list_catalog_items(&self) -> Result<Vec<CatalogItem>> {
        let url = format!("{}/catalog/items", self.base_url);
        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| Error::Store(format!("Catalog fetch failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Store(format!(
                "Catalog fetch returned status: {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Store(format!("Failed to parse catalog response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coordinate;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_location(owner_id: Uuid) -> SellerLocation {
        SellerLocation {
            owner_id,
            address: "10 Rue de Rivoli, Paris".to_string(),
            coordinate: Coordinate::new(48.8556, 2.3603),
            delivery_radius_km: 5.0,
        }
    }

    #[tokio::test]
    async fn test_get_location_found() {
        let server = MockServer::start().await;
        let owner_id = Uuid::new_v4();
        let location = sample_location(owner_id);
        Mock::given(method("GET"))
            .and(path(format!("/sellers/{}/location", owner_id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(&location))
            .mount(&server)
            .await;

        let store = HttpStore::new(server.uri(), SessionContext::default());
        let fetched = store.get_seller_location(owner_id).await.unwrap().unwrap();

        assert_eq!(fetched.owner_id, owner_id);
        assert_eq!(fetched.delivery_radius_km, 5.0);
    }

    #[tokio::test]
    async fn test_get_location_missing_is_none() {
        let server = MockServer::start().await;
        let owner_id = Uuid::new_v4();
        Mock::given(method("GET"))
            .and(path(format!("/sellers/{}/location", owner_id)))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let store = HttpStore::new(server.uri(), SessionContext::default());
        assert!(store.get_seller_location(owner_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_location_sends_bearer_token() {
        let server = MockServer::start().await;
        let owner_id = Uuid::new_v4();
        Mock::given(method("PUT"))
            .and(path(format!("/sellers/{}/location", owner_id)))
            .and(header("authorization", "Bearer secret-token"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let store = HttpStore::new(server.uri(), SessionContext::with_token("secret-token"));
        store
            .save_seller_location(&sample_location(owner_id))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_save_location_server_error() {
        let server = MockServer::start().await;
        let owner_id = Uuid::new_v4();
        Mock::given(method("PUT"))
            .and(path(format!("/sellers/{}/location", owner_id)))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let store = HttpStore::new(server.uri(), SessionContext::default());
        let err = store
            .save_seller_location(&sample_location(owner_id))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Store(_)));
    }

    #[tokio::test]
    async fn test_list_catalog_items() {
        let server = MockServer::start().await;
        let body = serde_json::json!([
            {
                "id": Uuid::new_v4(),
                "seller_id": Uuid::new_v4(),
                "title": "Nocturne",
                "artist": "A. Peintre",
                "price": 450.0,
                "created_at": "2025-11-02T10:00:00Z"
            }
        ]);
        Mock::given(method("GET"))
            .and(path("/catalog/items"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let store = HttpStore::new(server.uri(), SessionContext::default());
        let items = store.list_catalog_items().await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Nocturne");
    }
}
