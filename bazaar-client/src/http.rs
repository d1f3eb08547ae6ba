//! HTTP implementation of the storefront API
//!
//! Wraps reqwest with a cookie store for session credentials and parses
//! the server's `{ success, data, error }` response envelope.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::models::{
    AvatarResponse, Event, EventUpdate, HeroAboutResponse, HeroAboutUpdate, MediaFile, Product,
    ProductUpdate, ShopInfoUpdate, ShopProfile,
};

use crate::{ClientConfig, ClientError, ClientResult, StorefrontApi};

/// Response wrapper for the storefront API (success/data/error format)
#[derive(serde::Deserialize)]
struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

/// HTTP storefront client (cookie-credentialed)
#[derive(Debug, Clone)]
pub struct HttpStorefrontClient {
    client: Client,
    base_url: String,
}

impl HttpStorefrontClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
                StatusCode::FORBIDDEN => ClientError::Forbidden(text),
                StatusCode::NOT_FOUND => ClientError::NotFound(text),
                StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                    ClientError::Validation(text)
                }
                _ => ClientError::Internal(format!("{}: {}", status, text)),
            });
        }

        let envelope: ApiResponse<T> = response.json().await?;
        if !envelope.success {
            return Err(ClientError::InvalidResponse(
                envelope.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        envelope
            .data
            .ok_or_else(|| ClientError::InvalidResponse("missing data field".to_string()))
    }

    /// Status mapping for endpoints whose data payload is irrelevant
    async fn handle_empty(&self, response: reqwest::Response) -> ClientResult<()> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
                StatusCode::FORBIDDEN => ClientError::Forbidden(text),
                StatusCode::NOT_FOUND => ClientError::NotFound(text),
                StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                    ClientError::Validation(text)
                }
                _ => ClientError::Internal(format!("{}: {}", status, text)),
            });
        }
        Ok(())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        self.handle_response(response).await
    }

    fn file_part(file: &MediaFile) -> ClientResult<Part> {
        let mut part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        if !file.mime.is_empty() {
            part = part
                .mime_str(&file.mime)
                .map_err(|e| ClientError::InvalidResponse(format!("bad mime type: {}", e)))?;
        }
        Ok(part)
    }

    /// Build a multipart form with a JSON `fields` part plus optional files
    fn multipart_form<B: serde::Serialize>(
        body: &B,
        files: &[(&str, Option<&MediaFile>)],
    ) -> ClientResult<Form> {
        let mut form = Form::new().text("fields", serde_json::to_string(body)?);
        for (name, file) in files {
            if let Some(file) = file {
                form = form.part(name.to_string(), Self::file_part(file)?);
            }
        }
        Ok(form)
    }
}

#[async_trait]
impl StorefrontApi for HttpStorefrontClient {
    async fn fetch_shop_profile(&self, shop_id: &str) -> ClientResult<ShopProfile> {
        self.get(&format!("/api/shops/{}", shop_id)).await
    }

    async fn fetch_products(&self, shop_id: &str) -> ClientResult<Vec<Product>> {
        self.get(&format!("/api/shops/{}/products", shop_id)).await
    }

    async fn fetch_events(&self, shop_id: &str) -> ClientResult<Vec<Event>> {
        self.get(&format!("/api/shops/{}/events", shop_id)).await
    }

    async fn update_avatar(&self, shop_id: &str, file: &MediaFile) -> ClientResult<AvatarResponse> {
        let form = Form::new().part("avatar", Self::file_part(file)?);
        let response = self
            .client
            .post(self.url(&format!("/api/shops/{}/avatar", shop_id)))
            .multipart(form)
            .send()
            .await?;
        tracing::debug!(shop_id = %shop_id, "avatar uploaded");
        self.handle_response(response).await
    }

    async fn update_hero_about(
        &self,
        shop_id: &str,
        update: &HeroAboutUpdate,
        hero_file: Option<&MediaFile>,
        about_file: Option<&MediaFile>,
    ) -> ClientResult<HeroAboutResponse> {
        let form =
            Self::multipart_form(update, &[("hero", hero_file), ("about", about_file)])?;
        let response = self
            .client
            .put(self.url(&format!("/api/shops/{}/hero-about", shop_id)))
            .multipart(form)
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn update_shop_info(&self, shop_id: &str, update: &ShopInfoUpdate) -> ClientResult<()> {
        let response = self
            .client
            .put(self.url(&format!("/api/shops/{}/info", shop_id)))
            .json(update)
            .send()
            .await?;
        self.handle_empty(response).await
    }

    async fn update_product(
        &self,
        product_id: &str,
        update: &ProductUpdate,
        image_file: Option<&MediaFile>,
        video_file: Option<&MediaFile>,
    ) -> ClientResult<Product> {
        let form =
            Self::multipart_form(update, &[("image", image_file), ("video", video_file)])?;
        let response = self
            .client
            .put(self.url(&format!("/api/products/{}", product_id)))
            .multipart(form)
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn delete_product(&self, product_id: &str) -> ClientResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/api/products/{}", product_id)))
            .send()
            .await?;
        self.handle_empty(response).await
    }

    async fn update_event(
        &self,
        event_id: &str,
        update: &EventUpdate,
        image_file: Option<&MediaFile>,
    ) -> ClientResult<Event> {
        let form = Self::multipart_form(update, &[("image", image_file)])?;
        let response = self
            .client
            .put(self.url(&format!("/api/events/{}", event_id)))
            .multipart(form)
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn delete_event(&self, event_id: &str) -> ClientResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/api/events/{}", event_id)))
            .send()
            .await?;
        self.handle_empty(response).await
    }
}
