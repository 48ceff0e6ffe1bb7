//! Notion API client implementation

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use urlencoding::encode;

use crate::domain::ports::{NotionClient, NotionDatabase, NotionPage, PageProperties};
use crate::error::NotionError;

const NOTION_VERSION: &str = "2022-06-28";

/// Implementation of the Notion API client
pub struct NotionClientImpl {
    http: Client,
    base_url: String,
    api_key: String,
}

impl NotionClientImpl {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/v1{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.api_url(path))
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header("Notion-Version", NOTION_VERSION)
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, NotionError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| NotionError::Deserialization(e.to_string()))
        } else if status.as_u16() == 401 {
            Err(NotionError::Unauthorized)
        } else if status.as_u16() == 429 {
            Err(NotionError::RateLimited)
        } else {
            let body = response.text().await.unwrap_or_default();
            let (code, message) = match serde_json::from_str::<ErrorBody>(&body) {
                Ok(err) => (err.code, err.message),
                Err(_) => (String::new(), body),
            };
            Err(NotionError::Api {
                status: status.as_u16(),
                code,
                message,
            })
        }
    }
}

/// Request types for Notion API
#[derive(Serialize)]
struct QueryRequest {
    filter: Value,
}

#[derive(Serialize)]
struct CreatePageRequest<'a> {
    parent: Parent<'a>,
    properties: &'a PageProperties,
}

#[derive(Serialize)]
struct Parent<'a> {
    database_id: &'a str,
}

#[derive(Serialize)]
struct UpdatePageRequest<'a> {
    properties: &'a PageProperties,
}

#[derive(Serialize)]
struct UpdateDatabaseRequest {
    properties: Value,
}

/// Response types from Notion API
#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<NotionPage>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

#[async_trait]
impl NotionClient for NotionClientImpl {
    async fn retrieve_database(&self, database_id: &str) -> Result<NotionDatabase, NotionError> {
        let resp = self
            .request(Method::GET, &format!("/databases/{}", encode(database_id)))
            .send()
            .await?;

        self.handle_response(resp).await
    }

    async fn query_database(
        &self,
        database_id: &str,
        filter: Value,
    ) -> Result<Vec<NotionPage>, NotionError> {
        let resp = self
            .request(
                Method::POST,
                &format!("/databases/{}/query", encode(database_id)),
            )
            .json(&QueryRequest { filter })
            .send()
            .await?;

        let body: QueryResponse = self.handle_response(resp).await?;
        Ok(body.results)
    }

    async fn create_page(
        &self,
        database_id: &str,
        properties: &PageProperties,
    ) -> Result<NotionPage, NotionError> {
        let resp = self
            .request(Method::POST, "/pages")
            .json(&CreatePageRequest {
                parent: Parent { database_id },
                properties,
            })
            .send()
            .await?;

        self.handle_response(resp).await
    }

    async fn update_page(
        &self,
        page_id: &str,
        properties: &PageProperties,
    ) -> Result<NotionPage, NotionError> {
        let resp = self
            .request(Method::PATCH, &format!("/pages/{}", encode(page_id)))
            .json(&UpdatePageRequest { properties })
            .send()
            .await?;

        self.handle_response(resp).await
    }

    async fn update_database(
        &self,
        database_id: &str,
        properties: Value,
    ) -> Result<NotionDatabase, NotionError> {
        let resp = self
            .request(Method::PATCH, &format!("/databases/{}", encode(database_id)))
            .json(&UpdateDatabaseRequest { properties })
            .send()
            .await?;

        self.handle_response(resp).await
    }
}
