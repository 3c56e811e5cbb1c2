// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use bytes::Bytes;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url, header};
use serde::{Serialize, de::DeserializeOwned};

use autocull_core::{
    CameraCreated, CameraRecord, CollectionRecord, DuplicateScan, NewCamera, NewCollection,
};

use crate::{Backend, Error, Result};

pub trait ClientEnvironment {
    fn client(&self) -> &Client;
    fn join_api_url(&self, query_suffix: &str) -> Result<Url>;
}

pub async fn receive_response_body(response: Response) -> Result<Bytes> {
    let response_status = response.status();
    let bytes = response.bytes().await?;
    check_response_status(response_status, bytes)
}

fn check_response_status(response_status: StatusCode, bytes: Bytes) -> Result<Bytes> {
    if !response_status.is_success() {
        let json = serde_json::from_slice::<serde_json::Value>(&bytes).ok();
        return Err(Error::Status {
            status: response_status.as_u16(),
            body: json.filter(|json| !json.is_null()),
        });
    }
    Ok(bytes)
}

fn decode_response_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(Into::into)
}

/// Backend process that is accessed through its JSON web API.
#[derive(Debug, Clone)]
pub struct WebApiBackend {
    client: Client,
    api_url: Url,
}

impl WebApiBackend {
    #[must_use]
    pub fn new(api_url: Url) -> Self {
        Self::with_client(Client::new(), api_url)
    }

    #[must_use]
    pub fn with_client(client: Client, mut api_url: Url) -> Self {
        // Relative endpoints are joined onto the last path segment otherwise.
        if !api_url.path().ends_with('/') {
            let path = format!("{path}/", path = api_url.path());
            api_url.set_path(&path);
        }
        Self { client, api_url }
    }

    #[must_use]
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }
}

impl ClientEnvironment for WebApiBackend {
    fn client(&self) -> &Client {
        &self.client
    }

    fn join_api_url(&self, query_suffix: &str) -> Result<Url> {
        self.api_url.join(query_suffix).map_err(Into::into)
    }
}

fn with_json_body(request: RequestBuilder, body: &impl Serialize) -> Result<RequestBuilder> {
    let body = serde_json::to_vec(body)?;
    Ok(request
        .header(header::CONTENT_TYPE, "application/json")
        .body(body))
}

async fn send_and_decode<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let response = request.send().await?;
    let response_body = receive_response_body(response).await?;
    decode_response_body(&response_body)
}

async fn fetch<E: ClientEnvironment, T: DeserializeOwned>(env: &E, endpoint: &str) -> Result<T> {
    let request_url = env.join_api_url(endpoint)?;
    let request = env.client().get(request_url);
    send_and_decode(request).await
}

async fn post<E: ClientEnvironment, T: DeserializeOwned>(
    env: &E,
    endpoint: &str,
    body: &impl Serialize,
) -> Result<T> {
    let request_url = env.join_api_url(endpoint)?;
    let request = with_json_body(env.client().post(request_url), body)?;
    send_and_decode(request).await
}

#[derive(Serialize)]
struct ResolveImageParams<'a> {
    path: &'a str,
}

#[derive(Serialize)]
struct DetectDuplicatesParams<'a> {
    paths: &'a [String],
    threshold: f64,
    max_results: usize,
}

impl Backend for WebApiBackend {
    async fn list_collections(&self) -> Result<Vec<CollectionRecord>> {
        let collections: Vec<CollectionRecord> = fetch(self, "collections").await?;
        log::debug!("Fetched {count} collection(s)", count = collections.len());
        Ok(collections)
    }

    async fn list_cameras(&self) -> Result<Vec<CameraRecord>> {
        let cameras: Vec<CameraRecord> = fetch(self, "cameras").await?;
        log::debug!("Fetched {count} camera(s)", count = cameras.len());
        Ok(cameras)
    }

    async fn resolve_image(&self, path: &str) -> Result<Option<String>> {
        post(self, "images/data-url", &ResolveImageParams { path }).await
    }

    async fn detect_duplicates(
        &self,
        paths: &[String],
        threshold: f64,
        max_results: usize,
    ) -> Result<DuplicateScan> {
        log::debug!(
            "Detecting duplicates among {count} image(s): threshold = {threshold}, \
             max_results = {max_results}",
            count = paths.len(),
        );
        let params = DetectDuplicatesParams {
            paths,
            threshold,
            max_results,
        };
        post(self, "duplicates/detect", &params).await
    }

    async fn create_collection(&self, new_collection: &NewCollection) -> Result<()> {
        let request_url = self.join_api_url("collections")?;
        let request = with_json_body(self.client.post(request_url), new_collection)?;
        let response = request.send().await?;
        receive_response_body(response).await?;
        log::debug!(
            "Creating new collection \"{name}\" succeeded",
            name = new_collection.name
        );
        Ok(())
    }

    async fn create_camera(&self, new_camera: &NewCamera) -> Result<CameraCreated> {
        post(self, "cameras", new_camera).await
    }

    async fn on_start(&self) -> Result<()> {
        let request_url = self.join_api_url("session/start")?;
        let response = self.client.post(request_url).send().await?;
        receive_response_body(response).await?;
        Ok(())
    }
}
