//! HTTP implementation of [`GalleryApi`] using reqwest.

use std::time::Duration;

use chrono::Utc;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use uuid::Uuid;

use super::{ApiError, GalleryApi, StagedSource};
use crate::model::{ImageItem, ImagePage, TagList, UploadResponse};

/// Gallery API client bound to one server base URL.
pub struct HttpGalleryApi {
    client: Client,
    base_url: String,
}

impl HttpGalleryApi {
    /// Create a client for `base_url` (scheme + host, no trailing slash
    /// required).
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The server this client is bound to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Map a non-2xx response to [`ApiError::Http`] with the status text.
fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Http {
            status: status.as_u16(),
            message: status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string(),
        })
    }
}

impl GalleryApi for HttpGalleryApi {
    async fn list_images(&self, max: u32) -> Result<ImagePage, ApiError> {
        let response = self
            .client
            .get(self.endpoint("/api/images"))
            .query(&[("max", max)])
            .send()
            .await?;

        check_status(response)?
            .json::<ImagePage>()
            .await
            .map_err(|e| ApiError::Decode {
                message: e.to_string(),
            })
    }

    async fn upload(&self, file: &StagedSource, tags: &[String]) -> Result<ImageItem, ApiError> {
        let tags_json = serde_json::to_string(tags).map_err(|e| ApiError::Payload {
            message: e.to_string(),
        })?;
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| ApiError::Payload {
                message: e.to_string(),
            })?;
        let form = Form::new().part("file", part).text("tags", tags_json);

        let response = self
            .client
            .post(self.endpoint("/api/upload"))
            .multipart(form)
            .send()
            .await?;

        let body = check_status(response)?
            .json::<UploadResponse>()
            .await
            .map_err(|e| ApiError::Decode {
                message: e.to_string(),
            })?;

        // The server is only required to return the stored url; the
        // rest is reconstructed from the staged file.
        Ok(ImageItem {
            id: body.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: file.name.clone(),
            url: body.url,
            size: file.bytes.len() as u64,
            created_at: Utc::now().timestamp_millis(),
            width: None,
            height: None,
            tags: tags.to_vec(),
        })
    }

    async fn delete_image(&self, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("/api/images/{}", urlencoding::encode(id)));
        let response = self.client.delete(url).send().await?;
        check_status(response)?;
        Ok(())
    }

    async fn list_tags(&self, max: u32) -> Result<Vec<String>, ApiError> {
        let response = self
            .client
            .get(self.endpoint("/api/tags"))
            .query(&[("max", max)])
            .send()
            .await?;

        let body = check_status(response)?
            .json::<TagList>()
            .await
            .map_err(|e| ApiError::Decode {
                message: e.to_string(),
            })?;
        Ok(body.tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let api = HttpGalleryApi::new("http://localhost:3000/");
        assert_eq!(api.base_url(), "http://localhost:3000");
        assert_eq!(api.endpoint("/api/images"), "http://localhost:3000/api/images");
    }

    #[test]
    fn delete_path_encodes_the_id() {
        let api = HttpGalleryApi::new("http://localhost:3000");
        let encoded = format!("/api/images/{}", urlencoding::encode("a/b c"));
        assert_eq!(
            api.endpoint(&encoded),
            "http://localhost:3000/api/images/a%2Fb%20c"
        );
    }
}
