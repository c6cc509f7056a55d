use reqwest::{multipart, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;

use crate::routes::movies::{Movie, MoviePatch, NewMovie};
use crate::routes::upload_image::HostedAsset;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

#[derive(Deserialize)]
struct UploadReply {
    url: Option<String>,
    public_id: Option<String>,
    error: Option<String>,
}

#[derive(Clone, Debug)]
pub struct MovieApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl MovieApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn movies_url(&self) -> String {
        format!("{}/movies", self.base_url)
    }

    pub async fn list_movies(&self) -> Result<Vec<Movie>, ClientError> {
        let response = self.http.get(self.movies_url()).send().await?;
        read_success(response, "Failed to fetch movies").await
    }

    pub async fn get_movie(&self, id: i32) -> Result<Movie, ClientError> {
        let response = self
            .http
            .get(self.movies_url())
            .query(&[("id", id)])
            .send()
            .await?;
        read_success(response, "Failed to fetch movie").await
    }

    pub async fn create_movie(&self, movie: &NewMovie) -> Result<Movie, ClientError> {
        let response = self.http.post(self.movies_url()).json(movie).send().await?;
        read_success(response, "Failed to add movie").await
    }

    pub async fn update_movie(&self, id: i32, patch: &MoviePatch) -> Result<Movie, ClientError> {
        let response = self
            .http
            .put(self.movies_url())
            .query(&[("id", id)])
            .json(patch)
            .send()
            .await?;
        read_success(response, "Failed to update movie").await
    }

    pub async fn delete_movie(&self, id: i32) -> Result<Movie, ClientError> {
        let response = self
            .http
            .delete(self.movies_url())
            .query(&[("id", id)])
            .send()
            .await?;
        read_success(response, "Failed to delete movie").await
    }

    pub async fn upload_image(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<HostedAsset, ClientError> {
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)?;
        let form = multipart::Form::new().part("image", part);
        let response = self
            .http
            .post(format!("{}/upload-image", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let reply = response.json::<UploadReply>().await.map_err(|err| {
            tracing::error!("Invalid response format from server: {}", err);
            ClientError::Rejected {
                status: status.as_u16(),
                message: "Invalid response format from server".to_string(),
            }
        })?;
        match (status.is_success(), reply.url) {
            (true, Some(url)) => Ok(HostedAsset {
                url,
                public_id: reply.public_id.unwrap_or_default(),
            }),
            _ => Err(ClientError::Rejected {
                status: status.as_u16(),
                message: reply.error.unwrap_or_else(|| {
                    format!("Upload failed with status: {}", status.as_u16())
                }),
            }),
        }
    }
}

async fn read_success<T: DeserializeOwned>(
    response: reqwest::Response,
    failure: &str,
) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        tracing::info!("{} ({})", failure, status);
        return Err(ClientError::Rejected {
            status: status.as_u16(),
            message: failure.to_string(),
        });
    }
    Ok(response.json::<T>().await?)
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Rejected { status, .. } => StatusCode::from_u16(*status).ok(),
            ClientError::Transport(err) => err.status(),
        }
    }
}
