use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::{
    config::{self, Credentials},
    primitives::ByteStream,
    Client,
};
use serde::{Deserialize, Serialize};
use std::env;
use uuid::Uuid;

use super::StagedImage;
use crate::configuration::AssetHostSettings;
use crate::error::UploadError;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HostedAsset {
    pub url: String,
    pub public_id: String,
}

#[async_trait]
pub trait AssetHost: Send + Sync {
    async fn upload(&self, image: &StagedImage) -> Result<HostedAsset, UploadError>;
}

pub fn object_key(folder: &str, file_name: &str) -> (String, String) {
    let folder = folder.trim_matches('/');
    let key = format!("{}/{}-{}", folder, Uuid::new_v4(), file_name);
    let public_id = match key.rfind('.') {
        Some(dot) if dot > folder.len() + 1 => key[..dot].to_string(),
        _ => key.clone(),
    };
    (key, public_id)
}

pub struct S3AssetHost {
    client: Client,
    bucket: String,
    public_url: String,
    folder: String,
}

impl S3AssetHost {
    pub fn from_settings(settings: &AssetHostSettings) -> std::io::Result<Self> {
        let missing = |name: &str| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} must be set", name),
            )
        };
        let id = env::var("S3_BUCKET_ACCESS_KEY").map_err(|_| missing("S3_BUCKET_ACCESS_KEY"))?;
        let secret =
            env::var("S3_BUCKET_SECRET_KEY").map_err(|_| missing("S3_BUCKET_SECRET_KEY"))?;

        let cred = Credentials::new(id, secret, None, None, "loaded up from env");
        let mut conf_builder = config::Builder::new()
            .region(Region::new(settings.region.clone()))
            .credentials_provider(cred)
            .behavior_version(BehaviorVersion::latest());
        if let Some(endpoint) = settings.endpoint_url.as_ref() {
            conf_builder = conf_builder.endpoint_url(endpoint).force_path_style(true);
        }

        tracing::info!(
            bucket = %settings.bucket,
            region = %settings.region,
            "S3 asset host initialized"
        );
        Ok(Self {
            client: Client::from_conf(conf_builder.build()),
            bucket: settings.bucket.clone(),
            public_url: settings.public_url.trim_end_matches('/').to_string(),
            folder: settings.folder.clone(),
        })
    }
}

#[async_trait]
impl AssetHost for S3AssetHost {
    async fn upload(&self, image: &StagedImage) -> Result<HostedAsset, UploadError> {
        let (key, public_id) = object_key(&self.folder, image.file_name());
        let body = ByteStream::from_path(image.path())
            .await
            .map_err(|err| UploadError::UploadFailure(err.to_string()))?;

        match self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(body)
            .content_type(image.content_type())
            .acl("public-read".into())
            .send()
            .await
        {
            Ok(_) => {
                tracing::info!("File saved successfully under {}", key);
                Ok(HostedAsset {
                    url: format!("{}/{}", self.public_url, key),
                    public_id,
                })
            }
            Err(err) => {
                tracing::error!("Failed to save file: {:?}", err);
                Err(UploadError::UploadFailure(err.to_string()))
            }
        }
    }
}
