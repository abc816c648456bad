use crate::{
    config::Config,
    error::{AppError, Result},
    models::{
        plant::{Plant, PlantDraft, PlantId, PlantPatch, PlantType},
        stats::PlantStats,
    },
    utils::filename::filename_from_content_disposition,
};
use async_trait::async_trait;
use reqwest::{header::CONTENT_DISPOSITION, Client, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// 服务端生成的养护指南
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CareGuide {
    /// 来自 Content-Disposition，服务端未提供时为 None
    pub filename: Option<String>,
    pub bytes: Vec<u8>,
}

/// 远端植物服务的调用约定
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlantApi: Send + Sync {
    async fn list_plants(&self) -> Result<Vec<Plant>>;
    async fn get_plant(&self, id: PlantId) -> Result<Plant>;
    async fn plant_stats(&self) -> Result<PlantStats>;
    async fn total_plants(&self) -> Result<u64>;
    async fn create_plant(&self, draft: &PlantDraft) -> Result<Plant>;
    async fn update_plant(&self, plant: &Plant) -> Result<Plant>;
    async fn delete_plant(&self, id: PlantId) -> Result<()>;
    async fn water_plant(&self, id: PlantId) -> Result<PlantPatch>;
    async fn care_guide(&self, id: PlantId) -> Result<CareGuide>;
    async fn plants_by_type(&self, plant_type: PlantType) -> Result<Vec<Plant>>;
    async fn plants_needing_watering(&self) -> Result<Vec<Plant>>;
    async fn search_plants(&self, name: &str) -> Result<Vec<Plant>>;
}

#[derive(Clone)]
pub struct HttpPlantApi {
    base_url: String,
    http_client: Client,
}

impl HttpPlantApi {
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder, what: &str) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            error!("Failed to reach plant service ({}): {}", what, e);
            AppError::Request(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::NOT_FOUND {
            warn!("Plant service returned 404 for {}", what);
            return Err(AppError::not_found(what));
        }

        error!("Plant service returned error status {} for {}", status, what);
        Err(AppError::ExternalService(format!("{} failed with status {}", what, status)))
    }

    async fn get_plants(&self, path: &str, what: &str) -> Result<Vec<Plant>> {
        debug!("Fetching {}", what);
        let response = self.send(self.http_client.get(self.url(path)), what).await?;
        let plants: Vec<Plant> = response.json().await.map_err(|e| {
            error!("Failed to parse {} response: {}", what, e);
            AppError::Request(e)
        })?;
        Ok(plants)
    }
}

#[async_trait]
impl PlantApi for HttpPlantApi {
    async fn list_plants(&self) -> Result<Vec<Plant>> {
        let plants = self.get_plants("/plants", "Plant list").await?;
        info!("Loaded {} plants from service", plants.len());
        Ok(plants)
    }

    async fn get_plant(&self, id: PlantId) -> Result<Plant> {
        let what = format!("Plant {}", id);
        let response = self
            .send(self.http_client.get(self.url(&format!("/plants/{}", id))), &what)
            .await?;
        Ok(response.json().await?)
    }

    async fn plant_stats(&self) -> Result<PlantStats> {
        let response = self
            .send(self.http_client.get(self.url("/plants/stats")), "Plant stats")
            .await?;
        let stats: PlantStats = response.json().await?;
        debug!("Plant stats: {:?}", stats);
        Ok(stats)
    }

    async fn total_plants(&self) -> Result<u64> {
        let response = self
            .send(self.http_client.get(self.url("/plants/total-plants")), "Plant total")
            .await?;
        Ok(response.json().await?)
    }

    async fn create_plant(&self, draft: &PlantDraft) -> Result<Plant> {
        debug!("Creating plant: {}", draft.name);
        let response = self
            .send(self.http_client.post(self.url("/plants")).json(draft), "Plant creation")
            .await?;
        let plant: Plant = response.json().await?;
        info!("Plant created with id {}", plant.id);
        Ok(plant)
    }

    async fn update_plant(&self, plant: &Plant) -> Result<Plant> {
        debug!("Updating plant {}", plant.id);
        let what = format!("Plant {}", plant.id);
        let response = self
            .send(
                self.http_client
                    .put(self.url(&format!("/plants/{}", plant.id)))
                    .json(plant),
                &what,
            )
            .await?;
        Ok(response.json().await?)
    }

    async fn delete_plant(&self, id: PlantId) -> Result<()> {
        debug!("Deleting plant {}", id);
        let what = format!("Plant {}", id);
        self.send(self.http_client.delete(self.url(&format!("/plants/{}", id))), &what)
            .await?;
        info!("Plant {} deleted on service", id);
        Ok(())
    }

    async fn water_plant(&self, id: PlantId) -> Result<PlantPatch> {
        debug!("Watering plant {}", id);
        let what = format!("Plant {}", id);
        let response = self
            .send(self.http_client.post(self.url(&format!("/plants/{}/water", id))), &what)
            .await?;
        Ok(response.json().await?)
    }

    async fn care_guide(&self, id: PlantId) -> Result<CareGuide> {
        debug!("Requesting care guide for plant {}", id);
        let what = format!("Plant {}", id);
        let response = self
            .send(self.http_client.get(self.url(&format!("/pdf/plant/{}", id))), &what)
            .await?;

        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(filename_from_content_disposition);
        let bytes = response.bytes().await?.to_vec();

        info!("Received care guide for plant {} ({} bytes)", id, bytes.len());
        Ok(CareGuide { filename, bytes })
    }

    async fn plants_by_type(&self, plant_type: PlantType) -> Result<Vec<Plant>> {
        self.get_plants(&format!("/plants/type/{}", plant_type), "Plants by type")
            .await
    }

    async fn plants_needing_watering(&self) -> Result<Vec<Plant>> {
        self.get_plants("/plants/needs-watering", "Plants needing watering")
            .await
    }

    async fn search_plants(&self, name: &str) -> Result<Vec<Plant>> {
        debug!("Searching plants by name: {}", name);
        let request = self
            .http_client
            .get(self.url("/plants/search"))
            .query(&[("name", name)]);
        let response = self.send(request, "Plant search").await?;
        Ok(response.json().await?)
    }
}
