use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    error::{AppError, Result},
    models::{
        notice::Notice,
        plant::{Plant, PlantDraft, PlantId},
        sample::sample_plants,
        stats::DashboardStats,
    },
    services::{
        api::PlantApi,
        view::{category_counts, CategoryCounts, DashboardQuery},
    },
    utils::{filename::care_guide_filename, photo::read_photo_data_url, validation::validate_draft},
};

/// `fetch_all` 的结果，三种情况都不会让工作集处于无效状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Loaded(usize),
    /// 拉取失败，已替换为内置示例数据
    FallbackUsed { reason: String },
    /// 拉取失败且未启用示例数据，保留之前的工作集
    Offline { reason: String },
}

impl FetchOutcome {
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::Loaded(_) => None,
            Self::FallbackUsed { .. } => Some(Notice::offline()),
            Self::Offline { .. } => Some(Notice::warning(
                "Failed to load plants. Showing the last loaded list.",
            )),
        }
    }
}

/// 植物工作集，所有修改都经过这里的方法
///
/// 修改方法都需要 `&mut self`，同一个 store 上的请求因此不会并发执行。
pub struct PlantStore<A: PlantApi> {
    api: A,
    plants: Vec<Plant>,
    offline_fallback: bool,
}

impl<A: PlantApi> PlantStore<A> {
    pub fn new(api: A, config: &Config) -> Self {
        Self {
            api,
            plants: Vec::new(),
            offline_fallback: config.offline_fallback,
        }
    }

    /// 以已有的工作集创建 store
    pub fn with_plants(api: A, plants: Vec<Plant>) -> Self {
        Self {
            api,
            plants,
            offline_fallback: true,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    pub fn get(&self, id: PlantId) -> Option<&Plant> {
        self.plants.iter().find(|plant| plant.id == id)
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    fn position(&self, id: PlantId) -> Option<usize> {
        self.plants.iter().position(|plant| plant.id == id)
    }

    pub async fn fetch_all(&mut self) -> FetchOutcome {
        match self.api.list_plants().await {
            Ok(plants) => {
                self.plants = dedup_by_id(plants);
                FetchOutcome::Loaded(self.plants.len())
            }
            Err(e) if self.offline_fallback => {
                warn!("Failed to load plants, using offline data: {}", e);
                self.plants = sample_plants();
                FetchOutcome::FallbackUsed { reason: e.to_string() }
            }
            Err(e) => {
                warn!("Failed to load plants, keeping {} cached plants: {}", self.plants.len(), e);
                FetchOutcome::Offline { reason: e.to_string() }
            }
        }
    }

    pub async fn create(&mut self, draft: PlantDraft) -> Result<Plant> {
        validate_draft(&draft)?;

        let plant = self.api.create_plant(&draft).await?;

        if let Some(index) = self.position(plant.id) {
            warn!("Service returned existing id {} for a new plant", plant.id);
            self.plants[index] = plant.clone();
        } else {
            self.plants.push(plant.clone());
        }
        info!("Plant '{}' added with id {}", plant.name, plant.id);
        Ok(plant)
    }

    /// 先读取照片，再创建；任一步失败工作集都保持不变
    pub async fn create_with_photo(
        &mut self,
        mut draft: PlantDraft,
        photo: &Path,
    ) -> Result<Plant> {
        draft.image_url = Some(read_photo_data_url(photo).await?);
        self.create(draft).await
    }

    /// 用服务端返回的完整记录替换本地副本
    ///
    /// 调用方持有的 `updated_at` 与工作集中的不一致时返回 `Conflict`，不会发出请求。
    pub async fn update(&mut self, plant: Plant) -> Result<Plant> {
        validate_draft(&PlantDraft::from(&plant))?;

        if let Some(local) = self.get(plant.id) {
            if plant.updated_at.is_some() && local.updated_at != plant.updated_at {
                warn!(
                    "Stale edit for plant {}: local version {:?}, edited version {:?}",
                    plant.id, local.updated_at, plant.updated_at
                );
                return Err(AppError::conflict(&format!(
                    "Plant {} was modified since it was loaded",
                    plant.id
                )));
            }
        }

        let updated = self.api.update_plant(&plant).await?;
        if updated.id != plant.id {
            warn!("Service answered update of plant {} with plant {}", plant.id, updated.id);
        }

        match self.position(updated.id) {
            Some(index) => self.plants[index] = updated.clone(),
            None => self.plants.push(updated.clone()),
        }
        info!("Plant {} updated", updated.id);
        Ok(updated)
    }

    pub async fn update_with_photo(&mut self, mut plant: Plant, photo: &Path) -> Result<Plant> {
        plant.image_url = Some(read_photo_data_url(photo).await?);
        self.update(plant).await
    }

    /// 服务端确认删除后才移除本地记录
    pub async fn delete(&mut self, id: PlantId) -> Result<()> {
        self.api.delete_plant(id).await?;

        self.plants.retain(|plant| plant.id != id);
        info!("Plant {} removed from working set", id);
        Ok(())
    }

    pub async fn record_watering(&mut self, id: PlantId) -> Result<Plant> {
        let patch = self.api.water_plant(id).await?;

        let index = self.position(id).ok_or_else(|| {
            warn!("Plant {} watered on service but missing from working set", id);
            AppError::not_found(&format!("Plant {}", id))
        })?;

        let plant = &mut self.plants[index];
        plant.apply_patch(patch);
        info!("{} has been watered, next watering {:?}", plant.name, plant.next_watering);
        Ok(plant.clone())
    }

    /// 并发请求总数和统计数据，失败的一项按 0 处理
    pub async fn refresh_stats(&self) -> DashboardStats {
        let (total, stats) = tokio::join!(self.api.total_plants(), self.api.plant_stats());

        let total = total
            .map_err(|e| warn!("Failed to load plant total: {}", e))
            .ok();
        let stats = stats
            .map_err(|e| warn!("Failed to load plant stats: {}", e))
            .ok();

        let combined = DashboardStats::combine(total, stats.as_ref());
        debug!("Dashboard stats: {:?}", combined);
        combined
    }

    /// 下载养护指南并写入 `dir`，返回文件路径
    pub async fn download_care_guide(&self, id: PlantId, dir: &Path) -> Result<PathBuf> {
        let guide = self.api.care_guide(id).await?;

        let filename = guide.filename.unwrap_or_else(|| {
            care_guide_filename(self.get(id).map_or("plant", |plant| plant.name.as_str()))
        });
        let path = dir.join(filename);
        tokio::fs::write(&path, &guide.bytes).await?;

        info!("Care guide for plant {} saved to {}", id, path.display());
        Ok(path)
    }

    pub fn dashboard(&self, query: &DashboardQuery, today: NaiveDate) -> Vec<Plant> {
        query.apply(&self.plants, today)
    }

    pub fn category_counts(&self) -> CategoryCounts {
        category_counts(&self.plants)
    }
}

/// 同一ID只保留第一次出现的记录
fn dedup_by_id(plants: Vec<Plant>) -> Vec<Plant> {
    let mut seen = HashSet::new();
    plants
        .into_iter()
        .filter(|plant| {
            let first = seen.insert(plant.id);
            if !first {
                warn!("Dropping duplicate plant id {} from service response", plant.id);
            }
            first
        })
        .collect()
}
