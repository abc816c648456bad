//! 工作集上的派生视图：分类/状态过滤、排序、分类计数以及交给渲染层的卡片数据。
//!
//! 所有函数都只读取输入切片，返回新的序列。

use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::{
    config::Config,
    models::plant::{display_date, Plant, PlantId, PlantType, Urgency},
};

/// 分类过滤条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Type(PlantType),
    /// 无法识别的分类，不匹配任何植物
    Unknown(String),
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value == "all" {
            return Self::All;
        }
        match PlantType::parse(value) {
            Some(plant_type) => Self::Type(plant_type),
            None => Self::Unknown(value.to_string()),
        }
    }
}

impl CategoryFilter {
    pub fn matches(&self, plant: &Plant) -> bool {
        match self {
            Self::All => true,
            Self::Type(plant_type) => plant.plant_type == *plant_type,
            Self::Unknown(_) => false,
        }
    }
}

/// 状态过滤条件，未知取值等同于 `All`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    NeedsWatering,
    NeedsSunlight,
    Healthy,
}

impl From<&str> for StatusFilter {
    fn from(value: &str) -> Self {
        match value {
            "needs-watering" => Self::NeedsWatering,
            "needs-sunlight" => Self::NeedsSunlight,
            "healthy" => Self::Healthy,
            _ => Self::All,
        }
    }
}

impl StatusFilter {
    pub fn matches(&self, plant: &Plant, today: NaiveDate) -> bool {
        let urgency = plant.urgency(today);
        match self {
            Self::All => true,
            Self::NeedsWatering => urgency.needs_watering,
            Self::NeedsSunlight => urgency.needs_sunlight,
            Self::Healthy => urgency.is_healthy(),
        }
    }
}

/// 排序方式，未知取值保持原有顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    NameDesc,
    Type,
    AddedDate,
    WateringDue,
    Unsorted,
}

impl From<&str> for SortKey {
    fn from(value: &str) -> Self {
        match value {
            "name" => Self::Name,
            "name-desc" => Self::NameDesc,
            "type" => Self::Type,
            "added-date" => Self::AddedDate,
            "watering-due" => Self::WateringDue,
            _ => Self::Unsorted,
        }
    }
}

pub fn filter_by_category(plants: &[Plant], category: &CategoryFilter) -> Vec<Plant> {
    plants
        .iter()
        .filter(|plant| category.matches(plant))
        .cloned()
        .collect()
}

pub fn filter_by_status(plants: &[Plant], status: StatusFilter, today: NaiveDate) -> Vec<Plant> {
    plants
        .iter()
        .filter(|plant| status.matches(plant, today))
        .cloned()
        .collect()
}

/// 显示用的字符串比较：先忽略大小写，再按原文区分
fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

// 缺少日期的记录总是排在最后
fn compare_dates(a: Option<NaiveDate>, b: Option<NaiveDate>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if descending => b.cmp(&a),
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// 稳定排序，返回新的序列
pub fn sort_plants(plants: &[Plant], key: SortKey) -> Vec<Plant> {
    let mut sorted = plants.to_vec();
    match key {
        SortKey::Name => sorted.sort_by(|a, b| collate(&a.name, &b.name)),
        SortKey::NameDesc => sorted.sort_by(|a, b| collate(&b.name, &a.name)),
        SortKey::Type => {
            sorted.sort_by(|a, b| collate(a.plant_type.as_str(), b.plant_type.as_str()))
        }
        SortKey::AddedDate => {
            sorted.sort_by(|a, b| compare_dates(a.added_date, b.added_date, true))
        }
        SortKey::WateringDue => {
            sorted.sort_by(|a, b| compare_dates(a.next_watering, b.next_watering, false))
        }
        SortKey::Unsorted => {}
    }
    sorted
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub all: usize,
    pub by_type: BTreeMap<PlantType, usize>,
}

impl CategoryCounts {
    pub fn get(&self, category: &CategoryFilter) -> usize {
        match category {
            CategoryFilter::All => self.all,
            CategoryFilter::Type(plant_type) => self.by_type.get(plant_type).copied().unwrap_or(0),
            CategoryFilter::Unknown(_) => 0,
        }
    }
}

pub fn category_counts(plants: &[Plant]) -> CategoryCounts {
    let mut by_type: BTreeMap<PlantType, usize> =
        PlantType::ALL.into_iter().map(|t| (t, 0)).collect();
    for plant in plants {
        *by_type.entry(plant.plant_type).or_insert(0) += 1;
    }
    CategoryCounts {
        all: plants.len(),
        by_type,
    }
}

/// 仪表盘当前的过滤与排序选择
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardQuery {
    pub category: CategoryFilter,
    pub status: StatusFilter,
    pub sort: SortKey,
}

impl Default for DashboardQuery {
    fn default() -> Self {
        Self {
            category: CategoryFilter::All,
            status: StatusFilter::All,
            sort: SortKey::Name,
        }
    }
}

impl DashboardQuery {
    pub fn from_config(config: &Config) -> Self {
        Self {
            category: CategoryFilter::from(config.default_category.as_str()),
            status: StatusFilter::from(config.default_status.as_str()),
            sort: SortKey::from(config.default_sort.as_str()),
        }
    }

    /// 依次应用分类过滤、状态过滤和排序
    pub fn apply(&self, plants: &[Plant], today: NaiveDate) -> Vec<Plant> {
        let by_category = filter_by_category(plants, &self.category);
        let by_status = filter_by_status(&by_category, self.status, today);
        sort_plants(&by_status, self.sort)
    }
}

/// 交给渲染层的植物卡片
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlantCard {
    pub id: PlantId,
    pub name: String,
    pub type_label: &'static str,
    pub watering_label: &'static str,
    pub sunlight_label: &'static str,
    pub next_watering: Option<String>,
    pub needs_watering: bool,
    pub needs_sunlight: bool,
}

impl PlantCard {
    pub fn from_plant(plant: &Plant, today: NaiveDate) -> Self {
        let Urgency { needs_watering, needs_sunlight } = plant.urgency(today);
        Self {
            id: plant.id,
            name: plant.name.clone(),
            type_label: plant.plant_type.label(),
            watering_label: plant.watering_frequency.label(),
            sunlight_label: plant.sunlight_needs.label(),
            next_watering: plant.next_watering.map(display_date),
            needs_watering,
            needs_sunlight,
        }
    }
}
