use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use crate::utils::validation::validate_not_blank;

/// 植物ID，由服务端分配
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlantId(pub i64);

impl fmt::Display for PlantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for PlantId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// 植物分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlantType {
    Tropical,
    Succulent,
    Flowering,
    Herb,
    Fern,
    Cactus,
    #[serde(other)]
    Unclassified,
}

impl PlantType {
    pub const ALL: [PlantType; 7] = [
        PlantType::Tropical,
        PlantType::Succulent,
        PlantType::Flowering,
        PlantType::Herb,
        PlantType::Fern,
        PlantType::Cactus,
        PlantType::Unclassified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tropical => "tropical",
            Self::Succulent => "succulent",
            Self::Flowering => "flowering",
            Self::Herb => "herb",
            Self::Fern => "fern",
            Self::Cactus => "cactus",
            Self::Unclassified => "unclassified",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Tropical => "Tropical",
            Self::Succulent => "Succulent",
            Self::Flowering => "Flowering",
            Self::Herb => "Herb",
            Self::Fern => "Fern",
            Self::Cactus => "Cactus",
            Self::Unclassified => "Unclassified",
        }
    }

    /// 精确匹配（区分大小写）
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

impl fmt::Display for PlantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 浇水频率
///
/// 线上数据里出现未知的频率时按每周处理，保证每条记录都落在固定的取值集合内。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WateringFrequency {
    Daily,
    EveryTwoDays,
    Weekly,
    EveryTwoWeeks,
    Monthly,
}

impl WateringFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::EveryTwoDays => "every-2-days",
            Self::Weekly => "weekly",
            Self::EveryTwoWeeks => "every-2-weeks",
            Self::Monthly => "monthly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::EveryTwoDays => "Every 2 days",
            Self::Weekly => "Weekly",
            Self::EveryTwoWeeks => "Every 2 weeks",
            Self::Monthly => "Monthly",
        }
    }

    pub fn interval_days(&self) -> i64 {
        match self {
            Self::Daily => 1,
            Self::EveryTwoDays => 2,
            Self::Weekly => 7,
            Self::EveryTwoWeeks => 14,
            Self::Monthly => 30,
        }
    }

    /// 解析频率字符串，无法识别时退回每周
    pub fn parse_lossy(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "daily" => Self::Daily,
            "every-2-days" => Self::EveryTwoDays,
            "weekly" => Self::Weekly,
            "every-2-weeks" => Self::EveryTwoWeeks,
            "monthly" => Self::Monthly,
            _ => Self::Weekly,
        }
    }

    pub fn next_watering(&self, from: NaiveDate) -> NaiveDate {
        compute_next_watering(*self, from)
    }
}

impl From<String> for WateringFrequency {
    fn from(value: String) -> Self {
        Self::parse_lossy(&value)
    }
}

impl From<WateringFrequency> for String {
    fn from(value: WateringFrequency) -> Self {
        value.as_str().to_string()
    }
}

/// 按浇水频率推算下一次浇水日期
pub fn compute_next_watering(frequency: WateringFrequency, from: NaiveDate) -> NaiveDate {
    from + Duration::days(frequency.interval_days())
}

/// 光照需求
///
/// 服务端只限制长度，不限制取值；无法识别的值按中等光照处理。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SunlightNeeds {
    Low,
    Medium,
    High,
}

impl SunlightNeeds {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low light",
            Self::Medium => "Medium light",
            Self::High => "High light",
        }
    }

    /// 忽略大小写解析，无法识别时退回中等光照
    pub fn parse_lossy(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "low" => Self::Low,
            "high" => Self::High,
            _ => Self::Medium,
        }
    }
}

impl From<String> for SunlightNeeds {
    fn from(value: String) -> Self {
        Self::parse_lossy(&value)
    }
}

impl From<SunlightNeeds> for String {
    fn from(value: SunlightNeeds) -> Self {
        value.as_str().to_string()
    }
}

/// 派生出的照料提醒，不落库
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Urgency {
    pub needs_watering: bool,
    pub needs_sunlight: bool,
}

impl Urgency {
    pub fn is_healthy(&self) -> bool {
        !self.needs_watering && !self.needs_sunlight
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: PlantId,
    pub name: String,
    #[serde(rename = "type")]
    pub plant_type: PlantType,
    pub watering_frequency: WateringFrequency,
    pub sunlight_needs: SunlightNeeds,
    pub last_watered: Option<NaiveDate>,
    pub next_watering: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub care_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub added_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Plant {
    /// 当天或已过下次浇水日期即视为需要浇水
    pub fn is_watering_due(&self, today: NaiveDate) -> bool {
        self.next_watering.map_or(false, |next| today >= next)
    }

    // TODO: 服务端记录光照日志后改为按实际光照判断
    pub fn is_sunlight_needed(&self) -> bool {
        self.sunlight_needs == SunlightNeeds::High
    }

    pub fn urgency(&self, today: NaiveDate) -> Urgency {
        Urgency {
            needs_watering: self.is_watering_due(today),
            needs_sunlight: self.is_sunlight_needed(),
        }
    }

    /// 合并服务端返回的部分字段，缺失的字段保持不变
    pub fn apply_patch(&mut self, patch: PlantPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(plant_type) = patch.plant_type {
            self.plant_type = plant_type;
        }
        if let Some(frequency) = patch.watering_frequency {
            self.watering_frequency = frequency;
        }
        if let Some(sunlight) = patch.sunlight_needs {
            self.sunlight_needs = sunlight;
        }
        if patch.last_watered.is_some() {
            self.last_watered = patch.last_watered;
        }
        if patch.next_watering.is_some() {
            self.next_watering = patch.next_watering;
        }
        if patch.care_notes.is_some() {
            self.care_notes = patch.care_notes;
        }
        if patch.image_url.is_some() {
            self.image_url = patch.image_url;
        }
        if patch.added_date.is_some() {
            self.added_date = patch.added_date;
        }
        if patch.updated_at.is_some() {
            self.updated_at = patch.updated_at;
        }
    }
}

/// 浇水等接口可能只返回部分字段
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantPatch {
    pub id: Option<PlantId>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub plant_type: Option<PlantType>,
    pub watering_frequency: Option<WateringFrequency>,
    pub sunlight_needs: Option<SunlightNeeds>,
    pub last_watered: Option<NaiveDate>,
    pub next_watering: Option<NaiveDate>,
    pub care_notes: Option<String>,
    pub image_url: Option<String>,
    pub added_date: Option<NaiveDate>,
    pub updated_at: Option<NaiveDateTime>,
}

/// 尚未保存的植物（没有ID），必填字段用 Option 表示以便表达缺失
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PlantDraft {
    #[validate(
        length(max = 100, message = "Plant name must not exceed 100 characters"),
        custom = "validate_not_blank"
    )]
    pub name: String,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    #[validate(required(message = "Plant type is required"))]
    pub plant_type: Option<PlantType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(required(message = "Watering frequency is required"))]
    pub watering_frequency: Option<WateringFrequency>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(required(message = "Sunlight needs is required"))]
    pub sunlight_needs: Option<SunlightNeeds>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 1000, message = "Care notes must not exceed 1000 characters"))]
    pub care_notes: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl PlantDraft {
    pub fn new(
        name: impl Into<String>,
        plant_type: PlantType,
        watering_frequency: WateringFrequency,
        sunlight_needs: SunlightNeeds,
    ) -> Self {
        Self {
            name: name.into(),
            plant_type: Some(plant_type),
            watering_frequency: Some(watering_frequency),
            sunlight_needs: Some(sunlight_needs),
            care_notes: None,
            image_url: None,
        }
    }

    pub fn with_care_notes(mut self, notes: impl Into<String>) -> Self {
        self.care_notes = Some(notes.into());
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

impl From<&Plant> for PlantDraft {
    fn from(plant: &Plant) -> Self {
        Self {
            name: plant.name.clone(),
            plant_type: Some(plant.plant_type),
            watering_frequency: Some(plant.watering_frequency),
            sunlight_needs: Some(plant.sunlight_needs),
            care_notes: plant.care_notes.clone(),
            image_url: plant.image_url.clone(),
        }
    }
}

/// 详情页使用的日期格式，例如 "January 15, 2024"
pub fn display_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}
