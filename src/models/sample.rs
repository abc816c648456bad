use chrono::NaiveDate;

use crate::models::plant::{Plant, PlantId, PlantType, SunlightNeeds, WateringFrequency};

fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

/// 拉取失败时使用的离线示例数据
pub fn sample_plants() -> Vec<Plant> {
    vec![
        Plant {
            id: PlantId(1),
            name: "Fiddle Leaf Fig".to_string(),
            plant_type: PlantType::Tropical,
            watering_frequency: WateringFrequency::Weekly,
            sunlight_needs: SunlightNeeds::Medium,
            last_watered: ymd(2024, 1, 15),
            next_watering: ymd(2024, 1, 22),
            care_notes: Some(
                "Keep away from direct sunlight. Water when top inch of soil is dry.".to_string(),
            ),
            image_url: Some(
                "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=400&h=300&fit=crop&crop=center"
                    .to_string(),
            ),
            added_date: ymd(2024, 1, 1),
            created_at: None,
            updated_at: None,
        },
        Plant {
            id: PlantId(2),
            name: "Snake Plant".to_string(),
            plant_type: PlantType::Succulent,
            watering_frequency: WateringFrequency::EveryTwoWeeks,
            sunlight_needs: SunlightNeeds::Low,
            last_watered: ymd(2024, 1, 10),
            next_watering: ymd(2024, 1, 24),
            care_notes: Some(
                "Very low maintenance. Can survive in low light conditions.".to_string(),
            ),
            image_url: Some(
                "https://images.unsplash.com/photo-1593482892296-61358a3a5b1e?w=400&h=300&fit=crop&crop=center"
                    .to_string(),
            ),
            added_date: ymd(2024, 1, 5),
            created_at: None,
            updated_at: None,
        },
    ]
}
