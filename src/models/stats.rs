use serde::{Deserialize, Serialize};

/// `/plants/stats` 返回的统计数据
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantStats {
    #[serde(default)]
    pub total_plants: u64,
    pub plants_needing_watering: u64,
}

/// 仪表盘顶部的四个统计数字
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_plants: u64,
    pub plants_needing_watering: u64,
    // 服务端暂未提供以下两项，固定为 0
    pub plants_needing_sunlight: u64,
    pub due_for_repotting: u64,
}

impl DashboardStats {
    /// 合并两个并发请求的结果，任一失败时对应数字为 0
    pub fn combine(total: Option<u64>, stats: Option<&PlantStats>) -> Self {
        Self {
            total_plants: total.unwrap_or(0),
            plants_needing_watering: stats.map_or(0, |s| s.plants_needing_watering),
            plants_needing_sunlight: 0,
            due_for_repotting: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stats_wire_format() {
        let stats: PlantStats = serde_json::from_value(json!({
            "totalPlants": 15,
            "plantsNeedingWatering": 4
        }))
        .unwrap();
        assert_eq!(stats.total_plants, 15);
        assert_eq!(stats.plants_needing_watering, 4);
    }

    #[test]
    fn test_combine_with_failures() {
        let stats = PlantStats { total_plants: 9, plants_needing_watering: 2 };
        assert_eq!(
            DashboardStats::combine(Some(9), Some(&stats)),
            DashboardStats {
                total_plants: 9,
                plants_needing_watering: 2,
                plants_needing_sunlight: 0,
                due_for_repotting: 0,
            }
        );
        assert_eq!(DashboardStats::combine(None, Some(&stats)).total_plants, 0);
        assert_eq!(DashboardStats::combine(Some(3), None).plants_needing_watering, 0);
    }
}
