use serde::{Deserialize, Serialize};

/// 提醒列表中的一条，仅用于展示，不会持久化
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub plant_name: String,
    pub message: String,
    /// 相对时间，例如 "2 hours ago"
    pub time: String,
    pub urgent: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Watering,
    Sunlight,
    Repotting,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Watering => "watering",
            Self::Sunlight => "sunlight",
            Self::Repotting => "repotting",
        }
    }
}

/// 本地内置的提醒列表
pub fn sample_notifications() -> Vec<Notification> {
    vec![
        Notification {
            id: 1,
            kind: NotificationKind::Watering,
            plant_name: "Fiddle Leaf Fig".to_string(),
            message: "Time to water your Fiddle Leaf Fig!".to_string(),
            time: "2 hours ago".to_string(),
            urgent: true,
        },
        Notification {
            id: 2,
            kind: NotificationKind::Sunlight,
            plant_name: "Aloe Vera".to_string(),
            message: "Your Aloe Vera needs more sunlight today.".to_string(),
            time: "1 day ago".to_string(),
            urgent: false,
        },
        Notification {
            id: 3,
            kind: NotificationKind::Repotting,
            plant_name: "Monstera Deliciosa".to_string(),
            message: "Consider repotting your Monstera - it's getting big!".to_string(),
            time: "3 days ago".to_string(),
            urgent: false,
        },
    ]
}

pub fn urgent_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| n.urgent).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_feed() {
        let feed = sample_notifications();
        assert_eq!(feed.len(), 3);
        assert_eq!(urgent_count(&feed), 1);
        assert_eq!(feed[0].kind, NotificationKind::Watering);

        let value = serde_json::to_value(&feed[2]).unwrap();
        assert_eq!(value["type"], "repotting");
        assert_eq!(value["plantName"], "Monstera Deliciosa");
    }
}
