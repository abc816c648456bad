pub mod notice;
pub mod notification;
pub mod plant;
pub mod sample;
pub mod stats;

// 重新导出常用类型
pub use notice::{Notice, NoticeKind, Operation};
pub use notification::{Notification, NotificationKind};
pub use plant::{
    Plant, PlantDraft, PlantId, PlantPatch, PlantType, SunlightNeeds, Urgency, WateringFrequency,
};
pub use stats::{DashboardStats, PlantStats};
