pub mod api;
pub mod store;
pub mod view;

// 重新导出常用类型
pub use api::{CareGuide, HttpPlantApi, PlantApi};
pub use store::{FetchOutcome, PlantStore};
pub use view::{CategoryFilter, DashboardQuery, PlantCard, SortKey, StatusFilter};
