use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use plant_care::{
    models::{
        notification::{sample_notifications, urgent_count},
        Notice, Operation, PlantDraft, PlantId, PlantType, SunlightNeeds, WateringFrequency,
    },
    services::{DashboardQuery, PlantCard},
    utils::validation::validation_messages,
    AppError, Config, FetchOutcome, HttpPlantApi, PlantApi, PlantStore,
};

#[derive(Parser)]
#[command(name = "plant-care")]
#[command(about = "Plant care dashboard backed by the plant service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// 按配置的过滤与排序显示植物卡片（默认）
    Dashboard,
    /// 添加一株新植物
    Add {
        name: String,
        #[arg(long = "type")]
        plant_type: String,
        #[arg(long, default_value = "weekly")]
        watering: String,
        #[arg(long, default_value = "medium")]
        sunlight: String,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        photo: Option<PathBuf>,
    },
    /// 修改已有植物
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        photo: Option<PathBuf>,
    },
    /// 记录一次浇水
    Water { id: i64 },
    Delete { id: i64 },
    /// 下载养护指南
    CareGuide { id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::from_env()?;

    // 初始化日志，生产环境输出 JSON
    let registry = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.clone()));
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    info!("Starting plant care dashboard against {}", config.api_base_url);

    let api = HttpPlantApi::new(&config)?;
    let mut store = PlantStore::new(api, &config);

    // 拉取植物列表，失败时不会中断
    let outcome = store.fetch_all().await;
    if let Some(notice) = outcome.notice() {
        warn!("{}", notice.message);
    }
    if let FetchOutcome::Loaded(count) = outcome {
        info!("Working set loaded with {} plants", count);
    }

    match cli.command.unwrap_or(Command::Dashboard) {
        Command::Dashboard => show_dashboard(&store, &config).await,
        Command::Add {
            name,
            plant_type,
            watering,
            sunlight,
            notes,
            photo,
        } => {
            let draft = PlantDraft {
                name,
                plant_type: PlantType::parse(&plant_type),
                watering_frequency: Some(WateringFrequency::parse_lossy(&watering)),
                sunlight_needs: Some(SunlightNeeds::parse_lossy(&sunlight)),
                care_notes: notes,
                image_url: None,
            };
            let result = match photo {
                Some(path) => store.create_with_photo(draft, &path).await,
                None => store.create(draft).await,
            };
            match result {
                Ok(plant) => {
                    announce(&format!("{} has been added to your collection!", plant.name))
                }
                Err(e) => report_failure(Operation::Create, &e),
            }
        }
        Command::Edit {
            id,
            name,
            notes,
            photo,
        } => {
            let result = match store.get(PlantId(id)).cloned() {
                Some(mut plant) => {
                    if let Some(name) = name {
                        plant.name = name;
                    }
                    if notes.is_some() {
                        plant.care_notes = notes;
                    }
                    match photo {
                        Some(path) => store.update_with_photo(plant, &path).await,
                        None => store.update(plant).await,
                    }
                }
                None => Err(AppError::not_found(&format!("Plant {}", id))),
            };
            match result {
                Ok(plant) => announce(&format!("{} has been updated!", plant.name)),
                Err(e) => report_failure(Operation::Update, &e),
            }
        }
        Command::Water { id } => match store.record_watering(PlantId(id)).await {
            Ok(plant) => announce(&format!("{} has been watered!", plant.name)),
            Err(e) => report_failure(Operation::Water, &e),
        },
        Command::Delete { id } => match store.delete(PlantId(id)).await {
            Ok(()) => announce("Plant deleted successfully"),
            Err(e) => report_failure(Operation::Delete, &e),
        },
        Command::CareGuide { id } => {
            match store.download_care_guide(PlantId(id), &config.care_guide_dir).await {
                Ok(path) => {
                    announce("PDF care guide downloaded successfully!");
                    info!("Saved to {}", path.display());
                }
                Err(e) => report_failure(Operation::CareGuide, &e),
            }
        }
    }

    Ok(())
}

fn announce(message: &str) {
    info!("{}", Notice::success(message).message);
}

fn report_failure(operation: Operation, error: &AppError) {
    warn!("{}", Notice::failure(operation, error).message);
    for message in validation_messages(error) {
        warn!("  - {}", message);
    }
}

async fn show_dashboard<A: PlantApi>(store: &PlantStore<A>, config: &Config) {
    if store.is_empty() {
        info!("No plants yet. Start your plant collection by adding your first plant!");
        return;
    }

    let stats = store.refresh_stats().await;
    info!(
        "Total plants: {}, need watering: {}, need sunlight: {}, due for repotting: {}",
        stats.total_plants,
        stats.plants_needing_watering,
        stats.plants_needing_sunlight,
        stats.due_for_repotting
    );

    let counts = store.category_counts();
    info!("Category counts: all={} {:?}", counts.all, counts.by_type);

    // 按默认的过滤与排序生成卡片
    let today = Local::now().date_naive();
    let query = DashboardQuery::from_config(config);
    for plant in store.dashboard(&query, today) {
        let card = PlantCard::from_plant(&plant, today);
        info!(
            "[{}] {} ({}) - {}, {}, next watering {}{}{}",
            card.id,
            card.name,
            card.type_label,
            card.watering_label,
            card.sunlight_label,
            card.next_watering.as_deref().unwrap_or("not scheduled"),
            if card.needs_watering { " - Water!" } else { "" },
            if card.needs_sunlight { " - Needs sunlight" } else { "" },
        );
    }

    let notifications = sample_notifications();
    info!(
        "{} notifications ({} urgent)",
        notifications.len(),
        urgent_count(&notifications)
    );
    for notification in &notifications {
        info!(
            "[{}] {}: {} ({})",
            notification.kind.as_str(),
            notification.plant_name,
            notification.message,
            notification.time
        );
    }
}
