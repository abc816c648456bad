use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Service configuration
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub environment: String,
    pub log_level: String,

    // Offline behaviour
    pub offline_fallback: bool,

    // Dashboard defaults
    pub default_category: String,
    pub default_status: String,
    pub default_sort: String,

    // Care guide downloads
    pub care_guide_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api".to_string(),
            request_timeout_secs: 30,
            environment: "development".to_string(),
            log_level: "plant_care=debug".to_string(),
            offline_fallback: true,
            default_category: "all".to_string(),
            default_status: "all".to_string(),
            default_sort: "name".to_string(),
            care_guide_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        // 加载 .env 文件（如果存在）
        dotenv::dotenv().ok();

        let api_base_url = normalize_base_url(
            &env::var("PLANT_API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080/api".to_string()),
        )?;

        Ok(Config {
            api_base_url,
            request_timeout_secs: env::var("PLANT_API_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "plant_care=debug".to_string()),

            offline_fallback: env::var("OFFLINE_FALLBACK")
                .unwrap_or_else(|_| "true".to_string())
                .parse()?,

            default_category: env::var("DEFAULT_CATEGORY").unwrap_or_else(|_| "all".to_string()),
            default_status: env::var("DEFAULT_STATUS").unwrap_or_else(|_| "all".to_string()),
            default_sort: env::var("DEFAULT_SORT").unwrap_or_else(|_| "name".to_string()),

            care_guide_dir: env::var("CARE_GUIDE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
        })
    }

    /// 以给定的服务地址构建配置，其余取默认值
    pub fn with_base_url(base_url: &str) -> anyhow::Result<Self> {
        Ok(Self {
            api_base_url: normalize_base_url(base_url)?,
            ..Self::default()
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// 校验服务地址并去掉末尾的 `/`
fn normalize_base_url(raw: &str) -> anyhow::Result<String> {
    let parsed = Url::parse(raw)
        .map_err(|e| anyhow::anyhow!("Invalid PLANT_API_BASE_URL '{}': {}", raw, e))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!("PLANT_API_BASE_URL must use http or https, got '{}'", parsed.scheme());
    }
    Ok(raw.trim_end_matches('/').to_string())
}
