use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// 养护指南的默认文件名，非字母数字字符替换为下划线
pub fn care_guide_filename(plant_name: &str) -> String {
    static NON_ALPHANUMERIC: OnceLock<Regex> = OnceLock::new();

    let pattern = NON_ALPHANUMERIC.get_or_init(|| Regex::new(r"[^a-zA-Z0-9]").unwrap());
    format!("{}_Care_Guide.html", pattern.replace_all(plant_name, "_"))
}

/// 从 `Content-Disposition` 中取出文件名，只保留最后一段路径
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    static FILENAME: OnceLock<Regex> = OnceLock::new();

    let pattern = FILENAME.get_or_init(|| Regex::new(r#"filename="?([^";]+)"?"#).unwrap());
    let raw = pattern.captures(header)?.get(1)?.as_str().trim();

    Path::new(raw)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .map(|name| name.to_string())
}
