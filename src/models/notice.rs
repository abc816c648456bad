use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// 用户触发的操作，用于生成提示文案
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Create,
    Update,
    Delete,
    Water,
    CareGuide,
}

impl Operation {
    fn verb(&self) -> &'static str {
        match self {
            Self::Create => "create plant",
            Self::Update => "update plant",
            Self::Delete => "delete plant",
            Self::Water => "water plant",
            Self::CareGuide => "generate PDF",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

/// 展示给用户的单条提示（toast）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Warning, message: message.into() }
    }

    /// 把任意失败转换成一条面向用户的提示
    pub fn failure(operation: Operation, error: &AppError) -> Self {
        let message = match error {
            AppError::Validation(_) | AppError::ValidatorError(_) => {
                "Please fill in all required fields".to_string()
            }
            AppError::Conflict(_) => {
                "This plant was changed elsewhere. Reload and try again.".to_string()
            }
            AppError::NotFound(_) => "Plant not found. It may have been deleted.".to_string(),
            _ => format!("Failed to {}. Please try again.", operation.verb()),
        };
        Self { kind: NoticeKind::Error, message }
    }

    pub fn offline() -> Self {
        Self::warning("Failed to load plants. Using offline data.")
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}
