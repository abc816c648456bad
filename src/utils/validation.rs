use crate::error::{AppError, Result};
use crate::models::plant::PlantDraft;
use validator::{Validate, ValidationError};

/// 名称不能为空或只包含空白字符
pub fn validate_not_blank(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("Plant name is required".into());
        return Err(error);
    }
    Ok(())
}

/// 在发送请求之前校验草稿，失败时不会触达远端服务
pub fn validate_draft(draft: &PlantDraft) -> Result<()> {
    draft.validate().map_err(AppError::ValidatorError)
}

/// 汇总校验错误里的提示信息，供界面展示
pub fn validation_messages(error: &AppError) -> Vec<String> {
    match error {
        AppError::ValidatorError(errors) => {
            let mut messages = errors
                .field_errors()
                .values()
                .flat_map(|errors| errors.iter())
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string())
                })
                .collect::<Vec<_>>();
            messages.sort();
            messages.dedup();
            messages
        }
        AppError::Validation(msg) => vec![msg.clone()],
        _ => Vec::new(),
    }
}
