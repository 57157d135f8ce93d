use crate::utils::error::{ExportError, Result};
use chrono::NaiveDate;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ExportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ExportError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ExportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ExportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ExportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 查詢字串是直接串接的，值裡面不能有 & 或 # 否則會切斷參數
pub fn validate_query_value(field_name: &str, value: &str) -> Result<()> {
    if let Some(bad) = value.chars().find(|c| matches!(c, '&' | '#')) {
        return Err(ExportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value cannot contain '{}'", bad),
        });
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(ExportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ExportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_date_order(field_name: &str, first: NaiveDate, last: NaiveDate) -> Result<()> {
    if last < first {
        return Err(ExportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: last.to_string(),
            reason: format!("End date must not be before start date {}", first),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("base_url", "https://localhost:57536").is_ok());
        assert!(validate_url("base_url", "http://127.0.0.1:8080").is_ok());
        assert!(validate_url("base_url", "").is_err());
        assert!(validate_url("base_url", "localhost-no-scheme").is_err());
        assert!(validate_url("base_url", "ftp://localhost").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("step_minutes", 60, 1).is_ok());
        assert!(validate_positive_number("step_minutes", 0, 1).is_err());
    }

    #[test]
    fn test_validate_query_value() {
        assert!(validate_query_value("profile", "greenland").is_ok());
        assert!(validate_query_value("path", r"C:\my_files\export").is_ok());
        assert!(validate_query_value("profile", "a&b").is_err());
        assert!(validate_query_value("profile", "a#b").is_err());
    }

    #[test]
    fn test_validate_date_order() {
        let june = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let august = NaiveDate::from_ymd_opt(2025, 8, 31).unwrap();
        assert!(validate_date_order("date_finish", june, august).is_ok());
        assert!(validate_date_order("date_finish", june, june).is_ok());
        assert!(validate_date_order("date_finish", august, june).is_err());
    }
}
