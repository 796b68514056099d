//! 字段级校验规则

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use reqwest::Url;

use super::FormErrors;

pub(super) const REQUIRED: &str = "This field is required.";

const URL_SCHEMES: &[&str] = &["http", "https", "ftp", "ftps"];

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(
            r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@((?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z0-9-]{2,63}|localhost)$",
        )
        .expect("email pattern is valid")
    })
}

/// 必填文本：去除首尾空白后不能为空
pub(super) fn required(value: Option<&str>, field: &str, errors: &mut FormErrors) -> Option<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Some(v.to_string()),
        _ => {
            errors.add(field, REQUIRED);
            None
        }
    }
}

/// 最大字符数
pub(super) fn max_length(value: &str, max: usize, field: &str, errors: &mut FormErrors) -> bool {
    let count = value.chars().count();
    if count > max {
        errors.add(
            field,
            format!("Ensure this value has at most {max} characters (it has {count})."),
        );
        return false;
    }
    true
}

/// 必填且不超过最大长度
pub(super) fn bounded_text(
    value: Option<&str>,
    max: usize,
    field: &str,
    errors: &mut FormErrors,
) -> Option<String> {
    let value = required(value, field, errors)?;
    max_length(&value, max, field, errors).then_some(value)
}

/// 邮箱地址
pub(super) fn email(value: Option<&str>, field: &str, errors: &mut FormErrors) -> Option<String> {
    let value = bounded_text(value, 254, field, errors)?;
    if !email_regex().is_match(&value) {
        errors.add(field, "Enter a valid email address.");
        return None;
    }
    Some(value)
}

/// URL，缺少协议时补全 `http://`
pub(super) fn url(value: Option<&str>, field: &str, errors: &mut FormErrors) -> Option<String> {
    let value = required(value, field, errors)?;
    let value = if value.contains("://") {
        value
    } else {
        format!("http://{value}")
    };
    if !max_length(&value, 200, field, errors) {
        return None;
    }

    let valid = Url::parse(&value)
        .map(|u| URL_SCHEMES.contains(&u.scheme()) && u.host_str().is_some_and(|h| !h.is_empty()))
        .unwrap_or(false);
    if !valid {
        errors.add(field, "Enter a valid URL.");
        return None;
    }
    Some(value)
}

/// 整数
pub(super) fn integer(value: Option<&str>, field: &str, errors: &mut FormErrors) -> Option<i64> {
    let value = required(value, field, errors)?;
    match value.parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) => {
            errors.add(field, "Enter a whole number.");
            None
        }
    }
}

/// 日期，格式 YYYY-MM-DD
pub(super) fn date(value: Option<&str>, field: &str, errors: &mut FormErrors) -> Option<NaiveDate> {
    let value = required(value, field, errors)?;
    match NaiveDate::parse_from_str(&value, "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(_) => {
            errors.add(field, "Enter a valid date.");
            None
        }
    }
}

/// 复选框：缺省为 false，从不报错
pub(super) fn checkbox(value: Option<&str>) -> bool {
    !matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        None | Some("") | Some("false") | Some("0") | Some("off")
    )
}
