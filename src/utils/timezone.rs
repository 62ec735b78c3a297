//! 时区转换
//!
//! 磁盘上的访问规则日期是课程时区下的本地时间，写库前转换为带偏移的 RFC 3339 字符串。

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone};
use chrono_tz::Tz;

use crate::errors::{Result, SyncError};

const LOCAL_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// 将日期表达式解释为 `tz` 下的时间并格式化为 `YYYY-MM-DDTHH:MM:SS±HH:MM`
///
/// 已带偏移的输入会换算到 `tz`；夏令时重叠时取较早的时刻，落在跳变空档内的时间视为无效。
pub fn format_in_timezone(input: &str, tz: Tz) -> Result<String> {
    let input = input.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(input) {
        return Ok(format_local(&with_offset.with_timezone(&tz)));
    }

    let naive = parse_naive(input)
        .ok_or_else(|| SyncError::date_parse(format!("无法解析日期: {input}")))?;

    let local = tz.from_local_datetime(&naive).earliest().ok_or_else(|| {
        SyncError::date_parse(format!("日期 {input} 在时区 {tz} 中不存在"))
    })?;

    Ok(format_local(&local))
}

fn parse_naive(input: &str) -> Option<NaiveDateTime> {
    LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn format_local(dt: &DateTime<Tz>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, false)
}
