//! 时间类型模块
//!
//! 服务端返回的时间字段都是字符串，格式并不统一
//! (RFC 3339 / `YYYY-MM-DD HH:MM:SS` / 仅日期)。
//! `PublishedAt` 负责解析并提供展示用的格式。

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fmt;

/// 发布时间 (UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PublishedAt(DateTime<Utc>);

impl PublishedAt {
    /// 解析时间字符串
    ///
    /// 返回 None 如果所有格式都解析失败
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self(dt.with_timezone(&Utc)));
        }

        if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
            return Some(Self(naive.and_utc()));
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| Self(naive.and_utc()))
    }

    #[inline]
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// 仅日期部分，用于列表展示
    pub fn date_label(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl From<DateTime<Utc>> for PublishedAt {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl fmt::Display for PublishedAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_with_offset() {
        let p = PublishedAt::parse("2024-05-01T08:30:00+08:00").unwrap();
        assert_eq!(p.to_string(), "2024-05-01 00:30");
        assert_eq!(p.date_label(), "2024-05-01");
    }

    #[test]
    fn parses_plain_datetime_and_date() {
        assert_eq!(
            PublishedAt::parse("2024-05-01 12:00:00").unwrap().to_string(),
            "2024-05-01 12:00"
        );
        assert_eq!(
            PublishedAt::parse(" 2023-12-31 ").unwrap().to_string(),
            "2023-12-31 00:00"
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(PublishedAt::parse("yesterday").is_none());
        assert!(PublishedAt::parse("").is_none());
    }

    #[test]
    fn orders_chronologically() {
        let a = PublishedAt::parse("2024-01-01").unwrap();
        let b = PublishedAt::parse("2024-01-02T00:00:00Z").unwrap();
        assert!(a < b);
    }
}
