//! 时间戳服务 - 业务能力层
//!
//! 只负责"解析 + 本地化 + 格式化"一个时间戳的能力，不关心字段来源。

use chrono::{NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use tracing::warn;

use crate::config::DEFAULT_TIMEZONE;
use crate::error::{ConversionError, Result};

/// 输入格式：Track LMS 导出的本地时间
const INPUT_FORMAT: &str = "%Y/%m/%d %H:%M:%S";
/// 输出格式：带 UTC 偏移的 ISO-8601
const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";
/// 时区名无法识别时的第一回退
const FALLBACK_TIMEZONE: &str = "UTC";

/// 时间戳服务
pub struct TimestampService {
    timezone: Tz,
}

impl TimestampService {
    /// 创建服务
    ///
    /// 时区名无法识别时依次回退到 UTC 和默认时区，两个回退都失败才报错，
    /// 错误里带的是调用方要求的那个时区名。
    pub fn new(timezone_name: &str) -> Result<Self> {
        Ok(Self {
            timezone: resolve_timezone(timezone_name)?,
        })
    }

    /// 当前生效的时区
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// 解析并本地化一个时间戳字段
    ///
    /// 夏令时回拨造成的歧义时间取较早的偏移，
    /// 时钟跳变造成的不存在时间按无效时间戳处理。
    pub fn localize(&self, field: &str, value: &str) -> Result<String> {
        let invalid = || ConversionError::InvalidTimestamp {
            field: field.to_string(),
            value: value.to_string(),
        };
        let naive = NaiveDateTime::parse_from_str(value, INPUT_FORMAT).map_err(|_| invalid())?;
        let localized = self
            .timezone
            .from_local_datetime(&naive)
            .earliest()
            .ok_or_else(invalid)?;
        Ok(localized.format(OUTPUT_FORMAT).to_string())
    }
}

fn resolve_timezone(name: &str) -> Result<Tz> {
    if let Ok(tz) = name.parse::<Tz>() {
        return Ok(tz);
    }
    warn!("⚠️ 无法识别时区 {}，尝试回退", name);
    for fallback in [FALLBACK_TIMEZONE, DEFAULT_TIMEZONE] {
        if let Ok(tz) = fallback.parse::<Tz>() {
            warn!("已回退到时区 {}", fallback);
            return Ok(tz);
        }
    }
    Err(ConversionError::UnknownTimezone {
        timezone: name.to_string(),
    })
}
