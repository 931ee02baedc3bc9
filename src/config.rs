use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

/// 默认时区（Track LMS 部署在日本）
pub const DEFAULT_TIMEZONE: &str = "Asia/Tokyo";
/// 默认输出目录名
pub const DEFAULT_OUT_DIRNAME: &str = "qti-results";
/// 配置文件名，放在工作目录下即可生效
const CONFIG_FILE_NAME: &str = "tracklms_to_qti.toml";

/// 程序配置
///
/// 优先级：默认值 < 配置文件 < 环境变量 < 命令行参数（在 app 层合并）
#[derive(Clone, Debug)]
pub struct Config {
    /// 时间戳本地化使用的时区名称
    pub timezone: String,
    /// 输出目录名（相对输入文件所在目录，或 stdin 模式下相对当前目录）
    pub out_dirname: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

/// 配置文件的可选字段，缺省字段不覆盖已有值
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    timezone: Option<String>,
    out_dirname: Option<String>,
    verbose_logging: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            out_dirname: DEFAULT_OUT_DIRNAME.to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 加载完整配置：默认值 + 配置文件 + 环境变量
    pub fn load() -> Self {
        let mut config = Self::default();
        config.apply_file(Path::new(CONFIG_FILE_NAME));
        config.apply_env();
        config
    }

    /// 读取并合并 TOML 配置文件，文件不存在则跳过，解析失败只警告不中断
    fn apply_file(&mut self, path: &Path) {
        if !path.is_file() {
            return;
        }
        match fs::read_to_string(path) {
            Ok(text) => match toml::from_str::<ConfigFile>(&text) {
                Ok(file) => self.merge_file(file),
                Err(e) => warn!("配置文件解析失败 {}: {}", path.display(), e),
            },
            Err(e) => warn!("无法读取配置文件 {}: {}", path.display(), e),
        }
    }

    fn merge_file(&mut self, file: ConfigFile) {
        if let Some(timezone) = file.timezone {
            self.timezone = timezone;
        }
        if let Some(out_dirname) = file.out_dirname {
            self.out_dirname = out_dirname;
        }
        if let Some(verbose_logging) = file.verbose_logging {
            self.verbose_logging = verbose_logging;
        }
    }

    fn apply_env(&mut self) {
        if let Ok(timezone) = std::env::var("TRACKLMS_TIMEZONE") {
            self.timezone = timezone;
        }
        if let Ok(out_dirname) = std::env::var("TRACKLMS_OUT_DIRNAME") {
            self.out_dirname = out_dirname;
        }
        self.verbose_logging = std::env::var("VERBOSE_LOGGING")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(self.verbose_logging);
    }
}
