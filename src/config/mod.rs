pub mod structs;

use config::{Config, Environment, File};
use directories::ProjectDirs;
use std::path::PathBuf;

use crate::error::Result;
pub use structs::*;

/// 加载应用配置
///
/// 配置加载优先级（从高到低）：
/// 1. 环境变量（GCMT__* 前缀，双下划线表示嵌套）
///    - 例如：`GCMT__COMMIT__PROVIDER=deepseek`
///    - 例如：`GCMT__UI__COLORED=false`
/// 2. 配置文件（~/.config/gcmt/config.toml）
/// 3. 默认值
pub fn load_config() -> Result<AppConfig> {
    let mut builder = Config::builder();

    // 1. 设置默认值
    builder = builder
        .set_default("commit.provider", "openai")?
        .set_default("commit.style", "Normal - Up to 500 characters")?
        .set_default("commit.language", "English")?
        .set_default("commit.confirm", true)?
        .set_default("ui.colored", true)?
        .set_default(
            "network.request_timeout",
            crate::constants::network::DEFAULT_REQUEST_TIMEOUT,
        )?
        .set_default(
            "network.connect_timeout",
            crate::constants::network::DEFAULT_CONNECT_TIMEOUT,
        )?;

    // 2. 加载配置文件（如果存在）
    if let Some(config_path) = get_config_path()
        && config_path.exists()
    {
        builder = builder.add_source(File::from(config_path));
    }

    // 3. 加载环境变量（GCMT__*，优先级最高）
    // 使用双下划线作为嵌套层级分隔符，避免与字段名中的单下划线冲突
    builder = builder.add_source(
        Environment::with_prefix("GCMT")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let app_config: AppConfig = config.try_deserialize()?;

    Ok(app_config)
}

/// 获取配置文件路径
///
/// 返回 ~/.config/gcmt/config.toml
pub fn get_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "gcmt").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// 获取配置目录路径
pub fn get_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "gcmt").map(|dirs| dirs.config_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serial_test::serial;
    use std::env;

    /// RAII 环境变量 guard，确保测试后清理
    struct EnvGuard {
        key: String,
        original: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let original = env::var(key).ok();
            // SAFETY: 测试环境中修改环境变量是安全的，且使用 serial_test 确保串行执行
            unsafe { env::set_var(key, value) };
            Self {
                key: key.to_string(),
                original,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            // SAFETY: 测试环境中修改环境变量是安全的
            match &self.original {
                Some(v) => unsafe { env::set_var(&self.key, v) },
                None => unsafe { env::remove_var(&self.key) },
            }
        }
    }

    #[test]
    #[serial]
    fn test_load_config_defaults() {
        let config = load_config().unwrap();
        assert_eq!(config.commit.provider, "openai");
        assert_eq!(config.commit.style, "Normal - Up to 500 characters");
        assert_eq!(config.commit.language, "English");
        assert!(config.commit.confirm);
        assert!(config.ui.colored);
        assert_eq!(config.network.request_timeout, 120);
        assert_eq!(config.network.connect_timeout, 10);
    }

    #[test]
    #[serial]
    fn test_env_override_provider() {
        let _guard = EnvGuard::set("GCMT__COMMIT__PROVIDER", "deepseek");
        let config = load_config().unwrap();
        assert_eq!(config.commit.provider, "deepseek");
    }

    #[test]
    #[serial]
    fn test_env_override_nested_ui() {
        let _guard = EnvGuard::set("GCMT__UI__COLORED", "false");
        let config = load_config().unwrap();
        assert!(!config.ui.colored);
    }

    #[test]
    #[serial]
    fn test_env_override_language() {
        let _guard = EnvGuard::set("GCMT__COMMIT__LANGUAGE", "Portuguese");
        let config = load_config().unwrap();
        assert_eq!(config.commit.language, "Portuguese");
    }
}
