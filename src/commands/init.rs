use crate::config;
use crate::error::{GcmtError, Result};
use crate::ui;
use std::fs;

/// 默认配置模板
const DEFAULT_CONFIG: &str = r#"# gcmt-rs configuration
#
# provider: openai | gemini | anthropic | deepseek
# style:    "Concise - Up to 100 characters"
#           "Normal - Up to 500 characters"
#           "Detailed - No character limit"

[commit]
provider = "openai"
style = "Normal - Up to 500 characters"
language = "English"
confirm = true

# API keys can also come from environment variables:
# OPENAI_API_KEY, GEMINI_API_KEY, ANTHROPIC_API_KEY, DEEPSEEK_API_KEY

[providers.openai]
# api_key = "sk-..."
# model = "gpt-4o"

[providers.gemini]
# api_key = "AIza..."
# model = "gemini-2.0-flash"

[providers.anthropic]
# api_key = "sk-ant-..."
# model = "claude-3-sonnet-20240229"

[providers.deepseek]
# api_key = "sk-..."
# model = "deepseek-chat"

[ui]
colored = true

[network]
request_timeout = 120
connect_timeout = 10
"#;

/// 初始化配置文件
pub fn run(force: bool, colored: bool) -> Result<()> {
    // 1. 获取配置目录和文件路径
    let config_dir = config::get_config_dir()
        .ok_or_else(|| GcmtError::Config("Failed to determine config directory".to_string()))?;

    let config_file = config_dir.join("config.toml");

    // 2. 检查配置文件是否已存在
    if config_file.exists() && !force {
        ui::warning(
            &format!("Config file already exists: {}", config_file.display()),
            colored,
        );
        println!();
        println!("Use 'gcmt-rs init --force' to overwrite it.");
        return Ok(());
    }

    // 3. 创建配置目录并写入模板
    fs::create_dir_all(&config_dir)?;
    fs::write(&config_file, DEFAULT_CONFIG)?;
    ui::success(
        &format!("Created config file: {}", config_file.display()),
        colored,
    );

    // 4. 设置文件权限（仅 Unix，文件里可能有 API key）
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&config_file)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&config_file, perms)?;
    }

    // 5. 显示下一步提示
    println!();
    println!(
        "{}",
        ui::info("Next: add an API key for your provider", colored)
    );
    println!("  1. Edit {}", config_file.display());
    println!("  2. Stage changes and run 'gcmt-rs commit'");
    println!();

    Ok(())
}
