use crate::cli::ConfigAction;
use crate::config::{self, AppConfig};
use crate::error::{GcmtError, Result};
use crate::ui;

/// 执行 config 命令
pub fn run(action: Option<ConfigAction>, config: &AppConfig) -> Result<()> {
    match action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Path => {
            let path = config::get_config_path()
                .ok_or_else(|| GcmtError::Config("Failed to determine config path".to_string()))?;
            println!("{}", path.display());
            Ok(())
        }
        ConfigAction::Show => show(config),
        ConfigAction::Edit => edit(config.ui.colored),
    }
}

/// 打印生效的配置（API key 不会出现在输出中）
fn show(config: &AppConfig) -> Result<()> {
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| GcmtError::Config(format!("Failed to render config: {e}")))?;
    print!("{rendered}");
    Ok(())
}

/// 在系统编辑器中打开配置文件
fn edit(colored: bool) -> Result<()> {
    let path = config::get_config_path()
        .ok_or_else(|| GcmtError::Config("Failed to determine config path".to_string()))?;

    if !path.exists() {
        ui::warning(
            "No config file found. Run 'gcmt-rs init' to create one.",
            colored,
        );
        return Ok(());
    }

    edit::edit_file(&path)?;
    ui::success("Config file saved.", colored);
    Ok(())
}
