use dialoguer::{Confirm, Select};

use crate::error::Result;

/// 交互式确认提示
///
/// # Arguments
/// * `message` - 提示信息
/// * `default` - 默认值（true = Yes, false = No）
///
/// # Returns
/// * `Ok(true)` - 用户选择 Yes
/// * `Ok(false)` - 用户选择 No
/// * `Err(_)` - 发生错误
pub fn confirm(message: &str, default: bool) -> Result<bool> {
    let result = Confirm::new()
        .with_prompt(message)
        .default(default)
        .interact()?;

    Ok(result)
}

/// 交互式单选提示
///
/// 返回选中项的下标。
pub fn select(message: &str, items: &[&str], default: usize) -> Result<usize> {
    let index = Select::new()
        .with_prompt(message)
        .items(items)
        .default(default)
        .interact()?;

    Ok(index)
}
