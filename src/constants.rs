//! 全局常量定义

/// LLM 相关常量
pub mod llm {
    /// 默认 temperature
    pub const DEFAULT_TEMPERATURE: f32 = 0.5;

    /// Concise 风格的 token 预算
    pub const CONCISE_MAX_TOKENS: u32 = 75;

    /// Normal 风格的 token 预算
    pub const NORMAL_MAX_TOKENS: u32 = 200;

    /// Detailed 风格的 token 预算
    pub const DETAILED_MAX_TOKENS: u32 = 500;
}

/// Commit 相关常量
pub mod commit {
    /// 超过该大小的 diff 在高成本 provider 上触发费用确认（15 KiB）
    pub const LARGE_DIFF_THRESHOLD: usize = 15 * 1024;
}

/// 网络相关常量
pub mod network {
    /// 默认请求超时（秒）
    pub const DEFAULT_REQUEST_TIMEOUT: u64 = 120;

    /// 默认连接超时（秒）
    pub const DEFAULT_CONNECT_TIMEOUT: u64 = 10;
}
