//! 监听端口解析
//!
//! 优先级：命令行参数 > `PORT` 环境变量 > 默认 6969。空字符串视为未提供

/// 默认监听端口
pub const DEFAULT_PORT: &str = "6969";

/// 解析最终使用的端口（只做选择，不做校验；非法端口在绑定时报错）
pub fn resolve_port(cli_arg: Option<&str>, env_port: Option<&str>) -> String {
    fn provided(value: Option<&str>) -> Option<&str> {
        value.filter(|v| !v.is_empty())
    }

    provided(cli_arg)
        .or_else(|| provided(env_port))
        .unwrap_or(DEFAULT_PORT)
        .to_string()
}
