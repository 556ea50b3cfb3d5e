use env_logger::Env;

/// 初始化 logger，未設定 `RUST_LOG` 時預設為 info
pub fn init() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();
}
