use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 註冊 Ctrl-C 處理器，回傳批次流程輪詢用的旗標
pub fn setup_shutdown_signal() -> Result<Arc<AtomicBool>, ctrlc::Error> {
    let shutdown_signal = Arc::new(AtomicBool::new(false));
    let signal_clone = Arc::clone(&shutdown_signal);

    ctrlc::set_handler(move || {
        signal_clone.store(true, Ordering::SeqCst);
        eprintln!("\n收到中斷信號，目前的影片完成後停止...");
    })?;

    Ok(shutdown_signal)
}
