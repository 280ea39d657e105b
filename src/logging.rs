// 詳細ログ（既定では無効。ファイル未設定なら標準エラーへ）

use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// グローバルな詳細ログフラグ
pub static VERBOSE_LOGGING: AtomicBool = AtomicBool::new(false);

/// ログファイルのグローバルハンドル
static LOG_FILE: Mutex<Option<File>> = Mutex::new(None);

/// ログの設定
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    pub verbose: bool,
    /// 出力先。None なら標準エラー
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl LogConfig {
    /// プロセス全体のログ設定に反映する
    pub fn apply(&self) -> std::io::Result<()> {
        match &self.file {
            Some(path) => init_log_file(path)?,
            None => close_log_file(),
        }
        if self.verbose {
            enable_verbose_logging();
        } else {
            disable_verbose_logging();
        }
        Ok(())
    }
}

/// ログファイルを初期化する
pub fn init_log_file(path: impl AsRef<Path>) -> std::io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;

    // 他スレッドがパニックしてもログだけは続ける
    let mut log_file = LOG_FILE.lock().unwrap_or_else(|e| e.into_inner());
    *log_file = Some(file);
    Ok(())
}

/// ログファイルを閉じる（以降の出力は標準エラーへ）
pub fn close_log_file() {
    let mut log_file = LOG_FILE.lock().unwrap_or_else(|e| e.into_inner());
    *log_file = None;
}

/// ログを書き込む
pub fn write_log(message: String) {
    let mut log_file = LOG_FILE.lock().unwrap_or_else(|e| e.into_inner());
    match log_file.as_mut() {
        Some(file) => {
            let _ = writeln!(file, "{}", message);
            let _ = file.flush();
        }
        None => eprintln!("{}", message),
    }
}

pub fn enable_verbose_logging() {
    VERBOSE_LOGGING.store(true, Ordering::Relaxed);
}

pub fn disable_verbose_logging() {
    VERBOSE_LOGGING.store(false, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE_LOGGING.load(Ordering::Relaxed)
}

/// 詳細ログ出力マクロ（無効時は引数を評価しない）
#[macro_export]
macro_rules! vlog {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            $crate::logging::write_log(format!($($arg)*));
        }
    };
}
