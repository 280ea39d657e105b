// 盤面定数と得点計算用テーブル

/// ====== 盤面定数 ======
pub const W: usize = 6;
pub const H: usize = 13;

/// 最上段（幽霊段）の行番号。連結判定・消去の対象外
pub const GHOST_ROW: usize = 0;

/// 消去に必要な最小連結数
pub const VANISH_THRESHOLD: usize = 4;

/// 1回の着手で起こりうる連鎖数の上限（毎回4個以上消えるため）
pub const MAX_CHAIN: usize = H * W / VANISH_THRESHOLD;

/// ====== ボーナステーブル（添字 = 個数） ======

// 連鎖ボーナス
pub const CHAIN_BONUS: [u32; 20] = [
    0, 0, 8, 16, 32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448, 480, 512,
];

// 色数ボーナス
pub const COLOR_BONUS: [u32; 6] = [0, 0, 3, 6, 12, 24];

// 連結ボーナス（11個以上は11として扱う）
pub const LONG_BONUS: [u32; 12] = [0, 0, 0, 0, 0, 2, 3, 4, 5, 6, 7, 10];
