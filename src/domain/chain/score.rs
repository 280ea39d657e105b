// 1ステップ分の得点計算

use crate::constants::{CHAIN_BONUS, COLOR_BONUS, LONG_BONUS};
use crate::domain::board::{Color, ColorSet};

/// 1回の消去で集計する値
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VanishStats {
    /// 消えたぷよの総数
    pub vanished: usize,
    /// 連結ボーナスの合計
    pub long_bonus: u32,
    /// 消えた色
    pub colors: ColorSet,
}

impl VanishStats {
    /// 連結成分1つ分を加算
    pub fn add_group(&mut self, color: Color, size: usize) {
        self.vanished += size;
        self.long_bonus += long_bonus(size);
        self.colors.insert(color);
    }

    pub fn is_empty(&self) -> bool {
        self.vanished == 0
    }

    /// chain 連鎖目としての得点
    pub fn score(&self, chain: usize) -> u64 {
        if self.is_empty() {
            return 0;
        }
        let bonus_sum = self.long_bonus + color_bonus(self.colors.len()) + chain_bonus(chain);
        self.vanished as u64 * u64::from(bonus_sum.max(1)) * 10
    }
}

pub fn long_bonus(size: usize) -> u32 {
    LONG_BONUS[size.min(LONG_BONUS.len() - 1)]
}

pub fn color_bonus(colors: usize) -> u32 {
    debug_assert!(colors < COLOR_BONUS.len(), "色数が多すぎる: {}", colors);
    COLOR_BONUS[colors.min(COLOR_BONUS.len() - 1)]
}

pub fn chain_bonus(chain: usize) -> u32 {
    debug_assert!(chain < CHAIN_BONUS.len(), "連鎖数が表の範囲外: {}", chain);
    CHAIN_BONUS[chain.min(CHAIN_BONUS.len() - 1)]
}
