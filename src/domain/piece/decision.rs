// 着手（列と回転）

use crate::constants::W;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// 子ぷよの向き
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// 0: 軸の上
    Up,
    /// 1: 軸の右
    Right,
    /// 2: 軸の下
    Down,
    /// 3: 軸の左
    Left,
}

impl Rotation {
    pub fn from_index(r: i32) -> Result<Self> {
        match r {
            0 => Ok(Rotation::Up),
            1 => Ok(Rotation::Right),
            2 => Ok(Rotation::Down),
            3 => Ok(Rotation::Left),
            _ => Err(anyhow!("回転が範囲外: {} (0..=3)", r)),
        }
    }

    pub fn index(self) -> i32 {
        match self {
            Rotation::Up => 0,
            Rotation::Right => 1,
            Rotation::Down => 2,
            Rotation::Left => 3,
        }
    }

    /// 子ぷよの列オフセット
    fn column_offset(self) -> isize {
        match self {
            Rotation::Right => 1,
            Rotation::Left => -1,
            Rotation::Up | Rotation::Down => 0,
        }
    }
}

/// 棋譜に記録された生の着手（x は 1 始まり）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub x: i32,
    pub r: i32,
}

impl DecisionRecord {
    pub fn new(x: i32, r: i32) -> Self {
        Self { x, r }
    }

    /// 最終手の表示用に差し込まれるダミー着手
    pub fn terminal() -> Self {
        Self { x: -1, r: -1 }
    }
}

/// 検証済みの着手
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Decision {
    column: usize,
    rotation: Rotation,
}

impl Decision {
    /// 列（1..=W）と回転から作成
    pub fn new(column: usize, rotation: Rotation) -> Result<Self> {
        if !(1..=W).contains(&column) {
            return Err(anyhow!("列が範囲外: {} (1..={})", column, W));
        }
        let decision = Self { column, rotation };
        let child = decision.axis_col() as isize + rotation.column_offset();
        if child < 0 || child >= W as isize {
            return Err(anyhow!(
                "子ぷよが盤面外に出ます: 列{} 回転{}",
                column,
                rotation.index()
            ));
        }
        Ok(decision)
    }

    pub fn try_from_record(record: DecisionRecord) -> Result<Self> {
        let rotation = Rotation::from_index(record.r)?;
        if record.x < 1 {
            return Err(anyhow!("列が範囲外: {} (1..={})", record.x, W));
        }
        Self::new(record.x as usize, rotation)
    }

    /// 1始まりの列
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// 軸ぷよの列（0始まり）
    pub fn axis_col(&self) -> usize {
        self.column - 1
    }

    /// 子ぷよの列（0始まり）
    pub fn child_col(&self) -> usize {
        (self.axis_col() as isize + self.rotation.column_offset()) as usize
    }

    pub fn to_record(self) -> DecisionRecord {
        DecisionRecord {
            x: self.column as i32,
            r: self.rotation.index(),
        }
    }
}

impl TryFrom<DecisionRecord> for Decision {
    type Error = anyhow::Error;

    fn try_from(record: DecisionRecord) -> Result<Self> {
        Self::try_from_record(record)
    }
}
