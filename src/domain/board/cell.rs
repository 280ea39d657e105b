// セル型定義（ドメイン層）

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// ぷよの色（通常色5種）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
}

impl Color {
    pub const ALL: [Color; 5] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Yellow,
        Color::Purple,
    ];

    /// 文字からColorに変換（大文字小文字は区別しない）
    pub fn from_char(ch: char) -> Result<Self> {
        match ch.to_ascii_uppercase() {
            'R' => Ok(Color::Red),
            'G' => Ok(Color::Green),
            'B' => Ok(Color::Blue),
            'Y' => Ok(Color::Yellow),
            'P' => Ok(Color::Purple),
            _ => Err(anyhow!("不正な色文字: {:?}", ch)),
        }
    }

    /// Colorを文字に変換
    pub fn to_char(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::Yellow => 'Y',
            Color::Purple => 'P',
        }
    }

    /// 色集合のビット位置
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Green => "Green",
            Color::Blue => "Blue",
            Color::Yellow => "Yellow",
            Color::Purple => "Purple",
        }
    }
}

/// 盤面のセル
///
/// `Vanishing` は消去演出の1フレームだけに現れ、直後の落下処理で取り除かれる。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    Ojama,
    Kata,
    Normal(Color),
    Vanishing(Color),
}

impl Cell {
    /// 通常色のぷよか（連結判定の対象）
    pub fn is_normal(self) -> bool {
        matches!(self, Cell::Normal(_))
    }

    /// おじゃま・固ぷよか
    pub fn is_garbage(self) -> bool {
        matches!(self, Cell::Ojama | Cell::Kata)
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// 落下後も盤面に残るセルか
    pub fn survives_gravity(self) -> bool {
        self.is_normal() || self.is_garbage()
    }

    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Normal(c) | Cell::Vanishing(c) => Some(c),
            _ => None,
        }
    }

    /// 消去予定の印を付けたセルを返す（通常色以外はそのまま）
    pub fn into_vanishing(self) -> Cell {
        match self {
            Cell::Normal(c) => Cell::Vanishing(c),
            other => other,
        }
    }

    /// 描画層と共有する名前（"Red", "Red-V", "Empty" など）
    pub fn name(self) -> String {
        match self {
            Cell::Empty => "Empty".to_string(),
            Cell::Wall => "Wall".to_string(),
            Cell::Ojama => "Ojama".to_string(),
            Cell::Kata => "Kata".to_string(),
            Cell::Normal(c) => c.name().to_string(),
            Cell::Vanishing(c) => format!("{}-V", c.name()),
        }
    }

    /// 名前からCellに変換
    pub fn from_name(name: &str) -> Result<Self> {
        let (base, vanishing) = match name.strip_suffix("-V") {
            Some(base) => (base, true),
            None => (name, false),
        };
        let cell = match base {
            "Empty" if !vanishing => Cell::Empty,
            "Wall" if !vanishing => Cell::Wall,
            "Ojama" if !vanishing => Cell::Ojama,
            "Kata" if !vanishing => Cell::Kata,
            _ => {
                let color = Color::ALL
                    .into_iter()
                    .find(|c| c.name() == base)
                    .ok_or_else(|| anyhow!("不正なセル名: {:?}", name))?;
                if vanishing {
                    Cell::Vanishing(color)
                } else {
                    Cell::Normal(color)
                }
            }
        };
        Ok(cell)
    }

    /// 文字からCellに変換（テキスト盤面用）
    pub fn from_char(ch: char) -> Result<Self> {
        match ch {
            '.' | '・' => Ok(Cell::Empty),
            'O' | 'o' => Ok(Cell::Ojama),
            'K' | 'k' => Ok(Cell::Kata),
            _ => Color::from_char(ch)
                .map(Cell::Normal)
                .map_err(|_| anyhow!("不正な文字: {:?}", ch)),
        }
    }

    /// Cellを文字に変換（消去予定は小文字）
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Wall => '#',
            Cell::Ojama => 'O',
            Cell::Kata => 'K',
            Cell::Normal(c) => c.to_char(),
            Cell::Vanishing(c) => c.to_char().to_ascii_lowercase(),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl From<Cell> for String {
    fn from(cell: Cell) -> Self {
        cell.name()
    }
}

impl TryFrom<String> for Cell {
    type Error = anyhow::Error;

    fn try_from(name: String) -> Result<Self> {
        Cell::from_name(&name)
    }
}

/// 1ステップで消えた色の集合（5色なのでビット集合で持つ）
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColorSet(u8);

impl ColorSet {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, color: Color) {
        self.0 |= 1 << color.index();
    }

    pub fn contains(&self, color: Color) -> bool {
        self.0 & (1 << color.index()) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}
