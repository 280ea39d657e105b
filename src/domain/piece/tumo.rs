// 組ぷよ（ツモ）

use crate::domain::board::Color;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 軸ぷよと子ぷよの組
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Tumo {
    pub axis: Color,
    pub child: Color,
}

impl Tumo {
    pub fn new(axis: Color, child: Color) -> Self {
        Self { axis, child }
    }

    /// 軸と子を入れ替えた組（下向き配置用）
    pub fn swapped(self) -> Self {
        Self {
            axis: self.child,
            child: self.axis,
        }
    }

    /// ゾロ（同色）か
    pub fn is_same_color(self) -> bool {
        self.axis == self.child
    }

    /// ツモ文字列の列を変換（エラーには何番目かを含める）
    pub fn parse_seq<S: AsRef<str>>(codes: &[S]) -> Result<Vec<Tumo>> {
        codes
            .iter()
            .enumerate()
            .map(|(i, code)| {
                code.as_ref()
                    .parse::<Tumo>()
                    .with_context(|| format!("{}番目のツモが不正です", i))
            })
            .collect()
    }
}

impl FromStr for Tumo {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return Err(anyhow!("ツモは2文字である必要があります: {:?}", s));
        }
        Ok(Self {
            axis: Color::from_char(chars[0])?,
            child: Color::from_char(chars[1])?,
        })
    }
}

impl fmt::Display for Tumo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.axis.to_char(), self.child.to_char())
    }
}

impl From<Tumo> for String {
    fn from(tumo: Tumo) -> Self {
        tumo.to_string()
    }
}

impl TryFrom<String> for Tumo {
    type Error = anyhow::Error;

    fn try_from(code: String) -> Result<Self> {
        code.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_letter_code() {
        let tumo: Tumo = "RG".parse().unwrap();
        assert_eq!(tumo, Tumo::new(Color::Red, Color::Green));
        assert_eq!(tumo.to_string(), "RG");
    }

    #[test]
    fn rejects_bad_codes() {
        assert!("R".parse::<Tumo>().is_err());
        assert!("RGB".parse::<Tumo>().is_err());
        assert!("RO".parse::<Tumo>().is_err());
    }

    #[test]
    fn swapped_exchanges_axis_and_child() {
        let tumo = Tumo::new(Color::Yellow, Color::Blue);
        assert_eq!(tumo.swapped(), Tumo::new(Color::Blue, Color::Yellow));
        assert!(!tumo.is_same_color());
        assert!(Tumo::new(Color::Red, Color::Red).is_same_color());
    }

    #[test]
    fn parse_seq_reports_index() {
        let err = Tumo::parse_seq(&["RG", "YY", "X1"]).unwrap_err();
        assert!(format!("{:#}", err).contains("2番目"));
        assert_eq!(Tumo::parse_seq(&["RG", "BP"]).unwrap().len(), 2);
    }
}
