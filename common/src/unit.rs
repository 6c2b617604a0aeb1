//! 数量単位
//!
//! 在庫アイテムの単位と、比較可能な単位グループ・基本単位への換算を扱う。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 在庫で使う単位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Pcs,
    Portions,
    G,
    Kg,
    Ml,
    L,
}

impl Unit {
    /// 初期登録される単位一覧
    pub const ALL: [Unit; 6] = [Unit::Pcs, Unit::Portions, Unit::G, Unit::Kg, Unit::Ml, Unit::L];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Pcs => "pcs",
            Unit::Portions => "portions",
            Unit::G => "g",
            Unit::Kg => "kg",
            Unit::Ml => "ml",
            Unit::L => "l",
        }
    }

    /// 同じ次元として比較できる単位
    pub fn comparables(&self) -> &'static [Unit] {
        match self {
            Unit::G | Unit::Kg => &[Unit::G, Unit::Kg],
            Unit::Ml | Unit::L => &[Unit::Ml, Unit::L],
            Unit::Portions => &[Unit::Portions],
            Unit::Pcs => &[Unit::Pcs],
        }
    }

    pub fn is_comparable_with(&self, other: Unit) -> bool {
        self.comparables().contains(&other)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pcs" => Ok(Unit::Pcs),
            "portions" => Ok(Unit::Portions),
            "g" => Ok(Unit::G),
            "kg" => Ok(Unit::Kg),
            "ml" => Ok(Unit::Ml),
            "l" => Ok(Unit::L),
            _ => Err(format!("Unknown unit: {}. Use pcs, portions, g, kg, ml or l", s)),
        }
    }
}

/// 基本単位（g / ml / pcs / portions）に換算済みの数量
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmountWithUnit {
    pub amount: f64,
    pub unit: Unit,
}

impl AmountWithUnit {
    pub fn new(amount: f64, unit: Unit) -> Self {
        match unit {
            Unit::Kg => Self { amount: amount * 1000.0, unit: Unit::G },
            Unit::L => Self { amount: amount * 1000.0, unit: Unit::Ml },
            _ => Self { amount, unit },
        }
    }

    /// 比較可能な単位での数量（比較できない単位なら `None`）
    pub fn amount_in(&self, unit: Unit) -> Option<f64> {
        if !self.unit.is_comparable_with(unit) {
            return None;
        }
        match unit {
            Unit::Kg | Unit::L => Some(self.amount / 1000.0),
            _ => Some(self.amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_from_str() {
        assert_eq!("kg".parse::<Unit>(), Ok(Unit::Kg));
        assert_eq!(" L ".parse::<Unit>(), Ok(Unit::L));
        assert!("cup".parse::<Unit>().is_err());
    }

    #[test]
    fn test_unit_comparables() {
        assert!(Unit::G.is_comparable_with(Unit::Kg));
        assert!(Unit::L.is_comparable_with(Unit::Ml));
        assert!(!Unit::Kg.is_comparable_with(Unit::L));
        assert!(!Unit::Pcs.is_comparable_with(Unit::Portions));
    }

    #[test]
    fn test_amount_with_unit_converts_to_base() {
        let kg = AmountWithUnit::new(1.5, Unit::Kg);
        assert_eq!(kg.unit, Unit::G);
        assert!((kg.amount - 1500.0).abs() < 1e-9);

        let l = AmountWithUnit::new(0.25, Unit::L);
        assert_eq!(l.unit, Unit::Ml);
        assert!((l.amount - 250.0).abs() < 1e-9);

        let pcs = AmountWithUnit::new(3.0, Unit::Pcs);
        assert_eq!(pcs, AmountWithUnit { amount: 3.0, unit: Unit::Pcs });
    }

    #[test]
    fn test_amount_in() {
        let g = AmountWithUnit::new(0.5, Unit::Kg);
        assert_eq!(g.amount_in(Unit::G), Some(500.0));
        assert_eq!(g.amount_in(Unit::Kg), Some(0.5));
        assert_eq!(AmountWithUnit::new(250.0, Unit::Ml).amount_in(Unit::L), Some(0.25));
        assert_eq!(g.amount_in(Unit::Pcs), None);
    }

    #[test]
    fn test_unit_serialize() {
        assert_eq!(serde_json::to_string(&Unit::Kg).unwrap(), "\"kg\"");
        let unit: Unit = serde_json::from_str("\"portions\"").unwrap();
        assert_eq!(unit, Unit::Portions);
    }
}
