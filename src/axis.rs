//! Sort axis selection.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;

/// Spatial axis whose coordinate orders the placement lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Axis {
    X,
    #[default]
    Y,
    Z,
}

impl Axis {
    /// Column of a placement line holding this axis' coordinate.
    ///
    /// A placement line reads `1 <colour> x y z a b c d e f g h i <file>`,
    /// so the coordinates sit right after the line type and colour.
    pub fn column(self) -> usize {
        match self {
            Axis::X => 2,
            Axis::Y => 3,
            Axis::Z => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            other => Err(format!("Unknown axis '{other}' (expected x, y or z)")),
        }
    }
}
