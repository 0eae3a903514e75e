use serde::Serialize;

/// Letter grade bands over the 0-100 energy score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum EnergyGrade {
    A,
    B,
    C,
    D,
    F,
}

impl EnergyGrade {
    pub const fn ordered() -> [Self; 5] {
        [Self::A, Self::B, Self::C, Self::D, Self::F]
    }

    pub const fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => Self::A,
            75..=89 => Self::B,
            60..=74 => Self::C,
            40..=59 => Self::D,
            _ => Self::F,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "Excellent",
            Self::B => "Good",
            Self::C => "Fair",
            Self::D => "Poor",
            Self::F => "Critical",
        }
    }

    /// Lowest score that still earns this grade.
    pub const fn floor(self) -> u8 {
        match self {
            Self::A => 90,
            Self::B => 75,
            Self::C => 60,
            Self::D => 40,
            Self::F => 0,
        }
    }
}

pub const NO_DATA_LABEL: &str = "No data";
