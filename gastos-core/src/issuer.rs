//! Card issuers the dashboard knows about

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which card a statement belongs to. Each issuer has its own table slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Issuer {
    PicPay,
    Inter,
    Nubank,
}

impl Issuer {
    /// All issuers in display order
    pub const ALL: [Issuer; 3] = [Issuer::PicPay, Issuer::Inter, Issuer::Nubank];

    /// Human-readable name for display
    pub fn name(&self) -> &'static str {
        match self {
            Issuer::PicPay => "PicPay",
            Issuer::Inter => "Inter",
            Issuer::Nubank => "Nubank",
        }
    }

    /// Short code used on the command line and in config keys
    pub fn code(&self) -> &'static str {
        match self {
            Issuer::PicPay => "picpay",
            Issuer::Inter => "inter",
            Issuer::Nubank => "nubank",
        }
    }

    /// Position in [`Issuer::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Issuer::PicPay => 0,
            Issuer::Inter => 1,
            Issuer::Nubank => 2,
        }
    }
}

impl fmt::Display for Issuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Issuer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Issuer::ALL
            .into_iter()
            .find(|issuer| issuer.code() == wanted)
            .ok_or_else(|| format!("unknown issuer '{}' (expected picpay, inter or nubank)", s))
    }
}
