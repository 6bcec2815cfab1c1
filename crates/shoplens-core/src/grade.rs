//! Loyalty grade tiers.
//!
//! The backend stores grades as Korean labels (e.g. `"슈린이 GOLD"`). This
//! module keeps the storage representation, the tier ordering, and the short
//! presentation name in one closed enum instead of scattering string
//! comparisons across consumers.

use serde::{Deserialize, Serialize};

/// Customer loyalty tier, ordered from base to top.
///
/// `All` is the sentinel used both for non-member repurchasers (the backend
/// reports them as `"전체"`) and for the filter value that bypasses grade
/// filtering entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    Base,
    Gold,
    Platinum,
    Vip,
    All,
}

impl Grade {
    /// Parses a backend grade label. Labels are trimmed before comparison;
    /// anything unrecognized maps to [`Grade::All`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "슈둥이" => Grade::Base,
            "슈린이 GOLD" => Grade::Gold,
            "슈린이 PLATINUM" => Grade::Platinum,
            "슈린이 VIP" => Grade::Vip,
            _ => Grade::All,
        }
    }

    /// The exact label the backend uses for this tier.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Grade::Base => "슈둥이",
            Grade::Gold => "슈린이 GOLD",
            Grade::Platinum => "슈린이 PLATINUM",
            Grade::Vip => "슈린이 VIP",
            Grade::All => "전체",
        }
    }

    /// Short presentation name, decoupled from the storage label.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Grade::Base => "BASE",
            Grade::Gold => "GOLD",
            Grade::Platinum => "PLATINUM",
            Grade::Vip => "VIP",
            Grade::All => "ALL",
        }
    }

    /// Tier rank: base tier is 0, VIP is 3. The `All` sentinel ranks below
    /// every real tier so it never wins a "highest grade" comparison.
    #[must_use]
    pub fn rank(self) -> i8 {
        match self {
            Grade::All => -1,
            Grade::Base => 0,
            Grade::Gold => 1,
            Grade::Platinum => 2,
            Grade::Vip => 3,
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_labels() {
        assert_eq!(Grade::from_label("슈둥이"), Grade::Base);
        assert_eq!(Grade::from_label("슈린이 GOLD"), Grade::Gold);
        assert_eq!(Grade::from_label("슈린이 PLATINUM"), Grade::Platinum);
        assert_eq!(Grade::from_label("슈린이 VIP"), Grade::Vip);
        assert_eq!(Grade::from_label("전체"), Grade::All);
    }

    #[test]
    fn trims_whitespace_before_matching() {
        assert_eq!(Grade::from_label("  슈린이 VIP "), Grade::Vip);
    }

    #[test]
    fn unknown_label_maps_to_all() {
        assert_eq!(Grade::from_label("mystery tier"), Grade::All);
        assert_eq!(Grade::from_label(""), Grade::All);
    }

    #[test]
    fn rank_orders_tiers() {
        assert!(Grade::Base.rank() < Grade::Gold.rank());
        assert!(Grade::Gold.rank() < Grade::Platinum.rank());
        assert!(Grade::Platinum.rank() < Grade::Vip.rank());
        assert!(Grade::All.rank() < Grade::Base.rank());
    }

    #[test]
    fn label_round_trips() {
        for grade in [
            Grade::Base,
            Grade::Gold,
            Grade::Platinum,
            Grade::Vip,
            Grade::All,
        ] {
            assert_eq!(Grade::from_label(grade.label()), grade);
        }
    }
}
