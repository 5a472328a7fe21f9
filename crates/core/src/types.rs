//! Closed enumerations shared across the ledger.
//!
//! Vendors, customer segments and project status come from fixed sets in the
//! procurement data. Each variant deserializes from its snake_case tag and from
//! the label used by the upstream dashboard, so a dataset using either form
//! loads without translation.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownVariant;

// =============================================================================
// Vendor
// =============================================================================

/// Network-equipment vendor submitting a bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vendor {
    #[serde(alias = "华为")]
    Huawei,
    #[serde(alias = "思科")]
    Cisco,
    #[serde(alias = "新华三")]
    H3c,
    #[serde(alias = "锐捷")]
    Ruijie,
    #[serde(alias = "瞻博网络")]
    Juniper,
}

impl Vendor {
    /// All vendors, in the order the source lists them.
    pub const ALL: [Self; 5] = [
        Self::Huawei,
        Self::Cisco,
        Self::H3c,
        Self::Ruijie,
        Self::Juniper,
    ];

    /// Returns the serialized tag.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Huawei => "huawei",
            Self::Cisco => "cisco",
            Self::H3c => "h3c",
            Self::Ruijie => "ruijie",
            Self::Juniper => "juniper",
        }
    }

    /// Returns the label used by the upstream dashboard.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Huawei => "华为",
            Self::Cisco => "思科",
            Self::H3c => "新华三",
            Self::Ruijie => "锐捷",
            Self::Juniper => "瞻博网络",
        }
    }

    /// Returns the display name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Huawei => "Huawei",
            Self::Cisco => "Cisco",
            Self::H3c => "H3C",
            Self::Ruijie => "Ruijie",
            Self::Juniper => "Juniper",
        }
    }

    /// Flagship product line quoted in the source data for this vendor.
    #[must_use]
    pub fn flagship_model(self) -> &'static str {
        match self {
            Self::Huawei => "CE12800/S12700",
            Self::Cisco => "Nexus 9K/C9500",
            Self::H3c => "S12500-G/S9800",
            Self::Ruijie | Self::Juniper => "Core/aggregation flagship",
        }
    }
}

impl std::fmt::Display for Vendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Vendor {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.tag() == s || v.label() == s || v.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("vendor", s))
    }
}

// =============================================================================
// Customer Category
// =============================================================================

/// Customer segment a project belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerCategory {
    /// The six large state-owned commercial banks.
    #[serde(alias = "六大行")]
    SixMajorBanks,
    /// Joint-stock commercial banks.
    #[serde(alias = "股份制银行")]
    JointStockBanks,
    /// City commercial banks.
    #[serde(alias = "城商银行")]
    CityCommercialBanks,
    /// Securities houses and insurers.
    #[serde(alias = "证券保险")]
    SecuritiesInsurance,
}

impl CustomerCategory {
    pub const ALL: [Self; 4] = [
        Self::SixMajorBanks,
        Self::JointStockBanks,
        Self::CityCommercialBanks,
        Self::SecuritiesInsurance,
    ];

    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::SixMajorBanks => "six_major_banks",
            Self::JointStockBanks => "joint_stock_banks",
            Self::CityCommercialBanks => "city_commercial_banks",
            Self::SecuritiesInsurance => "securities_insurance",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::SixMajorBanks => "六大行",
            Self::JointStockBanks => "股份制银行",
            Self::CityCommercialBanks => "城商银行",
            Self::SecuritiesInsurance => "证券保险",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SixMajorBanks => "Six Major Banks",
            Self::JointStockBanks => "Joint-Stock Banks",
            Self::CityCommercialBanks => "City Commercial Banks",
            Self::SecuritiesInsurance => "Securities & Insurance",
        }
    }
}

impl std::fmt::Display for CustomerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CustomerCategory {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.tag() == s || c.label() == s || c.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("category", s))
    }
}

// =============================================================================
// Project Status
// =============================================================================

/// Whether a project has been awarded or is still upcoming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Tender concluded.
    #[serde(alias = "已完结")]
    Closed,
    /// Future or still-open tender; no winner expected yet.
    #[serde(alias = "未来计划")]
    Planned,
}

impl ProjectStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Planned => "planned",
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "closed" | "已完结" => Ok(Self::Closed),
            "planned" | "未来计划" => Ok(Self::Planned),
            other => Err(UnknownVariant::new("status", other)),
        }
    }
}

// =============================================================================
// Category Selector
// =============================================================================

/// Category predicate of a portfolio query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategorySelector {
    /// Matches every category.
    #[default]
    All,
    /// Matches exactly one category.
    Only(CustomerCategory),
}

impl CategorySelector {
    /// Returns true if the given category passes this selector.
    #[must_use]
    pub fn matches(self, category: CustomerCategory) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == category,
        }
    }
}

impl std::fmt::Display for CategorySelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Only(category) => write!(f, "{category}"),
        }
    }
}

impl FromStr for CategorySelector {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" | "全部" => Ok(Self::All),
            other => other.parse().map(Self::Only),
        }
    }
}

impl From<CustomerCategory> for CategorySelector {
    fn from(category: CustomerCategory) -> Self {
        Self::Only(category)
    }
}
