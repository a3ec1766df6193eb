//! Static insurer reference data: the market book partitioned by category,
//! the preferred panel, and the employee-benefits product list.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::domain::response::InsurerName;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsurerCategory {
    General,
    Health,
    Life,
    Other,
}

impl fmt::Display for InsurerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::General => "General",
            Self::Health => "Health",
            Self::Life => "Life",
            Self::Other => "Other",
        };
        f.write_str(label)
    }
}

const GENERAL_INSURERS: &[&str] = &[
    "Bajaj Allianz General Insurance",
    "Cholamandalam MS General Insurance",
    "Go Digit General Insurance",
    "Future Generali India Insurance",
    "HDFC ERGO General Insurance",
    "ICICI Lombard General Insurance",
    "IFFCO Tokio General Insurance",
    "Liberty General Insurance",
    "National Insurance Company",
    "New India Assurance",
    "Reliance General Insurance",
    "Royal Sundaram General Insurance",
    "SBI General Insurance",
    "Shriram General Insurance",
    "Tata AIG General Insurance",
    "The Oriental Insurance Company",
    "United India Insurance Company",
    "Universal Sompo General Insurance",
    "Zurich Kotak General Insurance",
    "Navi General Insurance",
    "Zuno General Insurance",
];

const HEALTH_INSURERS: &[&str] = &[
    "Aditya Birla Health Insurance",
    "Care Health Insurance",
    "Galaxy Health Insurance Co Ltd",
    "ManipalCigna Health Insurance",
    "Niva Bupa Health Insurance",
    "Star Health and Allied Insurance",
];

const LIFE_INSURERS: &[&str] = &[
    "Life Insurance Corporation of India (LIC)",
    "HDFC Life Insurance Co. Ltd.",
    "ICICI Prudential Life Insurance Co. Ltd.",
    "SBI Life Insurance Co. Ltd.",
    "Max Life Insurance Co. Ltd.",
    "Bajaj Allianz Life Insurance Co. Ltd.",
    "Aditya Birla Sun Life Insurance Co. Ltd.",
    "TATA AIA Life Insurance Co. Ltd.",
    "PNB MetLife India Insurance Co. Ltd.",
    "Reliance Nippon Life Insurance Company",
    "Shriram Life Insurance Co. Ltd.",
    "Bharti AXA Life Insurance Co. Ltd.",
    "Future Generali India Life Insurance Co. Ltd.",
    "IndiaFirst Life Insurance Co. Ltd.",
    "Acko Life Insurance Limited",
    "Go Digit Life Insurance Limited",
];

const PREFERRED_INSURERS: &[&str] = &[
    "HDFC ERGO General Insurance",
    "ICICI Lombard General Insurance",
    "Star Health and Allied Insurance",
    "Tata AIG General Insurance",
    "HDFC Life Insurance Co. Ltd.",
];

const EB_PRODUCTS: &[&str] = &[
    "Group Health Insurance / Group Mediclaim",
    "Group Term Life Insurance",
    "Group Personal Accident",
    "Employer Health Benefits Packages",
];

/// Immutable catalog loaded once at startup and passed explicitly into the
/// statistics engine and request creation; never consulted as a global.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InsurerCatalog {
    general: Vec<InsurerName>,
    health: Vec<InsurerName>,
    life: Vec<InsurerName>,
    preferred: Vec<InsurerName>,
    eb_products: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    general: Vec<String>,
    #[serde(default)]
    health: Vec<String>,
    #[serde(default)]
    life: Vec<String>,
    #[serde(default)]
    preferred: Vec<String>,
    #[serde(default)]
    eb_products: Vec<String>,
}

impl Default for InsurerCatalog {
    fn default() -> Self {
        fn names(raw: &[&str]) -> Vec<InsurerName> {
            raw.iter().map(|name| InsurerName::from(*name)).collect()
        }
        Self {
            general: names(GENERAL_INSURERS),
            health: names(HEALTH_INSURERS),
            life: names(LIFE_INSURERS),
            preferred: names(PREFERRED_INSURERS),
            eb_products: EB_PRODUCTS.iter().map(|product| (*product).to_owned()).collect(),
        }
    }
}

impl InsurerCatalog {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;
        let file: CatalogFile = toml::from_str(&raw)
            .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })?;

        let catalog = Self {
            general: file.general.into_iter().map(InsurerName).collect(),
            health: file.health.into_iter().map(InsurerName).collect(),
            life: file.life.into_iter().map(InsurerName).collect(),
            preferred: file.preferred.into_iter().map(InsurerName).collect(),
            eb_products: file.eb_products,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.general.is_empty() && self.health.is_empty() && self.life.is_empty() {
            return Err(ConfigError::Validation(
                "insurer catalog must list at least one insurer".to_owned(),
            ));
        }
        for preferred in &self.preferred {
            if self.category_of(preferred) == InsurerCategory::Other {
                return Err(ConfigError::Validation(format!(
                    "preferred insurer `{preferred}` is not in the catalog"
                )));
            }
        }
        Ok(())
    }

    pub fn category_of(&self, insurer: &InsurerName) -> InsurerCategory {
        if self.general.contains(insurer) {
            InsurerCategory::General
        } else if self.health.contains(insurer) {
            InsurerCategory::Health
        } else if self.life.contains(insurer) {
            InsurerCategory::Life
        } else {
            InsurerCategory::Other
        }
    }

    pub fn is_preferred(&self, insurer: &InsurerName) -> bool {
        self.preferred.contains(insurer)
    }

    /// Employee-benefits products route to health/life panels; everything
    /// else is general business.
    pub fn is_eb_product(&self, product: &str) -> bool {
        self.eb_products.iter().any(|eb| eb == product)
    }

    pub fn insurers_in(&self, category: InsurerCategory) -> &[InsurerName] {
        match category {
            InsurerCategory::General => &self.general,
            InsurerCategory::Health => &self.health,
            InsurerCategory::Life => &self.life,
            InsurerCategory::Other => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.general.len() + self.health.len() + self.life.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
