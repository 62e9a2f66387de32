//! Well design file loader
//!
//! A design file describes one wellbore and its casing sections:
//!
//! ```toml
//! [wellbore]
//! name = "Example-1"
//! top = 0.0
//! bottom = 12000.0
//! method = "top_down"
//! tol = 8000.0
//! max_md_depth = 12000.0
//! max_tvd_depth = 11500.0
//!
//! [[survey]]
//! md = 3000.0
//! tvd = 3000.0
//!
//! [[section]]
//! label = "surface"
//! casing_type = "surface"
//! od = 13.375
//! # ...
//! [section.cement]
//! lead_qty = 600.0
//! lead_yield = 1.8
//! ```
//!
//! Sections become `serde_json` records and go through the same field checks
//! as any other raw record.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::{ConfigError, DesignPolicy, WellBoreConfig};
use crate::design_engine::cement::slurry_volume;
use crate::design_engine::{DesignError, StationTrajectory, Trajectory, WellBore};

/// One directional survey station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurveyStation {
    pub md: f64,
    pub tvd: f64,
}

/// Lead and tail slurry quantities (sacks) and yields (ft³/sack).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CementSlurry {
    pub lead_qty: f64,
    pub lead_yield: f64,
    #[serde(default)]
    pub tail_qty: f64,
    #[serde(default)]
    pub tail_yield: f64,
}

impl CementSlurry {
    /// Placed volume (ft³)
    pub fn volume(&self) -> f64 {
        slurry_volume(self.lead_qty, self.lead_yield, self.tail_qty, self.tail_yield)
    }
}

/// A `[[section]]` table. Everything besides the keys named here is passed
/// through untouched to section validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SectionRecord {
    pub label: String,

    #[serde(default)]
    pub tvd: Option<f64>,

    #[serde(default)]
    pub cement: Option<CementSlurry>,

    #[serde(flatten)]
    pub fields: toml::Table,
}

impl SectionRecord {
    /// Build the raw section record, filling `tvd` from `trajectory` and
    /// `cement_cu_ft` from the slurry table when they are not given.
    pub fn to_record(&self, trajectory: Option<&dyn Trajectory>) -> Result<Value, DesignError> {
        let invalid = |field: &str, message: String| DesignError::Validation {
            label: self.label.clone(),
            field: field.to_string(),
            message,
        };

        let mut record = serde_json::to_value(&self.fields)
            .map_err(|e| invalid("record", e.to_string()))?;
        let Some(obj) = record.as_object_mut() else {
            return Err(invalid("record", "expected a table".to_string()));
        };

        if let Some(slurry) = &self.cement {
            if obj.contains_key("cement_cu_ft") {
                return Err(invalid(
                    "cement_cu_ft",
                    "give either cement_cu_ft or a [section.cement] table, not both".to_string(),
                ));
            }
            obj.insert("cement_cu_ft".to_string(), Value::from(slurry.volume()));
        }

        let tvd = match (self.tvd, trajectory) {
            (Some(tvd), _) => tvd,
            (None, Some(trajectory)) => {
                let bottom = obj.get("bottom").and_then(Value::as_f64).ok_or_else(|| {
                    invalid("bottom", "needed to resolve tvd from the survey".to_string())
                })?;
                let tvd = trajectory.tvd_at(bottom);
                debug!(section = %self.label, bottom, tvd, "Resolved shoe TVD from survey");
                tvd
            }
            (None, None) => {
                return Err(invalid(
                    "tvd",
                    "missing, and no [[survey]] stations to resolve it".to_string(),
                ));
            }
        };
        obj.insert("tvd".to_string(), Value::from(tvd));

        Ok(record)
    }
}

/// Parsed design file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WellDesign {
    pub wellbore: WellBoreConfig,

    #[serde(default)]
    pub survey: Vec<SurveyStation>,

    #[serde(default, rename = "section")]
    pub sections: Vec<SectionRecord>,
}

impl WellDesign {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let design: Self = toml::from_str(&contents)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        info!(
            path = %path.display(),
            wellbore = %design.wellbore.name,
            sections = design.sections.len(),
            stations = design.survey.len(),
            "Loaded design file"
        );
        Ok(design)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))
    }

    /// Survey trajectory, if any stations were given.
    pub fn trajectory(&self) -> Option<StationTrajectory> {
        (!self.survey.is_empty())
            .then(|| StationTrajectory::new(self.survey.iter().map(|s| (s.md, s.tvd))))
    }

    /// Add every section to `wellbore` in file order.
    ///
    /// Stops at the first bad record; records before it stay committed.
    pub fn load_sections(&self, wellbore: &mut WellBore) -> Result<usize, DesignError> {
        let trajectory = self.trajectory();
        let trajectory = trajectory.as_ref().map(|t| t as &dyn Trajectory);
        let mut added = 0;
        for section in &self.sections {
            let record = section.to_record(trajectory)?;
            wellbore.add_section_record(section.label.as_str(), &record)?;
            added += 1;
        }
        Ok(added)
    }

    /// Configure a `WellBore` with `policy` and load every section.
    pub fn build(&self, policy: DesignPolicy) -> Result<WellBore, DesignError> {
        let mut wellbore = WellBore::new(self.wellbore.clone())?.with_policy(policy)?;
        if let Some(trajectory) = self.trajectory() {
            wellbore = wellbore.with_trajectory(trajectory);
        }
        self.load_sections(&mut wellbore)?;
        Ok(wellbore)
    }
}
