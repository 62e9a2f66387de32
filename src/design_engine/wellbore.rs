//! WellBore orchestrator
//!
//! Owns the wellbore configuration, design policy and section registry, and
//! drives the ordered design pass that fills in every section's results.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, info, warn};

use super::cement;
use super::pressure::{self, NeighborEnvironment, PressureContext};
use super::registry::{DepthBounds, SectionRegistry};
use super::tension;
use super::trajectory::{StationTrajectory, Trajectory};
use super::DesignError;
use crate::config::{DesignPolicy, WellBoreConfig};
use crate::types::{DesignState, Section, SectionInputs, SectionResults, TraversalMethod};

/// A casing string design for one wellbore.
pub struct WellBore {
    config: WellBoreConfig,
    policy: DesignPolicy,
    registry: SectionRegistry,
    trajectory: Option<Box<dyn Trajectory + Send + Sync>>,
    state: DesignState,
}

impl std::fmt::Debug for WellBore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WellBore")
            .field("config", &self.config)
            .field("policy", &self.policy)
            .field("registry", &self.registry)
            .field("custom_trajectory", &self.trajectory.is_some())
            .field("state", &self.state)
            .finish()
    }
}

impl WellBore {
    /// Validate the configuration and start an empty design.
    pub fn new(config: WellBoreConfig) -> Result<Self, DesignError> {
        config.validate()?;
        let registry = SectionRegistry::new(DepthBounds {
            top: config.top,
            max_md_depth: config.max_md_depth,
            max_tvd_depth: config.max_tvd_depth,
        });
        info!(
            wellbore = %config.name,
            method = %config.method,
            tol = config.tol,
            "Wellbore configured"
        );
        Ok(Self {
            config,
            policy: DesignPolicy::default(),
            registry,
            trajectory: None,
            state: DesignState::Configured,
        })
    }

    /// Replace the default policy. Out-of-range values are rejected.
    pub fn with_policy(mut self, policy: DesignPolicy) -> Result<Self, DesignError> {
        policy.validate()?;
        self.policy = policy;
        Ok(self)
    }

    /// Plug in a survey-backed MD → TVD lookup. Without one the engine
    /// interpolates between the sections' own (bottom, tvd) pairs.
    pub fn with_trajectory(mut self, trajectory: impl Trajectory + Send + Sync + 'static) -> Self {
        self.trajectory = Some(Box::new(trajectory));
        self
    }

    pub fn config(&self) -> &WellBoreConfig {
        &self.config
    }

    pub fn policy(&self) -> &DesignPolicy {
        &self.policy
    }

    pub fn state(&self) -> DesignState {
        self.state
    }

    pub fn is_calculated(&self) -> bool {
        self.state == DesignState::Calculated
    }

    /// Label → section registry
    pub fn sections(&self) -> &SectionRegistry {
        &self.registry
    }

    pub fn section(&self, label: &str) -> Result<&Section, DesignError> {
        self.registry.get(label)
    }

    // ========================================================================
    // Ingestion
    // ========================================================================

    /// Add one section from typed inputs.
    pub fn add_section(
        &mut self,
        label: impl Into<String>,
        inputs: SectionInputs,
    ) -> Result<(), DesignError> {
        let section = self.registry.add(label, inputs)?;
        debug!(
            section = section.label(),
            bottom = section.bottom(),
            "Section added"
        );
        self.state = DesignState::SectionsLoading;
        Ok(())
    }

    /// Add one section from a loosely typed JSON record.
    pub fn add_section_record(
        &mut self,
        label: impl Into<String>,
        record: &Value,
    ) -> Result<(), DesignError> {
        let section = self.registry.add_record(label, record)?;
        debug!(
            section = section.label(),
            bottom = section.bottom(),
            "Section added from record"
        );
        self.state = DesignState::SectionsLoading;
        Ok(())
    }

    /// Add sections in order, stopping at the first rejected one.
    ///
    /// Sections accepted before the failure stay in the registry. Returns
    /// the number added.
    pub fn add_sections_with_properties<L, I>(&mut self, sections: I) -> Result<usize, DesignError>
    where
        L: Into<String>,
        I: IntoIterator<Item = (L, SectionInputs)>,
    {
        let mut added = 0;
        for (label, inputs) in sections {
            self.add_section(label, inputs)?;
            added += 1;
        }
        Ok(added)
    }

    // ========================================================================
    // Design Pass
    // ========================================================================

    /// Run the full design pass and store results on every section.
    ///
    /// Idempotent: an unchanged registry yields identical results.
    pub fn calc_parameters_contained(&mut self) -> Result<(), DesignError> {
        if self.registry.is_empty() {
            return Err(DesignError::EmptyString);
        }

        // Geometric order, shallow to deep, independent of the traversal method
        let stack: Vec<&Section> = self.registry.ordered(TraversalMethod::TopDown).collect();
        check_structure(&stack, self.policy.depth_tolerance_ft)?;

        let inputs: Vec<&SectionInputs> = stack.iter().map(|s| s.inputs()).collect();
        let interval_tops: Vec<f64> = std::iter::once(self.config.top)
            .chain(inputs.iter().map(|s| s.bottom))
            .take(inputs.len())
            .collect();
        let position: HashMap<&str, usize> =
            stack.iter().enumerate().map(|(i, s)| (s.label(), i)).collect();

        let steel = self.policy.steel_density_ppg;
        let axial = tension::axial_profile(&inputs, &interval_tops, steel);

        let stations = StationTrajectory::new(inputs.iter().map(|s| (s.bottom, s.tvd)));
        let trajectory: &dyn Trajectory = match &self.trajectory {
            Some(t) => &**t,
            None => &stations,
        };
        let ctx = PressureContext {
            wellbore: &self.config,
            policy: &self.policy,
            trajectory,
        };

        let mut computed: Vec<(String, SectionResults)> = Vec::with_capacity(stack.len());
        for step in self.registry.walk(self.config.method) {
            let label = step.section.label();
            let pos = position[label];
            let section = step.section.inputs();
            let outer = pos.checked_sub(1).map(|p| inputs[p]);
            let reference = step
                .reference
                .map(|r| NeighborEnvironment::from_section(r.label(), r.inputs()));

            let placed = cement::place_cement(section, outer, interval_tops[pos]);
            let axial_below = tension::buoyed_weight_below(section, &axial[pos], steel);
            let pressure = pressure::evaluate(section, placed.toc, axial_below, reference.as_ref(), &ctx);
            let tension = tension::evaluate(section, &axial[pos], steel);

            let mut warnings = placed.warnings;
            warnings.extend(pressure.warnings);
            warnings.extend(tension.warnings);
            for w in &warnings {
                warn!(section = label, code = w.code(), "{}", w);
            }

            let results = SectionResults {
                interval_top: placed.interval_top,
                annular_capacity: placed.annular_capacity,
                cement_height: placed.cement_height,
                toc: placed.toc,
                frac_init_pressure: pressure.frac_init_pressure,
                masp: pressure.masp,
                burst_load: pressure.burst_load,
                burst_df: pressure.burst_df,
                collapse_strength: pressure.collapse_strength,
                collapse_load: pressure.collapse_load,
                collapse_df: pressure.collapse_df,
                neutral_point: tension.neutral_point,
                tension_air: tension.tension_air,
                tension_buoyed: tension.tension_buoyed,
                tension_df: tension.tension_df,
                warnings,
            };
            debug!(
                section = label,
                reference = reference.as_ref().map_or("-", |r| r.label.as_str()),
                toc = results.toc,
                masp = results.masp,
                burst_load = results.burst_load,
                collapse_load = results.collapse_load,
                tension_air = results.tension_air,
                "Section calculated"
            );
            computed.push((label.to_string(), results));
        }

        let count = computed.len();
        for (label, results) in computed {
            self.registry.store_results(&label, results);
        }
        self.state = DesignState::Calculated;
        info!(
            wellbore = %self.config.name,
            method = %self.config.method,
            sections = count,
            "Design pass complete"
        );
        Ok(())
    }
}

/// Shoes must be distinct and each deeper string must pass through the
/// drift of the one above it. `stack` is ordered shallow to deep.
fn check_structure(stack: &[&Section], depth_tolerance_ft: f64) -> Result<(), DesignError> {
    for pair in stack.windows(2) {
        let (shallower, deeper) = (pair[0], pair[1]);
        if deeper.bottom() - shallower.bottom() < depth_tolerance_ft.max(f64::EPSILON) {
            return Err(DesignError::Overlap {
                shallower: shallower.label().to_string(),
                deeper: deeper.label().to_string(),
                depth: deeper.bottom(),
            });
        }
        let drift = shallower.inputs().csg_internal_diameter;
        if deeper.inputs().od >= drift {
            return Err(DesignError::Clearance {
                inner: deeper.label().to_string(),
                outer: shallower.label().to_string(),
                od: deeper.inputs().od,
                drift,
            });
        }
    }
    Ok(())
}
