//! Section registry: insertion-ordered casing sections with depth-sorted views
//!
//! Ingestion order is never changed. `ordered()` and `walk()` derive the
//! traversal order from setting depth on every call.

use std::collections::HashMap;

use serde_json::Value;

use super::DesignError;
use crate::types::{Section, SectionInputs, SectionResults, TraversalMethod};

// ============================================================================
// Depth Bounds
// ============================================================================

/// Window a section must fit inside to be accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthBounds {
    /// Shallowest reference depth (MD, ft); every shoe must be deeper
    pub top: f64,
    pub max_md_depth: f64,
    pub max_tvd_depth: f64,
}

// ============================================================================
// Registry
// ============================================================================

/// Label → section mapping that remembers insertion order.
#[derive(Debug, Clone)]
pub struct SectionRegistry {
    sections: Vec<Section>,
    index: HashMap<String, usize>,
    bounds: DepthBounds,
}

impl SectionRegistry {
    pub fn new(bounds: DepthBounds) -> Self {
        Self {
            sections: Vec::new(),
            index: HashMap::new(),
            bounds,
        }
    }

    /// Validate and store a section. Nothing is recalculated.
    pub fn add(
        &mut self,
        label: impl Into<String>,
        inputs: SectionInputs,
    ) -> Result<&Section, DesignError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(invalid(&label, "label", "label cannot be empty".to_string()));
        }
        if self.index.contains_key(&label) {
            return Err(DesignError::DuplicateSection(label));
        }
        validate_inputs(&label, &inputs, &self.bounds)?;

        let idx = self.sections.len();
        self.index.insert(label.clone(), idx);
        self.sections.push(Section::new(label, inputs));
        Ok(&self.sections[idx])
    }

    /// Parse a loosely typed record (JSON object) and store it.
    ///
    /// Missing, non-numeric and non-finite fields are reported by name
    /// before anything is stored.
    pub fn add_record(
        &mut self,
        label: impl Into<String>,
        record: &Value,
    ) -> Result<&Section, DesignError> {
        let label = label.into();
        let inputs = parse_record(&label, record)?;
        self.add(label, inputs)
    }

    pub fn get(&self, label: &str) -> Result<&Section, DesignError> {
        self.index
            .get(label)
            .map(|&idx| &self.sections[idx])
            .ok_or_else(|| DesignError::NotFound(label.to_string()))
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Sections in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    /// Labels in insertion order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(Section::label)
    }

    /// Sections sorted by setting depth: ascending for `TopDown`,
    /// descending for `BottomUp`. Cloning the iterator restarts it.
    pub fn ordered(&self, method: TraversalMethod) -> OrderedSections<'_> {
        let mut order: Vec<usize> = (0..self.sections.len()).collect();
        order.sort_by(|&a, &b| self.sections[a].bottom().total_cmp(&self.sections[b].bottom()));
        if method == TraversalMethod::BottomUp {
            order.reverse();
        }
        OrderedSections {
            sections: &self.sections,
            order,
            pos: 0,
        }
    }

    /// Walk sections in `method` order, pairing each with the section
    /// visited just before it (its reference neighbor).
    pub fn walk(&self, method: TraversalMethod) -> Walk<'_> {
        Walk {
            inner: self.ordered(method),
            previous: None,
        }
    }

    pub(crate) fn store_results(&mut self, label: &str, results: SectionResults) {
        if let Some(&idx) = self.index.get(label) {
            self.sections[idx].set_results(results);
        }
    }
}

impl<'a> IntoIterator for &'a SectionRegistry {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Ordered Views
// ============================================================================

/// Depth-sorted iterator over registry sections.
#[derive(Debug, Clone)]
pub struct OrderedSections<'a> {
    sections: &'a [Section],
    order: Vec<usize>,
    pos: usize,
}

impl<'a> Iterator for OrderedSections<'a> {
    type Item = &'a Section;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = *self.order.get(self.pos)?;
        self.pos += 1;
        Some(&self.sections[idx])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.order.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for OrderedSections<'_> {}

/// One step of a traversal.
#[derive(Debug, Clone, Copy)]
pub struct Step<'a> {
    pub section: &'a Section,
    /// Section processed immediately before this one, if any
    pub reference: Option<&'a Section>,
}

/// Traversal yielding each section with its reference neighbor.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    inner: OrderedSections<'a>,
    previous: Option<&'a Section>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = Step<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let section = self.inner.next()?;
        let reference = self.previous.replace(section);
        Some(Step { section, reference })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

// ============================================================================
// Input Validation
// ============================================================================

fn invalid(label: &str, field: &str, message: String) -> DesignError {
    DesignError::Validation {
        label: label.to_string(),
        field: field.to_string(),
        message,
    }
}

/// Range checks on raw inputs. Neighbor-dependent rules (overlap,
/// clearance) wait for the design pass.
pub fn validate_inputs(
    label: &str,
    s: &SectionInputs,
    bounds: &DepthBounds,
) -> Result<(), DesignError> {
    let numeric = [
        ("od", s.od),
        ("wall_thickness", s.wall_thickness),
        ("csg_internal_diameter", s.csg_internal_diameter),
        ("weight", s.weight),
        ("coeff_friction_sliding", s.coeff_friction_sliding),
        ("hole_size", s.hole_size),
        ("bottom", s.bottom),
        ("tvd", s.tvd),
        ("washout", s.washout),
        ("cement_cu_ft", s.cement_cu_ft),
        ("mud_weight", s.mud_weight),
        ("backup_mud", s.backup_mud),
        ("int_gradient", s.int_gradient),
        ("body_yield", s.body_yield),
        ("burst_strength", s.burst_strength),
        ("collapse_pressure", s.collapse_pressure),
        ("tension_strength", s.tension_strength),
    ];
    for (field, value) in numeric {
        if !value.is_finite() {
            return Err(invalid(label, field, format!("{value} is not a finite number")));
        }
    }

    // Strictly positive geometry, weights and ratings
    let positive = [
        ("od", s.od),
        ("wall_thickness", s.wall_thickness),
        ("csg_internal_diameter", s.csg_internal_diameter),
        ("weight", s.weight),
        ("hole_size", s.hole_size),
        ("tvd", s.tvd),
        ("mud_weight", s.mud_weight),
        ("body_yield", s.body_yield),
        ("burst_strength", s.burst_strength),
        ("collapse_pressure", s.collapse_pressure),
        ("tension_strength", s.tension_strength),
    ];
    for (field, value) in positive {
        if value <= 0.0 {
            return Err(invalid(label, field, format!("{value} must be greater than zero")));
        }
    }

    let non_negative = [
        ("coeff_friction_sliding", s.coeff_friction_sliding),
        ("washout", s.washout),
        ("cement_cu_ft", s.cement_cu_ft),
        ("backup_mud", s.backup_mud),
        ("int_gradient", s.int_gradient),
    ];
    for (field, value) in non_negative {
        if value < 0.0 {
            return Err(invalid(label, field, format!("{value} cannot be negative")));
        }
    }

    if s.casing_type.trim().is_empty() {
        return Err(invalid(label, "casing_type", "casing type cannot be empty".to_string()));
    }
    if s.csg_internal_diameter >= s.od {
        return Err(invalid(
            label,
            "csg_internal_diameter",
            format!(
                "{:.3} in must be smaller than od ({:.3} in)",
                s.csg_internal_diameter, s.od
            ),
        ));
    }
    if s.wall_thickness * 2.0 >= s.od {
        return Err(invalid(
            label,
            "wall_thickness",
            format!("{:.3} in leaves no bore in {:.3} in pipe", s.wall_thickness, s.od),
        ));
    }
    if s.bottom <= bounds.top {
        return Err(invalid(
            label,
            "bottom",
            format!(
                "{:.1} ft must be deeper than the wellbore top ({:.1} ft)",
                s.bottom, bounds.top
            ),
        ));
    }
    if s.bottom > bounds.max_md_depth {
        return Err(invalid(
            label,
            "bottom",
            format!(
                "{:.1} ft exceeds max_md_depth ({:.1} ft)",
                s.bottom, bounds.max_md_depth
            ),
        ));
    }
    if s.tvd > bounds.max_tvd_depth {
        return Err(invalid(
            label,
            "tvd",
            format!(
                "{:.1} ft exceeds max_tvd_depth ({:.1} ft)",
                s.tvd, bounds.max_tvd_depth
            ),
        ));
    }
    if s.tvd > s.bottom {
        return Err(invalid(
            label,
            "tvd",
            format!("{:.1} ft cannot exceed measured depth {:.1} ft", s.tvd, s.bottom),
        ));
    }
    if let Some(fg) = s.frac_gradient {
        if !(fg.is_finite() && fg > 0.0) {
            return Err(invalid(label, "frac_gradient", format!("{fg} must be greater than zero")));
        }
    }
    Ok(())
}

/// Turn a JSON object into `SectionInputs`, naming the first bad field.
pub fn parse_record(label: &str, record: &Value) -> Result<SectionInputs, DesignError> {
    let obj = record.as_object().ok_or_else(|| {
        invalid(label, "record", format!("expected an object, got {record}"))
    })?;

    let mut missing: Vec<&str> = Vec::new();
    for &field in SectionInputs::REQUIRED_NUMERIC_FIELDS {
        match obj.get(field) {
            None | Some(Value::Null) => missing.push(field),
            Some(Value::Number(n)) => {
                if !n.as_f64().is_some_and(f64::is_finite) {
                    return Err(invalid(label, field, format!("{n} is not a finite number")));
                }
            }
            Some(other) => {
                return Err(invalid(label, field, format!("{other} is not numeric")));
            }
        }
    }
    for &field in SectionInputs::OPTIONAL_NUMERIC_FIELDS {
        if let Some(v) = obj.get(field) {
            if !(v.is_null() || v.is_number()) {
                return Err(invalid(label, field, format!("{v} is not numeric")));
            }
        }
    }
    for &field in SectionInputs::REQUIRED_TEXT_FIELDS {
        match obj.get(field) {
            None | Some(Value::Null) => missing.push(field),
            Some(Value::String(_)) => {}
            Some(other) => {
                return Err(invalid(label, field, format!("{other} is not text")));
            }
        }
    }
    if !missing.is_empty() {
        return Err(invalid(
            label,
            missing[0],
            format!("missing required fields: {}", missing.join(", ")),
        ));
    }

    serde_json::from_value(record.clone())
        .map_err(|e| invalid(label, "record", e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bounds() -> DepthBounds {
        DepthBounds {
            top: 0.0,
            max_md_depth: 12_000.0,
            max_tvd_depth: 12_000.0,
        }
    }

    fn inputs(bottom: f64) -> SectionInputs {
        SectionInputs {
            id: 0,
            casing_type: "intermediate".to_string(),
            od: 9.625,
            wall_thickness: 0.395,
            csg_internal_diameter: 8.835,
            connection: "BTC".to_string(),
            grade: "N-80".to_string(),
            weight: 40.0,
            coeff_friction_sliding: 0.39,
            hole_size: 12.25,
            bottom,
            tvd: bottom,
            washout: 0.1,
            cement_cu_ft: 500.0,
            mud_weight: 9.5,
            backup_mud: 8.6,
            int_gradient: 0.1,
            frac_gradient: None,
            body_yield: 916_000.0,
            burst_strength: 5_750.0,
            collapse_pressure: 3_090.0,
            tension_strength: 737_000.0,
        }
    }

    fn record() -> Value {
        serde_json::to_value(inputs(8_000.0)).unwrap()
    }

    #[test]
    fn test_add_and_get() {
        let mut reg = SectionRegistry::new(bounds());
        reg.add("intermediate", inputs(8_000.0)).unwrap();
        assert_eq!(reg.get("intermediate").unwrap().bottom(), 8_000.0);
        assert!(!reg.get("intermediate").unwrap().is_calculated());
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let mut reg = SectionRegistry::new(bounds());
        reg.add("a", inputs(2_000.0)).unwrap();
        let err = reg.add("a", inputs(4_000.0)).unwrap_err();
        assert_eq!(err, DesignError::DuplicateSection("a".to_string()));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_unknown_label_not_found() {
        let reg = SectionRegistry::new(bounds());
        assert_eq!(
            reg.get("ghost").unwrap_err(),
            DesignError::NotFound("ghost".to_string())
        );
    }

    #[test]
    fn test_non_positive_od_rejected() {
        let mut reg = SectionRegistry::new(bounds());
        let mut bad = inputs(2_000.0);
        bad.od = 0.0;
        let err = reg.add("bad", bad).unwrap_err();
        assert!(matches!(err, DesignError::Validation { ref field, .. } if field == "od"));
        assert!(reg.is_empty());
    }

    #[test]
    fn test_bottom_at_wellbore_top_rejected() {
        let mut reg = SectionRegistry::new(DepthBounds { top: 500.0, ..bounds() });
        let err = reg.add("shallow", inputs(500.0)).unwrap_err();
        assert!(matches!(err, DesignError::Validation { ref field, .. } if field == "bottom"));
    }

    #[test]
    fn test_id_not_smaller_than_od_rejected() {
        let mut bad = inputs(2_000.0);
        bad.csg_internal_diameter = 10.0;
        let err = validate_inputs("bad", &bad, &bounds()).unwrap_err();
        assert!(
            matches!(err, DesignError::Validation { ref field, .. } if field == "csg_internal_diameter")
        );
    }

    #[test]
    fn test_ordered_by_method_keeps_insertion_order() {
        let mut reg = SectionRegistry::new(bounds());
        reg.add("mid", inputs(6_000.0)).unwrap();
        reg.add("deep", inputs(10_000.0)).unwrap();
        reg.add("shallow", inputs(2_000.0)).unwrap();

        let down: Vec<&str> = reg.ordered(TraversalMethod::TopDown).map(Section::label).collect();
        assert_eq!(down, ["shallow", "mid", "deep"]);
        let up: Vec<&str> = reg.ordered(TraversalMethod::BottomUp).map(Section::label).collect();
        assert_eq!(up, ["deep", "mid", "shallow"]);
        let inserted: Vec<&str> = reg.labels().collect();
        assert_eq!(inserted, ["mid", "deep", "shallow"]);
    }

    #[test]
    fn test_ordered_is_restartable() {
        let mut reg = SectionRegistry::new(bounds());
        reg.add("a", inputs(2_000.0)).unwrap();
        reg.add("b", inputs(4_000.0)).unwrap();
        let mut it = reg.ordered(TraversalMethod::TopDown);
        let again = it.clone();
        assert_eq!(it.len(), 2);
        it.next();
        assert_eq!(it.len(), 1);
        assert_eq!(again.count(), 2);
    }

    #[test]
    fn test_walk_pairs_reference_neighbor() {
        let mut reg = SectionRegistry::new(bounds());
        reg.add("a", inputs(2_000.0)).unwrap();
        reg.add("b", inputs(4_000.0)).unwrap();
        let steps: Vec<(&str, Option<&str>)> = reg
            .walk(TraversalMethod::BottomUp)
            .map(|s| (s.section.label(), s.reference.map(Section::label)))
            .collect();
        assert_eq!(steps, [("b", None), ("a", Some("b"))]);
    }

    #[test]
    fn test_record_missing_field_named() {
        let mut rec = record();
        rec.as_object_mut().unwrap().remove("burst_strength");
        let err = parse_record("prod", &rec).unwrap_err();
        assert!(
            matches!(err, DesignError::Validation { ref field, .. } if field == "burst_strength")
        );
    }

    #[test]
    fn test_record_non_numeric_field_named() {
        let mut rec = record();
        rec["od"] = json!("nine and five eighths");
        let err = parse_record("prod", &rec).unwrap_err();
        assert!(matches!(err, DesignError::Validation { ref field, .. } if field == "od"));
    }

    #[test]
    fn test_record_defaults_applied() {
        let mut rec = record();
        let obj = rec.as_object_mut().unwrap();
        obj.remove("coeff_friction_sliding");
        obj.remove("frac_gradient");
        let parsed = parse_record("prod", &rec).unwrap();
        assert_eq!(parsed.coeff_friction_sliding, 0.39);
        assert_eq!(parsed.frac_gradient, None);
    }
}
