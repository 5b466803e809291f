//! Canonical feature-model types (the "CFM JSON" shape).
//!
//! These types mirror the wire format the web editor consumes: snake_case
//! field names, an absent/`null` upper bound for unbounded intervals, and a
//! boolean `require` flag on constraints. Structural rules that the wire
//! format cannot express (interval ordering, name uniqueness, constraint
//! references) are checked by [`CfmModel::validate`] at the serialization
//! boundary.

use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::fmt;

/// One admissible count range of a [`Cardinality`].
///
/// `upper == None` means the interval is unbounded above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub lower: u64,
    #[serde(default)]
    pub upper: Option<u64>,
}

impl Interval {
    #[must_use]
    pub const fn new(lower: u64, upper: Option<u64>) -> Self {
        Self { lower, upper }
    }

    /// Whether `value` falls within this interval.
    #[must_use]
    pub fn contains(&self, value: u64) -> bool {
        self.lower <= value && self.upper.is_none_or(|upper| value <= upper)
    }

    /// Whether the bounds are ordered (`upper >= lower` when present).
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.upper.is_none_or(|upper| upper >= self.lower)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upper {
            Some(upper) => write!(f, "{}..{upper}", self.lower),
            None => write!(f, "{}..*", self.lower),
        }
    }
}

/// An ordered union of admissible count ranges, e.g. `0..1, 3..*`.
///
/// Order matters for display only; validity is a union over all intervals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cardinality {
    pub intervals: Vec<Interval>,
}

impl Cardinality {
    #[must_use]
    pub const fn new(intervals: Vec<Interval>) -> Self {
        Self { intervals }
    }

    /// Whether `value` is admitted by at least one interval.
    #[must_use]
    pub fn is_valid(&self, value: u64) -> bool {
        self.intervals.iter().any(|interval| interval.contains(value))
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for interval in &self.intervals {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{interval}")?;
            first = false;
        }
        Ok(())
    }
}

/// A node in the feature tree.
///
/// Feature names are globally unique across the model; the editor resolves
/// constraint endpoints by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    pub instance_cardinality: Cardinality,
    pub group_type_cardinality: Cardinality,
    pub group_instance_cardinality: Cardinality,
    pub children: Vec<Feature>,
}

impl Feature {
    /// A feature is required when its first instance interval excludes zero.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.instance_cardinality.intervals.first().is_some_and(|interval| interval.lower != 0)
    }

    /// A feature is unbound when its last instance interval has no upper
    /// bound, or any descendant is itself unbound.
    #[must_use]
    pub fn is_unbound(&self) -> bool {
        self.instance_cardinality.intervals.last().is_some_and(|interval| interval.upper.is_none())
            || self.children.iter().any(Feature::is_unbound)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Whether a constraint requires or excludes its second feature.
///
/// The wire format carries this as the boolean `require` field; the enum
/// keeps call sites honest about what the flag means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "bool", into = "bool")]
pub enum ConstraintKind {
    Require,
    Exclude,
}

impl From<bool> for ConstraintKind {
    fn from(require: bool) -> Self {
        if require { Self::Require } else { Self::Exclude }
    }
}

impl From<ConstraintKind> for bool {
    fn from(kind: ConstraintKind) -> Self {
        matches!(kind, ConstraintKind::Require)
    }
}

/// A cross-tree relation between two named features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    #[serde(rename = "require")]
    pub kind: ConstraintKind,
    pub first_feature_name: String,
    pub first_cardinality: Cardinality,
    pub second_feature_name: String,
    pub second_cardinality: Cardinality,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.kind {
            ConstraintKind::Require => "=>",
            ConstraintKind::Exclude => "=|",
        };
        write!(f, "{} {op} {}", self.first_feature_name, self.second_feature_name)
    }
}

/// The aggregate root: one feature tree plus its cross-tree constraints.
///
/// Owned exclusively by a single request; nothing is shared or cached
/// across conversions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CfmModel {
    pub root: Feature,
    pub constraints: Vec<Constraint>,
}

impl CfmModel {
    /// All features reachable from the root, breadth-first.
    ///
    /// Uses an explicit worklist so every node is visited exactly once
    /// regardless of depth or branching.
    #[must_use]
    pub fn features(&self) -> Vec<&Feature> {
        let mut features = Vec::new();
        let mut queue = VecDeque::from([&self.root]);

        while let Some(feature) = queue.pop_front() {
            features.push(feature);
            queue.extend(feature.children.iter());
        }

        features
    }

    #[must_use]
    pub fn is_unbound(&self) -> bool {
        self.root.is_unbound()
    }

    /// Checks the structural rules the wire format cannot express.
    ///
    /// Rejects inverted intervals, empty cardinalities, duplicate feature
    /// names, and constraints referencing unknown features.
    pub fn validate(&self) -> Result<(), ModelError> {
        let features = self.features();
        let mut names = HashSet::with_capacity(features.len());

        for feature in &features {
            for cardinality in [
                &feature.instance_cardinality,
                &feature.group_type_cardinality,
                &feature.group_instance_cardinality,
            ] {
                check_cardinality(&feature.name, cardinality)?;
            }
            if !names.insert(feature.name.as_str()) {
                return Err(ModelError::DuplicateFeature { name: feature.name.clone() });
            }
        }

        for constraint in &self.constraints {
            for (name, cardinality) in [
                (&constraint.first_feature_name, &constraint.first_cardinality),
                (&constraint.second_feature_name, &constraint.second_cardinality),
            ] {
                if !names.contains(name.as_str()) {
                    return Err(ModelError::UnknownFeature { name: name.clone() });
                }
                check_cardinality(name, cardinality)?;
            }
        }

        Ok(())
    }
}

fn check_cardinality(owner: &str, cardinality: &Cardinality) -> Result<(), ModelError> {
    if cardinality.intervals.is_empty() {
        return Err(ModelError::EmptyCardinality { owner: owner.to_owned() });
    }
    for interval in &cardinality.intervals {
        if !interval.is_well_formed() {
            return Err(ModelError::InvertedInterval {
                owner: owner.to_owned(),
                interval: interval.to_string(),
            });
        }
    }
    Ok(())
}

/// Structural violations found while validating a decoded model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("interval {interval} of `{owner}` has an upper bound below its lower bound")]
    InvertedInterval { owner: String, interval: String },

    #[error("cardinality of `{owner}` has no intervals")]
    EmptyCardinality { owner: String },

    #[error("duplicate feature name `{name}`")]
    DuplicateFeature { name: String },

    #[error("constraint references unknown feature `{name}`")]
    UnknownFeature { name: String },
}
