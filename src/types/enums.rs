//! Enumeration types for the queueing simulator
//!
//! This module contains the enumeration types used throughout the simulation system:
//! distribution families, the Normal scaling policy, and output formats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Distribution families understood by the variate generator
///
/// Names are parsed leniently: an unknown name is kept as
/// [`DistributionFamily::Unrecognized`] rather than rejected, and samples drawn
/// from it are always 0.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DistributionFamily {
    /// Continuous surrogate for Poisson: `-ln(U) / mean`
    Poisson,
    /// Exponential: `-mean * ln(U)`
    Exponential,
    /// Uniform on `[0, 2 * mean)`
    Uniform,
    /// Irwin–Hall approximation of a normal variate around `mean`
    Normal,
    /// `mean` times the sum of twelve uniforms
    Gamma,
    /// A bare `U(0,1)` draw (configured as "random")
    RawUniform,
    /// Any other name; sampling yields 0
    Unrecognized(String),
}

impl DistributionFamily {
    /// All recognized families, in display order
    pub const RECOGNIZED: [DistributionFamily; 6] = [
        DistributionFamily::Poisson,
        DistributionFamily::Exponential,
        DistributionFamily::RawUniform,
        DistributionFamily::Normal,
        DistributionFamily::Uniform,
        DistributionFamily::Gamma,
    ];

    /// Parse a family name, mapping unknown names to `Unrecognized`
    pub fn parse_lenient(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "poisson" => DistributionFamily::Poisson,
            "exponential" => DistributionFamily::Exponential,
            "uniform" => DistributionFamily::Uniform,
            "normal" => DistributionFamily::Normal,
            "gamma" => DistributionFamily::Gamma,
            "random" => DistributionFamily::RawUniform,
            _ => DistributionFamily::Unrecognized(name.to_string()),
        }
    }

    /// Configuration name of this family
    pub fn name(&self) -> &str {
        match self {
            DistributionFamily::Poisson => "poisson",
            DistributionFamily::Exponential => "exponential",
            DistributionFamily::Uniform => "uniform",
            DistributionFamily::Normal => "normal",
            DistributionFamily::Gamma => "gamma",
            DistributionFamily::RawUniform => "random",
            DistributionFamily::Unrecognized(name) => name,
        }
    }

    /// Number of uniform draws one sample consumes
    pub fn draws_per_sample(&self) -> usize {
        match self {
            DistributionFamily::Poisson
            | DistributionFamily::Exponential
            | DistributionFamily::Uniform
            | DistributionFamily::RawUniform => 1,
            DistributionFamily::Normal | DistributionFamily::Gamma => 12,
            DistributionFamily::Unrecognized(_) => 0,
        }
    }

    /// Whether the family needs a strictly positive mean
    ///
    /// `random` ignores the mean, `normal` accepts a zero mean, and unrecognized
    /// families never look at it.
    pub fn requires_positive_mean(&self) -> bool {
        matches!(
            self,
            DistributionFamily::Poisson
                | DistributionFamily::Exponential
                | DistributionFamily::Uniform
                | DistributionFamily::Gamma
        )
    }

    /// Whether this is the unknown-name fallback
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, DistributionFamily::Unrecognized(_))
    }
}

impl Default for DistributionFamily {
    fn default() -> Self {
        DistributionFamily::Exponential
    }
}

impl fmt::Display for DistributionFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DistributionFamily {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_lenient(s))
    }
}

impl From<String> for DistributionFamily {
    fn from(s: String) -> Self {
        Self::parse_lenient(&s)
    }
}

impl From<DistributionFamily> for String {
    fn from(family: DistributionFamily) -> Self {
        family.name().to_string()
    }
}

/// How the Normal sampler treats its variance parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NormalScaling {
    /// `mean + (sum - 6)`; the variance is accepted but not applied
    #[default]
    Literal,
    /// `mean + sqrt(variance) * (sum - 6)`
    StdDev,
}

impl fmt::Display for NormalScaling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalScaling::Literal => write!(f, "literal"),
            NormalScaling::StdDev => write!(f, "std_dev"),
        }
    }
}

impl FromStr for NormalScaling {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "literal" => Ok(NormalScaling::Literal),
            "std_dev" | "stddev" | "std-dev" => Ok(NormalScaling::StdDev),
            _ => Err(format!("Unknown normal scaling: {}", s)),
        }
    }
}

/// Output format options for the presentation shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable tables, Gantt chart and interpretation
    Text,
    /// JSON report with every output record
    Json,
    /// CSV of the simulation table
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "Text"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_family_parsing() {
        assert_eq!(DistributionFamily::parse_lenient("poisson"), DistributionFamily::Poisson);
        assert_eq!(DistributionFamily::parse_lenient("Exponential"), DistributionFamily::Exponential);
        assert_eq!(DistributionFamily::parse_lenient(" uniform "), DistributionFamily::Uniform);
        assert_eq!(DistributionFamily::parse_lenient("NORMAL"), DistributionFamily::Normal);
        assert_eq!(DistributionFamily::parse_lenient("gamma"), DistributionFamily::Gamma);
        assert_eq!(DistributionFamily::parse_lenient("random"), DistributionFamily::RawUniform);

        let unknown = DistributionFamily::parse_lenient("xyz");
        assert_eq!(unknown, DistributionFamily::Unrecognized("xyz".to_string()));
        assert!(unknown.is_unrecognized());
    }

    #[test]
    fn test_distribution_family_names_round_trip() {
        for family in DistributionFamily::RECOGNIZED.iter() {
            assert_eq!(&DistributionFamily::parse_lenient(family.name()), family);
        }
        assert_eq!(DistributionFamily::RawUniform.to_string(), "random");
    }

    #[test]
    fn test_draws_per_sample() {
        assert_eq!(DistributionFamily::Exponential.draws_per_sample(), 1);
        assert_eq!(DistributionFamily::Poisson.draws_per_sample(), 1);
        assert_eq!(DistributionFamily::Uniform.draws_per_sample(), 1);
        assert_eq!(DistributionFamily::RawUniform.draws_per_sample(), 1);
        assert_eq!(DistributionFamily::Normal.draws_per_sample(), 12);
        assert_eq!(DistributionFamily::Gamma.draws_per_sample(), 12);
        assert_eq!(DistributionFamily::Unrecognized("x".into()).draws_per_sample(), 0);
    }

    #[test]
    fn test_positive_mean_requirement() {
        assert!(DistributionFamily::Exponential.requires_positive_mean());
        assert!(DistributionFamily::Gamma.requires_positive_mean());
        assert!(!DistributionFamily::RawUniform.requires_positive_mean());
        assert!(!DistributionFamily::Normal.requires_positive_mean());
        assert!(!DistributionFamily::Unrecognized("x".into()).requires_positive_mean());
    }

    #[test]
    fn test_distribution_family_serialization() {
        let json = serde_json::to_string(&DistributionFamily::RawUniform).unwrap();
        assert_eq!(json, "\"random\"");

        let parsed: DistributionFamily = serde_json::from_str("\"gamma\"").unwrap();
        assert_eq!(parsed, DistributionFamily::Gamma);

        let unknown: DistributionFamily = serde_json::from_str("\"weibull\"").unwrap();
        assert_eq!(unknown, DistributionFamily::Unrecognized("weibull".to_string()));
    }

    #[test]
    fn test_normal_scaling_from_str() {
        assert_eq!("literal".parse::<NormalScaling>().unwrap(), NormalScaling::Literal);
        assert_eq!("std_dev".parse::<NormalScaling>().unwrap(), NormalScaling::StdDev);
        assert_eq!("stddev".parse::<NormalScaling>().unwrap(), NormalScaling::StdDev);
        assert!("variance".parse::<NormalScaling>().is_err());
        assert_eq!(NormalScaling::default(), NormalScaling::Literal);
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(format!("{}", OutputFormat::Text), "Text");
        assert_eq!(format!("{}", OutputFormat::Json), "JSON");
        assert_eq!(format!("{}", OutputFormat::Csv), "CSV");
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);

        // Test error case
        assert!("invalid".parse::<OutputFormat>().is_err());
    }
}
