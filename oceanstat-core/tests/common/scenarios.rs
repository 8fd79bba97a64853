//! Pre-built analysis scenarios
//!
//! Each scenario pairs an input batch with what the engine must produce.

use oceanstat_core::AnalysisRequest;

use super::generators::MockSampleGenerator;

/// Expected statistics for a scenario
#[derive(Debug, Clone, Copy)]
pub struct ExpectedStats {
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub count: usize,
    pub std_dev: Option<f64>,
    pub quality: f64,
}

/// Input plus expected outcome
pub struct TestScenario {
    pub name: &'static str,
    pub request: AnalysisRequest,
    pub expected: Option<ExpectedStats>,
}

/// Scenario catalogue
pub struct Scenarios;

impl Scenarios {
    /// Three evenly spaced temperatures
    pub fn evenly_spaced() -> TestScenario {
        TestScenario {
            name: "evenly_spaced",
            request: AnalysisRequest::new("temperature", vec![10.0, 20.0, 30.0]),
            expected: Some(ExpectedStats {
                average: 20.0,
                min: 10.0,
                max: 30.0,
                median: 20.0,
                count: 3,
                std_dev: Some(10.0),
                // 3 readings: tiny-sample penalty
                quality: 4.0,
            }),
        }
    }

    /// Half the batch is NaN or infinite
    pub fn half_corrupted() -> TestScenario {
        TestScenario {
            name: "half_corrupted",
            request: AnalysisRequest::new("humidity", vec![5.0, f64::NAN, 7.0, f64::INFINITY]),
            expected: Some(ExpectedStats {
                average: 6.0,
                min: 5.0,
                max: 7.0,
                median: 6.0,
                count: 2,
                std_dev: Some(2.0_f64.sqrt()),
                // 10 × 2/4 × 0.4
                quality: 2.0,
            }),
        }
    }

    /// No readings at all
    pub fn empty() -> TestScenario {
        TestScenario {
            name: "empty",
            request: AnalysisRequest::new("waterLevel", Vec::new()),
            expected: None,
        }
    }

    /// 150 readings spread evenly over the wind-speed range
    pub fn large_uniform() -> TestScenario {
        let values = MockSampleGenerator::uniform_spread(0.0, 149.0, 150);
        TestScenario {
            name: "large_uniform",
            request: AnalysisRequest::new("windSpeed", values),
            expected: Some(ExpectedStats {
                average: 74.5,
                min: 0.0,
                max: 149.0,
                median: 74.5,
                count: 150,
                std_dev: None,
                quality: 10.0,
            }),
        }
    }

    /// All scenarios, for table-driven tests
    pub fn all() -> Vec<TestScenario> {
        vec![
            Self::evenly_spaced(),
            Self::half_corrupted(),
            Self::empty(),
            Self::large_uniform(),
        ]
    }
}
