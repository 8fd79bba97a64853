//! Per-type report formatting
//!
//! ```text
//! TEMPERATURE ANALYSIS
//! ----------------------------------------
//! Sample Size: 1,204 readings
//! Average: 18.42
//! ...
//! Interpretation: Low variability (consistent readings)
//! ```

use std::fmt::{self, Write};

use oceanstat_connectors::SensorDataAnalysisResponse;
use oceanstat_core::Insight;

/// Width of the report rules
pub const RULE_WIDTH: usize = 80;

/// Format `count` with comma thousands separators
pub fn group_thousands(count: u64) -> String {
    let digits = count.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Report section for one data type
pub fn format_section(data_type: &str, response: &SensorDataAnalysisResponse) -> String {
    let mut out = String::new();
    // Writing into a String never fails
    let _ = write_section(&mut out, data_type, response);
    out
}

fn write_section(
    out: &mut impl Write,
    data_type: &str,
    response: &SensorDataAnalysisResponse,
) -> fmt::Result {
    let insight = Insight::from_result(&response.statistics());

    writeln!(out, "{} ANALYSIS", data_type.to_uppercase())?;
    writeln!(out, "{}", "-".repeat(40))?;
    writeln!(out, "Sample Size: {} readings", group_thousands(response.count))?;
    if response.discarded > 0 {
        writeln!(out, "Discarded: {} non-finite readings", response.discarded)?;
    }
    writeln!(out, "Average: {:.2}", response.average)?;
    writeln!(out, "Median: {:.2}", response.median)?;
    writeln!(out, "Minimum: {:.2}", response.min)?;
    writeln!(out, "Maximum: {:.2}", response.max)?;
    writeln!(out, "Standard Deviation: {:.2}", response.std_dev)?;
    writeln!(out, "Range: {:.2}", insight.range)?;
    writeln!(out, "Coefficient of Variation: {:.1}%", insight.coefficient_of_variation)?;
    writeln!(out, "Quality Score: {:.2}/10", response.quality_score)?;
    writeln!(out, "Interpretation: {}", insight.variability)
}

/// Heavy rule between report parts
pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(average: f64, std_dev: f64) -> SensorDataAnalysisResponse {
        SensorDataAnalysisResponse {
            average,
            min: 10.0,
            max: 30.0,
            std_dev,
            count: 1204,
            median: 20.0,
            quality_score: 10.0,
            discarded: 0,
        }
    }

    #[test]
    fn thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn section_lines() {
        let text = format_section("waterLevel", &response(20.0, 10.0));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "WATERLEVEL ANALYSIS");
        assert_eq!(lines[2], "Sample Size: 1,204 readings");
        assert!(lines.contains(&"Average: 20.00"));
        assert!(lines.contains(&"Range: 20.00"));
        assert!(lines.contains(&"Coefficient of Variation: 50.0%"));
        assert!(lines.contains(&"Quality Score: 10.00/10"));
        assert_eq!(
            lines.last(),
            Some(&"Interpretation: High variability (readings vary significantly)")
        );
        assert!(!text.contains("Discarded"));
    }

    #[test]
    fn section_writes_into_any_writer() {
        let mut out = String::from("header\n");
        write_section(&mut out, "windSpeed", &response(20.0, 10.0)).unwrap();
        assert!(out.starts_with("header\nWINDSPEED ANALYSIS\n"));
        assert!(out.ends_with("Interpretation: High variability (readings vary significantly)\n"));
    }

    #[test]
    fn zero_average_reads_as_low_variability() {
        let text = format_section("temperature", &response(0.0, 4.0));
        assert!(text.contains("Coefficient of Variation: 0.0%"));
        assert!(text.contains("Interpretation: Low variability (consistent readings)"));
    }

    #[test]
    fn discarded_readings_are_reported() {
        let mut with_gaps = response(20.0, 1.0);
        with_gaps.discarded = 3;
        let text = format_section("humidity", &with_gaps);
        assert!(text.contains("Discarded: 3 non-finite readings"));
        assert!(text.contains("Interpretation: Low variability"));
    }
}
