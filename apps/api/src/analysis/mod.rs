pub mod handlers;
pub mod prompts;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

/// One of the two fixed instruction sets sent alongside the resume image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisType {
    /// Professional evaluation by a "Technical HR Manager" persona.
    ResumeEvaluation,
    /// ATS-style percentage match: percentage, then missing keywords, then
    /// final thoughts. The structure is promised by the prompt only — the
    /// reply is never parsed or validated.
    PercentageMatch,
}

impl AnalysisType {
    /// Human-readable label shown in the UI and the report header.
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisType::ResumeEvaluation => "Professional Resume Evaluation",
            AnalysisType::PercentageMatch => "ATS Match Analysis",
        }
    }

    /// File-name slug for the downloadable report.
    pub fn slug(&self) -> &'static str {
        match self {
            AnalysisType::ResumeEvaluation => "resume_evaluation",
            AnalysisType::PercentageMatch => "ats_match_report",
        }
    }

    /// The fixed instruction string sent to the model.
    pub fn prompt(&self) -> &'static str {
        match self {
            AnalysisType::ResumeEvaluation => prompts::RESUME_EVALUATION_PROMPT,
            AnalysisType::PercentageMatch => prompts::PERCENTAGE_MATCH_PROMPT,
        }
    }
}

impl FromStr for AnalysisType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "resume_evaluation" => Ok(AnalysisType::ResumeEvaluation),
            "percentage_match" => Ok(AnalysisType::PercentageMatch),
            other => Err(AppError::Validation(format!(
                "Unknown analysis type: {other}"
            ))),
        }
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_names() {
        assert_eq!(
            "resume_evaluation".parse::<AnalysisType>().unwrap(),
            AnalysisType::ResumeEvaluation
        );
        assert_eq!(
            "percentage_match".parse::<AnalysisType>().unwrap(),
            AnalysisType::PercentageMatch
        );
        assert!("keyword_scan".parse::<AnalysisType>().is_err());
    }

    #[test]
    fn serde_names_match_from_str() {
        let json = serde_json::to_string(&AnalysisType::PercentageMatch).unwrap();
        assert_eq!(json, "\"percentage_match\"");
        let parsed: AnalysisType = serde_json::from_str("\"resume_evaluation\"").unwrap();
        assert_eq!(parsed, AnalysisType::ResumeEvaluation);
    }

    #[test]
    fn labels_and_slugs() {
        assert_eq!(
            AnalysisType::ResumeEvaluation.label(),
            "Professional Resume Evaluation"
        );
        assert_eq!(AnalysisType::ResumeEvaluation.slug(), "resume_evaluation");
        assert_eq!(AnalysisType::PercentageMatch.label(), "ATS Match Analysis");
        assert_eq!(AnalysisType::PercentageMatch.slug(), "ats_match_report");
    }
}
