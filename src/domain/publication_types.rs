//! Publication sub-types and lookup from free-text spreadsheet values

use serde::{Deserialize, Serialize};

use crate::utils::slug::parameterize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationType {
    PolicyPaper,
    ImpactAssessment,
    Guidance,
    Form,
    OfficialStatistics,
    NationalStatistics,
    StatisticalDataSet,
    ResearchAndAnalysis,
    CorporateReport,
    TransparencyData,
    FoiRelease,
    InternationalTreaty,
    Map,
    PromotionalMaterial,
    IndependentReport,
    Correspondence,
    Decision,
    Notice,
    ConsultationOutcome,
}

/// Legacy spreadsheet values that do not parameterize to a current slug
const ALIASES: &[(&str, PublicationType)] = &[
    ("statistics", PublicationType::OfficialStatistics),
    ("research", PublicationType::ResearchAndAnalysis),
    ("foi", PublicationType::FoiRelease),
    ("freedom-of-information-release", PublicationType::FoiRelease),
    ("consultation-response", PublicationType::ConsultationOutcome),
    ("guidance-and-regulation", PublicationType::Guidance),
    ("letter", PublicationType::Correspondence),
];

impl PublicationType {
    pub const ALL: [PublicationType; 19] = [
        PublicationType::PolicyPaper,
        PublicationType::ImpactAssessment,
        PublicationType::Guidance,
        PublicationType::Form,
        PublicationType::OfficialStatistics,
        PublicationType::NationalStatistics,
        PublicationType::StatisticalDataSet,
        PublicationType::ResearchAndAnalysis,
        PublicationType::CorporateReport,
        PublicationType::TransparencyData,
        PublicationType::FoiRelease,
        PublicationType::InternationalTreaty,
        PublicationType::Map,
        PublicationType::PromotionalMaterial,
        PublicationType::IndependentReport,
        PublicationType::Correspondence,
        PublicationType::Decision,
        PublicationType::Notice,
        PublicationType::ConsultationOutcome,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            PublicationType::PolicyPaper => "policy-paper",
            PublicationType::ImpactAssessment => "impact-assessment",
            PublicationType::Guidance => "guidance",
            PublicationType::Form => "form",
            PublicationType::OfficialStatistics => "official-statistics",
            PublicationType::NationalStatistics => "national-statistics",
            PublicationType::StatisticalDataSet => "statistical-data-set",
            PublicationType::ResearchAndAnalysis => "research-and-analysis",
            PublicationType::CorporateReport => "corporate-report",
            PublicationType::TransparencyData => "transparency-data",
            PublicationType::FoiRelease => "foi-release",
            PublicationType::InternationalTreaty => "international-treaty",
            PublicationType::Map => "map",
            PublicationType::PromotionalMaterial => "promotional-material",
            PublicationType::IndependentReport => "independent-report",
            PublicationType::Correspondence => "correspondence",
            PublicationType::Decision => "decision",
            PublicationType::Notice => "notice",
            PublicationType::ConsultationOutcome => "consultation-outcome",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PublicationType::PolicyPaper => "Policy paper",
            PublicationType::ImpactAssessment => "Impact assessment",
            PublicationType::Guidance => "Guidance",
            PublicationType::Form => "Form",
            PublicationType::OfficialStatistics => "Statistics",
            PublicationType::NationalStatistics => "Statistics - national statistics",
            PublicationType::StatisticalDataSet => "Statistical data set",
            PublicationType::ResearchAndAnalysis => "Research and analysis",
            PublicationType::CorporateReport => "Corporate report",
            PublicationType::TransparencyData => "Transparency data",
            PublicationType::FoiRelease => "FOI release",
            PublicationType::InternationalTreaty => "International treaty",
            PublicationType::Map => "Map",
            PublicationType::PromotionalMaterial => "Promotional material",
            PublicationType::IndependentReport => "Independent report",
            PublicationType::Correspondence => "Correspondence",
            PublicationType::Decision => "Decision",
            PublicationType::Notice => "Notice",
            PublicationType::ConsultationOutcome => "Consultation outcome",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.slug() == slug)
    }

    /// Match a spreadsheet value against slugs, labels, plurals and legacy
    /// aliases. `"Policy papers"`, `"policy-paper"` and `"POLICY PAPER"` all
    /// find `PolicyPaper`.
    pub fn find(value: &str) -> Option<Self> {
        let wanted = parameterize(value);
        if wanted.is_empty() {
            return None;
        }
        let singular = wanted.strip_suffix('s').unwrap_or(&wanted);

        Self::ALL
            .into_iter()
            .find(|t| {
                let slug = t.slug();
                slug == wanted || slug == singular || parameterize(t.label()) == wanted
            })
            .or_else(|| {
                ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == wanted || *alias == singular)
                    .map(|(_, t)| *t)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_by_slug_label_and_plural() {
        assert_eq!(PublicationType::find("policy-paper"), Some(PublicationType::PolicyPaper));
        assert_eq!(PublicationType::find("Policy papers"), Some(PublicationType::PolicyPaper));
        assert_eq!(PublicationType::find("FOI release"), Some(PublicationType::FoiRelease));
        assert_eq!(PublicationType::find("Statistics"), Some(PublicationType::OfficialStatistics));
        assert_eq!(
            PublicationType::find("Statistics - national statistics"),
            Some(PublicationType::NationalStatistics)
        );
        assert_eq!(PublicationType::find("Maps"), Some(PublicationType::Map));
    }

    #[test]
    fn statistics_is_not_mangled_by_plural_stripping() {
        // "official-statistics" must match exactly, not via "official-statistic"
        assert_eq!(
            PublicationType::find("official statistics"),
            Some(PublicationType::OfficialStatistics)
        );
    }

    #[test]
    fn unknown_or_blank_values_are_not_found() {
        assert_eq!(PublicationType::find("leaflet"), None);
        assert_eq!(PublicationType::find("  "), None);
    }
}
