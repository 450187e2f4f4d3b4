use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Closed set of departments a resume can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Department {
    JuniorHr,
    SeniorHr,
    HrOperations,
    TalentAcquisition,
    LearningAndDevelopment,
    SoftwareDevelopment,
    DevOps,
    DataScience,
    MachineLearning,
    QualityAssurance,
    Cybersecurity,
    PreSales,
    PostSales,
    BusinessDevelopment,
    DigitalMarketing,
    ProductMarketing,
    Accounting,
    Auditing,
    Taxation,
    FinancialAnalysis,
}

impl Department {
    pub const ALL: [Department; 20] = [
        Department::JuniorHr,
        Department::SeniorHr,
        Department::HrOperations,
        Department::TalentAcquisition,
        Department::LearningAndDevelopment,
        Department::SoftwareDevelopment,
        Department::DevOps,
        Department::DataScience,
        Department::MachineLearning,
        Department::QualityAssurance,
        Department::Cybersecurity,
        Department::PreSales,
        Department::PostSales,
        Department::BusinessDevelopment,
        Department::DigitalMarketing,
        Department::ProductMarketing,
        Department::Accounting,
        Department::Auditing,
        Department::Taxation,
        Department::FinancialAnalysis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::JuniorHr => "Junior HR",
            Department::SeniorHr => "Senior HR",
            Department::HrOperations => "HR Operations",
            Department::TalentAcquisition => "Talent Acquisition",
            Department::LearningAndDevelopment => "Learning & Development",
            Department::SoftwareDevelopment => "Software Development",
            Department::DevOps => "DevOps",
            Department::DataScience => "Data Science",
            Department::MachineLearning => "Machine Learning",
            Department::QualityAssurance => "Quality Assurance",
            Department::Cybersecurity => "Cybersecurity",
            Department::PreSales => "Pre-Sales",
            Department::PostSales => "Post-Sales",
            Department::BusinessDevelopment => "Business Development",
            Department::DigitalMarketing => "Digital Marketing",
            Department::ProductMarketing => "Product Marketing",
            Department::Accounting => "Accounting",
            Department::Auditing => "Auditing",
            Department::Taxation => "Taxation",
            Department::FinancialAnalysis => "Financial Analysis",
        }
    }

    pub const GROUPS: [&'static str; 4] = [
        "Human Resources",
        "Engineering / IT",
        "Sales & Marketing",
        "Finance & Accounting",
    ];

    /// Heading the department is listed under in the forms.
    pub fn group(&self) -> &'static str {
        match self {
            Department::JuniorHr
            | Department::SeniorHr
            | Department::HrOperations
            | Department::TalentAcquisition
            | Department::LearningAndDevelopment => "Human Resources",
            Department::SoftwareDevelopment
            | Department::DevOps
            | Department::DataScience
            | Department::MachineLearning
            | Department::QualityAssurance
            | Department::Cybersecurity => "Engineering / IT",
            Department::PreSales
            | Department::PostSales
            | Department::BusinessDevelopment
            | Department::DigitalMarketing
            | Department::ProductMarketing => "Sales & Marketing",
            Department::Accounting
            | Department::Auditing
            | Department::Taxation
            | Department::FinancialAnalysis => "Finance & Accounting",
        }
    }

    /// Case-insensitive comparison against a free-text department value.
    pub fn matches(&self, value: &str) -> bool {
        value.trim().to_lowercase() == self.as_str().to_lowercase()
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDepartment(pub String);

impl fmt::Display for UnknownDepartment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a known department", self.0)
    }
}

impl std::error::Error for UnknownDepartment {}

impl FromStr for Department {
    type Err = UnknownDepartment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Department::ALL
            .iter()
            .copied()
            .find(|d| d.matches(s))
            .ok_or_else(|| UnknownDepartment(s.to_string()))
    }
}

impl Serialize for Department {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Department {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Optional search constraints. `None` means "no constraint", never zero or empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub experience: Option<u32>,
    pub department: Option<Department>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.experience.is_none() && self.department.is_none()
    }
}

/// Parses a department selector where an empty string or "Any" means unset.
pub fn parse_department_selector(raw: Option<&str>) -> Result<Option<Department>, UnknownDepartment> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(any) if any.eq_ignore_ascii_case("any") => Ok(None),
        Some(name) => name.parse().map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_parse_is_case_insensitive() {
        assert_eq!("devops".parse::<Department>(), Ok(Department::DevOps));
        assert_eq!(
            "  learning & DEVELOPMENT ".parse::<Department>(),
            Ok(Department::LearningAndDevelopment)
        );
        assert!("Astronomy".parse::<Department>().is_err());
    }

    #[test]
    fn test_every_department_round_trips_through_its_label() {
        for dept in Department::ALL {
            assert_eq!(dept.as_str().parse::<Department>(), Ok(dept));
        }
    }

    #[test]
    fn test_department_serializes_as_label() {
        let json = serde_json::to_string(&Department::PreSales).unwrap();
        assert_eq!(json, "\"Pre-Sales\"");
        let back: Department = serde_json::from_str("\"pre-sales\"").unwrap();
        assert_eq!(back, Department::PreSales);
    }

    #[test]
    fn test_groups() {
        assert_eq!(Department::SeniorHr.group(), "Human Resources");
        assert_eq!(Department::Cybersecurity.group(), "Engineering / IT");
        assert_eq!(Department::ProductMarketing.group(), "Sales & Marketing");
        assert_eq!(Department::Taxation.group(), "Finance & Accounting");
    }

    #[test]
    fn test_department_selector() {
        assert_eq!(parse_department_selector(None), Ok(None));
        assert_eq!(parse_department_selector(Some("")), Ok(None));
        assert_eq!(parse_department_selector(Some("Any")), Ok(None));
        assert_eq!(
            parse_department_selector(Some("auditing")),
            Ok(Some(Department::Auditing))
        );
        assert!(parse_department_selector(Some("Payroll")).is_err());
    }

    #[test]
    fn test_empty_criteria() {
        assert!(FilterCriteria::default().is_empty());
        assert!(!FilterCriteria {
            experience: Some(0),
            department: None
        }
        .is_empty());
    }
}
