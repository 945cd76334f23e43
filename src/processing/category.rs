//! Job categories and the fixed classifier-id mapping

use serde::{Serialize, Serializer};
use std::fmt;

/// Label emitted for classifier ids outside the mapping
pub const UNKNOWN_LABEL: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Advocate,
    Arts,
    AutomationTesting,
    Blockchain,
    BusinessAnalyst,
    CivilEngineer,
    DataScience,
    Database,
    DevOpsEngineer,
    DotNetDeveloper,
    EtlDeveloper,
    ElectricalEngineering,
    Hr,
    Hadoop,
    HealthAndFitness,
    JavaDeveloper,
    MechanicalEngineer,
    NetworkSecurityEngineer,
    OperationsManager,
    Pmo,
    PythonDeveloper,
    SapDeveloper,
    Sales,
    Testing,
    WebDesigning,
    /// Classifier produced an id with no mapping entry
    Unrecognized(i64),
}

/// Classifier id -> category, indexed by id
pub const CATEGORY_MAPPING: [(i64, Category); 25] = [
    (0, Category::Advocate),
    (1, Category::Arts),
    (2, Category::AutomationTesting),
    (3, Category::Blockchain),
    (4, Category::BusinessAnalyst),
    (5, Category::CivilEngineer),
    (6, Category::DataScience),
    (7, Category::Database),
    (8, Category::DevOpsEngineer),
    (9, Category::DotNetDeveloper),
    (10, Category::EtlDeveloper),
    (11, Category::ElectricalEngineering),
    (12, Category::Hr),
    (13, Category::Hadoop),
    (14, Category::HealthAndFitness),
    (15, Category::JavaDeveloper),
    (16, Category::MechanicalEngineer),
    (17, Category::NetworkSecurityEngineer),
    (18, Category::OperationsManager),
    (19, Category::Pmo),
    (20, Category::PythonDeveloper),
    (21, Category::SapDeveloper),
    (22, Category::Sales),
    (23, Category::Testing),
    (24, Category::WebDesigning),
];

impl Category {
    /// Map a classifier id; ids outside 0..=24 become `Unrecognized`
    pub fn from_id(id: i64) -> Self {
        usize::try_from(id)
            .ok()
            .and_then(|index| CATEGORY_MAPPING.get(index))
            .map(|(_, category)| *category)
            .unwrap_or(Category::Unrecognized(id))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Advocate => "Advocate",
            Category::Arts => "Arts",
            Category::AutomationTesting => "Automation Testing",
            Category::Blockchain => "Blockchain",
            Category::BusinessAnalyst => "Business Analyst",
            Category::CivilEngineer => "Civil Engineer",
            Category::DataScience => "Data Science",
            Category::Database => "Database",
            Category::DevOpsEngineer => "DevOps Engineer",
            Category::DotNetDeveloper => "DotNet Developer",
            Category::EtlDeveloper => "ETL Developer",
            Category::ElectricalEngineering => "Electrical Engineering",
            Category::Hr => "HR",
            Category::Hadoop => "Hadoop",
            Category::HealthAndFitness => "Health and fitness",
            Category::JavaDeveloper => "Java Developer",
            Category::MechanicalEngineer => "Mechanical Engineer",
            Category::NetworkSecurityEngineer => "Network Security Engineer",
            Category::OperationsManager => "Operations Manager",
            Category::Pmo => "PMO",
            Category::PythonDeveloper => "Python Developer",
            Category::SapDeveloper => "SAP Developer",
            Category::Sales => "Sales",
            Category::Testing => "Testing",
            Category::WebDesigning => "Web Designing",
            Category::Unrecognized(_) => UNKNOWN_LABEL,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Category::Unrecognized(_))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
