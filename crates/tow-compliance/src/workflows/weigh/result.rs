use super::advisory::AdvisoryRatio;
use super::compliance::{ComplianceMetric, ComplianceRow, ComplianceStatus};
use serde::{Deserialize, Serialize};

/// Everything reported for one weigh. Built once and persisted as is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeighResult {
    pub rows: Vec<ComplianceRow>,
    pub advisories: Vec<AdvisoryRatio>,
    pub overall_compliant: bool,
}

impl WeighResult {
    pub fn row(&self, metric: ComplianceMetric) -> Option<&ComplianceRow> {
        self.rows.iter().find(|row| row.metric == metric)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ComplianceRow> + '_ {
        self.rows.iter().filter(|row| row.status.is_failure())
    }

    pub fn incomplete(&self) -> impl Iterator<Item = &ComplianceRow> + '_ {
        self.rows
            .iter()
            .filter(|row| row.status == ComplianceStatus::NotComplete)
    }

    pub const fn verdict_label(&self) -> &'static str {
        if self.overall_compliant {
            "Compliant"
        } else {
            "Not compliant"
        }
    }
}

/// Rows that could not be measured neither pass nor fail the combination.
pub fn aggregate(rows: Vec<ComplianceRow>, advisories: Vec<AdvisoryRatio>) -> WeighResult {
    let overall_compliant = rows.iter().all(|row| match row.status {
        ComplianceStatus::Ok | ComplianceStatus::NotApplicable | ComplianceStatus::NotComplete => {
            true
        }
        ComplianceStatus::Over => false,
    });

    WeighResult {
        rows,
        advisories,
        overall_compliant,
    }
}
