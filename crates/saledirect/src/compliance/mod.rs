//! State-by-state legal reference tables for private property sales.
//!
//! Each Australian state and territory carries its own cooling-off period,
//! disclosure documents, mandatory inspections, and typical agent commission
//! band. The wizard's final stage cross-checks a draft's legal flags against
//! these tables, and the savings calculator shows what a private sale avoids
//! paying in commission.

use serde::Serialize;

use crate::catalog::AustralianState;
use crate::listing::ListingDraft;

/// Official body a seller should consult for the given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GovernmentResource {
    pub name: &'static str,
    pub url: &'static str,
}

/// Typical agent commission range for a state, in percent of sale price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CommissionBand {
    pub min: f64,
    pub max: f64,
}

impl CommissionBand {
    pub fn midpoint(self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// Legal requirements for selling privately in one state.
#[derive(Debug, Clone, Serialize)]
pub struct StateCompliance {
    pub state: AustralianState,
    /// Statutory cooling-off period in business days.
    pub cooling_off_days: u8,
    pub required_disclosures: Vec<&'static str>,
    pub mandatory_inspections: Vec<&'static str>,
    pub contract_requirements: Vec<&'static str>,
    pub government_resources: Vec<GovernmentResource>,
    pub commission_rates: CommissionBand,
}

impl StateCompliance {
    pub fn for_state(state: AustralianState) -> Self {
        match state {
            AustralianState::Nsw => Self {
                state,
                cooling_off_days: 5,
                required_disclosures: vec![
                    "Section 66W Certificate",
                    "Contract for Sale of Land",
                    "Vendor Statement",
                    "Planning Certificate (Section 10.7)",
                    "Building Certificate",
                    "Pest Inspection Report",
                ],
                mandatory_inspections: vec![
                    "Building Inspection",
                    "Pest Inspection",
                    "Pool Safety Inspection (if applicable)",
                ],
                contract_requirements: vec![
                    "Contract must be in writing",
                    "Must include all prescribed warranties",
                    "Cooling-off period disclosure",
                    "GST disclosure if applicable",
                ],
                government_resources: vec![
                    GovernmentResource {
                        name: "NSW Fair Trading",
                        url: "https://www.fairtrading.nsw.gov.au",
                    },
                    GovernmentResource {
                        name: "Property Exchange Australia",
                        url: "https://www.pexa.com.au",
                    },
                ],
                commission_rates: CommissionBand { min: 1.8, max: 2.5 },
            },
            AustralianState::Vic => Self {
                state,
                cooling_off_days: 3,
                required_disclosures: vec![
                    "Section 32 Vendor Statement",
                    "Certificate of Title",
                    "Planning Certificate",
                    "Building Permit",
                    "Owners Corporation Certificate (if applicable)",
                ],
                mandatory_inspections: vec![
                    "Building Inspection",
                    "Pest Inspection",
                    "Electrical Safety Check",
                ],
                contract_requirements: vec![
                    "Section 32 must be provided",
                    "Cooling-off period applies",
                    "Deposit bond or cash deposit required",
                ],
                government_resources: vec![
                    GovernmentResource {
                        name: "Consumer Affairs Victoria",
                        url: "https://www.consumer.vic.gov.au",
                    },
                    GovernmentResource {
                        name: "State Revenue Office",
                        url: "https://www.sro.vic.gov.au",
                    },
                ],
                commission_rates: CommissionBand { min: 2.0, max: 2.8 },
            },
            AustralianState::Qld => Self {
                state,
                cooling_off_days: 5,
                required_disclosures: vec![
                    "Property Disclosure Statement",
                    "Contract for Sale of Land",
                    "Title Search",
                    "Survey Plan",
                    "Body Corporate Information (if applicable)",
                ],
                mandatory_inspections: vec![
                    "Building and Pest Inspection",
                    "Pool Safety Certificate (if applicable)",
                    "Smoke Alarm Compliance",
                ],
                contract_requirements: vec![
                    "Contract must comply with Property Occupations Act 2014",
                    "Cooling-off period disclosure",
                    "Finance clause standard",
                ],
                government_resources: vec![
                    GovernmentResource {
                        name: "Office of Fair Trading QLD",
                        url: "https://www.qld.gov.au/law/fair-trading",
                    },
                    GovernmentResource {
                        name: "Queensland Revenue Office",
                        url: "https://www.revenue.qld.gov.au",
                    },
                ],
                commission_rates: CommissionBand { min: 2.0, max: 3.0 },
            },
            AustralianState::Wa => Self {
                state,
                cooling_off_days: 5,
                required_disclosures: vec![
                    "Vendor Disclosure Statement",
                    "Contract of Sale",
                    "Certificate of Title",
                    "Planning Certificate",
                ],
                mandatory_inspections: vec![
                    "Building Inspection",
                    "Pest Inspection",
                    "Pool Barrier Inspection (if applicable)",
                ],
                contract_requirements: vec![
                    "Contract must be in prescribed form",
                    "Cooling-off period applies to off-the-plan sales",
                    "Settlement period disclosure",
                ],
                government_resources: vec![
                    GovernmentResource {
                        name: "Department of Commerce WA",
                        url: "https://www.commerce.wa.gov.au",
                    },
                    GovernmentResource {
                        name: "Landgate",
                        url: "https://www.landgate.wa.gov.au",
                    },
                ],
                commission_rates: CommissionBand { min: 2.2, max: 3.5 },
            },
            AustralianState::Sa => Self {
                state,
                cooling_off_days: 2,
                required_disclosures: vec![
                    "Vendor Statement",
                    "Contract of Sale",
                    "Certificate of Title",
                    "Planning Certificate",
                ],
                mandatory_inspections: vec!["Building Inspection", "Pest Inspection"],
                contract_requirements: vec![
                    "Contract must include all material facts",
                    "Cooling-off period disclosure",
                    "GST implications disclosure",
                ],
                government_resources: vec![
                    GovernmentResource {
                        name: "Consumer and Business Services SA",
                        url: "https://www.cbs.sa.gov.au",
                    },
                    GovernmentResource {
                        name: "RevenueSA",
                        url: "https://www.revenuesa.sa.gov.au",
                    },
                ],
                commission_rates: CommissionBand { min: 1.8, max: 2.5 },
            },
            AustralianState::Tas => Self {
                state,
                cooling_off_days: 5,
                required_disclosures: vec![
                    "Vendor Statement",
                    "Contract for Sale",
                    "Certificate of Title",
                    "Planning Certificate",
                ],
                mandatory_inspections: vec!["Building Inspection", "Pest Inspection"],
                contract_requirements: vec![
                    "Contract must be in writing",
                    "All material facts disclosed",
                    "Cooling-off period applies",
                ],
                government_resources: vec![
                    GovernmentResource {
                        name: "Consumer, Building and Occupational Services",
                        url: "https://www.cbos.tas.gov.au",
                    },
                    GovernmentResource {
                        name: "State Revenue Office TAS",
                        url: "https://www.sro.tas.gov.au",
                    },
                ],
                commission_rates: CommissionBand { min: 2.0, max: 3.0 },
            },
            AustralianState::Act => Self {
                state,
                cooling_off_days: 5,
                required_disclosures: vec![
                    "Vendor Statement",
                    "Contract for Sale",
                    "Certificate of Title",
                    "Planning Certificate",
                ],
                mandatory_inspections: vec!["Building Inspection", "Pest Inspection"],
                contract_requirements: vec![
                    "Contract must comply with Civil Law Act",
                    "Cooling-off period disclosure",
                    "All encumbrances disclosed",
                ],
                government_resources: vec![
                    GovernmentResource {
                        name: "Access Canberra",
                        url: "https://www.accesscanberra.act.gov.au",
                    },
                    GovernmentResource {
                        name: "ACT Revenue Office",
                        url: "https://www.revenue.act.gov.au",
                    },
                ],
                commission_rates: CommissionBand { min: 1.8, max: 2.5 },
            },
            AustralianState::Nt => Self {
                state,
                cooling_off_days: 5,
                required_disclosures: vec![
                    "Vendor Statement",
                    "Contract of Sale",
                    "Certificate of Title",
                    "Planning Certificate",
                ],
                mandatory_inspections: vec!["Building Inspection", "Pest Inspection"],
                contract_requirements: vec![
                    "Contract must be in writing",
                    "Material facts disclosure",
                    "Cooling-off period applies",
                ],
                government_resources: vec![
                    GovernmentResource {
                        name: "NT Consumer Affairs",
                        url: "https://consumeraffairs.nt.gov.au",
                    },
                    GovernmentResource {
                        name: "Territory Revenue Office",
                        url: "https://revenue.nt.gov.au",
                    },
                ],
                commission_rates: CommissionBand { min: 2.5, max: 4.0 },
            },
        }
    }

    fn requires_pool_certification(&self) -> bool {
        self.mandatory_inspections
            .iter()
            .any(|inspection| inspection.contains("Pool"))
    }
}

/// Whole-dollar commission a private seller avoids, using the midpoint of
/// the state's typical agent commission band.
pub fn commission_savings(price: u64, state: AustralianState) -> u64 {
    let band = StateCompliance::for_state(state).commission_rates;
    ((price as f64) * band.midpoint() / 100.0).round() as u64
}

/// Outstanding legal items surfaced on the wizard's final stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceAlertKind {
    BuildingInspectionOutstanding,
    PestInspectionOutstanding,
    PoolCertificationOutstanding,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceAlert {
    pub kind: ComplianceAlertKind,
    pub state: AustralianState,
    pub detail: String,
}

/// Cross-check a draft's legal flags against its state's mandatory
/// inspections. Drafts without a state yet yield no alerts; there is no
/// table to check against.
pub fn compliance_alerts(draft: &ListingDraft) -> Vec<ComplianceAlert> {
    let Some(state) = draft.state else {
        return Vec::new();
    };
    let table = StateCompliance::for_state(state);
    let mut alerts = Vec::new();

    if !draft.building_inspection_done {
        alerts.push(ComplianceAlert {
            kind: ComplianceAlertKind::BuildingInspectionOutstanding,
            state,
            detail: format!(
                "{} requires a building inspection before settlement",
                state.label()
            ),
        });
    }

    if !draft.pest_inspection_done {
        alerts.push(ComplianceAlert {
            kind: ComplianceAlertKind::PestInspectionOutstanding,
            state,
            detail: format!(
                "{} requires a pest inspection before settlement",
                state.label()
            ),
        });
    }

    if draft.has_pool && !draft.pool_compliant {
        let detail = if table.requires_pool_certification() {
            format!(
                "{} mandates pool safety certification for listings with a pool",
                state.label()
            )
        } else {
            "pool safety certification has not been confirmed for this listing".to_string()
        };
        alerts.push(ComplianceAlert {
            kind: ComplianceAlertKind::PoolCertificationOutstanding,
            state,
            detail,
        });
    }

    alerts
}
