use jiff::civil::{Date, date};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Starting HTML for a policy created from scratch.
pub const NEW_POLICY_HTML: &str = "<h2>Nueva Póliza de Seguro</h2>
<h3>Sección 1: Cobertura</h3>
<p>Esta póliza cubre...</p>
<h3>Sección 2: Exclusiones</h3>
<p>Esta póliza no cubre...</p>
<h3>Sección 3: Límites de Cobertura</h3>
<p>El límite máximo de cobertura es...</p>
<h3>Sección 4: Prima y Pagos</h3>
<p>La prima anual es...</p>";

/// A policy as listed on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PolicySummary {
    pub id: String,
    pub title: String,
    pub kind: String,
    #[ts(type = "string")]
    pub last_updated: Date,
    pub status: PolicyStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PolicyStatus {
    Active,
    InReview,
    Draft,
}

impl PolicyStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PolicyStatus::Active => "Activa",
            PolicyStatus::InReview => "En revisión",
            PolicyStatus::Draft => "Borrador",
        }
    }
}

impl PolicySummary {
    /// Initial HTML for editing this policy.
    pub fn starter_document(&self) -> String {
        format!(
            "<h2>Póliza de Seguro {id}</h2>
<h3>Sección 1: Cobertura</h3>
<p>Esta póliza cubre daños a terceros causados por las operaciones del asegurado.</p>
<h3>Sección 2: Exclusiones</h3>
<p>Esta póliza no cubre:</p>
<ul><li>Daños intencionales</li><li>Actos de guerra o terrorismo</li><li>Desastres naturales (a menos que se especifique lo contrario)</li></ul>
<h3>Sección 3: Límites de Cobertura</h3>
<p>El límite máximo de cobertura es de $1,000,000 por ocurrencia.</p>
<h3>Sección 4: Prima y Pagos</h3>
<p>La prima anual es de $5,000, pagadera en cuotas mensuales.</p>",
            id = self.id
        )
    }
}

/// The demo portfolio shown on a fresh dashboard.
pub fn starter_portfolio() -> Vec<PolicySummary> {
    vec![
        PolicySummary {
            id: "pol-001".to_string(),
            title: "Seguro de Responsabilidad Civil".to_string(),
            kind: "Empresarial".to_string(),
            last_updated: date(2023, 12, 15),
            status: PolicyStatus::Active,
        },
        PolicySummary {
            id: "pol-002".to_string(),
            title: "Seguro de Propiedad Comercial".to_string(),
            kind: "Empresarial".to_string(),
            last_updated: date(2024, 1, 20),
            status: PolicyStatus::InReview,
        },
        PolicySummary {
            id: "pol-003".to_string(),
            title: "Seguro de Interrupción de Negocio".to_string(),
            kind: "Empresarial".to_string(),
            last_updated: date(2024, 2, 5),
            status: PolicyStatus::Draft,
        },
    ]
}

/// Look up a dashboard policy by id.
pub fn find_policy(id: &str) -> Option<PolicySummary> {
    starter_portfolio().into_iter().find(|p| p.id == id)
}
