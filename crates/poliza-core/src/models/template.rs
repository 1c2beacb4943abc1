use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A policy template in the gallery.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PolicyTemplate {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub rating: f32,
    pub downloads: u32,
    #[serde(default)]
    pub featured: bool,
}

/// Gallery filter. Both criteria must hold; an empty query matches all.
#[derive(Debug, Clone, Default)]
pub struct TemplateQuery {
    pub search: Option<String>,
    pub category: Option<String>,
}

impl TemplateQuery {
    pub fn matches(&self, template: &PolicyTemplate) -> bool {
        let matches_search = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                template.title.to_lowercase().contains(&needle)
                    || template.description.to_lowercase().contains(&needle)
                    || template
                        .tags
                        .iter()
                        .any(|tag| tag.to_lowercase().contains(&needle))
            }
        };
        let matches_category = self
            .category
            .as_deref()
            .is_none_or(|category| template.category == category);
        matches_search && matches_category
    }

    pub fn apply<'a>(&self, templates: &'a [PolicyTemplate]) -> Vec<&'a PolicyTemplate> {
        templates.iter().filter(|t| self.matches(t)).collect()
    }
}

/// Distinct categories in first-seen order.
pub fn categories(templates: &[PolicyTemplate]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for t in templates {
        if !seen.contains(&t.category.as_str()) {
            seen.push(&t.category);
        }
    }
    seen
}

pub fn featured(templates: &[PolicyTemplate]) -> Vec<&PolicyTemplate> {
    templates.iter().filter(|t| t.featured).collect()
}

#[allow(clippy::too_many_arguments)]
fn template(
    id: &str,
    title: &str,
    description: &str,
    category: &str,
    tags: &[&str],
    rating: f32,
    downloads: u32,
    featured: bool,
) -> PolicyTemplate {
    PolicyTemplate {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        rating,
        downloads,
        featured,
    }
}

/// The built-in template catalog.
pub fn catalog() -> Vec<PolicyTemplate> {
    vec![
        template(
            "template-001",
            "Seguro de Responsabilidad Civil Profesional",
            "Plantilla completa para profesionales independientes y pequeñas empresas de servicios.",
            "Empresarial",
            &["Responsabilidad", "Profesional", "Servicios"],
            4.8,
            1250,
            true,
        ),
        template(
            "template-002",
            "Seguro de Propiedad Comercial",
            "Protección para edificios, inventario y equipos de negocios.",
            "Empresarial",
            &["Propiedad", "Comercial", "Edificios"],
            4.6,
            980,
            false,
        ),
        template(
            "template-003",
            "Seguro de Interrupción de Negocio",
            "Cobertura para pérdidas de ingresos durante interrupciones operativas.",
            "Empresarial",
            &["Interrupción", "Ingresos", "Operaciones"],
            4.7,
            845,
            false,
        ),
        template(
            "template-004",
            "Seguro de Vida Término",
            "Protección financiera básica para dependientes durante un período específico.",
            "Personal",
            &["Vida", "Término", "Familiar"],
            4.5,
            1560,
            false,
        ),
        template(
            "template-005",
            "Seguro de Salud Individual",
            "Cobertura médica completa para individuos.",
            "Personal",
            &["Salud", "Médico", "Individual"],
            4.9,
            2100,
            true,
        ),
        template(
            "template-006",
            "Seguro de Auto Comercial",
            "Cobertura para flotas y vehículos de empresa.",
            "Empresarial",
            &["Auto", "Vehículos", "Flota"],
            4.4,
            760,
            false,
        ),
        template(
            "template-007",
            "Seguro de Hogar",
            "Protección completa para viviendas y contenido.",
            "Personal",
            &["Hogar", "Vivienda", "Contenido"],
            4.7,
            1890,
            false,
        ),
        template(
            "template-008",
            "Seguro de Ciberseguridad",
            "Protección contra ataques cibernéticos y violaciones de datos.",
            "Empresarial",
            &["Ciberseguridad", "Datos", "Tecnología"],
            4.8,
            1120,
            true,
        ),
    ]
}
