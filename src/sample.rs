//! The course-plan sample: a `plano` document mixing a mapped record with
//! hand-built elements, plus the edit script the CLI applies before export.

use tracing::instrument;

use crate::domain::{
    AddPercentage, Adapter, AdapterRegistry, Document, DomainResult, ElementId, ElementTree,
    Mapper, TransformRegistry,
};
use crate::impl_to_record;

pub const COURSE_UNIT_TYPE: &str = "FUC";
pub const COMPONENT_TYPE: &str = "ComponenteAvaliacao";

/// One assessment component of a course unit.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentComponent {
    pub nome: String,
    pub peso: u32,
}

impl_to_record!(AssessmentComponent as "ComponenteAvaliacao" { nome, peso });

/// A course unit ("ficha de unidade curricular").
#[derive(Debug, Clone, PartialEq)]
pub struct CourseUnit {
    pub codigo: String,
    pub nome: String,
    pub ects: f64,
    pub observacoes: Option<String>,
    pub avaliacao: Vec<AssessmentComponent>,
}

impl_to_record!(CourseUnit as "FUC" { codigo, nome, ects, observacoes, avaliacao });

pub const DESCRIPTION: &str = "This course covers advanced programming topics.";

/// Adapter for course units: moves `codigo` last, tags the unit as advanced and
/// appends an English `description` child.
#[derive(Debug, Clone, Copy, Default)]
pub struct CourseUnitAdapter;

impl Adapter for CourseUnitAdapter {
    fn adapt(&self, tree: &mut ElementTree, element: ElementId) -> DomainResult<()> {
        let node = tree.element_mut(element)?;
        if let Some(codigo) = node.remove_attribute("codigo") {
            node.add_attribute("codigo", codigo);
        }
        node.add_attribute("type", "advanced");

        let description = tree.append_child(element, "description")?;
        tree.element_mut(description)?
            .add_attributes([("lang", "en"), ("value", DESCRIPTION)]);
        Ok(())
    }

    fn name(&self) -> &str {
        "CourseUnitAdapter"
    }
}

/// Mapper with the sample's registrations: percentages on component weights and
/// the course unit adapter.
pub fn sample_mapper() -> Mapper {
    let transforms = TransformRegistry::new().with(COMPONENT_TYPE, "peso", AddPercentage);
    let adapters = AdapterRegistry::new().with(COURSE_UNIT_TYPE, CourseUnitAdapter);
    Mapper::new(transforms, adapters)
}

pub fn sample_course_unit() -> CourseUnit {
    CourseUnit {
        codigo: "M4310".into(),
        nome: "Programação Avançada".into(),
        ects: 6.0,
        observacoes: Some("la la...".into()),
        avaliacao: vec![
            AssessmentComponent {
                nome: "Quizzes".into(),
                peso: 20,
            },
            AssessmentComponent {
                nome: "Projeto".into(),
                peso: 80,
            },
        ],
    }
}

struct PlanEntry {
    codigo: &'static str,
    nome: &'static str,
    ects: &'static str,
    componentes: &'static [(&'static str, &'static str)],
}

const PLAN: &[PlanEntry] = &[
    PlanEntry {
        codigo: "M4310",
        nome: "Programação Avançada",
        ects: "6.0",
        componentes: &[("Quizzes", "20%"), ("Projeto", "80%")],
    },
    PlanEntry {
        codigo: "03782",
        nome: "Dissertação",
        ects: "42.0",
        componentes: &[
            ("Dissertação", "60%"),
            ("Apresentação", "20%"),
            ("Discussão", "20%"),
        ],
    },
];

/// Builds the sample `plano` document.
#[instrument(level = "debug")]
pub fn sample_document() -> DomainResult<Document> {
    let mut document = Document::new("plano")?;
    let root = document.root();
    let mapper = sample_mapper();
    let tree = document.tree_mut();

    let unit = mapper.map(tree, &sample_course_unit())?;
    tree.add_child(root, unit)?;

    let curso = tree.append_child(root, "curso")?;
    tree.element_mut(curso)?
        .add_attribute("value", "Mestrado em Engenharia Informática");
    tree.append_child(curso, "curso2")?;
    tree.append_child(curso, "curso3")?;

    for entry in PLAN {
        let fuc = tree.append_child(root, "fuc")?;
        tree.element_mut(fuc)?.add_attribute("codigo", entry.codigo.trim());

        let nome = tree.append_child(fuc, "nome")?;
        tree.element_mut(nome)?.add_attribute("value", entry.nome.trim());
        let ects = tree.append_child(fuc, "ects")?;
        tree.element_mut(ects)?.add_attribute("value", entry.ects.trim());

        let avaliacao = tree.append_child(fuc, "avaliacao")?;
        for (nome, peso) in entry.componentes {
            let componente = tree.append_child(avaliacao, "componente")?;
            tree.element_mut(componente)?
                .add_attributes([("nome", nome.trim()), ("peso", peso.trim())]);
        }
    }

    Ok(document)
}

/// The sample's global edits, in order.
#[instrument(level = "debug", skip(document))]
pub fn apply_sample_edits(document: &mut Document) -> DomainResult<()> {
    document.add_global_attribute("funcionario", "attributeName", "attributeValue");
    document.rename_global_entity("fuc", "funcionario")?;
    document.rename_global_attribute("curso", "value", "descricao");
    document.rename_global_attribute("funcionario", "codigo", "code");
    document.remove_global_entity("avaliacao");
    document.remove_global_attribute("ects", "value");
    Ok(())
}
