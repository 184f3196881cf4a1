//! Integration tests for load_canvas() and the canvas pipeline.
//!
//! Uses a MockSource that returns a pre-built payload, so these tests run
//! without a network or a workbook on disk.

use std::collections::BTreeMap;

use tablero_core::error::TableroError;
use tablero_core::extraction::CanvasSource;
use tablero_core::layout::builtin::load_preset;
use tablero_core::model::{CanvasDocument, CanvasMeta, CanvasPayload, Grid};
use tablero_core::notes::AnnotationStore;
use tablero_core::suggest::{annotate, CanvasAnalysis, SuggestionService};
use tablero_core::{build_canvas, load_canvas};

const PENDING: &str = "Pendiente por definir.";

struct MockSource {
    payload: CanvasPayload,
}

impl CanvasSource for MockSource {
    fn fetch(&self, _sheet_id: &str) -> Result<CanvasPayload, TableroError> {
        Ok(self.payload.clone())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

struct MockService {
    suggestions: Vec<(&'static str, &'static str)>,
}

impl SuggestionService for MockService {
    fn analyze(&self, canvas: &CanvasDocument) -> Result<CanvasAnalysis, TableroError> {
        let mut analysis = CanvasAnalysis::default();
        analysis.executive_one_pager.title = Some(canvas.title.clone());
        for (key, text) in &self.suggestions {
            analysis
                .section_suggestions
                .insert(key.to_string(), text.to_string());
        }
        Ok(analysis)
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

fn grid(rows: &[&[&str]]) -> Grid {
    Grid::from_rows(rows.iter().map(|r| r.iter().copied()))
}

fn full_canvas_grid() -> Grid {
    grid(&[
        &["DIRECCIÓN:", "Av. Reforma 100, CDMX"],
        &["NECESIDAD", "DESCRIPCIÓN", "BENEFICIOS", "CLIENTE", "EQUIPO"],
        &["Cobro lento", "App de pagos", "", "Clientes tienda", "DIRECTOR DE PROYECTO:"],
        &["", "", "", "", "Laura Gómez"],
        &["", "", "", "", "Equipo de datos"],
        &["CAPACIDADES", "", "ALINEACIÓN ESTRATÉGICA", "KPIs", "", "ANÁLISIS DE IMPACTO"],
        &["Pasarela de pagos", "", "Omnicanal", "Adopción 40%", "", "Alto"],
        &["COSTO", "", "", "INGRESOS", "$2,000,000", ""],
        &["TI", "$1,000,000", "", "AHORROS: $500,000", "", ""],
        &["NEGOCIO", "", "", "", "", ""],
        &["TOTAL", "$1,000,000", "", "", "", ""],
    ])
}

fn meta() -> CanvasMeta {
    CanvasMeta {
        responsible_director: Some("Laura Gómez".into()),
        functional_lead: Some("Pedro Ruiz".into()),
        financial_ratio_display: Some("TIR 18% / VPN $3M".into()),
    }
}

// ---------------------------------------------------------------------------
// Full sheet through a source
// ---------------------------------------------------------------------------
#[test]
fn full_canvas_from_source() {
    let layout = load_preset("es").unwrap();
    let source = MockSource {
        payload: CanvasPayload {
            rows: full_canvas_grid(),
            meta: Some(meta()),
        },
    };

    let doc = load_canvas(&source, "Canvas_Pagos%20Digitales", &layout).unwrap();

    assert_eq!(doc.title, "Canvas Pagos Digitales");
    assert_eq!(doc.address, "Av. Reforma 100, CDMX");
    assert_eq!(doc.responsible_director, "Laura Gómez");
    assert_eq!(doc.financial_ratio_display, "TIR 18% / VPN $3M");

    assert_eq!(doc.top["NECESIDAD"], "Cobro lento");
    assert_eq!(doc.top["DESCRIPCIÓN"], "App de pagos");
    assert_eq!(doc.top["BENEFICIOS"], PENDING);
    assert_eq!(doc.top["CLIENTE"], "Clientes tienda");
    assert_eq!(
        doc.top["EQUIPO"],
        "Director de Proyecto: Laura Gómez\n\n\
         Gerente de Proyecto: Pendiente por definir.\n\n\
         Líder Funcional: Pedro Ruiz\n\n\
         Áreas de apoyo: Pendiente por definir.\n\n\
         Otros:\n\
         Laura Gómez\n\
         Equipo de datos"
    );

    assert_eq!(doc.mid["CAPACIDADES"], "Pasarela de pagos");
    assert_eq!(doc.mid["ALINEACIÓN ESTRATÉGICA"], "Omnicanal");
    assert_eq!(doc.mid["KPIs"], "Adopción 40%");
    assert_eq!(doc.mid["ANÁLISIS DE IMPACTO"], "Alto");

    let cost = doc.cost_table.as_ref().unwrap();
    assert_eq!(cost.title, "Costo");
    assert_eq!(cost.value("TI"), Some("$1,000,000"));
    assert_eq!(cost.value("NEGOCIO"), Some(PENDING));
    assert_eq!(cost.value("TOTAL"), Some("$1,000,000"));

    let finance = doc.finance_table.as_ref().unwrap();
    assert_eq!(finance.title, "Resumen financiero");
    assert_eq!(finance.value("INGRESOS"), Some("$2,000,000"));
    assert_eq!(finance.value("AHORROS"), Some("$500,000"));
    assert_eq!(finance.value("TOTAL"), Some(PENDING));
}

// ---------------------------------------------------------------------------
// Missing header rows
// ---------------------------------------------------------------------------
#[test]
fn no_top_header_leaves_top_empty() {
    let layout = load_preset("es").unwrap();
    let grid = grid(&[
        &["NECESIDAD", "DESCRIPCIÓN"],
        &["algo", "otra cosa"],
    ]);

    let doc = build_canvas(&grid, Some(&meta()), "x", &layout);

    assert!(doc.top.is_empty());
    assert!(doc.mid.is_empty());
    assert!(doc.cost_table.is_none());
    assert!(doc.finance_table.is_none());
    assert_eq!(doc.address, "");
}

#[test]
fn mid_header_alone_fills_every_mid_title() {
    let layout = load_preset("es").unwrap();
    let grid = grid(&[
        &["CAPACIDADES", "KPIs", "ANÁLISIS DE IMPACTO", "ALINEACION ESTRATEGICA"],
        &["Datos", "", "", ""],
    ]);

    let doc = build_canvas(&grid, None, "x", &layout);

    assert!(doc.top.is_empty());
    assert_eq!(doc.mid.len(), 4);
    assert_eq!(doc.mid["CAPACIDADES"], "Datos");
    assert_eq!(doc.mid["KPIs"], PENDING);
    assert!(doc.cost_table.is_none());
}

// ---------------------------------------------------------------------------
// Team merge from metadata only
// ---------------------------------------------------------------------------
#[test]
fn team_uses_metadata_when_column_is_empty() {
    let layout = load_preset("es").unwrap();
    let grid = grid(&[&["NECESIDAD", "DESCRIPCIÓN", "BENEFICIOS", "CLIENTE", "EQUIPO"]]);

    let doc = build_canvas(&grid, Some(&meta()), "x", &layout);

    assert_eq!(doc.top["NECESIDAD"], PENDING);
    assert_eq!(
        doc.top["EQUIPO"],
        "Director de Proyecto: Laura Gómez\n\n\
         Gerente de Proyecto: Pendiente por definir.\n\n\
         Líder Funcional: Pedro Ruiz\n\n\
         Áreas de apoyo: Pendiente por definir."
    );
}

// ---------------------------------------------------------------------------
// English layout
// ---------------------------------------------------------------------------
#[test]
fn english_layout_uses_its_own_vocabulary() {
    let layout = load_preset("en").unwrap();
    let grid = grid(&[
        &["ADDRESS: 1 Main St"],
        &["NEED", "DESCRIPTION", "BENEFITS", "CUSTOMER", "TEAM"],
        &["Slow checkout", "", "", "", "MANAGER: Ann"],
        &["CAPABILITIES", "STRATEGIC ALIGNMENT", "KPIS", "IMPACT ANALYSIS"],
        &["COST", "", "REVENUE: 10", ""],
        &["IT: 5", "", "", ""],
    ]);

    let doc = build_canvas(&grid, None, "initiative", &layout);

    assert_eq!(doc.address, "1 Main St");
    assert_eq!(doc.top["NEED"], "Slow checkout");
    assert_eq!(doc.top["DESCRIPTION"], "Pending definition.");
    assert!(doc.top["TEAM"].contains("Manager: Ann"));

    let cost = doc.cost_table.unwrap();
    assert_eq!(cost.value("IT"), Some("5"));
    assert_eq!(cost.value("BUSINESS"), Some("Pending definition."));
    assert_eq!(doc.finance_table.unwrap().value("REVENUE"), Some("10"));
    assert_eq!(doc.mid["CAPABILITIES"], "Pending definition.");
}

// ---------------------------------------------------------------------------
// Determinism and serialized shape
// ---------------------------------------------------------------------------
#[test]
fn assembly_is_deterministic() {
    let layout = load_preset("es").unwrap();
    let grid = full_canvas_grid();
    let meta = meta();

    let first = serde_json::to_string(&build_canvas(&grid, Some(&meta), "id", &layout)).unwrap();
    let second = serde_json::to_string(&build_canvas(&grid, Some(&meta), "id", &layout)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn document_serializes_camel_case() {
    let layout = load_preset("es").unwrap();
    let doc = build_canvas(&full_canvas_grid(), Some(&meta()), "id", &layout);
    let value = serde_json::to_value(&doc).unwrap();

    assert_eq!(value["responsibleDirector"], "Laura Gómez");
    assert_eq!(value["costTable"]["rows"][0]["label"], "TI");
    assert!(value["financeTable"].is_object());
}

// ---------------------------------------------------------------------------
// Error paths
// ---------------------------------------------------------------------------
#[test]
fn empty_payload_is_reported() {
    let layout = load_preset("es").unwrap();
    let source = MockSource {
        payload: CanvasPayload::default(),
    };

    let err = load_canvas(&source, "Canvas Vacío", &layout).unwrap_err();
    assert!(matches!(err, TableroError::EmptyCanvas(ref id) if id == "Canvas Vacío"));
}

#[test]
fn payload_json_through_pipeline() {
    let layout = load_preset("es").unwrap();
    let body = r#"{
        "rows": [
            ["NECESIDAD", "DESCRIPCIÓN", "BENEFICIOS", "CLIENTE", "EQUIPO", 3.5],
            ["Reducir filas", null, "", "Tiendas", "LIDER FUNCIONAL:"],
            null,
            ["", "", "", "", "Marta"]
        ],
        "meta": { "dirResponsable": "Laura" }
    }"#;
    let source = MockSource {
        payload: CanvasPayload::from_json(body.as_bytes()).unwrap(),
    };

    let doc = load_canvas(&source, "pagos", &layout).unwrap();
    assert_eq!(doc.top["NECESIDAD"], "Reducir filas");
    assert_eq!(doc.top["DESCRIPCIÓN"], PENDING);
    assert!(doc.top["EQUIPO"].starts_with("Director de Proyecto: Laura\n\n"));
    assert!(doc.top["EQUIPO"].contains("Líder Funcional: Marta"));
}

// ---------------------------------------------------------------------------
// Suggestions and notes stay outside the document
// ---------------------------------------------------------------------------
#[test]
fn notes_never_touch_the_document() {
    let layout = load_preset("es").unwrap();
    let doc = build_canvas(&full_canvas_grid(), Some(&meta()), "Canvas Pagos", &layout);
    let before = doc.clone();

    let service = MockService {
        suggestions: vec![("NECESIDAD", "Cuantificar el costo"), ("KPIs", "")],
    };
    let annotation = annotate(&doc, &service);
    assert!(annotation.error.is_none());

    let analysis = annotation.analysis.unwrap();
    assert_eq!(
        analysis.executive_one_pager.title.as_deref(),
        Some("Canvas Pagos")
    );

    let mut store = AnnotationStore::new();
    assert_eq!(store.add_all(&analysis), 1);
    assert_eq!(store.get("NECESIDAD"), Some("Cuantificar el costo"));
    assert_eq!(doc, before);

    let top_keys: BTreeMap<_, _> = doc.top.iter().collect();
    assert_eq!(top_keys.len(), 5);
}
