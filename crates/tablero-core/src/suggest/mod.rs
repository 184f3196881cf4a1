pub mod client;
pub mod types;

pub use client::{decode_envelope, HttpSuggestionClient};
pub use types::{
    CanvasAnalysis, Diagnostic, ExecutiveOnePager, KpiDefinition, Risk, TechnicalReport,
};

use serde::Serialize;

use crate::error::TableroError;
use crate::model::CanvasDocument;

/// Trait for services that review a canvas and propose improvements.
pub trait SuggestionService: Send + Sync {
    fn analyze(&self, canvas: &CanvasDocument) -> Result<CanvasAnalysis, TableroError>;

    fn backend_name(&self) -> &str;
}

/// Outcome of asking a service about a canvas, ready to display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Annotation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<CanvasAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Run the service and fold every failure into a message.
///
/// A soft `error` inside an otherwise valid analysis is surfaced as the
/// message and the analysis is kept.
pub fn annotate(canvas: &CanvasDocument, service: &dyn SuggestionService) -> Annotation {
    match service.analyze(canvas) {
        Ok(analysis) => {
            let error = analysis
                .error
                .clone()
                .filter(|e| !e.trim().is_empty());
            if let Some(e) = &error {
                tracing::warn!(backend = service.backend_name(), error = %e, "analysis returned with an error");
            }
            Annotation {
                analysis: Some(analysis),
                error,
            }
        }
        Err(e) => {
            tracing::warn!(backend = service.backend_name(), error = %e, "analysis failed");
            Annotation {
                analysis: None,
                error: Some(e.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    struct Fixed(Result<CanvasAnalysis, String>);

    impl SuggestionService for Fixed {
        fn analyze(&self, _canvas: &CanvasDocument) -> Result<CanvasAnalysis, TableroError> {
            self.0.clone().map_err(TableroError::Suggestion)
        }

        fn backend_name(&self) -> &str {
            "fixed"
        }
    }

    fn canvas() -> CanvasDocument {
        CanvasDocument {
            title: "Pagos".into(),
            address: String::new(),
            responsible_director: String::new(),
            functional_lead: String::new(),
            financial_ratio_display: String::new(),
            top: BTreeMap::new(),
            mid: BTreeMap::new(),
            cost_table: None,
            finance_table: None,
        }
    }

    #[test]
    fn test_success_has_no_error() {
        let mut analysis = CanvasAnalysis::default();
        analysis
            .section_suggestions
            .insert("KPIs".into(), "Definir meta".into());
        let annotation = annotate(&canvas(), &Fixed(Ok(analysis.clone())));
        assert_eq!(annotation.analysis, Some(analysis));
        assert_eq!(annotation.error, None);
    }

    #[test]
    fn test_service_failure_becomes_message() {
        let annotation = annotate(&canvas(), &Fixed(Err("timeout".into())));
        assert!(annotation.analysis.is_none());
        assert_eq!(
            annotation.error.as_deref(),
            Some("could not generate the analysis: timeout")
        );
    }

    #[test]
    fn test_soft_error_keeps_data() {
        let analysis = CanvasAnalysis {
            error: Some("respuesta parcial".into()),
            ..Default::default()
        };
        let annotation = annotate(&canvas(), &Fixed(Ok(analysis)));
        assert!(annotation.analysis.is_some());
        assert_eq!(annotation.error.as_deref(), Some("respuesta parcial"));
    }
}
