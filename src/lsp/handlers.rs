use tower_lsp::jsonrpc::Result as LspResult;
use tower_lsp::lsp_types::*;
use tower_lsp::Client;

use crate::lsp::backend::{Backend, Documents};
use crate::lsp::document::DocumentState;
use crate::rules::RuleBook;
use crate::validation::{
    validate_content, validate_content_field, validate_identifier, DiagnosticKind, Severity,
    ValidationOutcome,
};

const SOURCE: &str = "kahani-ls";

/// Trait for handling hover requests
#[tower_lsp::async_trait]
pub trait HandleHover {
    async fn handle_hover(&self, params: HoverParams) -> LspResult<Option<Hover>>;
}

/// Trait for handling document symbols
#[tower_lsp::async_trait]
pub trait HandleDocumentSymbol {
    async fn handle_document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> LspResult<Option<DocumentSymbolResponse>>;
}

/// Trait for handling diagnostics
#[tower_lsp::async_trait]
pub trait HandleDiagnostics {
    async fn publish_diagnostics(&self, uri: Url);
}

#[tower_lsp::async_trait]
impl HandleHover for Backend {
    async fn handle_hover(&self, params: HoverParams) -> LspResult<Option<Hover>> {
        let tdpp = params.text_document_position_params;
        let uri = tdpp.text_document.uri;
        let line = tdpp.position.line as usize;

        let docs = self.documents.lock().await;
        let doc_state = match docs.get(&uri) {
            Some(state) => state,
            None => return Ok(None),
        };

        Ok(paragraph_hover(doc_state, &self.rules, line))
    }
}

#[tower_lsp::async_trait]
impl HandleDocumentSymbol for Backend {
    async fn handle_document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> LspResult<Option<DocumentSymbolResponse>> {
        let uri = params.text_document.uri;

        let docs = self.documents.lock().await;
        let doc_state = match docs.get(&uri) {
            Some(state) => state,
            None => return Ok(None),
        };

        Ok(Some(DocumentSymbolResponse::Nested(paragraph_symbols(
            doc_state,
            &self.rules,
        ))))
    }
}

#[tower_lsp::async_trait]
impl HandleDiagnostics for Backend {
    async fn publish_diagnostics(&self, uri: Url) {
        publish_document_diagnostics(&self.client, &self.documents, &self.rules, uri).await;
    }
}

/// Validate the stored document and publish the result.
///
/// Shared by the backend and the debounce task, which only owns clones.
pub async fn publish_document_diagnostics(
    client: &Client,
    documents: &Documents,
    rules: &RuleBook,
    uri: Url,
) {
    let docs = documents.lock().await;
    let diagnostics = match docs.get(&uri) {
        Some(doc_state) => lsp_diagnostics(doc_state, rules),
        // closed while a re-validation was pending
        None => return,
    };
    drop(docs);

    log::debug!("Publishing {} diagnostics for {}", diagnostics.len(), uri);
    client.publish_diagnostics(uri, diagnostics, None).await;
}

/// All diagnostics for one document: field outcomes first, then paragraphs
pub fn lsp_diagnostics(doc_state: &DocumentState, rules: &RuleBook) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let identifier = validate_identifier(&doc_state.story_id, &rules.identifier);
    if let ValidationOutcome::Invalid(violation) = identifier {
        diagnostics.push(create_lsp_diagnostic(
            doc_state,
            0,
            DiagnosticSeverity::ERROR,
            format!("identifier.{}", violation.kind),
            format!("Story ID: {}", violation.message),
        ));
    }

    let field = validate_content_field(&doc_state.content, &rules.content);
    if let ValidationOutcome::Invalid(violation) = field {
        diagnostics.push(create_lsp_diagnostic(
            doc_state,
            0,
            DiagnosticSeverity::ERROR,
            format!("content.{}", violation.kind),
            violation.message,
        ));
    }

    let stats = validate_content(&doc_state.content, rules);
    for diagnostic in stats.diagnostics {
        let severity = match diagnostic.severity {
            Severity::Error => DiagnosticSeverity::ERROR,
            Severity::Warning => DiagnosticSeverity::WARNING,
            Severity::Info => DiagnosticSeverity::INFORMATION,
        };
        let code = match diagnostic.kind {
            DiagnosticKind::InvalidCharacters => "paragraph.invalid_characters",
            DiagnosticKind::ParagraphTooLong => "paragraph.too_long",
            DiagnosticKind::NoParagraphs => "content.no_paragraphs",
        };
        diagnostics.push(create_lsp_diagnostic(
            doc_state,
            diagnostic.line,
            severity,
            code.to_string(),
            diagnostic.message,
        ));
    }

    diagnostics
}

fn create_lsp_diagnostic(
    doc_state: &DocumentState,
    line: usize,
    severity: DiagnosticSeverity,
    code: String,
    message: String,
) -> Diagnostic {
    Diagnostic::new(
        line_range(doc_state, line),
        Some(severity),
        Some(NumberOrString::String(code)),
        Some(SOURCE.to_string()),
        message,
        None,
        None,
    )
}

fn line_range(doc_state: &DocumentState, line: usize) -> Range {
    Range::new(
        Position::new(line as u32, 0),
        Position::new(line as u32, doc_state.line_len_utf16(line)),
    )
}

/// Word count of the paragraph under the cursor
pub fn paragraph_hover(
    doc_state: &DocumentState,
    rules: &RuleBook,
    line: usize,
) -> Option<Hover> {
    let stats = validate_content(&doc_state.content, rules);
    let paragraph = stats.paragraph_at_line(line)?;

    let mut hover_text = format!(
        "**Paragraph {}**\n\n{} / {} words",
        paragraph.number, paragraph.word_count, rules.max_paragraph_words
    );
    hover_text.push_str(&format!(
        "\n\nStory: {} characters",
        rules.content.counter(&doc_state.content)
    ));
    let issues: Vec<&str> = stats
        .diagnostics
        .iter()
        .filter(|d| d.paragraph == Some(paragraph.number))
        .map(|d| d.message.as_str())
        .collect();
    for issue in issues {
        hover_text.push_str(&format!("\n- {}", issue));
    }

    Some(Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value: hover_text,
        }),
        range: Some(line_range(doc_state, line)),
    })
}

/// One symbol per paragraph
pub fn paragraph_symbols(doc_state: &DocumentState, rules: &RuleBook) -> Vec<DocumentSymbol> {
    let stats = validate_content(&doc_state.content, rules);

    stats
        .paragraphs
        .iter()
        .map(|paragraph| {
            let range = line_range(doc_state, paragraph.line);
            DocumentSymbol {
                name: format!("Paragraph {}", paragraph.number),
                detail: Some(format!("{} words", paragraph.word_count)),
                kind: SymbolKind::STRING,
                tags: None,
                #[allow(deprecated)]
                deprecated: Some(false), // still a required field in lsp-types 0.94
                range,
                selection_range: range,
                children: None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(name: &str, content: &str) -> DocumentState {
        let uri = Url::from_file_path(format!("/stories/{}", name)).unwrap();
        DocumentState::new(&uri, content.to_string())
    }

    fn code_of(diagnostic: &Diagnostic) -> &str {
        match &diagnostic.code {
            Some(NumberOrString::String(code)) => code,
            _ => "",
        }
    }

    #[test]
    fn test_clean_document_has_no_diagnostics() {
        let doc = document("किसान.txt", "एक गाँव में एक किसान रहता था।\n\nवह मेहनती था।");
        assert!(lsp_diagnostics(&doc, &RuleBook::hindi_story()).is_empty());
    }

    #[test]
    fn test_identifier_from_file_name() {
        let doc = document("story-1.txt", "एक गाँव में एक किसान रहता था।");
        let diagnostics = lsp_diagnostics(&doc, &RuleBook::hindi_story());

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(code_of(&diagnostics[0]), "identifier.invalid_character");
        assert_eq!(diagnostics[0].message, "Story ID: Invalid character \"s\" in Story ID");
        assert_eq!(diagnostics[0].source.as_deref(), Some("kahani-ls"));
    }

    #[test]
    fn test_paragraph_diagnostics_on_their_line() {
        let doc = document("कथा.txt", "पहला अनुच्छेद ठीक है\n\ndusra galat hai");
        let diagnostics = lsp_diagnostics(&doc, &RuleBook::hindi_story());

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(code_of(&diagnostics[0]), "paragraph.invalid_characters");
        assert_eq!(diagnostics[0].range.start.line, 2);
        assert_eq!(diagnostics[0].range.end.character, 15);
        assert_eq!(diagnostics[0].severity, Some(DiagnosticSeverity::ERROR));
    }

    #[test]
    fn test_empty_document() {
        let doc = document("कथा.txt", "");
        let codes: Vec<String> = lsp_diagnostics(&doc, &RuleBook::hindi_story())
            .iter()
            .map(|d| code_of(d).to_string())
            .collect();
        assert_eq!(codes, vec!["content.required", "content.no_paragraphs"]);
    }

    #[test]
    fn test_hover_on_paragraph() {
        let doc = document("कथा.txt", "पहला अनुच्छेद\n\nदूसरा x");
        let rules = RuleBook::hindi_story();

        let hover = paragraph_hover(&doc, &rules, 2).expect("hover");
        let HoverContents::Markup(markup) = hover.contents else {
            panic!("Expected markup hover");
        };
        assert!(markup.value.starts_with("**Paragraph 2**\n\n2 / 70 words"));
        assert!(markup.value.contains("Story: 22/5000 characters"));
        assert!(markup.value.contains("Paragraph 2 has invalid characters: x"));

        assert!(paragraph_hover(&doc, &rules, 1).is_none());
    }

    #[test]
    fn test_paragraph_symbols() {
        let doc = document("कथा.txt", "एक दो तीन\n\n\nचार");
        let symbols = paragraph_symbols(&doc, &RuleBook::hindi_story());

        assert_eq!(symbols.len(), 2);
        assert_eq!(symbols[0].name, "Paragraph 1");
        assert_eq!(symbols[0].detail.as_deref(), Some("3 words"));
        assert_eq!(symbols[1].range.start.line, 3);
    }
}
