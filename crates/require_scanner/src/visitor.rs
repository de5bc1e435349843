use ahashmap::AHashMap;
use swc_common::{SourceFile, Spanned};
use swc_ecma_ast::{CallExpr, Callee, Lit};
use swc_ecma_visit::{Visit, VisitWith};

/// A single textual occurrence of a `require(...)` call: the source of
/// the entire call expression, plus its half-open byte offsets relative
/// to the start of the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub source: String,
    pub start: usize,
    pub end: usize,
}

/// One distinct import site discovered by the scanner, folded by exact
/// textual path equality across however many call sites share it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDescriptor {
    pub path: String,
    pub is_static: bool,
    pub references: Vec<Reference>,
}

/// Walks every call expression in scope of the file (including those
/// nested in function expressions — this scanner performs no scope
/// analysis) and folds `require(<single arg>)` sites into descriptors in
/// first-sighting order.
pub struct RequireVisitor<'a> {
    file: &'a SourceFile,
    order: Vec<ImportDescriptor>,
    index_of: AHashMap<String, usize>,
}

impl<'a> RequireVisitor<'a> {
    pub fn new(file: &'a SourceFile) -> Self {
        Self {
            file,
            order: Vec::new(),
            index_of: AHashMap::default(),
        }
    }

    pub fn into_descriptors(self) -> Vec<ImportDescriptor> {
        self.order
    }

    fn span_text(&self, span: swc_common::Span) -> (String, usize, usize) {
        let start = (span.lo.0 - self.file.start_pos.0) as usize;
        let end = (span.hi.0 - self.file.start_pos.0) as usize;
        (self.file.src[start..end].to_owned(), start, end)
    }

    fn record(&mut self, path: String, is_static: bool, reference: Reference) {
        if let Some(&idx) = self.index_of.get(&path) {
            self.order[idx].references.push(reference);
            return;
        }
        let idx = self.order.len();
        self.index_of.insert(path.clone(), idx);
        self.order.push(ImportDescriptor {
            path,
            is_static,
            references: vec![reference],
        });
    }
}

impl<'a> Visit for RequireVisitor<'a> {
    fn visit_call_expr(&mut self, expr: &CallExpr) {
        expr.visit_children_with(self);

        if let Callee::Expr(callee) = &expr.callee {
            if let Some(ident) = callee.as_ident() {
                if ident.sym == "require" && expr.args.len() == 1 {
                    let arg = &expr.args[0];
                    let (call_source, start, end) = self.span_text(expr.span);
                    let reference = Reference {
                        source: call_source,
                        start,
                        end,
                    };

                    let (raw, _, _) = self.span_text(arg.expr.span());
                    if matches!(arg.expr.as_lit(), Some(Lit::Str(_))) {
                        // Stored path strips the surrounding quote characters from the
                        // raw source slice rather than using the decoded string value,
                        // so escape sequences stay exactly as written.
                        let stripped = raw[1..raw.len() - 1].to_string();
                        self.record(stripped, true, reference);
                    } else {
                        self.record(raw, false, reference);
                    }
                }
            }
        }
    }
}
