use swc_common::SourceFile;
use swc_ecma_ast::Module;
use swc_ecma_visit::VisitWith;

mod visitor;

pub use visitor::{ImportDescriptor, Reference};
use visitor::RequireVisitor;

/// Extracts every `require(<single arg>)` call site reachable from
/// `module`, folded into descriptors in first-sighting order.
///
/// `file` must be the `SourceFile` the module was parsed from — its
/// `start_pos` is what lets reference offsets be reported relative to
/// the start of the file rather than the parser's internal byte space.
pub fn scan(file: &SourceFile, module: &Module) -> Vec<ImportDescriptor> {
    let mut visitor = RequireVisitor::new(file);
    module.visit_with(&mut visitor);
    visitor.into_descriptors()
}
