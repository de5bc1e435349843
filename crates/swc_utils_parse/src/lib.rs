use swc_common::comments::Comments;
use swc_common::errors::Handler;
use swc_common::sync::Lrc;
use swc_common::{FileName, SourceFile, SourceMap};
use swc_ecma_ast::Module;
use swc_ecma_parser::{lexer::Lexer, StringInput, Syntax};
use swc_ecma_parser::{Capturing, Parser, TsSyntax};

pub fn create_lexer<'a>(fm: &'a SourceFile, comments: Option<&'a dyn Comments>) -> Lexer<'a> {
    let filename = fm.name.to_string();
    let lexer = Lexer::new(
        Syntax::Typescript(TsSyntax {
            tsx: filename.ends_with(".tsx") || filename.ends_with(".jsx"),
            decorators: true,
            ..Default::default()
        }),
        Default::default(),
        StringInput::from(fm),
        comments,
    );
    lexer
}

pub fn parse_ecma_src<TName, TBody>(name_str: TName, body: TBody) -> (Lrc<SourceMap>, Module)
where
    TName: Into<String>,
    TBody: ToString,
{
    parse_ecma_src_comments(name_str, body, None)
}

/// Like [`parse_ecma_src`], but returns the parsed `SourceFile` instead of
/// the whole `SourceMap` — the shape most callers that need span-to-text
/// slicing (e.g. the require scanner) actually want.
pub fn parse_ecma_src_with_file<TName, TBody>(name_str: TName, body: TBody) -> (Lrc<SourceFile>, Module)
where
    TName: Into<String>,
    TBody: ToString,
{
    let cm = Lrc::<SourceMap>::default();
    let fname: Lrc<FileName> = Lrc::new(FileName::Custom(name_str.into()));
    let fm = cm.new_source_file(fname, body.to_string());

    let lexer: Lexer<'_> = create_lexer(&fm, None);
    let capturing = Capturing::new(lexer);
    let mut parser: Parser<Capturing<Lexer<'_>>> = Parser::new_from(capturing);
    let module = parser.parse_typescript_module().unwrap();

    (fm, module)
}

/// Like [`parse_ecma_src_with_file`], but reports lexer/parser diagnostics
/// as strings instead of panicking — the shape a caller that must keep
/// running past one bad file (rather than a test asserting on good input)
/// actually needs.
pub fn try_parse_ecma_src_with_file<TName, TBody>(
    name_str: TName,
    body: TBody,
) -> Result<(Lrc<SourceFile>, Module), Vec<String>>
where
    TName: Into<String>,
    TBody: ToString,
{
    let cm = Lrc::<SourceMap>::default();
    let fname: Lrc<FileName> = Lrc::new(FileName::Custom(name_str.into()));
    let fm = cm.new_source_file(fname, body.to_string());
    let handler = Handler::with_emitter_writer(Box::new(Vec::new()), Some(cm.clone()));

    let lexer: Lexer<'_> = create_lexer(&fm, None);
    let capturing = Capturing::new(lexer);
    let mut parser: Parser<Capturing<Lexer<'_>>> = Parser::new_from(capturing);

    let lexer_errors = parser.take_errors();
    if !lexer_errors.is_empty() {
        return Err(lexer_errors
            .into_iter()
            .map(|error| {
                let mut diagnostic = error.into_diagnostic(&handler);
                let message = diagnostic.message();
                diagnostic.cancel();
                message
            })
            .collect());
    }

    match parser.parse_typescript_module() {
        Ok(module) => Ok((fm, module)),
        Err(error) => {
            let mut diagnostic = error.into_diagnostic(&handler);
            let message = diagnostic.message();
            diagnostic.cancel();
            Err(vec![message])
        }
    }
}

pub fn parse_ecma_src_comments<TName, TBody>(
    name_str: TName,
    body: TBody,
    comments: Option<&dyn Comments>,
) -> (Lrc<SourceMap>, Module)
where
    TName: Into<String>,
    TBody: ToString,
{
    let cm = Lrc::<SourceMap>::default();
    let fname: Lrc<FileName> = Lrc::new(FileName::Custom(name_str.into()));
    let fm = cm.new_source_file(fname, body.to_string());

    let lexer: Lexer<'_> = create_lexer(&fm, comments);
    let capturing = Capturing::new(lexer);
    let mut parser: Parser<Capturing<Lexer<'_>>> = Parser::new_from(capturing);
    let module = parser.parse_typescript_module().unwrap();

    (cm, module)
}
