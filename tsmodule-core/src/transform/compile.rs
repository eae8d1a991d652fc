//! swc pipeline behind [`StripTransform`](super::StripTransform)
//!
//! parse → resolve scopes → strip types → (CommonJS) → helpers, hygiene,
//! parentheses → emit, with an optional inline source map.

use super::error::{TransformError, TransformErrorKind};
use super::TransformRequest;
use base64::Engine;
use std::fmt::Display;
use swc_common::comments::{Comments, SingleThreadedComments};
use swc_common::source_map::SourceMapGenConfig;
use swc_common::sync::Lrc;
use swc_common::{BytePos, FileName, Globals, LineCol, Mark, SourceFile, SourceMap, Spanned, GLOBALS};
use swc_ecma_ast::{EsVersion, Module, Program};
use swc_ecma_codegen::text_writer::JsWriter;
use swc_ecma_codegen::Emitter;
use swc_ecma_parser::error::Error as ParseError;
use swc_ecma_parser::{parse_file_as_module, EsSyntax, Syntax, TsSyntax};
use swc_ecma_transforms_base::fixer::fixer;
use swc_ecma_transforms_base::helpers::{inject_helpers, Helpers, HELPERS};
use swc_ecma_transforms_base::hygiene::hygiene;
use swc_ecma_transforms_base::resolver;
use swc_ecma_transforms_module::common_js::{common_js, FeatureFlag};
use swc_ecma_transforms_module::path::Resolver;
use swc_ecma_transforms_module::util::Config as ModuleConfig;
use swc_ecma_transforms_typescript::{tsx, typescript, Config as StripConfig, TsxConfig};
use tsmodule_config::{Loader, ModuleFormat, Target};

const SOURCE_MAP_PREFIX: &str = "//# sourceMappingURL=data:application/json;base64,";

/// One source file on its way through swc
pub(super) struct Compilation<'a> {
    source: &'a str,
    request: &'a TransformRequest<'a>,
    cm: Lrc<SourceMap>,
    file: Lrc<SourceFile>,
    comments: SingleThreadedComments,
    target: EsVersion,
}

impl<'a> Compilation<'a> {
    pub fn new(source: &'a str, request: &'a TransformRequest<'a>) -> Self {
        let cm: Lrc<SourceMap> = Default::default();
        let file = cm.new_source_file(
            Lrc::new(FileName::Custom(request.sourcefile.to_string())),
            source.to_string(),
        );
        Self {
            source,
            request,
            cm,
            file,
            comments: SingleThreadedComments::default(),
            target: es_version(request.options.target),
        }
    }

    pub fn run(self) -> Result<String, TransformError> {
        let module = self.parse()?;
        let program = self.lower(module);
        self.emit(&program)
    }

    /// Recoverable errors fail the file as well; the earliest one is reported
    fn parse(&self) -> Result<Module, TransformError> {
        let mut errors = Vec::new();
        let parsed = parse_file_as_module(
            &self.file,
            syntax(self.request.options.loader),
            self.target,
            Some(&self.comments as &dyn Comments),
            &mut errors,
        );
        match parsed {
            Ok(module) if errors.is_empty() => Ok(module),
            Ok(_) => {
                let first = errors.swap_remove(0);
                Err(self.syntax_error(first, errors))
            }
            Err(fatal) => Err(self.syntax_error(fatal, errors)),
        }
    }

    fn lower(&self, module: Module) -> Program {
        let loader = self.request.options.loader;
        GLOBALS.set(&Globals::default(), || {
            HELPERS.set(&Helpers::new(false), || {
                let unresolved_mark = Mark::new();
                let top_level_mark = Mark::new();
                let mut program = Program::Module(module);

                program.mutate(resolver(unresolved_mark, top_level_mark, loader.is_typed()));
                match loader {
                    Loader::Ts => program.mutate(typescript(
                        strip_config(),
                        unresolved_mark,
                        top_level_mark,
                    )),
                    // keeps the JSX pragma import alive
                    Loader::Tsx => program.mutate(tsx(
                        self.cm.clone(),
                        strip_config(),
                        TsxConfig::default(),
                        &self.comments,
                        unresolved_mark,
                        top_level_mark,
                    )),
                    Loader::Js | Loader::Jsx => {}
                }
                if self.request.format == ModuleFormat::Cjs {
                    program.mutate(common_js(
                        Resolver::Default,
                        unresolved_mark,
                        ModuleConfig::default(),
                        FeatureFlag {
                            support_block_scoping: true,
                            support_arrow: true,
                        },
                    ));
                }
                program.mutate((
                    inject_helpers(unresolved_mark),
                    hygiene(),
                    fixer(Some(&self.comments as &dyn Comments)),
                ));
                program
            })
        })
    }

    fn emit(&self, program: &Program) -> Result<String, TransformError> {
        let sourcemap = self.request.options.sourcemap;
        let mut buf = Vec::new();
        let mut mappings: Vec<(BytePos, LineCol)> = Vec::new();
        {
            let mut emitter = Emitter {
                cfg: swc_ecma_codegen::Config::default().with_target(self.target),
                cm: self.cm.clone(),
                comments: Some(&self.comments as &dyn Comments),
                wr: JsWriter::new(
                    self.cm.clone(),
                    "\n",
                    &mut buf,
                    sourcemap.then_some(&mut mappings),
                ),
            };
            emitter
                .emit_program(program)
                .map_err(|e| self.emit_error(e))?;
        }

        let mut code = String::from_utf8(buf).map_err(|e| self.emit_error(e))?;
        if sourcemap {
            self.append_source_map(&mut code, &mappings)?;
        }
        Ok(code)
    }

    fn append_source_map(
        &self,
        code: &mut String,
        mappings: &[(BytePos, LineCol)],
    ) -> Result<(), TransformError> {
        let map = self.cm.build_source_map(mappings, None, InlineSources);
        let mut json = Vec::new();
        map.to_writer(&mut json).map_err(|e| self.emit_error(e))?;

        if !code.is_empty() && !code.ends_with('\n') {
            code.push('\n');
        }
        code.push_str(SOURCE_MAP_PREFIX);
        code.push_str(&base64::engine::general_purpose::STANDARD.encode(json));
        code.push('\n');
        Ok(())
    }

    fn syntax_error(&self, first: ParseError, rest: Vec<ParseError>) -> TransformError {
        let earliest = rest.into_iter().fold(first, |earliest, error| {
            if error.span().lo < earliest.span().lo {
                error
            } else {
                earliest
            }
        });
        let offset = earliest.span().lo.0.saturating_sub(self.file.start_pos.0) as usize;
        TransformError::at(
            TransformErrorKind::Syntax(earliest.kind().msg().into_owned()),
            self.request.sourcefile,
            self.source,
            offset,
        )
    }

    fn emit_error(&self, error: impl Display) -> TransformError {
        TransformError::at(
            TransformErrorKind::Emit(error.to_string()),
            self.request.sourcefile,
            self.source,
            0,
        )
    }
}

/// Source map settings: sources named by URL, contents embedded
struct InlineSources;

impl SourceMapGenConfig for InlineSources {
    fn file_name_to_source(&self, f: &FileName) -> String {
        f.to_string()
    }

    fn inline_sources_content(&self, _: &FileName) -> bool {
        true
    }
}

fn syntax(loader: Loader) -> Syntax {
    match loader {
        Loader::Ts | Loader::Tsx => Syntax::Typescript(TsSyntax {
            tsx: loader.allows_jsx(),
            decorators: true,
            ..Default::default()
        }),
        Loader::Js | Loader::Jsx => Syntax::Es(EsSyntax {
            jsx: loader.allows_jsx(),
            decorators: true,
            ..Default::default()
        }),
    }
}

/// Unused imports are dropped; no `export {}` is added in their place
fn strip_config() -> StripConfig {
    StripConfig {
        no_empty_export: true,
        ..Default::default()
    }
}

fn es_version(target: Option<Target>) -> EsVersion {
    match target.unwrap_or_default() {
        Target::Es5 => EsVersion::Es5,
        Target::Es2015 => EsVersion::Es2015,
        Target::Es2016 => EsVersion::Es2016,
        Target::Es2017 => EsVersion::Es2017,
        Target::Es2018 => EsVersion::Es2018,
        Target::Es2019 => EsVersion::Es2019,
        Target::Es2020 => EsVersion::Es2020,
        Target::Es2021 => EsVersion::Es2021,
        Target::Es2022 => EsVersion::Es2022,
        Target::Es2023 => EsVersion::Es2023,
        Target::Es2024 => EsVersion::Es2024,
        Target::EsNext => EsVersion::EsNext,
    }
}
