//! Source transformation
//!
//! [`Transform`] is the seam between the loader and whatever turns typed
//! source into runnable JavaScript. The bundled [`StripTransform`] runs swc:
//! it erases type syntax, lowers `enum`, namespaces and parameter properties,
//! and optionally lowers module syntax to CommonJS.

mod compile;
mod error;

pub use error::{TransformError, TransformErrorKind};

use compile::Compilation;
use tracing::debug;
use tsmodule_config::{ExtensionOptions, ModuleFormat, Phase};

const TARGET: &str = Phase::Transform.target();

/// Everything a transform gets besides the text
#[derive(Debug, Clone, Copy)]
pub struct TransformRequest<'a> {
    /// Source identity used in diagnostics (the file URL)
    pub sourcefile: &'a str,
    /// Module format of the output
    pub format: ModuleFormat,
    /// Options configured for the file's extension
    pub options: &'a ExtensionOptions,
}

/// Turns source text into executable module code
pub trait Transform: Send + Sync {
    fn transform(&self, source: &str, request: &TransformRequest<'_>) -> Result<String, TransformError>;
}

impl<F> Transform for F
where
    F: Fn(&str, &TransformRequest<'_>) -> Result<String, TransformError> + Send + Sync,
{
    fn transform(&self, source: &str, request: &TransformRequest<'_>) -> Result<String, TransformError> {
        self(source, request)
    }
}

/// Built-in transform on top of swc
#[derive(Debug, Clone, Copy, Default)]
pub struct StripTransform;

impl StripTransform {
    pub fn new() -> Self {
        Self
    }
}

impl Transform for StripTransform {
    fn transform(&self, source: &str, request: &TransformRequest<'_>) -> Result<String, TransformError> {
        let loader = request.options.loader;
        debug!(
            target: TARGET,
            sourcefile = request.sourcefile,
            loader = ?loader,
            format = request.format.as_str(),
            es_target = ?request.options.target,
            sourcemap = request.options.sourcemap,
            "transforming"
        );
        Compilation::new(source, request).run()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use tsmodule_config::{Loader, Target};

    fn request<'a>(options: &'a ExtensionOptions) -> TransformRequest<'a> {
        TransformRequest {
            sourcefile: "file:///src/a.ts",
            format: options.format,
            options,
        }
    }

    fn strip(loader: Loader, source: &str) -> String {
        let options = ExtensionOptions::new(ModuleFormat::Esm, loader);
        StripTransform::new()
            .transform(source, &request(&options))
            .unwrap()
    }

    #[test]
    fn test_strip_transform() {
        assert_eq!(strip(Loader::Ts, "export const a: number = 1;"), "export const a = 1;\n");
    }

    #[test]
    fn test_non_null_before_assertion() {
        assert_eq!(strip(Loader::Ts, "let w = x! as Y;"), "let w = x;\n");
        assert_eq!(
            strip(Loader::Ts, "const q = m.get(k)! as number[];"),
            "const q = m.get(k);\n"
        );
        assert_eq!(strip(Loader::Ts, "let w = a.b! satisfies C;"), "let w = a.b;\n");
    }

    #[test]
    fn test_instantiation_expression() {
        assert_eq!(strip(Loader::Ts, "let h = f<T>;"), "let h = f;\n");
    }

    #[test]
    fn test_generic_jsx_tag() {
        let out = strip(Loader::Tsx, "const el = <A<string> v={1} />;");
        assert!(out.contains("<A v={1}"), "{out}");
        assert!(!out.contains("string"), "{out}");
    }

    #[test]
    fn test_type_only_import_is_dropped() {
        let out = strip(
            Loader::Ts,
            "import { Shape } from './shape';\nimport { area } from './area';\nexport const f = (s: Shape) => area(s);\n",
        );
        assert!(!out.contains("./shape"), "{out}");
        assert!(out.contains("./area"), "{out}");
    }

    #[test]
    fn test_enum_is_lowered() {
        let out = strip(Loader::Ts, "export enum Color { Red, Green }\n");
        assert!(out.contains(r#"Color[Color["Red"] = 0] = "Red""#), "{out}");
        assert!(!out.contains("enum"), "{out}");
    }

    #[test]
    fn test_commonjs_output() {
        let options = ExtensionOptions::new(ModuleFormat::Cjs, Loader::Ts);
        let out = StripTransform::new()
            .transform(
                "import { twice } from './util';\nexport const four: number = twice(2);\n",
                &request(&options),
            )
            .unwrap();
        assert!(out.contains("require("), "{out}");
        assert!(out.contains("./util"), "{out}");
        assert!(out.contains("exports"), "{out}");
        assert!(!out.contains("import "), "{out}");
        assert!(!out.contains("export "), "{out}");
    }

    #[test]
    fn test_inline_source_map() {
        let mut options = ExtensionOptions::new(ModuleFormat::Esm, Loader::Ts);
        options.sourcemap = true;
        options.target = Some(Target::Es2020);
        let out = StripTransform::new()
            .transform("export const a: number = 1;\n", &request(&options))
            .unwrap();
        let (code, encoded) = out
            .split_once("//# sourceMappingURL=data:application/json;base64,")
            .unwrap();
        assert_eq!(code, "export const a = 1;\n");

        let json = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim_end())
            .unwrap();
        let json = String::from_utf8(json).unwrap();
        assert!(json.contains("file:///src/a.ts"), "{json}");
        assert!(json.contains("sourcesContent"), "{json}");
    }

    #[test]
    fn test_no_source_map_by_default() {
        assert!(!strip(Loader::Ts, "const a = 1;").contains("sourceMappingURL"));
    }

    #[test]
    fn test_errors_are_located() {
        let options = ExtensionOptions::new(ModuleFormat::Esm, Loader::Ts);
        let err = StripTransform
            .transform("const a = 1;\nconst s = 'open", &request(&options))
            .unwrap_err();
        assert!(matches!(err.kind, TransformErrorKind::Syntax(_)));
        assert_eq!(err.sourcefile, "file:///src/a.ts");
        assert_eq!((err.line, err.column), (2, 11));
    }

    #[test]
    fn test_plain_script_keeps_jsx() {
        let out = strip(Loader::Jsx, "export const el = <div id=\"x\">hi</div>;\n");
        assert!(out.contains("<div id=\"x\">hi</div>"), "{out}");
    }

    #[test]
    fn test_closure_transform() {
        let upper = |source: &str, _: &TransformRequest<'_>| {
            Ok::<_, TransformError>(source.to_uppercase())
        };
        let options = ExtensionOptions::new(ModuleFormat::Esm, Loader::Js);
        assert_eq!(upper.transform("abc", &request(&options)).unwrap(), "ABC");
    }
}
