//! Builds [`CandidateType`]s from Rust source.
//!
//! Extraction runs in two passes over every file. The first pass finds
//! `#[value_object]` declarations along with every struct, enum and
//! `impl Error` in the project. The second pass, knowing the value object
//! names, collects their impls and construction sites wherever they appear.

pub mod attribute;
mod declarations;
mod usages;

pub use usages::VALIDATION_HOOK;

use crate::config::{ConfigError, Defaults};
use crate::context::FileContext;
use crate::conversions::Conversions;
use crate::model::{CandidateType, ConversionsSetting, ErrorTypeRef, RawConversions, Symbol, TypeRef};
use crate::types::Location;
use crate::utils::{last_segment, path_to_string, type_to_string};
use attribute::raw_conversions_from_str;
use declarations::{DeclarationVisitor, DeclaredType};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use syn::visit::Visit;
use syn::Type;
use tracing::debug;
use usages::{scoped_name, UsageVisitor, Usages};

/// Underlying type used when neither the attribute nor the configuration
/// names one.
pub const DEFAULT_UNDERLYING: &str = "i32";

const COLLECTIONS: &[&str] = &[
    "Vec",
    "VecDeque",
    "LinkedList",
    "HashMap",
    "HashSet",
    "BTreeMap",
    "BTreeSet",
    "BinaryHeap",
    "IndexMap",
    "IndexSet",
    "SmallVec",
];

/// Standard library error types accepted as `throws` without a local impl.
const STD_ERRORS: &[&str] = &[
    "io::Error",
    "std::io::Error",
    "fmt::Error",
    "std::fmt::Error",
    "ParseIntError",
    "ParseFloatError",
    "ParseBoolError",
    "ParseCharError",
    "TryFromIntError",
    "Utf8Error",
    "FromUtf8Error",
    "AddrParseError",
];

/// Errors raised while reading source files.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The file is not valid Rust.
    #[error("Failed to parse {}: {message}", path.display())]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
}

/// A source file and its syntax tree.
pub struct SourceFile {
    /// Path to the file.
    pub path: PathBuf,
    /// File contents.
    pub content: String,
    ast: syn::File,
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("path", &self.path)
            .field("items", &self.ast.items.len())
            .finish_non_exhaustive()
    }
}

impl SourceFile {
    /// Parses `content` as a Rust file.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Parse`] if `content` is not valid Rust.
    pub fn parse(path: impl Into<PathBuf>, content: impl Into<String>) -> Result<Self, ExtractError> {
        let path = path.into();
        let content = content.into();
        let ast = syn::parse_file(&content).map_err(|e| ExtractError::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        Ok(Self { path, content, ast })
    }

    /// The parsed syntax tree.
    #[must_use]
    pub fn ast(&self) -> &syn::File {
        &self.ast
    }
}

/// Turns parsed source files into candidates for the analyzer.
#[derive(Debug, Clone)]
pub struct Extractor {
    root: PathBuf,
    underlying: Type,
    conversions: Option<RawConversions>,
    throws: Option<Type>,
}

impl Extractor {
    /// Creates an extractor with the built-in defaults. Locations are made
    /// relative to `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            underlying: syn::parse_quote!(i32),
            conversions: None,
            throws: None,
        }
    }

    /// Applies project defaults for arguments `#[value_object]` leaves out.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDefault`] if a default is not a valid
    /// type or conversions value.
    pub fn with_defaults(mut self, defaults: &Defaults) -> Result<Self, ConfigError> {
        if let Some(underlying) = &defaults.underlying {
            self.underlying = parse_default_type("underlying", underlying)?;
        }

        if let Some(conversions) = &defaults.conversions {
            let raw = raw_conversions_from_str(conversions);
            if Conversions::resolve(&raw).is_none() {
                return Err(ConfigError::InvalidDefault {
                    key: "conversions",
                    message: format!("unknown conversions `{conversions}`"),
                });
            }
            self.conversions = Some(raw);
        }

        if let Some(throws) = &defaults.throws {
            self.throws = Some(parse_default_type("throws", throws)?);
        }

        Ok(self)
    }

    /// Extracts every value object declared in `files`.
    ///
    /// Candidates come out in file order, then declaration order.
    #[must_use]
    pub fn extract(&self, files: &[SourceFile]) -> Vec<CandidateType> {
        let mut declarations = Vec::new();
        let mut types: Vec<DeclaredType> = Vec::new();
        let mut error_impls: HashSet<String> = HashSet::new();

        for file in files {
            let ctx = FileContext::new(&file.path, &file.content, &self.root);
            let mut visitor = DeclarationVisitor::new(&ctx);
            visitor.visit_file(&file.ast);
            debug!(
                "{}: {} value object(s)",
                ctx.relative_path.display(),
                visitor.declarations.len()
            );
            declarations.extend(visitor.declarations);
            types.extend(visitor.types);
            error_impls.extend(visitor.error_impls);
        }

        let names: HashSet<String> = declarations.iter().map(|d| d.symbol.name.clone()).collect();
        let mut usages: HashMap<String, Usages> = HashMap::new();

        if !names.is_empty() {
            for file in files {
                let ctx = FileContext::new(&file.path, &file.content, &self.root);
                let shadowed = types
                    .iter()
                    .filter(|t| !t.value_object && t.file == ctx.relative_path && names.contains(&t.symbol.name))
                    .map(|t| scoped_name(&t.modules, &t.symbol.name))
                    .collect();
                let mut visitor = UsageVisitor::new(&ctx, &names).with_shadowed(shadowed);
                visitor.visit_file(&file.ast);
                for (name, found) in visitor.usages {
                    let entry = usages.entry(name).or_default();
                    entry.default_sites.extend(found.default_sites);
                    entry.direct_sites.extend(found.direct_sites);
                    entry.constructors.extend(found.constructors);
                    entry.hooks.extend(found.hooks);
                }
            }
        }

        let errors = ErrorEvidence {
            types: &types,
            impls: &error_impls,
        };

        declarations
            .into_iter()
            .map(|decl| {
                let name = decl.symbol.name.clone();

                let (underlying, underlying_at) = decl
                    .underlying
                    .unwrap_or_else(|| (self.underlying.clone(), Location::None));

                let conversions = decl.conversions.or_else(|| {
                    self.conversions.clone().map(|raw| ConversionsSetting {
                        raw,
                        location: Location::None,
                    })
                });

                let throws = decl
                    .throws
                    .or_else(|| self.throws.clone().map(|ty| (ty, Location::None)))
                    .map(|(ty, at)| errors.resolve(&ty, at));

                let mut candidate = CandidateType::new(decl.symbol);
                candidate.container = decl.container;
                candidate.config.underlying = Some(type_ref(&underlying, underlying_at, &name));
                candidate.config.conversions = conversions;
                candidate.config.throws = throws;
                candidate.instances = decl.instances;

                if let Some(found) = usages.get(&name) {
                    candidate.default_constructions.clone_from(&found.default_sites);
                    candidate.direct_constructions.clone_from(&found.direct_sites);
                    candidate.constructors.clone_from(&found.constructors);
                    candidate.validation_hooks.clone_from(&found.hooks);
                }

                candidate
            })
            .collect()
    }

    /// The root locations are made relative to.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn parse_default_type(key: &'static str, value: &str) -> Result<Type, ConfigError> {
    syn::parse_str(value).map_err(|e| ConfigError::InvalidDefault {
        key,
        message: e.to_string(),
    })
}

/// Describes `ty` as written for the value object `owner`.
fn type_ref(ty: &Type, location: Location, owner: &str) -> TypeRef {
    let name = match type_name(ty) {
        Some(n) if n == "Self" => owner.to_string(),
        Some(n) => n,
        None => type_to_string(ty),
    };

    let mut symbol = Symbol::new(name);
    if !location.is_none() {
        symbol = symbol.with_location(location);
    }

    let reference = TypeRef::new(symbol, type_to_string(ty));
    if is_collection(ty) {
        reference.collection()
    } else {
        reference
    }
}

fn type_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(p) if p.qself.is_none() => last_segment(&p.path),
        Type::Reference(r) => type_name(&r.elem),
        Type::Paren(p) => type_name(&p.elem),
        Type::Group(g) => type_name(&g.elem),
        _ => None,
    }
}

fn is_collection(ty: &Type) -> bool {
    match ty {
        Type::Array(_) | Type::Slice(_) => true,
        Type::Reference(r) => is_collection(&r.elem),
        Type::Paren(p) => is_collection(&p.elem),
        Type::Group(g) => is_collection(&g.elem),
        Type::Path(p) => last_segment(&p.path).is_some_and(|n| COLLECTIONS.contains(&n.as_str())),
        _ => false,
    }
}

/// What the first pass learned about error types.
struct ErrorEvidence<'a> {
    types: &'a [DeclaredType],
    impls: &'a HashSet<String>,
}

impl ErrorEvidence<'_> {
    /// Resolves a `throws` type. Well-known std errors pass, project types
    /// must derive or implement `Error`, anything else is an external type
    /// and is trusted.
    ///
    /// Project types point at their own declaration; std and external
    /// types point at the `throws` argument.
    fn resolve(&self, ty: &Type, use_site: Location) -> ErrorTypeRef {
        let name = type_name(ty).unwrap_or_else(|| type_to_string(ty));
        let use_site_symbol = || {
            let symbol = Symbol::new(&name);
            if use_site.is_none() {
                symbol
            } else {
                symbol.with_location(use_site.clone())
            }
        };

        let written = match ty {
            Type::Path(p) => path_to_string(&p.path),
            other => type_to_string(other),
        };
        let well_known = STD_ERRORS
            .iter()
            .any(|e| written == *e || written.ends_with(&format!("::{e}")));
        if well_known {
            return ErrorTypeRef {
                symbol: use_site_symbol(),
                implements_error: true,
            };
        }

        let local: Vec<&DeclaredType> = self.types.iter().filter(|t| t.symbol.name == name).collect();
        if local.is_empty() {
            return ErrorTypeRef {
                symbol: use_site_symbol(),
                implements_error: true,
            };
        }

        let mut symbol = Symbol::new(&name);
        for declared in &local {
            symbol.declaring_syntax.extend(declared.symbol.declaring_syntax.iter().cloned());
            symbol.locations.extend(declared.symbol.locations.iter().cloned());
        }
        ErrorTypeRef {
            symbol,
            implements_error: self.impls.contains(&name) || local.iter().any(|t| t.derives_error),
        }
    }
}

/// Extracts candidates from a single in-memory source.
///
/// # Errors
///
/// Returns [`ExtractError::Parse`] if `source` is not valid Rust.
pub fn extract_source(source: &str) -> Result<Vec<CandidateType>, ExtractError> {
    let file = SourceFile::parse("src/lib.rs", source)?;
    Ok(Extractor::new("").extract(std::slice::from_ref(&file)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(source: &str) -> CandidateType {
        let mut found = extract_source(source).expect("parses");
        assert_eq!(found.len(), 1, "expected one value object");
        found.remove(0)
    }

    #[test]
    fn applies_built_in_defaults() {
        let c = one("#[value_object] pub struct CustomerId;");
        let underlying = c.config.underlying.expect("defaulted");
        assert_eq!(underlying.symbol.name, DEFAULT_UNDERLYING);
        assert!(!underlying.is_collection);
        assert!(c.config.conversions.is_none());
        assert!(c.config.throws.is_none());
    }

    #[test]
    fn classifies_collections() {
        for ty in ["Vec<u8>", "&[u8]", "[i32; 4]", "std::collections::HashMap<String, u8>", "&'static Vec<u8>"] {
            let c = one(&format!("#[value_object(underlying = {ty})] struct Bag;"));
            assert!(
                c.config.underlying.expect("set").is_collection,
                "{ty} should be a collection"
            );
        }
        let c = one("#[value_object(underlying = String)] struct Name;");
        assert!(!c.config.underlying.expect("set").is_collection);
    }

    #[test]
    fn self_underlying_names_the_wrapper() {
        let c = one("#[value_object(underlying = Self)] struct Loop;");
        assert_eq!(c.config.underlying.expect("set").symbol.name, "Loop");
    }

    #[test]
    fn resolves_error_types() {
        let source = r#"
#[value_object(throws = IdError)]
struct A;
#[value_object(throws = Plain)]
struct B;
#[value_object(throws = std::num::ParseIntError)]
struct C;
#[value_object(throws = external::Failure)]
struct D;

#[derive(Debug, thiserror::Error)]
enum IdError {}
struct Plain;
"#;
        let found = extract_source(source).expect("parses");
        let implements: Vec<bool> = found
            .iter()
            .map(|c| c.config.throws.as_ref().expect("set").implements_error)
            .collect();
        assert_eq!(implements, vec![true, false, true, true]);
        assert!(!found[1].config.throws.as_ref().expect("set").symbol.locations.is_empty());
    }

    #[test]
    fn usages_cross_files() {
        let decl = SourceFile::parse(
            "src/id.rs",
            "#[value_object] pub struct CustomerId;\nimpl CustomerId { pub fn new() -> Self { todo!() } }",
        )
        .expect("parses");
        let user = SourceFile::parse(
            "src/main.rs",
            "fn main() { let a = CustomerId::default(); let b = CustomerId(1); }",
        )
        .expect("parses");

        let found = Extractor::new("").extract(&[decl, user]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].default_constructions.len(), 1);
        assert_eq!(found[0].direct_constructions.len(), 1);
        assert_eq!(found[0].constructors.len(), 1);
        let Location::Source(site) = &found[0].default_constructions[0] else {
            panic!("expected a source span");
        };
        assert_eq!(site.file, PathBuf::from("src/main.rs"));
    }

    #[test]
    fn defaults_from_configuration() {
        let defaults = Defaults {
            underlying: Some("u64".into()),
            conversions: Some("serde".into()),
            throws: Some("DomainError".into()),
        };
        let extractor = Extractor::new("").with_defaults(&defaults).expect("valid");
        let file = SourceFile::parse("src/lib.rs", "#[value_object] struct Id;").expect("parses");
        let c = extractor.extract(std::slice::from_ref(&file)).remove(0);
        assert_eq!(c.config.underlying.expect("set").symbol.name, "u64");
        assert_eq!(
            c.config.conversions.expect("set").raw,
            RawConversions::Names(vec!["serde".into()])
        );
        assert_eq!(c.config.throws.expect("set").symbol.name, "DomainError");
    }

    #[test]
    fn rejects_invalid_defaults() {
        let bad_type = Defaults {
            underlying: Some("Vec<".into()),
            ..Defaults::default()
        };
        assert!(matches!(
            Extractor::new("").with_defaults(&bad_type),
            Err(ConfigError::InvalidDefault { key: "underlying", .. })
        ));

        let bad_conversions = Defaults {
            conversions: Some("serde | yaml".into()),
            ..Defaults::default()
        };
        assert!(matches!(
            Extractor::new("").with_defaults(&bad_conversions),
            Err(ConfigError::InvalidDefault { key: "conversions", .. })
        ));
    }

    #[test]
    fn local_error_type_points_at_its_declaration() {
        let defaults = Defaults {
            throws: Some("BadId".into()),
            ..Defaults::default()
        };
        let extractor = Extractor::new("").with_defaults(&defaults).expect("valid");
        let source = "#[value_object]\nstruct Id;\n\n#[derive(Debug)]\npub struct BadId;\n";
        let file = SourceFile::parse("src/lib.rs", source).expect("parses");
        let throws = extractor
            .extract(std::slice::from_ref(&file))
            .remove(0)
            .config
            .throws
            .expect("set");
        assert!(!throws.implements_error);

        let Some(Location::Source(span)) = throws.symbol.preferred_locations().first().cloned() else {
            panic!("expected the declaration of BadId");
        };
        assert_eq!(span.line, 5);
        assert_eq!(&source[span.offset..span.offset + span.length], "pub struct BadId;");
    }

    #[test]
    fn same_name_in_another_module_is_not_charged_to_the_value_object() {
        let source = r#"
mod a {
    #[value_object]
    pub struct Id;
}
mod b {
    pub struct Id(u32);
    impl Id {
        pub fn new() -> Self { Id(0) }
    }
    fn f() -> Id { Id(1) }
}
"#;
        let c = one(source);
        assert_eq!(c.symbol.name, "Id");
        assert!(c.direct_constructions.is_empty());
        assert!(c.constructors.is_empty());
    }

    #[test]
    fn parse_failure_names_the_file() {
        let err = SourceFile::parse("src/broken.rs", "fn (").expect_err("invalid");
        assert!(err.to_string().contains("src/broken.rs"));
    }
}
