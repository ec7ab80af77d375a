//! First pass: value object declarations and the types they may refer to.

use super::attribute::{raw_conversions, InstanceArgs, ValueObjectArgs, INSTANCE_ATTR, VALUE_OBJECT_ATTR};
use crate::context::FileContext;
use crate::model::{ConversionsSetting, InstanceMetadata, Symbol};
use crate::types::Location;
use crate::utils::{find_attrs, has_attr, has_derive, last_segment, path_to_string};
use quote::ToTokens;
use std::path::PathBuf;
use syn::visit::Visit;
use syn::{
    Attribute, Ident, ImplItemFn, ItemEnum, ItemFn, ItemImpl, ItemMod, ItemStruct, ItemTrait, TraitItemFn, Type,
};
use tracing::warn;

/// A `#[value_object]` struct as written.
#[derive(Debug)]
pub(crate) struct Declaration {
    pub symbol: Symbol,
    pub container: Option<Symbol>,
    pub underlying: Option<(Type, Location)>,
    pub conversions: Option<ConversionsSetting>,
    pub throws: Option<(Type, Location)>,
    pub instances: Vec<InstanceMetadata>,
}

/// Any struct or enum, for resolving `throws` and name shadowing.
#[derive(Debug)]
pub(crate) struct DeclaredType {
    pub symbol: Symbol,
    pub derives_error: bool,
    pub value_object: bool,
    /// File the type is declared in, relative to the root.
    pub file: PathBuf,
    /// Inline `mod` blocks enclosing the type within its file.
    pub modules: Vec<String>,
}

pub(crate) struct DeclarationVisitor<'a> {
    ctx: &'a FileContext<'a>,
    containers: Vec<Symbol>,
    owners: Vec<String>,
    modules: Vec<String>,
    pub declarations: Vec<Declaration>,
    pub types: Vec<DeclaredType>,
    pub error_impls: Vec<String>,
}

impl<'a> DeclarationVisitor<'a> {
    pub fn new(ctx: &'a FileContext<'a>) -> Self {
        Self {
            ctx,
            containers: Vec::new(),
            owners: Vec::new(),
            modules: Vec::new(),
            declarations: Vec::new(),
            types: Vec::new(),
            error_impls: Vec::new(),
        }
    }

    fn enter_fn(&mut self, ident: &syn::Ident) {
        let name = match self.owners.last() {
            Some(owner) => format!("{owner}::{ident}"),
            None => ident.to_string(),
        };
        self.containers
            .push(Symbol::new(name).with_location(self.ctx.location(ident.span())));
    }

    fn declared_type<T: ToTokens>(&self, node: &T, ident: &Ident, attrs: &[Attribute]) -> DeclaredType {
        DeclaredType {
            symbol: Symbol::new(ident.to_string())
                .with_declaration(self.ctx.declaration(node, attrs))
                .with_location(self.ctx.location(ident.span())),
            derives_error: has_derive(attrs, "Error"),
            value_object: has_attr(attrs, VALUE_OBJECT_ATTR),
            file: self.ctx.relative_path.clone(),
            modules: self.modules.clone(),
        }
    }

    fn declaration(&self, node: &ItemStruct) -> Declaration {
        let name = node.ident.to_string();
        let symbol = Symbol::new(&name)
            .with_declaration(self.ctx.declaration(node, &node.attrs))
            .with_location(self.ctx.location(node.ident.span()));

        let mut args = ValueObjectArgs::default();
        for attr in find_attrs(&node.attrs, VALUE_OBJECT_ATTR) {
            match ValueObjectArgs::parse(attr) {
                Ok(parsed) => args = parsed,
                Err(e) => warn!(
                    "{}: malformed #[value_object] on {name}: {e}",
                    self.ctx.relative_path.display()
                ),
            }
        }

        let instances = find_attrs(&node.attrs, INSTANCE_ATTR)
            .filter_map(|attr| match InstanceArgs::parse(attr) {
                Ok(parsed) => Some(InstanceMetadata {
                    name: parsed.name,
                    value: parsed.value,
                    location: self.ctx.node(attr),
                }),
                Err(e) => {
                    warn!(
                        "{}: malformed #[instance] on {name}: {e}",
                        self.ctx.relative_path.display()
                    );
                    None
                }
            })
            .collect();

        Declaration {
            symbol,
            container: self.containers.last().cloned(),
            underlying: args.underlying.map(|ty| {
                let location = self.ctx.node(&ty);
                (ty, location)
            }),
            conversions: args.conversions.map(|expr| ConversionsSetting {
                raw: raw_conversions(&expr),
                location: self.ctx.node(&expr),
            }),
            throws: args.throws.map(|ty| {
                let location = self.ctx.node(&ty);
                (ty, location)
            }),
            instances,
        }
    }
}

/// `impl Error for X`, `impl std::error::Error for X`, `impl core::error::Error for X`.
fn is_error_trait(path: &syn::Path) -> bool {
    matches!(
        path_to_string(path).as_str(),
        "Error" | "std::error::Error" | "core::error::Error" | "error::Error"
    )
}

fn self_type_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(p) if p.qself.is_none() => last_segment(&p.path),
        _ => None,
    }
}

impl<'ast> Visit<'ast> for DeclarationVisitor<'_> {
    fn visit_item_fn(&mut self, node: &'ast ItemFn) {
        self.enter_fn(&node.sig.ident);
        syn::visit::visit_item_fn(self, node);
        self.containers.pop();
    }

    fn visit_impl_item_fn(&mut self, node: &'ast ImplItemFn) {
        self.enter_fn(&node.sig.ident);
        syn::visit::visit_impl_item_fn(self, node);
        self.containers.pop();
    }

    fn visit_trait_item_fn(&mut self, node: &'ast TraitItemFn) {
        self.enter_fn(&node.sig.ident);
        syn::visit::visit_trait_item_fn(self, node);
        self.containers.pop();
    }

    fn visit_item_impl(&mut self, node: &'ast ItemImpl) {
        let owner = self_type_name(&node.self_ty);

        if let (Some((None, trait_path, _)), Some(name)) = (&node.trait_, &owner) {
            if is_error_trait(trait_path) {
                self.error_impls.push(name.clone());
            }
        }

        self.owners.push(owner.unwrap_or_else(|| "_".to_string()));
        syn::visit::visit_item_impl(self, node);
        self.owners.pop();
    }

    fn visit_item_trait(&mut self, node: &'ast ItemTrait) {
        self.owners.push(node.ident.to_string());
        syn::visit::visit_item_trait(self, node);
        self.owners.pop();
    }

    fn visit_item_mod(&mut self, node: &'ast ItemMod) {
        self.modules.push(node.ident.to_string());
        syn::visit::visit_item_mod(self, node);
        self.modules.pop();
    }

    fn visit_item_struct(&mut self, node: &'ast ItemStruct) {
        let declared = self.declared_type(node, &node.ident, &node.attrs);
        if declared.value_object {
            let declaration = self.declaration(node);
            self.declarations.push(declaration);
        }
        self.types.push(declared);

        syn::visit::visit_item_struct(self, node);
    }

    fn visit_item_enum(&mut self, node: &'ast ItemEnum) {
        let declared = self.declared_type(node, &node.ident, &node.attrs);
        self.types.push(declared);

        syn::visit::visit_item_enum(self, node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn visit(source: &str) -> (Vec<Declaration>, Vec<DeclaredType>, Vec<String>) {
        let ast = syn::parse_file(source).expect("parses");
        let ctx = FileContext {
            path: Path::new("src/lib.rs"),
            content: source,
            relative_path: PathBuf::from("src/lib.rs"),
        };
        let mut visitor = DeclarationVisitor::new(&ctx);
        visitor.visit_file(&ast);
        (visitor.declarations, visitor.types, visitor.error_impls)
    }

    #[test]
    fn finds_top_level_value_object() {
        let (decls, _, _) = visit(
            r#"
#[value_object(underlying = u32)]
pub struct CustomerId;
"#,
        );
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].symbol.name, "CustomerId");
        assert!(decls[0].container.is_none());
        assert!(decls[0].underlying.is_some());
    }

    #[test]
    fn records_enclosing_function() {
        let (decls, _, _) = visit(
            r#"
fn build() {
    #[value_object]
    struct Inner;
}
"#,
        );
        assert_eq!(decls.len(), 1);
        assert_eq!(
            decls[0].container.as_ref().map(|c| c.name.as_str()),
            Some("build")
        );
    }

    #[test]
    fn method_container_is_qualified() {
        let (decls, _, _) = visit(
            r#"
struct Order;
impl Order {
    fn create(&self) {
        #[value_object]
        struct LineId;
    }
}
"#,
        );
        assert_eq!(
            decls[0].container.as_ref().map(|c| c.name.as_str()),
            Some("Order::create")
        );
    }

    #[test]
    fn module_is_not_a_container() {
        let (decls, _, _) = visit(
            r#"
mod ids {
    #[value_object]
    pub struct CustomerId;
}
"#,
        );
        assert!(decls[0].container.is_none());
    }

    #[test]
    fn collects_error_evidence() {
        let (_, types, impls) = visit(
            r#"
#[derive(Debug, thiserror::Error)]
enum IdError {}
struct Plain;
struct Manual;
impl std::error::Error for Manual {}
"#,
        );
        assert!(types.iter().any(|t| t.symbol.name == "IdError" && t.derives_error));
        assert!(types.iter().any(|t| t.symbol.name == "Plain" && !t.derives_error));
        assert_eq!(impls, vec!["Manual".to_string()]);
    }

    #[test]
    fn records_enclosing_modules() {
        let (_, types, _) = visit(
            r#"
mod a {
    #[value_object]
    pub struct Id;
}
mod b {
    mod inner {
        pub struct Id(u32);
    }
}
"#,
        );
        let scopes: Vec<(bool, Vec<&str>)> = types
            .iter()
            .map(|t| (t.value_object, t.modules.iter().map(String::as_str).collect()))
            .collect();
        assert_eq!(scopes, vec![(true, vec!["a"]), (false, vec!["b", "inner"])]);
        assert!(types.iter().all(|t| t.file == PathBuf::from("src/lib.rs")));
    }

    #[test]
    fn collects_instances() {
        let (decls, _, _) = visit(
            r#"
#[value_object(underlying = i32)]
#[instance(name = "Unspecified", value = -1)]
#[instance(value = 0)]
pub struct Age;
"#,
        );
        let instances = &decls[0].instances;
        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].name.as_deref(), Some("Unspecified"));
        assert_eq!(instances[1].name, None);
        assert!(!instances[1].location.is_none());
    }
}
