//! Second pass: impls and call sites of known value objects.

use crate::context::FileContext;
use crate::model::{Symbol, ValidationHook};
use crate::types::Location;
use crate::utils::last_segment;
use std::collections::{HashMap, HashSet};
use syn::visit::Visit;
use syn::{
    Expr, ExprCall, ExprPath, ExprStruct, GenericArgument, ImplItem, ImplItemFn, ItemImpl, ItemMod,
    Local, Pat, PathArguments, ReturnType, Type,
};

/// Name of the user validation hook.
pub const VALIDATION_HOOK: &str = "validate";

/// Everything found for one value object name.
#[derive(Debug, Default)]
pub(crate) struct Usages {
    pub default_sites: Vec<Location>,
    pub direct_sites: Vec<Location>,
    pub constructors: Vec<Symbol>,
    pub hooks: Vec<ValidationHook>,
}

pub(crate) struct UsageVisitor<'a> {
    ctx: &'a FileContext<'a>,
    names: &'a HashSet<String>,
    shadowed: HashSet<String>,
    modules: Vec<String>,
    impl_stack: Vec<Option<String>>,
    pub usages: HashMap<String, Usages>,
}

/// Key for a name declared inside the inline modules `modules`.
pub(crate) fn scoped_name(modules: &[String], name: &str) -> String {
    modules
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(name))
        .collect::<Vec<_>>()
        .join("::")
}

impl<'a> UsageVisitor<'a> {
    pub fn new(ctx: &'a FileContext<'a>, names: &'a HashSet<String>) -> Self {
        Self {
            ctx,
            names,
            shadowed: HashSet::new(),
            modules: Vec::new(),
            impl_stack: Vec::new(),
            usages: HashMap::new(),
        }
    }

    /// Names that, inside a given module of this file, refer to some other
    /// type declared there. Keys come from [`scoped_name`].
    #[must_use]
    pub fn with_shadowed(mut self, shadowed: HashSet<String>) -> Self {
        self.shadowed = shadowed;
        self
    }

    /// Whether `name` refers to a value object in the current module.
    fn is_value_object(&self, name: &str) -> bool {
        self.names.contains(name) && !self.shadowed.contains(&scoped_name(&self.modules, name))
    }

    fn entry(&mut self, name: &str) -> &mut Usages {
        self.usages.entry(name.to_string()).or_default()
    }

    /// The value object a type path names, if any. `Self` resolves through
    /// the enclosing impl. Paths with an uppercase segment before the last
    /// one (`Kind::CustomerId(..)`) name enum variants or associated items,
    /// not the type.
    fn resolve(&self, path: &syn::Path) -> Option<String> {
        let last = last_segment(path)?;
        if last == "Self" && path.segments.len() == 1 {
            return self.impl_stack.last().cloned().flatten();
        }
        let qualified_by_type = path
            .segments
            .iter()
            .rev()
            .skip(1)
            .any(|seg| seg.ident.to_string().starts_with(char::is_uppercase));
        (!qualified_by_type && self.is_value_object(&last)).then_some(last)
    }

    /// The value object whose `default` an `ExprPath` calls, if any.
    fn default_target(&self, func: &ExprPath) -> Option<String> {
        let path = &func.path;
        if last_segment(path).as_deref() != Some("default") {
            return None;
        }

        if let Some(qself) = &func.qself {
            let Type::Path(ty) = qself.ty.as_ref() else {
                return None;
            };
            return self.resolve(&ty.path);
        }

        if path.segments.len() < 2 {
            return None;
        }
        let mut owner = path.clone();
        owner.segments.pop();
        owner.segments.pop_punct();
        self.resolve(&owner)
    }

    fn inspect_impl(&mut self, name: &str, node: &ItemImpl) {
        for item in &node.items {
            let ImplItem::Fn(f) = item else { continue };
            let has_receiver = f.sig.receiver().is_some();

            if f.sig.ident == VALIDATION_HOOK {
                let hook = ValidationHook {
                    symbol: self.fn_symbol(f),
                    is_static: !has_receiver,
                    return_type: return_type_name(&f.sig.output),
                };
                self.entry(name).hooks.push(hook);
            } else if !has_receiver && returns_self(&f.sig.output, name) {
                let ctor = self.fn_symbol(f);
                self.entry(name).constructors.push(ctor);
            }
        }
    }

    fn fn_symbol(&self, f: &ImplItemFn) -> Symbol {
        Symbol::new(f.sig.ident.to_string())
            .with_declaration(self.ctx.declaration(f, &f.attrs))
            .with_location(self.ctx.location(f.sig.ident.span()))
    }
}

fn return_type_name(output: &ReturnType) -> Option<String> {
    match output {
        ReturnType::Default => None,
        ReturnType::Type(_, ty) => match ty.as_ref() {
            Type::Path(p) => last_segment(&p.path),
            other => Some(crate::utils::type_to_string(other)),
        },
    }
}

fn returns_self(output: &ReturnType, name: &str) -> bool {
    match output {
        ReturnType::Default => false,
        ReturnType::Type(_, ty) => is_self_type(ty, name),
    }
}

fn is_self_type(ty: &Type, name: &str) -> bool {
    let Type::Path(p) = ty else { return false };
    let Some(seg) = p.path.segments.last() else {
        return false;
    };

    if seg.ident == "Self" || seg.ident == name {
        return true;
    }
    if seg.ident != "Result" && seg.ident != "Option" {
        return false;
    }
    let PathArguments::AngleBracketed(args) = &seg.arguments else {
        return false;
    };
    matches!(args.args.first(), Some(GenericArgument::Type(inner)) if is_self_type(inner, name))
}

fn is_default_default(expr: &Expr) -> bool {
    let Expr::Call(call) = expr else { return false };
    let Expr::Path(func) = call.func.as_ref() else {
        return false;
    };
    let segments: Vec<String> = func
        .path
        .segments
        .iter()
        .map(|s| s.ident.to_string())
        .collect();
    segments.ends_with(&["Default".to_string(), "default".to_string()])
}

impl<'ast> Visit<'ast> for UsageVisitor<'_> {
    fn visit_item_mod(&mut self, node: &'ast ItemMod) {
        self.modules.push(node.ident.to_string());
        syn::visit::visit_item_mod(self, node);
        self.modules.pop();
    }

    fn visit_item_impl(&mut self, node: &'ast ItemImpl) {
        let owner = match node.self_ty.as_ref() {
            Type::Path(p) if p.qself.is_none() => last_segment(&p.path),
            _ => None,
        }
        .filter(|n| self.is_value_object(n));

        if let (None, Some(name)) = (&node.trait_, &owner) {
            self.inspect_impl(name, node);
        }

        self.impl_stack.push(owner);
        syn::visit::visit_item_impl(self, node);
        self.impl_stack.pop();
    }

    fn visit_expr_call(&mut self, node: &'ast ExprCall) {
        if let Expr::Path(func) = node.func.as_ref() {
            if let Some(name) = self.default_target(func) {
                let site = self.ctx.node(node);
                self.entry(&name).default_sites.push(site);
            } else if func.qself.is_none() {
                if let Some(name) = self.resolve(&func.path) {
                    let site = self.ctx.node(node);
                    self.entry(&name).direct_sites.push(site);
                }
            }
        }

        syn::visit::visit_expr_call(self, node);
    }

    fn visit_expr_struct(&mut self, node: &'ast ExprStruct) {
        if node.qself.is_none() {
            if let Some(name) = self.resolve(&node.path) {
                let site = self.ctx.node(node);
                self.entry(&name).direct_sites.push(site);
            }
        }

        syn::visit::visit_expr_struct(self, node);
    }

    fn visit_local(&mut self, node: &'ast Local) {
        if let (Pat::Type(typed), Some(init)) = (&node.pat, &node.init) {
            if let Type::Path(ty) = typed.ty.as_ref() {
                if let Some(name) = self.resolve(&ty.path) {
                    if is_default_default(&init.expr) {
                        let site = self.ctx.node(&init.expr);
                        self.entry(&name).default_sites.push(site);
                    }
                }
            }
        }

        syn::visit::visit_local(self, node);
    }
}
