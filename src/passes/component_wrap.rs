//! Pass 1 — component wrapping.
//!
//! Every top-level `ComponentIR`'s body becomes a single `return
//! $REGISTRY.execute(registryKey, () => { <original body> });` — applied
//! before any JSX lowering so downstream passes see a stable function
//! shape. Nested component expressions (`StmtKindIR::NestedComponent`) are
//! left untouched: nested functions inside a component are never wrapped.

use crate::error::InternalError;
use crate::ir::{ComponentIR, ExportIR, ImportItemIR, ItemIR, ModuleIR, StmtIR, StmtKindIR};
use crate::pipeline::PipelineContext;

use super::{call, registry_member, string_lit, zero_arg_block_arrow};

pub fn run(module: ModuleIR, ctx: &mut PipelineContext) -> Result<ModuleIR, InternalError> {
    let items = module.items.into_iter().map(|item| wrap_item(item, ctx)).collect();
    // `export component Foo() {...}` carries its `ComponentIR` inside
    // `ImportItemIR::Export(ExportIR::Item(..))`, not inside `module.items`
    // — skip it here and an exported component would never get its
    // `$REGISTRY.execute` wrapper.
    let imports = module
        .imports
        .into_iter()
        .map(|i| match i {
            ImportItemIR::Export(ExportIR::Item(item)) => ImportItemIR::Export(ExportIR::Item(Box::new(wrap_item(*item, ctx)))),
            other => other,
        })
        .collect();
    Ok(ModuleIR { imports, items, ..module })
}

fn wrap_item(item: ItemIR, ctx: &mut PipelineContext) -> ItemIR {
    match item {
        ItemIR::Component(c) => {
            let registry_source = ctx.runtime_paths.registry.clone();
            ctx.imports.ensure_named(&registry_source, "$REGISTRY");
            ItemIR::Component(Box::new(wrap(*c)))
        }
        other => other,
    }
}

fn wrap(component: ComponentIR) -> ComponentIR {
    let span = component.span;
    let thunk = zero_arg_block_arrow(component.body);
    let execute_call = call(
        registry_member("execute", span),
        vec![string_lit(component.registry_key.clone(), span), crate::ir::ExprIR::new(crate::ir::ExprKindIR::Arrow(Box::new(thunk)), span)],
        span,
    );
    let body = vec![StmtIR { kind: StmtKindIR::Return(Some(execute_call)), span }];
    ComponentIR { body, ..component }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use crate::options::TransformOptions;
    use crate::parser::parse;

    #[test]
    fn wraps_top_level_component_body_in_registry_execute() {
        let source = "component C() { return 1; }";
        let (program, _) = parse(source);
        let (module, _) = analyze(source, &program, false);
        let options = TransformOptions::default();
        let mut ctx = PipelineContext::new(&options);
        let module = run(module, &mut ctx).unwrap();

        let ItemIR::Component(c) = &module.items[0] else { panic!("expected a component") };
        assert_eq!(c.body.len(), 1);
        let StmtKindIR::Return(Some(expr)) = &c.body[0].kind else { panic!("expected a single return") };
        let crate::ir::ExprKindIR::Call(call) = &expr.kind else { panic!("expected a call") };
        let crate::ir::ExprKindIR::Member { property, .. } = &call.callee.kind else { panic!("expected a member callee") };
        let crate::ir::ExprKindIR::Ident(name) = &property.kind else { panic!("expected an identifier property") };
        assert_eq!(name, "execute");
    }
}
