//! Integration tests for the concrete end-to-end scenarios and boundary
//! behaviors, exercised through the crate's public `transform` entry point
//! only.

use dialect_core::TransformOptions;

#[test]
fn scenario_1_counter() {
    let source = "component Counter() { const [c, setC] = signal(0); return <button onClick={() => setC(c()+1)}>{c()}</button>; }";
    let result = dialect_core::transform(source, &TransformOptions::default());
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    assert!(result.code.contains("$REGISTRY.execute('component:Counter'"), "{}", result.code);
    assert!(result.code.contains("createSignal(0)"), "{}", result.code);
    assert!(result.code.contains("const [c, setC] = createSignal(0)"), "{}", result.code);
    assert!(result.code.contains("t_element('button'"), "{}", result.code);
    assert!(result.code.contains("$REGISTRY.wire("), "{}", result.code);
    assert!(result.code.contains("import { createSignal }"), "{}", result.code);
    assert!(result.code.contains("$REGISTRY"), "{}", result.code);
    assert!(result.code.contains("t_element"), "{}", result.code);
}

#[test]
fn scenario_2_fragment_with_text() {
    let result = dialect_core::transform("const el = <>Hello</>;", &TransformOptions::default());
    assert!(result.code.contains("t_element(Fragment, null, ['Hello'])"), "{}", result.code);
}

#[test]
fn scenario_3_show_with_signal() {
    let source = "const [visible, setVisible] = signal(true); const el = <Show when={visible()} fallback={<span/>}><p>hi</p></Show>;";
    let result = dialect_core::transform(source, &TransformOptions::default());
    assert!(result.code.contains("when: visible"), "{}", result.code);
    assert!(!result.code.contains("when: visible()"), "{}", result.code);
}

#[test]
fn scenario_4_style_with_reactive_property() {
    let source = "const [theme, setTheme] = signal('dark'); const el = <div style={{ color: theme() }}>x</div>;";
    let result = dialect_core::transform(source, &TransformOptions::default());
    assert!(result.code.contains("color: () => theme()"), "{}", result.code);
}

#[test]
fn scenario_5_default_parameter_component() {
    let source = "component Avatar({ size = 'md', name }) { return <div>{name}</div>; }";
    let result = dialect_core::transform(source, &TransformOptions::default());
    assert!(result.code.contains("size = 'md'"), "{}", result.code);
    // `name` is a plain destructured parameter, not a signal getter, so it
    // is inlined as a bare identifier child rather than a wired text node.
    assert!(!result.code.contains("$REGISTRY.wire"), "{}", result.code);
    assert!(result.code.contains("[name]"), "{}", result.code);
}

#[test]
fn scenario_6_template_literal_with_interpolation() {
    let source = "const [who, setWho] = signal('world'); const s = `hi ${who()}`;";
    let result = dialect_core::transform(source, &TransformOptions::default());
    assert!(result.code.contains("`hi ${who()}`"), "{}", result.code);
}

#[test]
fn boundary_empty_source() {
    let result = dialect_core::transform("", &TransformOptions::default());
    assert_eq!(result.code, "");
    assert!(result.diagnostics.is_empty());
}

#[test]
fn boundary_whitespace_and_comments_only() {
    let result = dialect_core::transform("  \n// comment\n/* block */\n", &TransformOptions::default());
    assert_eq!(result.code, "");
    assert!(result.diagnostics.is_empty());
}

#[test]
fn boundary_empty_fragment() {
    let result = dialect_core::transform("const el = <></>;", &TransformOptions::default());
    assert!(result.code.contains("t_element(Fragment, null, [])"), "{}", result.code);
}

#[test]
fn boundary_unresolved_name_warns_but_still_emits() {
    let result = dialect_core::transform("const el = <div>{x()}</div>;", &TransformOptions::default());
    assert!(!result.code.is_empty(), "{:?}", result.diagnostics);
    assert!(result.code.contains("x()"), "{}", result.code);
}

#[test]
fn determinism_across_repeated_calls() {
    let source = "component Counter() { const [c, setC] = signal(0); return <button onClick={() => setC(c()+1)}>{c()}</button>; }";
    let a = dialect_core::transform(source, &TransformOptions::default());
    let b = dialect_core::transform(source, &TransformOptions::default());
    assert_eq!(a.code, b.code);
}
