//! `TransformOptions` — a plain, serializable, hashable-shaped struct with
//! `with_*` builder methods, so an external host (out of scope here) could
//! round-trip it through JSON.

use serde::{Deserialize, Serialize};

/// Module output form. Only `Esm` is currently produced, but the type is
/// still closed-union-shaped in case a future target is added without
/// breaking the public API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmitterFormat {
    #[default]
    Esm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IndentKind {
    #[default]
    TwoSpace,
    FourSpace,
    Tab,
}

impl IndentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndentKind::TwoSpace => "  ",
            IndentKind::FourSpace => "    ",
            IndentKind::Tab => "\t",
        }
    }
}

/// Module specifiers substituted into the emitted preamble.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuntimePaths {
    /// Source of `createSignal`/`createMemo`/`createEffect`/`useState`/
    /// `Fragment`.
    pub core: String,
    /// Source of `t_element`.
    pub jsx_runtime: String,
    /// Source of `$REGISTRY`, `Show`/`ShowRegistry`, `For`/`ForRegistry`,
    /// `Index`.
    pub registry: String,
}

impl Default for RuntimePaths {
    fn default() -> Self {
        Self {
            core: "dialect-runtime".to_string(),
            jsx_runtime: "dialect-runtime/jsx".to_string(),
            registry: "dialect-runtime/registry".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct EmitterOptions {
    #[serde(default)]
    pub format: EmitterFormat,
    #[serde(default)]
    pub indent: IndentKind,
    #[serde(default)]
    pub runtime_paths: RuntimePaths,
    /// Escape non-ASCII and control characters in string literals as
    /// `\uXXXX`/`\xXX`.
    #[serde(default)]
    pub ascii_safe_strings: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct ValidatorOptions {
    #[serde(default)]
    pub enabled: bool,
}

/// All options recognized by `transform(source, options)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransformOptions {
    /// Used in diagnostics and as the lexer's origin label.
    #[serde(default)]
    pub file_path: Option<String>,
    /// Enables structured logging to the debug sink (`tracing`).
    #[serde(default)]
    pub debug: bool,
    /// Promotes warnings to errors.
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub emitter: EmitterOptions,
    #[serde(default)]
    pub validator: ValidatorOptions,
    /// Ceiling for the bounded-iteration guard: a counter with a
    /// configurable ceiling, defaulting to 50,000.
    #[serde(default = "default_loop_ceiling")]
    pub loop_ceiling: u32,
}

fn default_loop_ceiling() -> u32 {
    50_000
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            file_path: None,
            debug: false,
            strict: false,
            emitter: EmitterOptions::default(),
            validator: ValidatorOptions::default(),
            loop_ceiling: default_loop_ceiling(),
        }
    }
}

impl TransformOptions {
    #[must_use]
    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub fn with_indent(mut self, indent: IndentKind) -> Self {
        self.emitter.indent = indent;
        self
    }

    #[must_use]
    pub fn with_runtime_paths(mut self, paths: RuntimePaths) -> Self {
        self.emitter.runtime_paths = paths;
        self
    }

    #[must_use]
    pub fn with_validator(mut self, enabled: bool) -> Self {
        self.validator.enabled = enabled;
        self
    }

    /// A deterministic, platform-independent byte encoding for cache-key
    /// use by an external caller.
    #[must_use]
    pub fn canonical_encoding(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"file:");
        buf.extend_from_slice(self.file_path.as_deref().unwrap_or("").as_bytes());
        buf.push(0);
        buf.extend_from_slice(b"debug:");
        buf.push(self.debug as u8);
        buf.extend_from_slice(b"strict:");
        buf.push(self.strict as u8);
        buf.extend_from_slice(b"indent:");
        buf.extend_from_slice(self.emitter.indent.as_str().as_bytes());
        buf.push(0);
        buf.extend_from_slice(b"runtime_core:");
        buf.extend_from_slice(self.emitter.runtime_paths.core.as_bytes());
        buf.push(0);
        buf.extend_from_slice(b"runtime_jsx:");
        buf.extend_from_slice(self.emitter.runtime_paths.jsx_runtime.as_bytes());
        buf.push(0);
        buf.extend_from_slice(b"runtime_registry:");
        buf.extend_from_slice(self.emitter.runtime_paths.registry.as_bytes());
        buf.push(0);
        buf.extend_from_slice(b"validator:");
        buf.push(self.validator.enabled as u8);
        buf.extend_from_slice(b"loop_ceiling:");
        buf.extend_from_slice(&self.loop_ceiling.to_le_bytes());
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let opts = TransformOptions::default();
        assert!(!opts.strict);
        assert!(!opts.debug);
        assert_eq!(opts.loop_ceiling, 50_000);
        assert_eq!(opts.emitter.indent, IndentKind::TwoSpace);
    }

    #[test]
    fn canonical_encoding_is_deterministic() {
        let a = TransformOptions::default().with_strict(true);
        let b = TransformOptions::default().with_strict(true);
        assert_eq!(a.canonical_encoding(), b.canonical_encoding());

        let c = TransformOptions::default();
        assert_ne!(a.canonical_encoding(), c.canonical_encoding());
    }

    #[test]
    fn serde_roundtrip() {
        let opts = TransformOptions::default().with_file_path("app.dialect.tsx").with_indent(IndentKind::Tab);
        let json = serde_json::to_string(&opts).unwrap();
        let back: TransformOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(opts, back);
    }
}
