//! Canonical erased signatures.
//!
//! The signature is the disambiguator for overloaded methods: a
//! comma-joined list of erased parameter types. Erasure strips generic
//! arguments and whitespace; arrays keep their `[]` suffix and varargs
//! normalize to an array of the element type.

use graph::Param;

/// Erases a declared type: generic arguments removed, whitespace
/// collapsed. `Map<String, List<User>>[]` becomes `Map[]`.
pub fn erase(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut depth = 0usize;
    for ch in raw.chars() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            c if depth == 0 && !c.is_whitespace() => out.push(c),
            _ => {}
        }
    }
    out
}

/// Erased parameter type for one declaration site; `varargs` appends
/// the array suffix the ellipsis stands for.
pub fn param_type(raw: &str, varargs: bool) -> String {
    let mut ty = erase(raw);
    if varargs {
        ty.push_str("[]");
    }
    ty
}

/// Comma-joined canonical signature over already-erased params.
pub fn canonical(params: &[Param]) -> String {
    params
        .iter()
        .map(|p| p.ty.as_str())
        .collect::<Vec<_>>()
        .join(",")
}
