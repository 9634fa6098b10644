//! Dependency extraction from cell expressions.
//!
//! Walks a parsed formula and collects every cell it references. This is
//! the edge set used for cycle detection. Nothing is evaluated here and
//! no type checking happens; a formula that fails to parse has no
//! dependencies at all.

use std::collections::BTreeSet;

use super::ast::Expr;
use super::cell_ref::CellRef;
use super::parser::parse_formula;

/// Extract all cell references from a raw cell expression.
///
/// Non-formula text (no leading `=`) and unparseable formulas yield an
/// empty set.
pub fn extract_dependencies(expression: &str) -> BTreeSet<CellRef> {
    let mut deps = BTreeSet::new();
    let Some(body) = expression.strip_prefix('=') else {
        return deps;
    };
    if let Ok(ast) = parse_formula(body) {
        collect_references(&ast, &mut deps);
    }
    deps
}

/// Collect every cell reference reachable in `expr` into `deps`.
pub fn collect_references(expr: &Expr, deps: &mut BTreeSet<CellRef>) {
    match expr {
        Expr::Integer(_) | Expr::Boolean(_) | Expr::DanglingRef(_) => {}
        Expr::CellRef(cell) => {
            deps.insert(cell.clone());
        }
        Expr::Group(inner) => collect_references(inner, deps),
        Expr::BinaryOp { left, right, .. } => {
            collect_references(left, deps);
            collect_references(right, deps);
        }
        Expr::Function { args, .. } => {
            for arg in args {
                collect_references(arg, deps);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(names: &[&str]) -> BTreeSet<CellRef> {
        names
            .iter()
            .map(|name| CellRef::from_str(name).unwrap())
            .collect()
    }

    #[test]
    fn test_literals_have_no_dependencies() {
        assert!(extract_dependencies("").is_empty());
        assert!(extract_dependencies("42").is_empty());
        assert!(extract_dependencies("A1+B1").is_empty());
    }

    #[test]
    fn test_collects_all_operands_and_arguments() {
        let deps = extract_dependencies("=a1 + MMAX(B2, (C3 * 2), INC(d4)) = E5");
        assert_eq!(deps, refs(&["A1", "B2", "C3", "D4", "E5"]));
    }

    #[test]
    fn test_duplicate_references_collapse() {
        assert_eq!(extract_dependencies("=A1 + a1 * A1"), refs(&["A1"]));
    }

    #[test]
    fn test_unknown_functions_still_contribute_references() {
        assert_eq!(extract_dependencies("=NOPE(B1)"), refs(&["B1"]));
    }

    #[test]
    fn test_dangling_references_are_not_edges() {
        assert_eq!(extract_dependencies("=A0 + A01 + B2"), refs(&["B2"]));
    }

    #[test]
    fn test_unparseable_formula_has_no_dependencies() {
        assert!(extract_dependencies("=A1 +").is_empty());
        assert!(extract_dependencies("=(B1").is_empty());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let first = extract_dependencies("=A1*B2");
        let second = extract_dependencies("=A1*B2");
        assert_eq!(first, second);
    }
}
