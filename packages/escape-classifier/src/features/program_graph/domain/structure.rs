//! Structural checks shared by the builders and the program validator
//!
//! Checks return a plain reason; the caller decides whether it surfaces as
//! `MalformedFunction` (build time) or `IllFormedProgram` (classify time).

use rustc_hash::{FxHashMap, FxHashSet};

use super::function::{Function, ReturnKind};
use super::operation::{ConstructMode, ConstructionSite, Dispatch, Operation, SiteId};
use crate::features::type_catalog::TypeCatalog;

pub(crate) type CheckResult = std::result::Result<(), String>;

/// Is the return operation consistent with the site it returns and the
/// declared return kind?
pub(crate) fn check_return(
    catalog: &TypeCatalog,
    kind: ReturnKind,
    op: &Operation,
    site: &ConstructionSite,
) -> CheckResult {
    let required_mode = match op {
        Operation::ReturnValue(_) => ConstructMode::ByValue,
        Operation::ReturnPointer(_) | Operation::ReturnViaInterface(..) => ConstructMode::ByPointer,
        _ => return Ok(()),
    };
    if site.mode != required_mode {
        return Err(format!(
            "{} of site '{}' needs a {} construction, found {}",
            op.name(),
            site.id,
            required_mode,
            site.mode
        ));
    }

    match (op, kind) {
        (Operation::ReturnValue(_), ReturnKind::Value(ty))
        | (Operation::ReturnPointer(_), ReturnKind::Pointer(ty)) => {
            if site.ty == ty {
                Ok(())
            } else {
                Err(format!(
                    "site '{}' has type '{}' but the function returns '{}'",
                    site.id,
                    catalog.concrete_name(site.ty),
                    catalog.concrete_name(ty)
                ))
            }
        }
        (Operation::ReturnViaInterface(_, iface), ReturnKind::Interface(declared)) => {
            if *iface == declared {
                Ok(())
            } else {
                Err(format!(
                    "site '{}' is returned via '{}' but the function returns '{}'",
                    site.id,
                    catalog.interface_name(*iface),
                    catalog.interface_name(declared)
                ))
            }
        }
        (op, kind) => Err(format!(
            "{} of site '{}' in a function declared {}",
            op.name(),
            site.id,
            kind
        )),
    }
}

/// Branch count, key uniqueness and resolvability of a dispatch
pub(crate) fn check_dispatch_shape(dispatch: &Dispatch) -> CheckResult {
    let name = dispatch.discriminator().name();

    if dispatch.branches().len() < 2 {
        return Err(format!(
            "dispatch on '{}' needs at least two branches, found {}",
            name,
            dispatch.branches().len()
        ));
    }

    let mut keys = FxHashSet::default();
    for branch in dispatch.branches() {
        if !keys.insert(branch.key()) {
            return Err(format!(
                "dispatch on '{}' has duplicate branch key {}",
                name,
                branch.key()
            ));
        }
    }

    if dispatch.discriminator().is_resolved() && dispatch.live_branch().is_none() {
        return Err(format!(
            "resolved discriminator '{}' selects no branch",
            name
        ));
    }

    Ok(())
}

/// Full structural check of a function against a catalog
pub(crate) fn check_function(catalog: &TypeCatalog, function: &Function) -> CheckResult {
    match function.return_kind() {
        ReturnKind::Value(ty) | ReturnKind::Pointer(ty) if !catalog.contains_concrete(ty) => {
            return Err(format!(
                "declared return type {} is unknown to the catalog",
                ty
            ))
        }
        ReturnKind::Interface(iface) if !catalog.contains_interface(iface) => {
            return Err(format!(
                "declared return interface {} is unknown to the catalog",
                iface
            ))
        }
        _ => {}
    }

    let mut seen = FxHashSet::default();
    check_body(
        catalog,
        function.return_kind(),
        function.body(),
        &FxHashMap::default(),
        &mut seen,
        false,
    )
}

fn check_body(
    catalog: &TypeCatalog,
    kind: ReturnKind,
    body: &[Operation],
    outer: &FxHashMap<SiteId, ConstructionSite>,
    seen: &mut FxHashSet<SiteId>,
    in_branch: bool,
) -> CheckResult {
    let mut visible = outer.clone();

    for (index, op) in body.iter().enumerate() {
        if index > 0 && body[index - 1].is_terminator() {
            return Err(format!(
                "{} follows the terminating {}",
                op.name(),
                body[index - 1].name()
            ));
        }

        match op {
            Operation::Construct(site) => {
                if !catalog.contains_concrete(site.ty) {
                    return Err(format!(
                        "site '{}' has type {} unknown to the catalog",
                        site.id, site.ty
                    ));
                }
                if !seen.insert(site.id.clone()) {
                    return Err(format!("site '{}' is constructed twice", site.id));
                }
                visible.insert(site.id.clone(), site.clone());
            }
            Operation::ReturnValue(id)
            | Operation::ReturnPointer(id)
            | Operation::ReturnViaInterface(id, _) => {
                if let Operation::ReturnViaInterface(_, iface) = op {
                    if !catalog.contains_interface(*iface) {
                        return Err(format!(
                            "site '{}' is returned via {} unknown to the catalog",
                            id, iface
                        ));
                    }
                }
                let site = visible.get(id).ok_or_else(|| {
                    format!("{} references site '{}' before its construction", op.name(), id)
                })?;
                check_return(catalog, kind, op, site)?;
            }
            Operation::Call(_) => {}
            Operation::Dispatch(dispatch) => {
                if in_branch {
                    return Err("dispatch nested inside a dispatch branch".to_string());
                }
                check_dispatch_shape(dispatch)?;
                for branch in dispatch.branches() {
                    check_body(catalog, kind, branch.body(), &visible, seen, true)
                        .map_err(|reason| format!("branch {}: {}", branch.key(), reason))?;
                }
            }
        }
    }

    match body.last() {
        Some(op) if op.is_terminator() => Ok(()),
        Some(op) => Err(format!(
            "body ends in {} instead of a return or dispatch",
            op.name()
        )),
        None => Err("body is empty".to_string()),
    }
}
