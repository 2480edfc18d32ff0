use std::collections::HashMap;
use std::io::Write;

use log::debug;

use crate::aig::{Aig, PoType};
use crate::error::{AigError, Result};
use crate::literal::Literal;

use super::put_u;

/// Writes `aig` in binary AIGER format, returning the map from each node's
/// positive literal to its assigned AIGER variable index (0 = const, then
/// PIs, then latches, then ANDs in construction order). Combined with a
/// literal's own inverter bit this reconstructs the exact AIGER-encoded
/// literal the writer used for that node.
///
/// `aig` must have no remaining buffers (resolve them with
/// [`Aig::cutpoint`](crate::aig::Aig::cutpoint) first) and every JUSTICE PO
/// must belong to exactly one justice group.
pub fn write(aig: &Aig, w: &mut impl Write) -> Result<HashMap<Literal, u32>> {
    if aig.buffers().next().is_some() {
        return Err(AigError::not_supported(
            "cannot write AIGER: AIG still has unresolved buffers",
        ));
    }

    let mut id: HashMap<Literal, u32> = HashMap::new();
    id.insert(Literal::FALSE, 0);
    let mut next = 1u32;
    for f in aig.pis() {
        id.insert(f, next);
        next += 1;
    }
    for f in aig.latches() {
        id.insert(f, next);
        next += 1;
    }
    for f in aig.and_gates() {
        id.insert(f, next);
        next += 1;
    }

    let aiger_lit = |f: Literal| -> u64 {
        let base = *id.get(&f.positive()).expect("literal not numbered") as u64;
        (base << 1) | (f.is_negated() as u64)
    };

    let n_i = aig.n_pis();
    let n_l = aig.n_latches();
    let n_a = aig.n_ands();
    let m = n_i + n_l + n_a;
    let n_o = aig.po_ids_of_type(PoType::Output).count();
    let n_b = aig.po_ids_of_type(PoType::BadStates).count();
    let n_c = aig.po_ids_of_type(PoType::Constraint).count();
    let n_j = aig.n_justice();
    let n_f = aig.po_ids_of_type(PoType::Fairness).count();

    let grouped_justice: usize = aig.justice_groups().map(|g| g.len()).sum();
    if grouped_justice != aig.po_ids_of_type(PoType::Justice).count() {
        return Err(AigError::not_supported(
            "cannot write AIGER: every JUSTICE PO must belong to exactly one justice group",
        ));
    }

    let mut suffix = vec![n_b, n_c, n_j, n_f];
    while matches!(suffix.last(), Some(0)) {
        suffix.pop();
    }
    let mut header = format!("aig {} {} {} {} {}", m, n_i, n_l, n_o, n_a);
    for v in &suffix {
        header.push_str(&format!(" {}", v));
    }
    header.push('\n');
    debug!(
        "aiger header: M={} I={} L={} O={} A={} B={} C={} J={} F={}",
        m, n_i, n_l, n_o, n_a, n_b, n_c, n_j, n_f
    );
    w.write_all(header.as_bytes())?;

    for f in aig.latches() {
        let init = aig.latch_init(f);
        let next_lit = aig.latch_next(f).unwrap_or_else(|| {
            panic!("write: latch {} has no bound next-state literal", f)
        });
        let next_str = aiger_lit(next_lit).to_string();
        match init {
            crate::node::LatchInit::Zero => {
                writeln!(w, "{}", next_str)?;
            }
            crate::node::LatchInit::One => {
                writeln!(w, "{} 1", next_str)?;
            }
            crate::node::LatchInit::Nondet => {
                writeln!(w, "{} {}", next_str, aiger_lit(f))?;
            }
        }
    }

    for po in aig.po_ids_of_type(PoType::Output) {
        writeln!(w, "{}", aiger_lit(aig.po_fanin(po)))?;
    }
    for po in aig.po_ids_of_type(PoType::BadStates) {
        writeln!(w, "{}", aiger_lit(aig.po_fanin(po)))?;
    }
    for po in aig.po_ids_of_type(PoType::Constraint) {
        writeln!(w, "{}", aiger_lit(aig.po_fanin(po)))?;
    }
    for group in aig.justice_groups() {
        writeln!(w, "{}", group.len())?;
    }
    for group in aig.justice_groups() {
        for &po in group {
            writeln!(w, "{}", aiger_lit(aig.po_fanin(po)))?;
        }
    }
    for po in aig.po_ids_of_type(PoType::Fairness) {
        writeln!(w, "{}", aiger_lit(aig.po_fanin(po)))?;
    }

    for f in aig.and_gates() {
        let (l, r) = aig.and_fanins(f);
        let lhs = aiger_lit(f);
        let (big, small) = if aiger_lit(l) >= aiger_lit(r) {
            (aiger_lit(l), aiger_lit(r))
        } else {
            (aiger_lit(r), aiger_lit(l))
        };
        put_u(w, lhs - big)?;
        put_u(w, big - small)?;
    }

    for (idx, f) in aig.pis().enumerate() {
        if let Some(name) = aig.name_of(f) {
            writeln!(w, "i{} {}", idx, name)?;
        }
    }
    for (idx, f) in aig.latches().enumerate() {
        if let Some(name) = aig.name_of(f) {
            writeln!(w, "l{} {}", idx, name)?;
        }
    }
    for (idx, po) in aig.po_ids_of_type(PoType::Output).enumerate() {
        if let Some(name) = aig.po_name_of(po) {
            writeln!(w, "o{} {}", idx, name)?;
        }
    }
    for (idx, po) in aig.po_ids_of_type(PoType::BadStates).enumerate() {
        if let Some(name) = aig.po_name_of(po) {
            writeln!(w, "b{} {}", idx, name)?;
        }
    }
    for (idx, po) in aig.po_ids_of_type(PoType::Constraint).enumerate() {
        if let Some(name) = aig.po_name_of(po) {
            writeln!(w, "c{} {}", idx, name)?;
        }
    }
    for (idx, group) in aig.justice_groups().enumerate() {
        if let Some(&first_po) = group.first() {
            if let Some(name) = aig.po_name_of(first_po) {
                writeln!(w, "j{} {}", idx, name)?;
            }
        }
    }
    for (idx, po) in aig.po_ids_of_type(PoType::Fairness).enumerate() {
        if let Some(name) = aig.po_name_of(po) {
            writeln!(w, "f{} {}", idx, name)?;
        }
    }

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aig::Aig;

    #[test]
    fn rejects_unresolved_buffers() {
        let mut aig = Aig::new();
        let a = aig.create_pi(None);
        let buf = aig.create_buffer(a, Some("b"));
        aig.create_po(buf, PoType::Output, None);
        let mut out = Vec::new();
        assert!(write(&aig, &mut out).is_err());
    }

    #[test]
    fn writes_minimal_header() {
        let mut aig = Aig::new();
        let a = aig.create_pi(Some("a"));
        let b = aig.create_pi(Some("b"));
        let g = aig.create_and(a, b);
        aig.create_po(g, PoType::Output, Some("o"));
        let mut out = Vec::new();
        write(&aig, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let first_line = text.lines().next().unwrap();
        assert_eq!(first_line, "aig 3 2 0 1 1");
    }

    #[test]
    fn returns_node_to_aiger_literal_map() {
        let mut aig = Aig::new();
        let a = aig.create_pi(Some("a"));
        let b = aig.create_pi(Some("b"));
        let g = aig.create_and(a, b);
        aig.create_po(g, PoType::Output, Some("o"));
        let mut out = Vec::new();
        let map = write(&aig, &mut out).unwrap();
        assert_eq!(map[&a.positive()], 1);
        assert_eq!(map[&b.positive()], 2);
        assert_eq!(map[&g.positive()], 3);
    }
}
